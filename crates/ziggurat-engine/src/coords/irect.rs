/// Axis-aligned rectangle in whole pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct IRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl IRect {
    pub const ZERO: IRect = IRect::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle at the origin covering `width` x `height`.
    #[inline]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, clamp_i32(width), clamp_i32(height))
    }

    #[inline]
    pub const fn right(self) -> i32 {
        self.x.saturating_add(self.w)
    }

    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y.saturating_add(self.h)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Moves the rectangle by `(dx, dy)`.
    #[inline]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy), self.w, self.h)
    }

    /// Half-open containment: `[min, max)`.
    #[inline]
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    #[inline]
    pub fn intersect(self, other: IRect) -> Option<IRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(IRect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }
}

#[inline]
fn clamp_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: i32, y: i32, w: i32, h: i32) -> IRect {
        IRect::new(x, y, w, h)
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        assert_eq!(r(0, 0, 10, 10).intersect(r(5, 5, 10, 10)), Some(r(5, 5, 5, 5)));
    }

    #[test]
    fn intersect_contained() {
        let inner = r(10, 10, 20, 20);
        assert_eq!(r(0, 0, 100, 100).intersect(inner), Some(inner));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0, 0, 10, 10).intersect(r(10, 0, 10, 10)).is_none());
    }

    #[test]
    fn intersect_disjoint_returns_none() {
        assert!(r(0, 0, 5, 5).intersect(r(20, 20, 5, 5)).is_none());
    }

    // ── misc ──────────────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let rect = r(0, 0, 10, 10);
        assert!(rect.contains(0, 0));
        assert!(rect.contains(9, 9));
        assert!(!rect.contains(10, 10));
    }

    #[test]
    fn is_empty_zero_or_negative() {
        assert!(r(0, 0, 0, 5).is_empty());
        assert!(r(0, 0, 5, -1).is_empty());
        assert!(!r(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn from_size_saturates() {
        assert_eq!(IRect::from_size(u32::MAX, 4), r(0, 0, i32::MAX, 4));
    }

    #[test]
    fn translated_moves_origin_only() {
        assert_eq!(r(1, 2, 3, 4).translated(10, -2), r(11, 0, 3, 4));
    }
}
