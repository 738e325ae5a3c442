use crate::coords::{IRect, Vec2, Vec4};

/// Maps draw-data clip rectangles into framebuffer pixels.
///
/// `min = (clip.min - display_pos) * scale`, likewise for `max`; the result is
/// clamped to `[0, framebuffer]` and truncated to whole pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipProjection {
    display_pos: Vec2,
    scale: Vec2,
    framebuffer: Vec2,
}

impl ClipProjection {
    pub fn new(display_pos: Vec2, scale: Vec2, framebuffer: Vec2) -> Self {
        Self { display_pos, scale, framebuffer }
    }

    /// Returns `None` when nothing of the clip rect is left after clamping,
    /// or when any projected coordinate is NaN. Infinite edges clamp.
    pub fn project(&self, clip: Vec4) -> Option<IRect> {
        let min = (clip.min() - self.display_pos) * self.scale;
        let max = (clip.max() - self.display_pos) * self.scale;
        // `Vec2::min`/`max` drop NaN operands, so check before clamping.
        if [min.x, min.y, max.x, max.y].iter().any(|v| v.is_nan()) {
            return None;
        }

        let min = min.max(Vec2::zero());
        let max = max.min(self.framebuffer);
        if max.x <= min.x || max.y <= min.y {
            return None;
        }

        Some(IRect::new(
            min.x as i32,
            min.y as i32,
            (max.x - min.x) as i32,
            (max.y - min.y) as i32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> ClipProjection {
        // display (10,10) 100x100 rendered into a 200x200 framebuffer.
        ClipProjection::new(Vec2::new(10.0, 10.0), Vec2::splat(2.0), Vec2::splat(200.0))
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[test]
    fn clip_is_offset_and_scaled() {
        let clip = Vec4::new(20.0, 20.0, 60.0, 60.0);
        // (20,20)-(100,100) in framebuffer pixels.
        assert_eq!(projection().project(clip), Some(IRect::new(20, 20, 80, 80)));
    }

    #[test]
    fn fractional_coordinates_truncate() {
        let p = ClipProjection::new(Vec2::zero(), Vec2::splat(1.0), Vec2::splat(100.0));
        let clip = Vec4::new(1.7, 2.2, 10.9, 5.5);
        // w = (10.9 - 1.7) as i32 = 9, h = (5.5 - 2.2) as i32 = 3
        assert_eq!(p.project(clip), Some(IRect::new(1, 2, 9, 3)));
    }

    // ── clamping ──────────────────────────────────────────────────────────

    #[test]
    fn clip_is_clamped_to_framebuffer() {
        let clip = Vec4::new(-50.0, 0.0, 500.0, 70.0);
        assert_eq!(projection().project(clip), Some(IRect::new(0, 0, 200, 120)));
    }

    #[test]
    fn clamped_rect_stays_inside_framebuffer() {
        let p = projection();
        let fb = 200;
        for i in -4..12 {
            for j in -4..12 {
                let a = i as f32 * 17.0;
                let b = j as f32 * 23.0;
                let clip = Vec4::new(a, b, a + 40.0, b + 90.0);
                if let Some(r) = p.project(clip) {
                    assert!(r.x >= 0 && r.y >= 0, "{r:?}");
                    assert!(r.right() <= fb && r.bottom() <= fb, "{r:?}");
                }
            }
        }
    }

    #[test]
    fn empty_or_inverted_clip_is_rejected() {
        let p = projection();
        assert_eq!(p.project(Vec4::new(30.0, 30.0, 30.0, 60.0)), None);
        assert_eq!(p.project(Vec4::new(60.0, 60.0, 20.0, 20.0)), None);
        // Entirely left of the display.
        assert_eq!(p.project(Vec4::new(-100.0, 0.0, 0.0, 50.0)), None);
    }

    // ── non-finite input ──────────────────────────────────────────────────

    #[test]
    fn nan_clip_is_rejected() {
        let p = projection();
        assert_eq!(p.project(Vec4::new(f32::NAN, 0.0, 50.0, 50.0)), None);
        assert_eq!(p.project(Vec4::new(0.0, f32::NAN, 50.0, 50.0)), None);
        assert_eq!(p.project(Vec4::new(0.0, 0.0, f32::NAN, 50.0)), None);
        assert_eq!(p.project(Vec4::new(0.0, 0.0, 50.0, f32::NAN)), None);
    }

    #[test]
    fn nan_scale_is_rejected() {
        let p = ClipProjection::new(Vec2::zero(), Vec2::new(f32::NAN, 1.0), Vec2::splat(100.0));
        assert_eq!(p.project(Vec4::new(0.0, 0.0, 50.0, 50.0)), None);
    }

    #[test]
    fn infinite_clip_clamps_to_framebuffer() {
        let p = projection();
        let clip = Vec4::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::INFINITY, f32::INFINITY);
        assert_eq!(p.project(clip), Some(IRect::new(0, 0, 200, 200)));
    }
}
