use super::Vec2;

/// Four floats. Clip rectangles use it as `(min.x, min.y, max.x, max.y)`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Builds a clip rectangle from its corners.
    #[inline]
    pub const fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new(min.x, min.y, max.x, max.y)
    }

    /// Top-left corner when used as a clip rectangle.
    #[inline]
    pub const fn min(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner when used as a clip rectangle.
    #[inline]
    pub const fn max(self) -> Vec2 {
        Vec2::new(self.z, self.w)
    }
}

impl From<[f32; 4]> for Vec4 {
    #[inline]
    fn from(v: [f32; 4]) -> Self {
        Vec4::new(v[0], v[1], v[2], v[3])
    }
}
