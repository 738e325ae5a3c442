/// Straight-alpha RGBA with float channels, nominally in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Scales each channel by 255 and truncates.
    ///
    /// Out-of-range channels saturate to `0` / `255`; NaN maps to `0`.
    #[inline]
    pub fn to_rgba8(self) -> Rgba8 {
        // `as u8` on f32 saturates and maps NaN to 0.
        Rgba8::new(
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
            (self.a * 255.0) as u8,
        )
    }
}

impl From<[f32; 4]> for ColorRgba {
    #[inline]
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Straight-alpha RGBA with 8-bit channels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Channels as `f64` in `[0, 1]`, for GPU clear values.
    #[inline]
    pub fn to_unit_f64(self) -> [f64; 4] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
            f64::from(self.a) / 255.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_rgba8_truncates() {
        let c = ColorRgba::new(0.45, 0.55, 0.60, 1.00).to_rgba8();
        // 0.45 * 255 = 114.75, 0.55 * 255 = 140.25, 0.60 * 255 = 153.0
        assert_eq!(c, Rgba8::new(114, 140, 153, 255));
    }

    #[test]
    fn to_rgba8_saturates_out_of_range() {
        let c = ColorRgba::new(-0.5, 2.0, f32::NAN, 1.0).to_rgba8();
        assert_eq!(c, Rgba8::new(0, 255, 0, 255));
    }

    #[test]
    fn unit_f64_round_trips_extremes() {
        assert_eq!(Rgba8::WHITE.to_unit_f64(), [1.0; 4]);
        assert_eq!(Rgba8::new(0, 0, 0, 0).to_unit_f64(), [0.0; 4]);
    }
}
