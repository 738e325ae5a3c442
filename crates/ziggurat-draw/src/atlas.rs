use crate::error::DrawDataError;

/// Bytes per RGBA32 texel.
pub const RGBA32_BYTES_PER_PIXEL: usize = 4;

/// Rasterized font atlas, RGBA with 8 bits per channel, rows tightly packed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FontAtlasImage<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
}

impl<'a> FontAtlasImage<'a> {
    #[inline]
    pub const fn new(width: u32, height: u32, pixels: &'a [u8]) -> Self {
        Self { width, height, pixels }
    }

    /// Bytes per row.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * RGBA32_BYTES_PER_PIXEL
    }

    /// Checks for non-zero dimensions and a pixel buffer of exactly
    /// `width * height * 4` bytes.
    pub fn validate(&self) -> Result<(), DrawDataError> {
        if self.width == 0 || self.height == 0 {
            return Err(DrawDataError::InvalidAtlas(format!(
                "zero-sized atlas {}x{}",
                self.width, self.height
            )));
        }
        let expected = self.pitch() * self.height as usize;
        if self.pixels.len() != expected {
            return Err(DrawDataError::InvalidAtlas(format!(
                "{}x{} atlas needs {expected} bytes, got {}",
                self.width,
                self.height,
                self.pixels.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_buffer_is_valid() {
        let px = vec![0u8; 4 * 3 * 4];
        let img = FontAtlasImage::new(4, 3, &px);
        assert_eq!(img.pitch(), 16);
        assert!(img.validate().is_ok());
    }

    #[test]
    fn short_buffer_is_rejected() {
        let px = vec![0u8; 10];
        assert!(FontAtlasImage::new(4, 3, &px).validate().is_err());
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(FontAtlasImage::new(0, 3, &[]).validate().is_err());
    }
}
