/// Memory layout of texture pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PixelFormat {
    /// Bytes `R, G, B, A` in memory order.
    Rgba32,
    /// Bytes `B, G, R, A` in memory order.
    Bgra32,
}

impl PixelFormat {
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba32 | Self::Bgra32 => 4,
        }
    }
}

/// How a texture is expected to be updated.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TextureAccess {
    /// Uploaded rarely (font atlases, images).
    Static,
    /// Re-uploaded frequently.
    Streaming,
    /// Usable as a render target.
    Target,
}

/// How textured geometry combines with what is already drawn.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum BlendMode {
    /// Source replaces destination.
    #[default]
    None,
    /// Straight alpha blending: `dst = src * a + dst * (1 - a)`.
    Blend,
}
