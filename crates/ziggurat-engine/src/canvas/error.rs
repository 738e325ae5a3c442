use std::fmt;

use ziggurat_draw::TextureId;

/// Failure reported by a [`Canvas`](super::Canvas) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    /// Texture could not be allocated.
    TextureCreation(String),
    /// Id does not name a live texture.
    UnknownTexture(TextureId),
    /// Pixel data does not match the texture or target rectangle.
    InvalidTextureUpload(String),
    /// Geometry streams are shorter than the vertex/index counts claim.
    InvalidGeometry(String),
    /// An index refers past the end of the vertex streams.
    IndexOutOfRange { index: u32, num_vertices: usize },
    /// The presentation surface failed and cannot recover.
    Surface(String),
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TextureCreation(msg) => write!(f, "texture creation failed: {msg}"),
            Self::UnknownTexture(id) => write!(f, "unknown texture id {}", id.id()),
            Self::InvalidTextureUpload(msg) => write!(f, "invalid texture upload: {msg}"),
            Self::InvalidGeometry(msg) => write!(f, "invalid geometry: {msg}"),
            Self::IndexOutOfRange { index, num_vertices } => {
                write!(f, "index {index} out of range for {num_vertices} vertices")
            }
            Self::Surface(msg) => write!(f, "surface error: {msg}"),
        }
    }
}

impl std::error::Error for CanvasError {}
