use std::fmt;

use ziggurat_draw::DrawDataError;

use crate::canvas::CanvasError;

/// Fatal backend failure.
///
/// Per-draw problems are not errors at this level; they are logged and
/// counted in [`FrameStats`](super::FrameStats).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The font texture could not be created, uploaded or configured.
    FontTexture(CanvasError),
    /// The GUI library handed out an unusable font atlas.
    InvalidAtlas(DrawDataError),
    /// Index width or vertex layout the backend cannot consume.
    UnsupportedConfiguration(DrawDataError),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontTexture(e) => write!(f, "font texture: {e}"),
            Self::InvalidAtlas(e) => write!(f, "{e}"),
            Self::UnsupportedConfiguration(e) => write!(f, "unsupported draw data: {e}"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FontTexture(e) => Some(e),
            Self::InvalidAtlas(e) | Self::UnsupportedConfiguration(e) => Some(e),
        }
    }
}

impl From<DrawDataError> for BackendError {
    fn from(e: DrawDataError) -> Self {
        match e {
            DrawDataError::InvalidAtlas(_) => Self::InvalidAtlas(e),
            _ => Self::UnsupportedConfiguration(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn draw_data_errors_are_classified() {
        let e: BackendError = DrawDataError::UnsupportedIndexSize(3).into();
        assert!(matches!(e, BackendError::UnsupportedConfiguration(_)));
        let e: BackendError = DrawDataError::InvalidAtlas("x".into()).into();
        assert!(matches!(e, BackendError::InvalidAtlas(_)));
    }

    #[test]
    fn source_is_exposed() {
        let e = BackendError::FontTexture(CanvasError::TextureCreation("oom".into()));
        assert_eq!(e.to_string(), "font texture: texture creation failed: oom");
        assert!(e.source().is_some());
    }
}
