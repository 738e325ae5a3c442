use std::fmt;

/// Draw data the backend cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawDataError {
    /// Index width reported by the GUI library is not 1, 2 or 4 bytes.
    UnsupportedIndexSize(usize),
    /// Vertex fields do not fit inside the vertex stride.
    InvalidVertexLayout(String),
    /// Font atlas dimensions and pixel buffer disagree.
    InvalidAtlas(String),
}

impl fmt::Display for DrawDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedIndexSize(n) => write!(f, "unsupported index size: {n} bytes"),
            Self::InvalidVertexLayout(msg) => write!(f, "invalid vertex layout: {msg}"),
            Self::InvalidAtlas(msg) => write!(f, "invalid font atlas: {msg}"),
        }
    }
}

impl std::error::Error for DrawDataError {}
