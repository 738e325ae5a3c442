use crate::error::DrawDataError;

/// Byte size of the position field (`[f32; 2]`).
pub const POS_SIZE: usize = 8;
/// Byte size of the texture coordinate field (`[f32; 2]`).
pub const UV_SIZE: usize = 8;
/// Byte size of the packed color field (`[u8; 4]`).
pub const COL_SIZE: usize = 4;

/// Placement of the vertex fields inside one vertex record.
///
/// Reported by the GUI library alongside each frame; field order and padding
/// depend on how the library was built, so nothing here is assumed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct VertexLayout {
    /// Size of one vertex record in bytes.
    pub stride: usize,
    pub pos_offset: usize,
    pub uv_offset: usize,
    pub col_offset: usize,
}

impl VertexLayout {
    #[inline]
    pub const fn new(stride: usize, pos_offset: usize, uv_offset: usize, col_offset: usize) -> Self {
        Self { stride, pos_offset, uv_offset, col_offset }
    }

    /// Checks that every field fits inside the stride.
    pub fn validate(&self) -> Result<(), DrawDataError> {
        if self.stride == 0 {
            return Err(DrawDataError::InvalidVertexLayout("zero stride".into()));
        }
        let fields = [
            ("position", self.pos_offset, POS_SIZE),
            ("uv", self.uv_offset, UV_SIZE),
            ("color", self.col_offset, COL_SIZE),
        ];
        for (name, offset, size) in fields {
            if offset.checked_add(size).is_none_or(|end| end > self.stride) {
                return Err(DrawDataError::InvalidVertexLayout(format!(
                    "{name} field at offset {offset} ({size} bytes) exceeds stride {}",
                    self.stride
                )));
            }
        }
        Ok(())
    }

    /// Number of whole vertex records in `bytes`.
    #[inline]
    pub fn vertex_count(&self, bytes: usize) -> usize {
        if self.stride == 0 { 0 } else { bytes / self.stride }
    }
}

/// Width of one index element.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexWidth {
    U8,
    U16,
    U32,
}

impl IndexWidth {
    /// Maps a byte size reported by the GUI library to a width.
    pub fn from_size(size: usize) -> Result<Self, DrawDataError> {
        match size {
            1 => Ok(Self::U8),
            2 => Ok(Self::U16),
            4 => Ok(Self::U32),
            n => Err(DrawDataError::UnsupportedIndexSize(n)),
        }
    }

    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Decodes the `i`-th index of a native-endian index buffer.
    ///
    /// Returns `None` when `i` is past the end of `bytes`.
    #[inline]
    pub fn read(self, bytes: &[u8], i: usize) -> Option<u32> {
        let start = i.checked_mul(self.size())?;
        let raw = bytes.get(start..start + self.size())?;
        Some(match self {
            Self::U8 => u32::from(raw[0]),
            Self::U16 => u32::from(u16::from_ne_bytes([raw[0], raw[1]])),
            Self::U32 => u32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]]),
        })
    }

    /// Appends `index` to `out` in native-endian order.
    ///
    /// Values that do not fit the width are truncated.
    #[inline]
    pub fn write(self, out: &mut Vec<u8>, index: u32) {
        match self {
            Self::U8 => out.push(index as u8),
            Self::U16 => out.extend_from_slice(&(index as u16).to_ne_bytes()),
            Self::U32 => out.extend_from_slice(&index.to_ne_bytes()),
        }
    }
}
