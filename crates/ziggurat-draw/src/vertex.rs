use core::mem::{offset_of, size_of};

use crate::layout::{VertexLayout, COL_SIZE, POS_SIZE, UV_SIZE};

/// The GUI library's default vertex record.
///
/// Libraries built with a different vertex struct report their own
/// [`VertexLayout`]; this type is what the stock build produces.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DrawVert {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    /// Straight-alpha RGBA bytes.
    pub col: [u8; 4],
}

impl DrawVert {
    pub const LAYOUT: VertexLayout = VertexLayout::new(
        size_of::<DrawVert>(),
        offset_of!(DrawVert, pos),
        offset_of!(DrawVert, uv),
        offset_of!(DrawVert, col),
    );

    #[inline]
    pub const fn new(pos: [f32; 2], uv: [f32; 2], col: [u8; 4]) -> Self {
        Self { pos, uv, col }
    }

    /// Appends one record laid out per `layout` (padding bytes are zero).
    ///
    /// `layout` must be valid (see [`VertexLayout::validate`]).
    pub fn encode(&self, layout: &VertexLayout, out: &mut Vec<u8>) {
        let base = out.len();
        out.resize(base + layout.stride, 0);
        let rec = &mut out[base..];

        let pos = [self.pos[0].to_ne_bytes(), self.pos[1].to_ne_bytes()].concat();
        let uv = [self.uv[0].to_ne_bytes(), self.uv[1].to_ne_bytes()].concat();
        rec[layout.pos_offset..layout.pos_offset + POS_SIZE].copy_from_slice(&pos);
        rec[layout.uv_offset..layout.uv_offset + UV_SIZE].copy_from_slice(&uv);
        rec[layout.col_offset..layout.col_offset + COL_SIZE].copy_from_slice(&self.col);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_layout_matches_struct() {
        let l = DrawVert::LAYOUT;
        assert_eq!(l.stride, 20);
        assert_eq!((l.pos_offset, l.uv_offset, l.col_offset), (0, 8, 16));
        assert!(l.validate().is_ok());
    }

    #[test]
    fn encode_respects_custom_offsets() {
        let layout = VertexLayout::new(24, 4, 12, 0);
        let mut out = vec![0xAA];
        DrawVert::new([1.0, 2.0], [0.5, 0.25], [1, 2, 3, 4]).encode(&layout, &mut out);

        assert_eq!(out.len(), 1 + 24);
        let rec = &out[1..];
        assert_eq!(&rec[0..4], &[1, 2, 3, 4]);
        assert_eq!(f32::from_ne_bytes(rec[4..8].try_into().unwrap()), 1.0);
        assert_eq!(f32::from_ne_bytes(rec[8..12].try_into().unwrap()), 2.0);
        assert_eq!(f32::from_ne_bytes(rec[12..16].try_into().unwrap()), 0.5);
        assert_eq!(f32::from_ne_bytes(rec[16..20].try_into().unwrap()), 0.25);
        assert_eq!(&rec[20..24], &[0, 0, 0, 0]);
    }
}
