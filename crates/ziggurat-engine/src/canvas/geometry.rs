use ziggurat_draw::IndexWidth;

use super::CanvasError;
use crate::paint::Rgba8;

/// A strided view over one vertex attribute.
///
/// Element `i` starts at byte `i * stride`. Attributes are read unaligned in
/// native byte order, so the view can point anywhere inside a raw vertex
/// buffer.
#[derive(Debug, Copy, Clone)]
pub struct Stream<'a> {
    bytes: &'a [u8],
    stride: usize,
}

impl<'a> Stream<'a> {
    #[inline]
    pub const fn new(bytes: &'a [u8], stride: usize) -> Self {
        Self { bytes, stride }
    }

    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether `count` elements of `size` bytes are readable.
    pub fn covers(&self, count: usize, size: usize) -> bool {
        if count == 0 {
            return true;
        }
        (count - 1)
            .checked_mul(self.stride)
            .and_then(|last| last.checked_add(size))
            .is_some_and(|end| end <= self.bytes.len())
    }

    #[inline]
    fn element(&self, i: usize, size: usize) -> Option<&'a [u8]> {
        let start = i.checked_mul(self.stride)?;
        self.bytes.get(start..start.checked_add(size)?)
    }

    /// Reads two `f32`s at element `i`.
    #[inline]
    pub fn read_vec2(&self, i: usize) -> Option<[f32; 2]> {
        self.element(i, 8).map(bytemuck::pod_read_unaligned::<[f32; 2]>)
    }

    /// Reads four color bytes at element `i`.
    #[inline]
    pub fn read_rgba8(&self, i: usize) -> Option<Rgba8> {
        self.element(i, 4)
            .map(|raw| Rgba8::new(raw[0], raw[1], raw[2], raw[3]))
    }
}

/// One decoded vertex.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeometryVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: Rgba8,
}

/// Arguments of one indexed geometry draw.
#[derive(Debug, Copy, Clone)]
pub struct Geometry<'a> {
    pub xy: Stream<'a>,
    pub color: Stream<'a>,
    pub uv: Stream<'a>,
    pub num_vertices: usize,
    pub indices: &'a [u8],
    pub num_indices: usize,
    pub index_width: IndexWidth,
}

impl<'a> Geometry<'a> {
    /// Checks stream lengths and that every index names a vertex.
    pub fn validate(&self) -> Result<(), CanvasError> {
        let streams = [("position", &self.xy, 8), ("color", &self.color, 4), ("uv", &self.uv, 8)];
        for (name, stream, size) in streams {
            if !stream.covers(self.num_vertices, size) {
                return Err(CanvasError::InvalidGeometry(format!(
                    "{name} stream too short for {} vertices",
                    self.num_vertices
                )));
            }
        }

        let index_bytes = self.num_indices.checked_mul(self.index_width.size());
        if index_bytes.is_none_or(|n| n > self.indices.len()) {
            return Err(CanvasError::InvalidGeometry(format!(
                "index stream too short for {} indices",
                self.num_indices
            )));
        }

        for i in 0..self.num_indices {
            let index = self.index(i).unwrap_or(u32::MAX);
            if index as usize >= self.num_vertices {
                return Err(CanvasError::IndexOutOfRange { index, num_vertices: self.num_vertices });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn index(&self, i: usize) -> Option<u32> {
        if i >= self.num_indices {
            return None;
        }
        self.index_width.read(self.indices, i)
    }

    /// Decodes vertex `i`; `None` past the end of any stream.
    pub fn vertex(&self, i: usize) -> Option<GeometryVertex> {
        if i >= self.num_vertices {
            return None;
        }
        Some(GeometryVertex {
            pos: self.xy.read_vec2(i)?,
            uv: self.uv.read_vec2(i)?,
            color: self.color.read_rgba8(i)?,
        })
    }

    /// Decoded vertices referenced by the index stream, in index order.
    ///
    /// Call [`validate`](Self::validate) first; invalid entries are skipped.
    pub fn triangle_vertices(&self) -> impl Iterator<Item = GeometryVertex> + '_ {
        (0..self.num_indices)
            .filter_map(|i| self.index(i))
            .filter_map(|index| self.vertex(index as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ziggurat_draw::{CommandList, DrawListBuffer, DrawVert};

    fn geometry_of<'a>(buf: &'a DrawListBuffer, num_indices: usize) -> Geometry<'a> {
        let layout = buf.layout();
        let list: CommandList<'_> = buf.as_list(Vec::new());
        let vtx = list.vtx_buffer();
        Geometry {
            xy: Stream::new(&vtx[layout.pos_offset..], layout.stride),
            color: Stream::new(&vtx[layout.col_offset..], layout.stride),
            uv: Stream::new(&vtx[layout.uv_offset..], layout.stride),
            num_vertices: buf.vertex_count(),
            indices: list.idx_buffer(),
            num_indices,
            index_width: buf.index_width(),
        }
    }

    // ── Stream ────────────────────────────────────────────────────────────

    #[test]
    fn covers_counts_last_element_only() {
        // Two 8-byte elements at stride 20 need 28 bytes, not 40.
        let bytes = [0u8; 28];
        assert!(Stream::new(&bytes, 20).covers(2, 8));
        assert!(!Stream::new(&bytes[..27], 20).covers(2, 8));
        assert!(Stream::new(&[], 20).covers(0, 8));
    }

    #[test]
    fn reads_are_unaligned() {
        let mut bytes = vec![0u8; 1];
        bytes.extend_from_slice(&1.5f32.to_ne_bytes());
        bytes.extend_from_slice(&(-2.0f32).to_ne_bytes());
        assert_eq!(Stream::new(&bytes[1..], 8).read_vec2(0), Some([1.5, -2.0]));
    }

    // ── Geometry ──────────────────────────────────────────────────────────

    #[test]
    fn decodes_quad() {
        let mut buf = DrawListBuffer::with_defaults();
        let n = buf.push_quad([1.0, 2.0], [3.0, 4.0], [9, 8, 7, 6]);
        let g = geometry_of(&buf, n);

        assert!(g.validate().is_ok());
        let v = g.vertex(2).unwrap();
        assert_eq!(v.pos, [3.0, 4.0]);
        assert_eq!(v.uv, [1.0, 1.0]);
        assert_eq!(v.color, Rgba8::new(9, 8, 7, 6));
        assert_eq!(g.triangle_vertices().count(), 6);
    }

    #[test]
    fn index_past_vertices_is_rejected() {
        let mut buf = DrawListBuffer::with_defaults();
        buf.push_vertex(DrawVert::default());
        buf.push_index(0);
        buf.push_index(1);
        let g = geometry_of(&buf, 2);

        assert_eq!(
            g.validate(),
            Err(CanvasError::IndexOutOfRange { index: 1, num_vertices: 1 })
        );
    }

    #[test]
    fn short_index_stream_is_rejected() {
        let mut buf = DrawListBuffer::with_defaults();
        buf.push_quad([0.0, 0.0], [1.0, 1.0], [255; 4]);
        let g = geometry_of(&buf, 7);
        assert!(matches!(g.validate(), Err(CanvasError::InvalidGeometry(_))));
    }

    #[test]
    fn overstated_vertex_count_is_rejected() {
        let mut buf = DrawListBuffer::with_defaults();
        buf.push_quad([0.0, 0.0], [1.0, 1.0], [255; 4]);
        let mut g = geometry_of(&buf, 6);
        g.num_vertices = 5;
        assert!(matches!(g.validate(), Err(CanvasError::InvalidGeometry(_))));
    }
}
