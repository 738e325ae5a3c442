use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use ziggurat_draw::TextureId;

use crate::canvas::{CanvasError, Geometry};
use crate::coords::IRect;
use crate::paint::Rgba8;

/// Vertex layout uploaded to the GPU (20 bytes).
///
///  offset  0  pos    [f32; 2]   loc 0   target pixels
///  offset  8  uv     [f32; 2]   loc 1
///  offset 16  color  [u8; 4]    loc 2   unorm
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct CanvasVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [u8; 4],
}

impl CanvasVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // uv
        2 => Unorm8x4   // color
    ];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CanvasVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Consecutive indices drawn with one texture and one scissor rect.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Batch {
    pub texture: Option<TextureId>,
    /// Target pixels, already intersected with the viewport and the target.
    pub scissor: IRect,
    pub indices: Range<u32>,
}

/// CPU side of a frame: geometry accumulated between `clear` and `present`.
///
/// Indices are absolute into `vertices`, so every batch draws with base vertex 0.
#[derive(Debug, Default)]
pub(crate) struct FrameRecorder {
    vertices: Vec<CanvasVertex>,
    indices: Vec<u32>,
    batches: Vec<Batch>,
    clear: Option<Rgba8>,
}

impl FrameRecorder {
    pub fn vertices(&self) -> &[CanvasVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Color the frame starts from, if it was cleared.
    pub fn clear_color(&self) -> Option<Rgba8> {
        self.clear
    }

    /// Records a full-target clear. Earlier draws are covered by it and dropped.
    pub fn clear(&mut self, color: Rgba8) {
        self.vertices.clear();
        self.indices.clear();
        self.batches.clear();
        self.clear = Some(color);
    }

    /// Forgets everything recorded; called after presenting.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.batches.clear();
        self.clear = None;
    }

    /// Decodes and appends one geometry draw.
    ///
    /// `viewport` positions the geometry; `clip` is relative to the viewport
    /// origin. Draws that end up fully clipped are validated but not recorded.
    pub fn push_geometry(
        &mut self,
        texture: Option<TextureId>,
        geometry: &Geometry<'_>,
        viewport: IRect,
        clip: Option<IRect>,
        target: IRect,
    ) -> Result<(), CanvasError> {
        geometry.validate()?;
        if geometry.num_indices == 0 {
            return Ok(());
        }
        let Some(scissor) = resolve_scissor(viewport, clip, target) else {
            return Ok(());
        };

        // Only the referenced vertex range is copied.
        let (lo, hi) = (0..geometry.num_indices)
            .filter_map(|i| geometry.index(i))
            .fold((u32::MAX, 0u32), |(lo, hi), ix| (lo.min(ix), hi.max(ix)));

        let base = self.vertices.len() as u32;
        let (dx, dy) = (viewport.x as f32, viewport.y as f32);
        for i in lo..=hi {
            let v = geometry.vertex(i as usize).ok_or_else(|| {
                CanvasError::InvalidGeometry(format!("vertex {i} unreadable"))
            })?;
            self.vertices.push(CanvasVertex {
                pos: [v.pos[0] + dx, v.pos[1] + dy],
                uv: v.uv,
                color: v.color.to_array(),
            });
        }

        let start = self.indices.len() as u32;
        self.indices.extend(
            (0..geometry.num_indices)
                .filter_map(|i| geometry.index(i))
                .map(|ix| base + (ix - lo)),
        );
        let end = self.indices.len() as u32;

        if let Some(last) = self.batches.last_mut() {
            if last.texture == texture && last.scissor == scissor && last.indices.end == start {
                last.indices.end = end;
                return Ok(());
            }
        }
        self.batches.push(Batch { texture, scissor, indices: start..end });
        Ok(())
    }
}

/// Scissor rect in target pixels for a draw under `viewport` and `clip`.
///
/// `None` when nothing would be visible.
pub(crate) fn resolve_scissor(viewport: IRect, clip: Option<IRect>, target: IRect) -> Option<IRect> {
    let area = match clip {
        Some(c) => c.translated(viewport.x, viewport.y).intersect(viewport)?,
        None => viewport,
    };
    area.intersect(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Stream;
    use ziggurat_draw::{CommandList, DrawListBuffer, IndexWidth};

    const TARGET: IRect = IRect::new(0, 0, 100, 100);

    fn quads(n: usize) -> DrawListBuffer {
        let mut buf = DrawListBuffer::with_defaults();
        for i in 0..n {
            let x = i as f32 * 10.0;
            buf.push_quad([x, 0.0], [x + 5.0, 5.0], [255, 255, 255, 255]);
        }
        buf
    }

    fn geometry<'a>(buf: &'a DrawListBuffer, first_index: usize, count: usize) -> Geometry<'a> {
        let layout = buf.layout();
        let list: CommandList<'_> = buf.as_list(Vec::new());
        let vtx = list.vtx_buffer();
        let size = buf.index_width().size();
        Geometry {
            xy: Stream::new(&vtx[layout.pos_offset..], layout.stride),
            color: Stream::new(&vtx[layout.col_offset..], layout.stride),
            uv: Stream::new(&vtx[layout.uv_offset..], layout.stride),
            num_vertices: buf.vertex_count(),
            indices: &list.idx_buffer()[first_index * size..],
            num_indices: count,
            index_width: IndexWidth::U16,
        }
    }

    // ── scissor ───────────────────────────────────────────────────────────

    #[test]
    fn scissor_without_clip_is_viewport() {
        let vp = IRect::new(10, 10, 50, 50);
        assert_eq!(resolve_scissor(vp, None, TARGET), Some(vp));
    }

    #[test]
    fn scissor_clip_is_viewport_relative() {
        let vp = IRect::new(10, 10, 50, 50);
        let clip = IRect::new(5, 5, 100, 10);
        assert_eq!(resolve_scissor(vp, Some(clip), TARGET), Some(IRect::new(15, 15, 45, 10)));
    }

    #[test]
    fn scissor_outside_target_is_none() {
        let vp = IRect::new(0, 0, 100, 100);
        assert_eq!(resolve_scissor(vp, Some(IRect::new(120, 0, 10, 10)), TARGET), None);
    }

    // ── push_geometry ─────────────────────────────────────────────────────

    #[test]
    fn copies_only_referenced_vertices() {
        let buf = quads(3);
        let mut rec = FrameRecorder::default();
        // Second quad: indices 6..12 reference vertices 4..8.
        rec.push_geometry(None, &geometry(&buf, 6, 6), TARGET, None, TARGET).unwrap();

        assert_eq!(rec.vertices().len(), 4);
        assert_eq!(rec.vertices()[0].pos, [10.0, 0.0]);
        assert_eq!(rec.indices(), &[0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn viewport_offsets_positions() {
        let buf = quads(1);
        let mut rec = FrameRecorder::default();
        let vp = IRect::new(20, 30, 50, 50);
        rec.push_geometry(None, &geometry(&buf, 0, 6), vp, None, TARGET).unwrap();
        assert_eq!(rec.vertices()[2].pos, [25.0, 35.0]);
    }

    #[test]
    fn same_state_draws_merge() {
        let buf = quads(2);
        let mut rec = FrameRecorder::default();
        rec.push_geometry(None, &geometry(&buf, 0, 6), TARGET, None, TARGET).unwrap();
        rec.push_geometry(None, &geometry(&buf, 6, 6), TARGET, None, TARGET).unwrap();

        assert_eq!(rec.batches().len(), 1);
        assert_eq!(rec.batches()[0].indices, 0..12);
        // Second draw's indices are rebased past the first draw's vertices.
        assert_eq!(&rec.indices()[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn scissor_change_splits_batches() {
        let buf = quads(2);
        let mut rec = FrameRecorder::default();
        let clip = Some(IRect::new(0, 0, 10, 10));
        rec.push_geometry(None, &geometry(&buf, 0, 6), TARGET, None, TARGET).unwrap();
        rec.push_geometry(None, &geometry(&buf, 6, 6), TARGET, clip, TARGET).unwrap();

        assert_eq!(rec.batches().len(), 2);
        assert_eq!(rec.batches()[1].scissor, IRect::new(0, 0, 10, 10));
        assert_eq!(rec.batches()[1].indices, 6..12);
    }

    #[test]
    fn invalid_geometry_records_nothing() {
        let buf = quads(1);
        let mut rec = FrameRecorder::default();
        let mut g = geometry(&buf, 0, 6);
        g.num_vertices = 3;
        assert!(rec.push_geometry(None, &g, TARGET, None, TARGET).is_err());
        assert!(rec.vertices().is_empty());
        assert!(rec.batches().is_empty());
    }

    #[test]
    fn clear_drops_earlier_draws() {
        let buf = quads(1);
        let mut rec = FrameRecorder::default();
        rec.push_geometry(None, &geometry(&buf, 0, 6), TARGET, None, TARGET).unwrap();
        rec.clear(Rgba8::WHITE);
        assert!(rec.batches().is_empty());
        assert_eq!(rec.clear_color(), Some(Rgba8::WHITE));

        rec.reset();
        assert_eq!(rec.clear_color(), None);
    }
}
