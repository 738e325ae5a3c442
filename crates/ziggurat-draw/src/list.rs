use core::fmt;

use crate::cmd::DrawCmd;
use crate::layout::{IndexWidth, VertexLayout};
use crate::vertex::DrawVert;

/// One command list: a vertex buffer, an index buffer and the commands that
/// reference ranges of them.
///
/// Buffers are raw bytes borrowed from the GUI library; their element layout is
/// described by the owning [`DrawData`](crate::DrawData). `R` is the renderer
/// handed to user callbacks (see [`DrawCmd`]).
pub struct CommandList<'a, R: ?Sized = ()> {
    vtx_buffer: &'a [u8],
    idx_buffer: &'a [u8],
    commands: Vec<DrawCmd<'a, R>>,
}

impl<'a, R: ?Sized> CommandList<'a, R> {
    pub fn new(vtx_buffer: &'a [u8], idx_buffer: &'a [u8], commands: Vec<DrawCmd<'a, R>>) -> Self {
        Self { vtx_buffer, idx_buffer, commands }
    }

    #[inline]
    pub fn vtx_buffer(&self) -> &'a [u8] {
        self.vtx_buffer
    }

    #[inline]
    pub fn idx_buffer(&self) -> &'a [u8] {
        self.idx_buffer
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCmd<'a, R>] {
        &self.commands
    }

    #[inline]
    pub fn vertex_count(&self, layout: &VertexLayout) -> usize {
        layout.vertex_count(self.vtx_buffer.len())
    }

    #[inline]
    pub fn index_count(&self, width: IndexWidth) -> usize {
        self.idx_buffer.len() / width.size()
    }
}

impl<R: ?Sized> Clone for CommandList<'_, R> {
    fn clone(&self) -> Self {
        Self {
            vtx_buffer: self.vtx_buffer,
            idx_buffer: self.idx_buffer,
            commands: self.commands.clone(),
        }
    }
}

impl<R: ?Sized> fmt::Debug for CommandList<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandList")
            .field("vtx_bytes", &self.vtx_buffer.len())
            .field("idx_bytes", &self.idx_buffer.len())
            .field("commands", &self.commands)
            .finish()
    }
}

/// Owned vertex/index storage for assembling a [`CommandList`].
///
/// GUI libraries hand out borrowed buffers directly; this is for hosts that
/// build geometry themselves.
#[derive(Debug, Clone)]
pub struct DrawListBuffer {
    layout: VertexLayout,
    index_width: IndexWidth,
    vtx: Vec<u8>,
    idx: Vec<u8>,
}

impl DrawListBuffer {
    pub fn new(layout: VertexLayout, index_width: IndexWidth) -> Self {
        Self { layout, index_width, vtx: Vec::new(), idx: Vec::new() }
    }

    /// Stock vertex layout with 16-bit indices.
    pub fn with_defaults() -> Self {
        Self::new(DrawVert::LAYOUT, IndexWidth::U16)
    }

    #[inline]
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    #[inline]
    pub fn index_width(&self) -> IndexWidth {
        self.index_width
    }

    /// Appends a vertex and returns its element index.
    pub fn push_vertex(&mut self, v: DrawVert) -> usize {
        let index = self.vertex_count();
        v.encode(&self.layout, &mut self.vtx);
        index
    }

    pub fn push_index(&mut self, index: u32) {
        self.index_width.write(&mut self.idx, index);
    }

    /// Appends the two triangles of an axis-aligned quad and returns the
    /// number of indices written (always 6).
    pub fn push_quad(&mut self, min: [f32; 2], max: [f32; 2], col: [u8; 4]) -> usize {
        let base = self.vertex_count() as u32;
        self.push_vertex(DrawVert::new([min[0], min[1]], [0.0, 0.0], col));
        self.push_vertex(DrawVert::new([max[0], min[1]], [1.0, 0.0], col));
        self.push_vertex(DrawVert::new([max[0], max[1]], [1.0, 1.0], col));
        self.push_vertex(DrawVert::new([min[0], max[1]], [0.0, 1.0], col));
        for i in [0, 1, 2, 0, 2, 3] {
            self.push_index(base + i);
        }
        6
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.layout.vertex_count(self.vtx.len())
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.idx.len() / self.index_width.size()
    }

    /// Borrows the buffers as a command list.
    pub fn as_list<'a, R: ?Sized>(&'a self, commands: Vec<DrawCmd<'a, R>>) -> CommandList<'a, R> {
        CommandList::new(&self.vtx, &self.idx, commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_writes_four_vertices_six_indices() {
        let mut buf = DrawListBuffer::with_defaults();
        assert_eq!(buf.push_quad([0.0, 0.0], [10.0, 10.0], [255; 4]), 6);
        assert_eq!(buf.push_quad([0.0, 0.0], [5.0, 5.0], [255; 4]), 6);
        assert_eq!(buf.vertex_count(), 8);
        assert_eq!(buf.index_count(), 12);

        let list: CommandList<'_> = buf.as_list(Vec::new());
        assert_eq!(list.vertex_count(&buf.layout()), 8);
        assert_eq!(list.index_count(buf.index_width()), 12);
        // Second quad's indices are rebased onto its own vertices.
        assert_eq!(IndexWidth::U16.read(list.idx_buffer(), 6), Some(4));
    }
}
