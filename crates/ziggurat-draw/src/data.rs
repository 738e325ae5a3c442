use core::fmt;

use crate::coords::Vec2;
use crate::layout::{IndexWidth, VertexLayout};
use crate::list::CommandList;

/// Everything the GUI library produced for one frame.
///
/// Borrowed for the duration of a single render call and never retained.
/// `R` is the renderer user callbacks receive; it defaults to `()` for frames
/// without callbacks.
pub struct DrawData<'a, R: ?Sized = ()> {
    /// Top-left of the displayed area, in screen points.
    pub display_pos: Vec2,
    /// Size of the displayed area, in screen points.
    pub display_size: Vec2,
    /// Framebuffer pixels per screen point (HiDPI factor).
    pub framebuffer_scale: Vec2,
    /// Vertex record layout of every list in this frame.
    pub vertex_layout: VertexLayout,
    /// Index element size in bytes, as reported by the GUI library.
    pub index_size: usize,
    pub cmd_lists: Vec<CommandList<'a, R>>,
}

impl<'a, R: ?Sized> DrawData<'a, R> {
    pub fn new(
        display_pos: Vec2,
        display_size: Vec2,
        vertex_layout: VertexLayout,
        index_size: usize,
    ) -> Self {
        Self {
            display_pos,
            display_size,
            framebuffer_scale: Vec2::splat(1.0),
            vertex_layout,
            index_size,
            cmd_lists: Vec::new(),
        }
    }

    pub fn with_framebuffer_scale(mut self, scale: Vec2) -> Self {
        self.framebuffer_scale = scale;
        self
    }

    pub fn push_list(&mut self, list: CommandList<'a, R>) {
        self.cmd_lists.push(list);
    }

    /// Framebuffer size in pixels implied by the display size and scale.
    #[inline]
    pub fn framebuffer_size(&self) -> Vec2 {
        self.display_size * self.framebuffer_scale
    }

    pub fn total_vtx_count(&self) -> usize {
        self.cmd_lists
            .iter()
            .map(|l| l.vertex_count(&self.vertex_layout))
            .sum()
    }

    /// Total index count. Zero when the index size is unsupported.
    pub fn total_idx_count(&self) -> usize {
        let Ok(width) = IndexWidth::from_size(self.index_size) else { return 0 };
        self.cmd_lists.iter().map(|l| l.index_count(width)).sum()
    }
}

impl<R: ?Sized> Clone for DrawData<'_, R> {
    fn clone(&self) -> Self {
        Self {
            display_pos: self.display_pos,
            display_size: self.display_size,
            framebuffer_scale: self.framebuffer_scale,
            vertex_layout: self.vertex_layout,
            index_size: self.index_size,
            cmd_lists: self.cmd_lists.clone(),
        }
    }
}

impl<R: ?Sized> fmt::Debug for DrawData<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawData")
            .field("display_pos", &self.display_pos)
            .field("display_size", &self.display_size)
            .field("framebuffer_scale", &self.framebuffer_scale)
            .field("vertex_layout", &self.vertex_layout)
            .field("index_size", &self.index_size)
            .field("cmd_lists", &self.cmd_lists)
            .finish()
    }
}
