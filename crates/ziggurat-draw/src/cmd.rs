use core::fmt;

use crate::coords::Vec4;
use crate::list::CommandList;
use crate::texture::TextureId;

/// Callback attached to a draw command in place of geometry.
///
/// Invoked with the command list that owns the command and the renderer `R`
/// the frame is drawn with, so it can issue its own renderer calls (for
/// example to reset state). Renderers do no clip, texture or vertex work for
/// such commands.
pub type UserCallback<'a, R> = &'a dyn Fn(&CommandList<'_, R>, &mut R);

/// One draw command inside a [`CommandList`].
///
/// `R` is the renderer user callbacks receive; frames without callbacks can
/// leave it at `()`.
pub struct DrawCmd<'a, R: ?Sized = ()> {
    /// Clip rectangle in draw-data space: `(min.x, min.y, max.x, max.y)`.
    pub clip_rect: Vec4,
    pub texture_id: TextureId,
    /// First vertex of this command, as an element index into the list's vertex buffer.
    pub vtx_offset: usize,
    /// First index of this command, as an element index into the list's index buffer.
    pub idx_offset: usize,
    /// Number of indices to draw.
    pub elem_count: usize,
    pub user_callback: Option<UserCallback<'a, R>>,
}

impl<'a, R: ?Sized> DrawCmd<'a, R> {
    /// A geometry command with no callback.
    pub fn elements(
        clip_rect: Vec4,
        texture_id: TextureId,
        vtx_offset: usize,
        idx_offset: usize,
        elem_count: usize,
    ) -> Self {
        Self { clip_rect, texture_id, vtx_offset, idx_offset, elem_count, user_callback: None }
    }

    /// A callback command; the geometry fields are left empty.
    pub fn callback(callback: UserCallback<'a, R>) -> Self {
        Self {
            clip_rect: Vec4::default(),
            texture_id: TextureId::null(),
            vtx_offset: 0,
            idx_offset: 0,
            elem_count: 0,
            user_callback: Some(callback),
        }
    }
}

// Manual impls: derives would require `R: Clone`/`R: Debug`.
impl<R: ?Sized> Clone for DrawCmd<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for DrawCmd<'_, R> {}

impl<R: ?Sized> fmt::Debug for DrawCmd<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawCmd")
            .field("clip_rect", &self.clip_rect)
            .field("texture_id", &self.texture_id)
            .field("vtx_offset", &self.vtx_offset)
            .field("idx_offset", &self.idx_offset)
            .field("elem_count", &self.elem_count)
            .field("user_callback", &self.user_callback.is_some())
            .finish()
    }
}
