//! The 2D renderer boundary.
//!
//! A [`Canvas`] is a stateful 2D renderer: it owns textures addressed by
//! [`TextureId`], a draw color, a viewport, an optional clip rectangle, and
//! draws indexed textured geometry given as separate strided streams.
//!
//! Implementations:
//! - [`gpu::WgpuCanvas`]: GPU canvas presenting to a window surface
//! - [`recording::RecordingCanvas`]: headless canvas that records every call
//!
//! State conventions (shared by all implementations):
//! - the viewport defaults to the whole output; `set_viewport(None)` resets it
//! - clip rectangles are relative to the viewport origin
//! - `set_clip_rect(None)` disables clipping and `clip_rect()` then reports
//!   [`IRect::ZERO`]

mod error;
mod geometry;
mod types;

pub mod recording;
pub mod gpu;

pub use error::CanvasError;
pub use geometry::{Geometry, GeometryVertex, Stream};
pub use types::{BlendMode, PixelFormat, TextureAccess};

use ziggurat_draw::TextureId;

use crate::coords::IRect;
use crate::paint::Rgba8;

/// Stateful 2D renderer driven by the backend.
///
/// All methods take `&mut self` where they mutate renderer state; callers hold
/// exclusive access for the duration of each call.
pub trait Canvas {
    // ── textures ──────────────────────────────────────────────────────────

    /// Allocates a texture and returns its id (never null).
    fn create_texture(
        &mut self,
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> Result<TextureId, CanvasError>;

    /// Uploads `pixels` into `rect` (whole texture when `None`).
    ///
    /// `pitch` is the byte distance between the starts of consecutive rows.
    fn update_texture(
        &mut self,
        id: TextureId,
        rect: Option<IRect>,
        pixels: &[u8],
        pitch: usize,
    ) -> Result<(), CanvasError>;

    fn set_texture_blend_mode(&mut self, id: TextureId, mode: BlendMode) -> Result<(), CanvasError>;

    /// Releases a texture. Unknown ids are ignored.
    fn destroy_texture(&mut self, id: TextureId);

    fn has_texture(&self, id: TextureId) -> bool;

    // ── state ─────────────────────────────────────────────────────────────

    fn set_draw_color(&mut self, color: Rgba8);

    fn draw_color(&self) -> Rgba8;

    /// Output size in pixels.
    fn output_size(&self) -> (u32, u32);

    /// Effective viewport: the explicit one, or the whole output.
    fn viewport(&self) -> IRect;

    /// The viewport as last set; `None` while it follows the output.
    fn viewport_override(&self) -> Option<IRect>;

    fn set_viewport(&mut self, rect: Option<IRect>);

    fn is_clip_enabled(&self) -> bool;

    fn clip_rect(&self) -> IRect;

    fn set_clip_rect(&mut self, rect: Option<IRect>);

    // ── drawing ───────────────────────────────────────────────────────────

    /// Fills the whole output with the draw color (ignores viewport and clip).
    fn clear(&mut self) -> Result<(), CanvasError>;

    /// Draws indexed triangles, clipped to the current clip rect and
    /// positioned relative to the current viewport.
    ///
    /// `texture = None` draws untextured (vertex color only).
    fn render_geometry(
        &mut self,
        texture: Option<TextureId>,
        geometry: &Geometry<'_>,
    ) -> Result<(), CanvasError>;

    /// Shows everything drawn since the previous present.
    fn present(&mut self) -> Result<(), CanvasError>;
}

/// Validates the upload arguments shared by every canvas implementation and
/// returns the resolved target rectangle.
pub(crate) fn check_texture_upload(
    texture_size: (u32, u32),
    format: PixelFormat,
    rect: Option<IRect>,
    pixels: &[u8],
    pitch: usize,
) -> Result<IRect, CanvasError> {
    let full = IRect::from_size(texture_size.0, texture_size.1);
    let rect = rect.unwrap_or(full);
    if rect.is_empty() || rect.intersect(full) != Some(rect) {
        return Err(CanvasError::InvalidTextureUpload(format!(
            "rect {rect:?} outside {}x{} texture",
            texture_size.0, texture_size.1
        )));
    }

    let row_bytes = rect.w as usize * format.bytes_per_pixel();
    if pitch < row_bytes {
        return Err(CanvasError::InvalidTextureUpload(format!(
            "pitch {pitch} shorter than row ({row_bytes} bytes)"
        )));
    }
    let needed = pitch * (rect.h as usize - 1) + row_bytes;
    if pixels.len() < needed {
        return Err(CanvasError::InvalidTextureUpload(format!(
            "{} bytes supplied, {needed} needed",
            pixels.len()
        )));
    }
    Ok(rect)
}
