//! Headless [`Canvas`] that records every call.
//!
//! Behaves like a real renderer as far as state and validation go (texture
//! registry, viewport, clip, geometry checks) but draws nothing. Useful for
//! testing GUI frames without a GPU.

use std::collections::HashMap;

use ziggurat_draw::TextureId;

use super::{
    check_texture_upload, BlendMode, Canvas, CanvasError, Geometry, GeometryVertex, PixelFormat,
    TextureAccess,
};
use crate::coords::IRect;
use crate::paint::Rgba8;

/// One recorded canvas call. Getters are not recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCall {
    CreateTexture { id: TextureId, format: PixelFormat, access: TextureAccess, width: u32, height: u32 },
    UpdateTexture { id: TextureId, rect: IRect, pitch: usize },
    SetTextureBlendMode { id: TextureId, mode: BlendMode },
    DestroyTexture(TextureId),
    SetDrawColor(Rgba8),
    Clear(Rgba8),
    SetViewport(Option<IRect>),
    SetClipRect(Option<IRect>),
    RenderGeometry(RecordedDraw),
    Present,
}

/// A successful geometry draw with the state it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub texture: Option<TextureId>,
    pub viewport: IRect,
    pub clip: Option<IRect>,
    pub num_vertices: usize,
    /// Byte length of the position stream as passed in.
    pub xy_len: usize,
    pub stride: usize,
    /// Vertices in index order (three per triangle).
    pub vertices: Vec<GeometryVertex>,
}

/// Texture owned by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedTexture {
    pub format: PixelFormat,
    pub access: TextureAccess,
    pub width: u32,
    pub height: u32,
    pub blend_mode: BlendMode,
    /// Tightly packed copy of the last full upload.
    pub pixels: Vec<u8>,
}

#[derive(Debug)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    draw_color: Rgba8,
    viewport: Option<IRect>,
    clip: Option<IRect>,
    textures: HashMap<TextureId, RecordedTexture>,
    next_texture: usize,
    calls: Vec<CanvasCall>,

    /// Makes every `create_texture` fail (allocation failure).
    pub fail_texture_creation: bool,
    /// Makes every `update_texture` fail.
    pub fail_texture_upload: bool,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            draw_color: Rgba8::BLACK,
            viewport: None,
            clip: None,
            textures: HashMap::new(),
            next_texture: 1,
            calls: Vec::new(),
            fail_texture_creation: false,
            fail_texture_upload: false,
        }
    }

    /// Changes the output size, as a window resize would.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> &[CanvasCall] {
        &self.calls
    }

    /// Recorded geometry draws, oldest first.
    pub fn draws(&self) -> impl Iterator<Item = &RecordedDraw> {
        self.calls.iter().filter_map(|c| match c {
            CanvasCall::RenderGeometry(d) => Some(d),
            _ => None,
        })
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn texture(&self, id: TextureId) -> Option<&RecordedTexture> {
        self.textures.get(&id)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Registers an externally created texture (e.g. a host image) and returns its id.
    pub fn insert_texture(&mut self, width: u32, height: u32) -> TextureId {
        let id = self.alloc_id();
        self.textures.insert(id, RecordedTexture {
            format: PixelFormat::Rgba32,
            access: TextureAccess::Static,
            width,
            height,
            blend_mode: BlendMode::None,
            pixels: Vec::new(),
        });
        id
    }

    fn alloc_id(&mut self) -> TextureId {
        let id = TextureId::new(self.next_texture);
        self.next_texture += 1;
        id
    }
}

impl Canvas for RecordingCanvas {
    fn create_texture(
        &mut self,
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> Result<TextureId, CanvasError> {
        if self.fail_texture_creation {
            return Err(CanvasError::TextureCreation("allocation refused".into()));
        }
        if width == 0 || height == 0 {
            return Err(CanvasError::TextureCreation(format!("invalid size {width}x{height}")));
        }

        let id = self.alloc_id();
        self.textures.insert(id, RecordedTexture {
            format,
            access,
            width,
            height,
            blend_mode: BlendMode::None,
            pixels: Vec::new(),
        });
        self.calls.push(CanvasCall::CreateTexture { id, format, access, width, height });
        Ok(id)
    }

    fn update_texture(
        &mut self,
        id: TextureId,
        rect: Option<IRect>,
        pixels: &[u8],
        pitch: usize,
    ) -> Result<(), CanvasError> {
        let tex = self.textures.get_mut(&id).ok_or(CanvasError::UnknownTexture(id))?;
        if self.fail_texture_upload {
            return Err(CanvasError::InvalidTextureUpload("upload refused".into()));
        }
        let rect = check_texture_upload((tex.width, tex.height), tex.format, rect, pixels, pitch)?;

        if rect == IRect::from_size(tex.width, tex.height) {
            let row = rect.w as usize * tex.format.bytes_per_pixel();
            tex.pixels = (0..rect.h as usize)
                .flat_map(|y| &pixels[y * pitch..y * pitch + row])
                .copied()
                .collect();
        }
        self.calls.push(CanvasCall::UpdateTexture { id, rect, pitch });
        Ok(())
    }

    fn set_texture_blend_mode(&mut self, id: TextureId, mode: BlendMode) -> Result<(), CanvasError> {
        let tex = self.textures.get_mut(&id).ok_or(CanvasError::UnknownTexture(id))?;
        tex.blend_mode = mode;
        self.calls.push(CanvasCall::SetTextureBlendMode { id, mode });
        Ok(())
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if self.textures.remove(&id).is_some() {
            self.calls.push(CanvasCall::DestroyTexture(id));
        }
    }

    fn has_texture(&self, id: TextureId) -> bool {
        self.textures.contains_key(&id)
    }

    fn set_draw_color(&mut self, color: Rgba8) {
        self.draw_color = color;
        self.calls.push(CanvasCall::SetDrawColor(color));
    }

    fn draw_color(&self) -> Rgba8 {
        self.draw_color
    }

    fn output_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn viewport(&self) -> IRect {
        self.viewport.unwrap_or_else(|| IRect::from_size(self.width, self.height))
    }

    fn viewport_override(&self) -> Option<IRect> {
        self.viewport
    }

    fn set_viewport(&mut self, rect: Option<IRect>) {
        self.viewport = rect;
        self.calls.push(CanvasCall::SetViewport(rect));
    }

    fn is_clip_enabled(&self) -> bool {
        self.clip.is_some()
    }

    fn clip_rect(&self) -> IRect {
        self.clip.unwrap_or(IRect::ZERO)
    }

    fn set_clip_rect(&mut self, rect: Option<IRect>) {
        self.clip = rect;
        self.calls.push(CanvasCall::SetClipRect(rect));
    }

    fn clear(&mut self) -> Result<(), CanvasError> {
        self.calls.push(CanvasCall::Clear(self.draw_color));
        Ok(())
    }

    fn render_geometry(
        &mut self,
        texture: Option<TextureId>,
        geometry: &Geometry<'_>,
    ) -> Result<(), CanvasError> {
        if let Some(id) = texture {
            if !self.has_texture(id) {
                return Err(CanvasError::UnknownTexture(id));
            }
        }
        geometry.validate()?;

        let draw = RecordedDraw {
            texture,
            viewport: self.viewport(),
            clip: self.clip,
            num_vertices: geometry.num_vertices,
            xy_len: geometry.xy.bytes().len(),
            stride: geometry.xy.stride(),
            vertices: geometry.triangle_vertices().collect(),
        };
        self.calls.push(CanvasCall::RenderGeometry(draw));
        Ok(())
    }

    fn present(&mut self) -> Result<(), CanvasError> {
        self.calls.push(CanvasCall::Present);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_ids_are_never_null_or_reused() {
        let mut c = RecordingCanvas::new(8, 8);
        let a = c.create_texture(PixelFormat::Rgba32, TextureAccess::Static, 1, 1).unwrap();
        c.destroy_texture(a);
        let b = c.create_texture(PixelFormat::Rgba32, TextureAccess::Static, 1, 1).unwrap();
        assert!(!a.is_null());
        assert_ne!(a, b);
        assert!(!c.has_texture(a));
        assert!(c.has_texture(b));
    }

    #[test]
    fn update_keeps_packed_copy() {
        let mut c = RecordingCanvas::new(8, 8);
        let id = c.create_texture(PixelFormat::Rgba32, TextureAccess::Static, 1, 2).unwrap();
        // Pitch 8: 4 bytes of pixel + 4 bytes padding per row.
        let px = [1, 2, 3, 4, 0, 0, 0, 0, 5, 6, 7, 8];
        c.update_texture(id, None, &px, 8).unwrap();
        assert_eq!(c.texture(id).unwrap().pixels, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn disabled_clip_reports_zero_rect() {
        let mut c = RecordingCanvas::new(8, 8);
        c.set_clip_rect(Some(IRect::new(1, 1, 2, 2)));
        assert!(c.is_clip_enabled());
        c.set_clip_rect(None);
        assert!(!c.is_clip_enabled());
        assert_eq!(c.clip_rect(), IRect::ZERO);
    }

    #[test]
    fn viewport_defaults_to_output() {
        let mut c = RecordingCanvas::new(640, 480);
        assert_eq!(c.viewport(), IRect::new(0, 0, 640, 480));
        c.set_viewport(Some(IRect::new(10, 10, 20, 20)));
        assert_eq!(c.viewport(), IRect::new(10, 10, 20, 20));
        c.set_viewport(None);
        assert_eq!(c.viewport(), IRect::new(0, 0, 640, 480));
    }

    #[test]
    fn default_viewport_follows_resize() {
        let mut c = RecordingCanvas::new(640, 480);
        assert_eq!(c.viewport_override(), None);
        c.resize(800, 600);
        assert_eq!(c.viewport(), IRect::new(0, 0, 800, 600));

        c.set_viewport(Some(IRect::new(10, 10, 20, 20)));
        c.resize(1024, 768);
        assert_eq!(c.viewport_override(), Some(IRect::new(10, 10, 20, 20)));
        assert_eq!(c.viewport(), IRect::new(10, 10, 20, 20));
    }

    #[test]
    fn failed_creation_records_nothing() {
        let mut c = RecordingCanvas::new(8, 8);
        c.fail_texture_creation = true;
        assert!(c.create_texture(PixelFormat::Rgba32, TextureAccess::Static, 1, 1).is_err());
        assert!(c.calls().is_empty());
        assert_eq!(c.texture_count(), 0);
    }
}
