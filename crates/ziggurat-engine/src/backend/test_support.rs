//! Test doubles shared by the backend tests.

use ziggurat_draw::{FontAtlasImage, GuiContext, TextureId};

/// A GUI library stand-in with a small deterministic RGBA32 atlas.
pub(crate) struct TestGui {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub font_texture: TextureId,
}

impl TestGui {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            width,
            height,
            pixels: (0..len).map(|i| i as u8).collect(),
            font_texture: TextureId::null(),
        }
    }
}

impl GuiContext for TestGui {
    fn font_atlas_rgba32(&mut self) -> FontAtlasImage<'_> {
        FontAtlasImage::new(self.width, self.height, &self.pixels)
    }

    fn font_texture_id(&self) -> TextureId {
        self.font_texture
    }

    fn set_font_texture_id(&mut self, id: TextureId) {
        self.font_texture = id;
    }
}
