use crate::atlas::FontAtlasImage;
use crate::texture::TextureId;

/// What a renderer backend needs from the GUI library outside of draw data.
///
/// Implemented by the adapter around the host's GUI library instance.
pub trait GuiContext {
    /// Current font atlas bitmap, rasterizing it if the library has not yet.
    fn font_atlas_rgba32(&mut self) -> FontAtlasImage<'_>;

    /// Texture id currently registered for the font atlas.
    fn font_texture_id(&self) -> TextureId;

    /// Publishes the font atlas texture id; `TextureId::null()` clears it.
    fn set_font_texture_id(&mut self, id: TextureId);
}
