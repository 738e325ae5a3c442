use ziggurat_draw::{GuiContext, TextureId};

use super::BackendError;
use crate::canvas::{BlendMode, Canvas, CanvasError, PixelFormat, TextureAccess};

/// GPU resources the backend owns on behalf of the GUI library: the font atlas texture.
///
/// The canvas is passed into every call rather than stored, so releasing the
/// texture must be explicit ([`DeviceObjects::destroy`]).
#[derive(Debug, Default)]
pub struct DeviceObjects {
    font_texture: Option<TextureId>,
}

impl DeviceObjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// The live font texture, if any.
    pub fn font_texture(&self) -> Option<TextureId> {
        self.font_texture
    }

    /// Uploads the GUI library's RGBA32 font atlas and publishes its id.
    ///
    /// Any existing font texture is destroyed first. On failure nothing is
    /// left allocated and the library's font texture id stays null.
    pub fn create<C, G>(&mut self, canvas: &mut C, gui: &mut G) -> Result<TextureId, BackendError>
    where
        C: Canvas + ?Sized,
        G: GuiContext + ?Sized,
    {
        self.destroy(canvas, gui);

        let atlas = gui.font_atlas_rgba32();
        atlas.validate()?;

        let id = canvas
            .create_texture(PixelFormat::Rgba32, TextureAccess::Static, atlas.width, atlas.height)
            .map_err(BackendError::FontTexture)?;

        let configured: Result<(), CanvasError> = canvas
            .update_texture(id, None, atlas.pixels, atlas.pitch())
            .and_then(|()| canvas.set_texture_blend_mode(id, BlendMode::Blend));
        if let Err(e) = configured {
            canvas.destroy_texture(id);
            return Err(BackendError::FontTexture(e));
        }

        log::debug!("font texture {id:?} created ({}x{})", atlas.width, atlas.height);
        gui.set_font_texture_id(id);
        self.font_texture = Some(id);
        Ok(id)
    }

    /// Clears the library's font texture id and releases the texture. No-op
    /// when nothing is live.
    pub fn destroy<C, G>(&mut self, canvas: &mut C, gui: &mut G)
    where
        C: Canvas + ?Sized,
        G: GuiContext + ?Sized,
    {
        if let Some(id) = self.font_texture.take() {
            gui.set_font_texture_id(TextureId::null());
            canvas.destroy_texture(id);
            log::debug!("font texture {id:?} destroyed");
        }
    }
}

impl Drop for DeviceObjects {
    fn drop(&mut self) {
        if let Some(id) = self.font_texture {
            log::warn!("DeviceObjects dropped with live font texture {id:?}; call destroy first");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{CanvasCall, RecordingCanvas};
    use crate::backend::test_support::TestGui;

    // ── create ────────────────────────────────────────────────────────────

    #[test]
    fn create_uploads_atlas_and_publishes_id() {
        let mut canvas = RecordingCanvas::new(64, 64);
        let mut gui = TestGui::new(4, 2);
        let mut objects = DeviceObjects::new();

        let id = objects.create(&mut canvas, &mut gui).unwrap();

        assert_eq!(objects.font_texture(), Some(id));
        assert_eq!(gui.font_texture, id);
        let tex = canvas.texture(id).unwrap();
        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(tex.format, PixelFormat::Rgba32);
        assert_eq!(tex.access, TextureAccess::Static);
        assert_eq!(tex.blend_mode, BlendMode::Blend);
        assert_eq!(tex.pixels, gui.pixels);
        assert!(canvas.calls().contains(&CanvasCall::UpdateTexture {
            id,
            rect: crate::coords::IRect::new(0, 0, 4, 2),
            pitch: 16,
        }));

        objects.destroy(&mut canvas, &mut gui);
    }

    #[test]
    fn creation_failure_is_fatal_and_leaves_id_null() {
        let mut canvas = RecordingCanvas::new(64, 64);
        canvas.fail_texture_creation = true;
        let mut gui = TestGui::new(4, 2);
        let mut objects = DeviceObjects::new();

        let err = objects.create(&mut canvas, &mut gui).unwrap_err();
        assert!(matches!(err, BackendError::FontTexture(CanvasError::TextureCreation(_))));
        assert!(gui.font_texture.is_null());
        assert_eq!(objects.font_texture(), None);
    }

    #[test]
    fn upload_failure_releases_texture() {
        let mut canvas = RecordingCanvas::new(64, 64);
        canvas.fail_texture_upload = true;
        let mut gui = TestGui::new(4, 2);
        let mut objects = DeviceObjects::new();

        assert!(objects.create(&mut canvas, &mut gui).is_err());
        assert_eq!(canvas.texture_count(), 0);
        assert!(gui.font_texture.is_null());
    }

    #[test]
    fn malformed_atlas_is_rejected_before_allocation() {
        let mut canvas = RecordingCanvas::new(64, 64);
        let mut gui = TestGui::new(4, 2);
        gui.pixels.truncate(5);
        let mut objects = DeviceObjects::new();

        let err = objects.create(&mut canvas, &mut gui).unwrap_err();
        assert!(matches!(err, BackendError::InvalidAtlas(_)));
        assert!(canvas.calls().is_empty());
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn destroy_clears_registration_and_is_idempotent() {
        let mut canvas = RecordingCanvas::new(64, 64);
        let mut gui = TestGui::new(4, 2);
        let mut objects = DeviceObjects::new();
        let id = objects.create(&mut canvas, &mut gui).unwrap();

        objects.destroy(&mut canvas, &mut gui);
        assert!(gui.font_texture.is_null());
        assert!(!canvas.has_texture(id));
        assert_eq!(objects.font_texture(), None);

        canvas.clear_calls();
        objects.destroy(&mut canvas, &mut gui);
        assert!(canvas.calls().is_empty());
    }

    #[test]
    fn recreate_destroys_old_texture_first() {
        let mut canvas = RecordingCanvas::new(64, 64);
        let mut gui = TestGui::new(4, 2);
        let mut objects = DeviceObjects::new();
        let old = objects.create(&mut canvas, &mut gui).unwrap();
        canvas.clear_calls();

        let new = objects.create(&mut canvas, &mut gui).unwrap();

        assert_ne!(old, new);
        assert_eq!(canvas.texture_count(), 1);
        assert_eq!(canvas.calls().first(), Some(&CanvasCall::DestroyTexture(old)));
        assert_eq!(gui.font_texture, new);

        objects.destroy(&mut canvas, &mut gui);
    }
}
