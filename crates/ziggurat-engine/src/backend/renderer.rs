use ziggurat_draw::{DrawCmd, DrawData, GuiContext, IndexWidth, TextureId, VertexLayout};

use super::{BackendError, CanvasStateGuard, ClipProjection, DeviceObjects, FrameStats};
use crate::canvas::{Canvas, CanvasError, Geometry, Stream};
use crate::coords::Vec2;
use crate::paint::ColorRgba;

/// Translates GUI draw data into [`Canvas`] calls.
///
/// Per frame the host calls, in order: [`pre_render`](Self::pre_render),
/// [`render`](Self::render), [`post_render`](Self::post_render). The
/// renderer does not enforce the order.
#[derive(Debug)]
pub struct Renderer {
    device_objects: DeviceObjects,
}

impl Renderer {
    /// Creates the font texture and hands its id to the GUI library.
    ///
    /// Failure here is fatal: there is no rendering without a font texture.
    pub fn new<C, G>(canvas: &mut C, gui: &mut G) -> Result<Self, BackendError>
    where
        C: Canvas + ?Sized,
        G: GuiContext + ?Sized,
    {
        let mut device_objects = DeviceObjects::new();
        device_objects.create(canvas, gui)?;
        Ok(Self { device_objects })
    }

    /// Releases the font texture.
    pub fn dispose<C, G>(mut self, canvas: &mut C, gui: &mut G)
    where
        C: Canvas + ?Sized,
        G: GuiContext + ?Sized,
    {
        self.device_objects.destroy(canvas, gui);
    }

    /// Rebuilds the font texture, e.g. after the GUI library's fonts changed.
    pub fn recreate_device_objects<C, G>(
        &mut self,
        canvas: &mut C,
        gui: &mut G,
    ) -> Result<TextureId, BackendError>
    where
        C: Canvas + ?Sized,
        G: GuiContext + ?Sized,
    {
        self.device_objects.create(canvas, gui)
    }

    pub fn font_texture(&self) -> Option<TextureId> {
        self.device_objects.font_texture()
    }

    /// Clears the target with `clear_color` (RGBA, nominally `0.0..=1.0`).
    pub fn pre_render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        clear_color: [f32; 4],
    ) -> Result<(), CanvasError> {
        canvas.set_draw_color(ColorRgba::from(clear_color).to_rgba8());
        canvas.clear()
    }

    /// Draws one frame of GUI draw data.
    ///
    /// Returns early without touching the canvas when the framebuffer has no
    /// area or the display size yields no finite scale. Commands that fail
    /// are logged, counted in [`FrameStats::failed`] and skipped. User
    /// callbacks run in command order with the canvas. Viewport and clip state
    /// are restored before returning, including changes made by callbacks.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        display_size: Vec2,
        framebuffer_size: Vec2,
        draw_data: &DrawData<'_, C>,
    ) -> Result<FrameStats, BackendError> {
        if !(framebuffer_size.x > 0.0 && framebuffer_size.y > 0.0) {
            return Ok(FrameStats::default());
        }

        let index_width = IndexWidth::from_size(draw_data.index_size)
            .map_err(BackendError::UnsupportedConfiguration)?;
        let layout = draw_data.vertex_layout;
        layout.validate().map_err(BackendError::UnsupportedConfiguration)?;

        let scale = framebuffer_size / display_size;
        if !(scale.is_finite() && scale.x > 0.0 && scale.y > 0.0) {
            log::debug!("skipping frame: display size {display_size:?} gives no usable scale");
            return Ok(FrameStats::default());
        }
        let projection = ClipProjection::new(draw_data.display_pos, scale, framebuffer_size);

        let mut canvas = CanvasStateGuard::new(canvas);
        let mut stats = FrameStats::default();

        for list in &draw_data.cmd_lists {
            let buffers = ListBuffers {
                vtx: list.vtx_buffer(),
                idx: list.idx_buffer(),
                layout,
                index_width,
                vertex_count: list.vertex_count(&layout),
                index_count: list.index_count(index_width),
            };

            for cmd in list.commands() {
                stats.commands += 1;

                if let Some(callback) = cmd.user_callback {
                    callback(list, &mut *canvas);
                    stats.callbacks += 1;
                    continue;
                }

                let Some(clip) = projection.project(cmd.clip_rect) else {
                    stats.clipped += 1;
                    continue;
                };
                canvas.set_clip_rect(Some(clip));

                match buffers.draw(&mut *canvas, cmd) {
                    Ok(()) => stats.draw_calls += 1,
                    Err(e) => {
                        stats.failed += 1;
                        log::warn!("draw command skipped ({e}): {cmd:?}");
                    }
                }
            }
        }

        Ok(stats)
    }

    /// [`render`](Self::render) with the display size and framebuffer size
    /// the draw data reports.
    pub fn render_draw_data<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        draw_data: &DrawData<'_, C>,
    ) -> Result<FrameStats, BackendError> {
        self.render(canvas, draw_data.display_size, draw_data.framebuffer_size(), draw_data)
    }

    /// Presents the frame.
    pub fn post_render<C: Canvas + ?Sized>(&self, canvas: &mut C) -> Result<(), CanvasError> {
        canvas.present()
    }
}

/// One command list's buffers as seen through the frame's layout.
struct ListBuffers<'a> {
    vtx: &'a [u8],
    idx: &'a [u8],
    layout: VertexLayout,
    index_width: IndexWidth,
    vertex_count: usize,
    index_count: usize,
}

impl ListBuffers<'_> {
    fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, cmd: &DrawCmd<'_, C>) -> Result<(), CanvasError> {
        let texture = match cmd.texture_id {
            id if id.is_null() => None,
            id if canvas.has_texture(id) => Some(id),
            id => return Err(CanvasError::UnknownTexture(id)),
        };

        if cmd.vtx_offset > self.vertex_count {
            return Err(CanvasError::InvalidGeometry(format!(
                "vertex offset {} past {} vertices",
                cmd.vtx_offset, self.vertex_count
            )));
        }
        let idx_end = cmd
            .idx_offset
            .checked_add(cmd.elem_count)
            .filter(|&end| end <= self.index_count)
            .ok_or_else(|| {
                CanvasError::InvalidGeometry(format!(
                    "indices {}..+{} past {} indices",
                    cmd.idx_offset, cmd.elem_count, self.index_count
                ))
            })?;

        let stride = self.layout.stride;
        let base = cmd.vtx_offset * stride;
        let vtx = self.vtx;
        let stream = move |field: usize| Stream::new(vtx.get(base + field..).unwrap_or(&[]), stride);

        let size = self.index_width.size();
        let indices = self
            .idx
            .get(cmd.idx_offset * size..idx_end * size)
            .unwrap_or(&[]);

        let geometry = Geometry {
            xy: stream(self.layout.pos_offset),
            color: stream(self.layout.col_offset),
            uv: stream(self.layout.uv_offset),
            num_vertices: self.vertex_count - cmd.vtx_offset,
            indices,
            num_indices: cmd.elem_count,
            index_width: self.index_width,
        };
        canvas.render_geometry(texture, &geometry)
    }
}
