//! GPU [`Canvas`] on top of wgpu.
//!
//! Draws are decoded on the CPU as they arrive (see `recorder`) and
//! submitted in one render pass on [`Canvas::present`]: one pipeline per
//! blend mode, one bind group per texture, one scissor rect per batch.

mod pipeline;
mod recorder;
mod texture;

use std::collections::HashMap;

use anyhow::Result;
use winit::dpi::PhysicalSize;
use winit::window::Window;
use ziggurat_draw::TextureId;

use super::{
    check_texture_upload, BlendMode, Canvas, CanvasError, Geometry, PixelFormat, TextureAccess,
};
use crate::coords::IRect;
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::paint::Rgba8;

use pipeline::GeometryPipelines;
use recorder::{CanvasVertex, FrameRecorder};
use texture::GpuTexture;

/// Construction parameters for [`WgpuCanvas`].
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    /// Filter used when sampling every texture.
    pub sampler_filter: wgpu::FilterMode,
    /// Initial vertex buffer capacity (vertices). Grows on demand.
    pub initial_vertex_capacity: usize,
    /// Initial index buffer capacity (indices). Grows on demand.
    pub initial_index_capacity: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            sampler_filter: wgpu::FilterMode::Linear,
            initial_vertex_capacity: 4096,
            initial_index_capacity: 8192,
        }
    }
}

/// Growable GPU buffer (capacity in elements).
struct DynamicBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    elem_size: usize,
    buffer: wgpu::Buffer,
    capacity: usize,
}

impl DynamicBuffer {
    fn new(
        device: &wgpu::Device,
        label: &'static str,
        usage: wgpu::BufferUsages,
        elem_size: usize,
        capacity: usize,
    ) -> Self {
        let capacity = capacity.max(64);
        let buffer = Self::alloc(device, label, usage, elem_size, capacity);
        Self { label, usage, elem_size, buffer, capacity }
    }

    fn alloc(
        device: &wgpu::Device,
        label: &'static str,
        usage: wgpu::BufferUsages,
        elem_size: usize,
        capacity: usize,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * elem_size) as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        let required = bytes.len() / self.elem_size;
        if required > self.capacity {
            let new_cap = required.next_power_of_two();
            log::trace!("{}: growing {} -> {new_cap}", self.label, self.capacity);
            self.buffer = Self::alloc(device, self.label, self.usage, self.elem_size, new_cap);
            self.capacity = new_cap;
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

/// A [`Canvas`] that renders into a window surface through wgpu.
///
/// Texture ids are keys into the canvas's own registry; ids of destroyed
/// textures are never reused.
pub struct WgpuCanvas<'w> {
    gpu: Gpu<'w>,
    pipelines: GeometryPipelines,

    textures: HashMap<TextureId, GpuTexture>,
    next_texture: usize,
    /// 1x1 opaque white, bound for untextured draws.
    white: GpuTexture,

    draw_color: Rgba8,
    viewport: Option<IRect>,
    clip: Option<IRect>,

    recorder: FrameRecorder,
    vertices: DynamicBuffer,
    indices: DynamicBuffer,
}

impl<'w> WgpuCanvas<'w> {
    pub fn new(gpu: Gpu<'w>, config: CanvasConfig) -> Result<Self, CanvasError> {
        let device = gpu.device();
        let pipelines = GeometryPipelines::new(device, gpu.surface_format(), config.sampler_filter);

        let mut white = GpuTexture::create(
            device,
            &pipelines,
            PixelFormat::Rgba32,
            TextureAccess::Static,
            1,
            1,
        )?;
        white.write(gpu.queue(), IRect::new(0, 0, 1, 1), &Rgba8::WHITE.to_array(), 4);
        white.blend_mode = BlendMode::Blend;

        let vertices = DynamicBuffer::new(
            device,
            "ziggurat canvas vbo",
            wgpu::BufferUsages::VERTEX,
            std::mem::size_of::<CanvasVertex>(),
            config.initial_vertex_capacity,
        );
        let indices = DynamicBuffer::new(
            device,
            "ziggurat canvas ibo",
            wgpu::BufferUsages::INDEX,
            std::mem::size_of::<u32>(),
            config.initial_index_capacity,
        );

        Ok(Self {
            gpu,
            pipelines,
            textures: HashMap::new(),
            next_texture: 1,
            white,
            draw_color: Rgba8::BLACK,
            viewport: None,
            clip: None,
            recorder: FrameRecorder::default(),
            vertices,
            indices,
        })
    }

    /// Creates the GPU context for `window` and a canvas on top of it.
    pub fn for_window(window: &'w Window, init: GpuInit, config: CanvasConfig) -> Result<Self> {
        let gpu = Gpu::new_blocking(window, init)?;
        Ok(Self::new(gpu, config)?)
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }

    /// Reconfigures the surface. The viewport follows the new output size
    /// unless one was set explicitly.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
    }

    fn target(&self) -> IRect {
        let (w, h) = self.output_size();
        IRect::from_size(w, h)
    }

    fn texture_mut(&mut self, id: TextureId) -> Result<&mut GpuTexture, CanvasError> {
        self.textures.get_mut(&id).ok_or(CanvasError::UnknownTexture(id))
    }

    fn encode(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let load = match self.recorder.clear_color() {
            Some(c) => {
                let [r, g, b, a] = c.to_unit_f64();
                wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a })
            }
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("ziggurat canvas pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations { load, store: wgpu::StoreOp::Store },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if self.recorder.batches().is_empty() {
            return;
        }

        let target = self.target();
        rpass.set_bind_group(0, self.pipelines.target_bind_group(), &[]);
        rpass.set_vertex_buffer(0, self.vertices.buffer.slice(..));
        rpass.set_index_buffer(self.indices.buffer.slice(..), wgpu::IndexFormat::Uint32);

        for batch in self.recorder.batches() {
            let texture = match batch.texture {
                None => &self.white,
                Some(id) => match self.textures.get(&id) {
                    Some(t) => t,
                    // Destroyed between draw and present.
                    None => {
                        log::warn!("WgpuCanvas: texture {id:?} gone before present, skipping batch");
                        continue;
                    }
                },
            };
            // Target may have shrunk since the draw was recorded.
            let Some(s) = batch.scissor.intersect(target) else { continue };

            rpass.set_pipeline(self.pipelines.pipeline(texture.blend_mode));
            rpass.set_bind_group(1, texture.bind_group(), &[]);
            rpass.set_scissor_rect(s.x as u32, s.y as u32, s.w as u32, s.h as u32);
            rpass.draw_indexed(batch.indices.clone(), 0, 0..1);
        }
    }
}

impl Canvas for WgpuCanvas<'_> {
    fn create_texture(
        &mut self,
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> Result<TextureId, CanvasError> {
        let texture =
            GpuTexture::create(self.gpu.device(), &self.pipelines, format, access, width, height)?;
        let id = TextureId::new(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, texture);
        log::trace!("WgpuCanvas: created texture {id:?} {width}x{height} {format:?}");
        Ok(id)
    }

    fn update_texture(
        &mut self,
        id: TextureId,
        rect: Option<IRect>,
        pixels: &[u8],
        pitch: usize,
    ) -> Result<(), CanvasError> {
        let texture = self.textures.get(&id).ok_or(CanvasError::UnknownTexture(id))?;
        let rect = check_texture_upload(
            (texture.width, texture.height),
            texture.format,
            rect,
            pixels,
            pitch,
        )?;
        texture.write(self.gpu.queue(), rect, pixels, pitch);
        Ok(())
    }

    fn set_texture_blend_mode(&mut self, id: TextureId, mode: BlendMode) -> Result<(), CanvasError> {
        self.texture_mut(id)?.blend_mode = mode;
        Ok(())
    }

    fn destroy_texture(&mut self, id: TextureId) {
        if let Some(texture) = self.textures.remove(&id) {
            texture.destroy();
            log::trace!("WgpuCanvas: destroyed texture {id:?}");
        }
    }

    fn has_texture(&self, id: TextureId) -> bool {
        self.textures.contains_key(&id)
    }

    fn set_draw_color(&mut self, color: Rgba8) {
        self.draw_color = color;
    }

    fn draw_color(&self) -> Rgba8 {
        self.draw_color
    }

    fn output_size(&self) -> (u32, u32) {
        let size = self.gpu.size();
        (size.width, size.height)
    }

    fn viewport(&self) -> IRect {
        self.viewport.unwrap_or_else(|| self.target())
    }

    fn viewport_override(&self) -> Option<IRect> {
        self.viewport
    }

    fn set_viewport(&mut self, rect: Option<IRect>) {
        self.viewport = rect;
    }

    fn is_clip_enabled(&self) -> bool {
        self.clip.is_some()
    }

    fn clip_rect(&self) -> IRect {
        self.clip.unwrap_or(IRect::ZERO)
    }

    fn set_clip_rect(&mut self, rect: Option<IRect>) {
        self.clip = rect;
    }

    fn clear(&mut self) -> Result<(), CanvasError> {
        self.recorder.clear(self.draw_color);
        Ok(())
    }

    fn render_geometry(
        &mut self,
        texture: Option<TextureId>,
        geometry: &Geometry<'_>,
    ) -> Result<(), CanvasError> {
        if let Some(id) = texture {
            if !self.textures.contains_key(&id) {
                return Err(CanvasError::UnknownTexture(id));
            }
        }
        let viewport = self.viewport();
        let target = self.target();
        self.recorder.push_geometry(texture, geometry, viewport, self.clip, target)
    }

    fn present(&mut self) -> Result<(), CanvasError> {
        let (width, height) = self.output_size();
        if width == 0 || height == 0 {
            // Minimized: nothing to present to.
            self.recorder.reset();
            return Ok(());
        }

        {
            let device = self.gpu.device();
            let queue = self.gpu.queue();
            self.vertices.upload(device, queue, bytemuck::cast_slice(self.recorder.vertices()));
            self.indices.upload(device, queue, bytemuck::cast_slice(self.recorder.indices()));
            self.pipelines.write_target(queue, width, height);
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                self.recorder.reset();
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => {
                        Err(CanvasError::Surface("out of memory acquiring frame".into()))
                    }
                    action => {
                        log::debug!("WgpuCanvas: frame dropped ({action:?})");
                        Ok(())
                    }
                };
            }
        };

        self.encode(&mut frame.encoder, &frame.view);
        self.gpu.submit(frame);
        self.recorder.reset();
        Ok(())
    }
}
