use crate::canvas::{BlendMode, CanvasError, PixelFormat, TextureAccess};
use crate::coords::IRect;

use super::pipeline::GeometryPipelines;

/// A GPU texture plus the bind group that samples it.
pub(super) struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub blend_mode: BlendMode,
}

fn texture_format(format: PixelFormat) -> wgpu::TextureFormat {
    // Unorm on purpose: GUI colors are blended as stored, without decoding.
    match format {
        PixelFormat::Rgba32 => wgpu::TextureFormat::Rgba8Unorm,
        PixelFormat::Bgra32 => wgpu::TextureFormat::Bgra8Unorm,
    }
}

impl GpuTexture {
    pub fn create(
        device: &wgpu::Device,
        pipelines: &GeometryPipelines,
        format: PixelFormat,
        access: TextureAccess,
        width: u32,
        height: u32,
    ) -> Result<Self, CanvasError> {
        let max = device.limits().max_texture_dimension_2d;
        if width == 0 || height == 0 || width > max || height > max {
            return Err(CanvasError::TextureCreation(format!(
                "invalid size {width}x{height} (max {max})"
            )));
        }

        let mut usage = wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST;
        if access == TextureAccess::Target {
            usage |= wgpu::TextureUsages::RENDER_ATTACHMENT;
        }

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("ziggurat canvas texture"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: texture_format(format),
            usage,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = pipelines.texture_bind_group(device, &view);

        Ok(Self {
            texture,
            bind_group,
            format,
            width,
            height,
            blend_mode: BlendMode::None,
        })
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Writes already validated pixels into `rect`.
    pub fn write(&self, queue: &wgpu::Queue, rect: IRect, pixels: &[u8], pitch: usize) {
        let row_bytes = rect.w as usize * self.format.bytes_per_pixel();
        let len = pitch * (rect.h as usize - 1) + row_bytes;

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x: rect.x as u32, y: rect.y as u32, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &pixels[..len],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(pitch as u32),
                rows_per_image: Some(rect.h as u32),
            },
            wgpu::Extent3d { width: rect.w as u32, height: rect.h as u32, depth_or_array_layers: 1 },
        );
    }

    pub fn destroy(self) {
        self.texture.destroy();
    }
}
