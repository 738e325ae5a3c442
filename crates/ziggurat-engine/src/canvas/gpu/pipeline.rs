use crate::canvas::BlendMode;

use super::recorder::CanvasVertex;

/// Target size uniform (16 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(super) struct TargetUniform {
    pub size: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

/// Straight-alpha "over" blending.
///
///   dst.rgb = src.rgb * src.a + dst.rgb * (1 - src.a)
///   dst.a   = src.a           + dst.a   * (1 - src.a)
fn alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Pipelines and bind state shared by every geometry draw.
///
/// Group 0 holds the target uniform; group 1 holds one texture + sampler and
/// is created per texture (see [`GeometryPipelines::texture_bind_group`]).
pub(super) struct GeometryPipelines {
    blend: wgpu::RenderPipeline,
    replace: wgpu::RenderPipeline,
    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    target_ubo: wgpu::Buffer,
    target_bind_group: wgpu::BindGroup,
}

impl GeometryPipelines {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, filter: wgpu::FilterMode) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ziggurat geometry shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/geometry.wgsl").into()),
        });

        let target_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ziggurat target bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<TargetUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("ziggurat texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ziggurat geometry pipeline layout"),
            bind_group_layouts: &[&target_bgl, &texture_bgl],
            immediate_size: 0,
        });

        let build = |label: &str, blend: Option<wgpu::BlendState>| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[CanvasVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let blend = build("ziggurat geometry pipeline (blend)", Some(alpha_blend()));
        let replace = build("ziggurat geometry pipeline (replace)", None);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("ziggurat texture sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let target_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ziggurat target ubo"),
            size: std::mem::size_of::<TargetUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let target_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ziggurat target bind group"),
            layout: &target_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: target_ubo.as_entire_binding(),
            }],
        });

        Self { blend, replace, texture_bgl, sampler, target_ubo, target_bind_group }
    }

    pub fn pipeline(&self, mode: BlendMode) -> &wgpu::RenderPipeline {
        match mode {
            BlendMode::Blend => &self.blend,
            BlendMode::None => &self.replace,
        }
    }

    pub fn target_bind_group(&self) -> &wgpu::BindGroup {
        &self.target_bind_group
    }

    pub fn write_target(&self, queue: &wgpu::Queue, width: u32, height: u32) {
        let uniform = TargetUniform {
            size: [width.max(1) as f32, height.max(1) as f32],
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.target_ubo, 0, bytemuck::bytes_of(&uniform));
    }

    pub fn texture_bind_group(&self, device: &wgpu::Device, view: &wgpu::TextureView) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("ziggurat texture bind group"),
            layout: &self.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}
