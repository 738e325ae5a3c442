/// Surface and device options for [`WgpuCanvas::for_window`](crate::canvas::gpu::WgpuCanvas::for_window).
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Off by default: GUI vertex colors and atlases are already
    /// gamma-encoded and are blended as stored.
    pub prefer_srgb: bool,

    /// Wait for vertical blank on present.
    ///
    /// When off, the lowest-latency present mode the surface supports is
    /// picked (mailbox, then immediate), falling back to FIFO.
    pub vsync: bool,

    /// Alpha mode preference; an unsupported one falls back to the surface's first.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Empty keeps the canvas portable.
    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Hint only; backends may ignore it.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            vsync: true,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
