/// Per-frame counters returned by [`Renderer::render`](super::Renderer::render).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    /// Commands visited, callbacks included.
    pub commands: usize,
    /// User callbacks invoked.
    pub callbacks: usize,
    /// Successful `render_geometry` calls.
    pub draw_calls: usize,
    /// Commands skipped because their clip rect was empty after projection.
    pub clipped: usize,
    /// Commands that failed (unknown texture, bad offsets, canvas error).
    pub failed: usize,
}
