//! GUI draw data to [`Canvas`](crate::canvas::Canvas) translation.
//!
//! - [`DeviceObjects`]: font atlas texture lifecycle
//! - [`Renderer`]: per-frame `pre_render` / `render` / `post_render`
//! - [`ClipProjection`]: draw-data clip rects to framebuffer pixels
//! - [`CanvasStateGuard`]: viewport/clip snapshot restored on drop

mod clip;
mod device_objects;
mod error;
mod renderer;
mod state;
mod stats;

#[cfg(test)]
mod test_support;

pub use clip::ClipProjection;
pub use device_objects::DeviceObjects;
pub use error::BackendError;
pub use renderer::Renderer;
pub use state::CanvasStateGuard;
pub use stats::FrameStats;
