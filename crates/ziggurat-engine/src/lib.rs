//! Ziggurat engine crate.
//!
//! Renders immediate-mode GUI draw data (`ziggurat_draw::DrawData`) on a
//! stateful 2D [`canvas::Canvas`], and owns the GPU runtime for the wgpu
//! canvas.
//!
//! A host frame looks like:
//!
//! ```ignore
//! let mut renderer = Renderer::new(&mut canvas, &mut gui)?;
//! // every frame
//! renderer.pre_render(&mut canvas, [0.1, 0.1, 0.1, 1.0])?;
//! let stats = renderer.render_draw_data(&mut canvas, &draw_data)?;
//! renderer.post_render(&mut canvas)?;
//! // on shutdown
//! renderer.dispose(&mut canvas, &mut gui);
//! ```

pub mod backend;
pub mod canvas;
pub mod device;

pub mod logging;
pub mod coords;
pub mod paint;

pub use backend::{BackendError, FrameStats, Renderer};
pub use canvas::{Canvas, CanvasError};
