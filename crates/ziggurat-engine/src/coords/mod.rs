//! Coordinate types.
//!
//! Float vectors come from the draw data (`ziggurat_draw::coords`); the canvas
//! works in whole framebuffer pixels, origin top-left, +Y down.

mod irect;

pub use irect::IRect;
pub use ziggurat_draw::coords::{Vec2, Vec4};
