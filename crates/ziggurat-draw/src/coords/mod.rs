//! Plain float vectors used by draw data.
//!
//! Draw-data space:
//! - screen points (DPI-independent), as produced by the GUI library
//! - origin top-left, +X right, +Y down
//!
//! Framebuffer pixels are derived from points with a per-axis scale.

mod vec2;
mod vec4;

pub use vec2::Vec2;
pub use vec4::Vec4;
