//! Color types at the canvas boundary.
//!
//! - `ColorRgba`: float channels in `[0, 1]`, as hosts specify clear colors
//! - `Rgba8`: 8-bit channels, as the canvas stores its draw color and as the
//!   GUI library packs vertex colors

mod color;

pub use color::{ColorRgba, Rgba8};
