//! Draw-data model shared between a GUI library and the **ziggurat** renderer
//! backend.
//!
//! This crate is intentionally dependency-free: a GUI library adapter depends
//! on it to describe a frame, and the backend depends on it to consume one.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`coords`] | `Vec2`, `Vec4` |
//! | [`data`] | `DrawData` (one frame) |
//! | [`list`] | `CommandList`, `DrawListBuffer` |
//! | [`cmd`] | `DrawCmd`, `UserCallback` |
//! | [`layout`] | `VertexLayout`, `IndexWidth` |
//! | [`vertex`] | `DrawVert` (stock vertex record) |
//! | [`atlas`] | `FontAtlasImage` |
//! | [`context`] | `GuiContext` (font atlas + texture registry) |
//!
//! # Quick start
//!
//! ```rust
//! use ziggurat_draw::{DrawCmd, DrawData, DrawListBuffer, TextureId, Vec2, Vec4};
//!
//! let mut buf = DrawListBuffer::with_defaults();
//! let count = buf.push_quad([10.0, 10.0], [50.0, 30.0], [255, 0, 0, 255]);
//!
//! let clip = Vec4::new(0.0, 0.0, 100.0, 100.0);
//! let cmds = vec![DrawCmd::elements(clip, TextureId::null(), 0, 0, count)];
//!
//! let mut data: DrawData<'_> = DrawData::new(Vec2::zero(), Vec2::new(100.0, 100.0), buf.layout(), 2);
//! data.push_list(buf.as_list(cmds));
//! assert_eq!(data.total_idx_count(), 6);
//! ```

pub mod atlas;
pub mod cmd;
pub mod context;
pub mod coords;
pub mod data;
pub mod error;
pub mod layout;
pub mod list;
pub mod texture;
pub mod vertex;

pub use atlas::FontAtlasImage;
pub use cmd::{DrawCmd, UserCallback};
pub use context::GuiContext;
pub use coords::{Vec2, Vec4};
pub use data::DrawData;
pub use error::DrawDataError;
pub use layout::{IndexWidth, VertexLayout};
pub use list::{CommandList, DrawListBuffer};
pub use texture::TextureId;
pub use vertex::DrawVert;
