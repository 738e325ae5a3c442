//! GPU device + surface management for the wgpu canvas.
//!
//! This module is responsible for:
//! - creating the wgpu Adapter/Device/Queue for a host-created window
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
