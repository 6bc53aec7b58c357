//! GPU device and surface management.
//!
//! Creates the wgpu device and queue, configures the window surface, and hands
//! out one encoder plus target view per frame.

mod error;
mod gpu;
mod surface;

pub use error::SurfaceErrorAction;
pub use gpu::{Gpu, GpuFrame, GpuInit};
