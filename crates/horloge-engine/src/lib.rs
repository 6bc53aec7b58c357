//! Horloge engine crate.
//!
//! This crate owns the platform + GPU runtime pieces the watch draws with:
//! a single winit window, its wgpu surface, a renderer-agnostic draw list and
//! the instanced shape renderers that consume it.

pub mod core;
pub mod device;
pub mod input;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
