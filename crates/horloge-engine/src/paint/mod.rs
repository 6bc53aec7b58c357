//! Paint model shared between the watch and renderers.
//!
//! Only solid fills exist; every shape command carries a [`Color`].

mod color;

pub use color::Color;
