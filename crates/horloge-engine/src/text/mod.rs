//! Font loading and text measurement.
//!
//! Glyph rasterization lives in `render::shapes::text`; this module only owns
//! the parsed fonts so layout code can measure strings without a GPU.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
