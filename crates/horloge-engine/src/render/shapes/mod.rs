//! Shape renderers.
//!
//! Every renderer works in two steps: `prepare` uploads the frame's instances
//! for its command type, grouped by z layer, and `draw_layer` records the
//! draw call for one layer into a shared render pass.

mod common;

pub mod circle;
pub mod line;
pub mod rect;
pub mod text;
