//! Time subsystem.
//!
//! Stable, testable timing utilities without coupling to the runtime:
//! - `FrameClock` stamps each presented frame
//! - `Ticker` is a one-shot, re-armable deadline for timer-driven redraw

mod frame_clock;
mod ticker;

pub use frame_clock::{FrameClock, FrameTime};
pub use ticker::{Tick, Ticker};
