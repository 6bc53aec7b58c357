//! Terminal clock for horloge.
//!
//! Once per second the screen is cleared and a bordered box is printed:
//!
//! ```text
//! ╔════════════════════╗
//! ║      HORLOGE       ║
//! ╠════════════════════╣
//! ║    01:05:09 PM     ║
//! ╚════════════════════╝
//! ```
//!
//! Ticks are aligned to whole seconds of the local clock. Ctrl+C ends the loop.

pub mod clock;
pub mod logging;
pub mod screen;

pub use clock::{FAREWELL, render_box, run_until, until_next_second};
