//! Horloge — an analog + digital desktop watch on top of `horloge-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use horloge_watch::Watch;
//!
//! Watch::new()
//!     .title("Horloge")
//!     .interval(Duration::from_millis(50))
//!     .run()?;
//! ```
//!
//! Every tick samples the local clock once; the hands, the `HH:MM:SS AM`
//! readout and the date line of that frame all come from the same sample.
//! The Start / Stop buttons (or Space) pause and resume ticking.

pub mod app;
pub mod config;
pub mod controls;
pub mod face;
pub mod fonts;
pub mod hands;
pub mod painter;
pub mod readout;
pub mod state;

pub use app::Watch;
pub use config::{Palette, WatchConfig};
pub use state::WatchState;
