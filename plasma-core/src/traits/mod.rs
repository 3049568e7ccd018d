//! Collaborator traits
//!
//! These traits define the interface between the animation logic and
//! the display hardware and executor it runs on.

pub mod display;
pub mod runtime;

pub use display::DisplaySurface;
pub use runtime::{MonotonicClock, Yielder};
