//! Board-agnostic core logic for the plasma demo
//!
//! This crate contains everything that does not depend on a specific
//! display or microcontroller:
//!
//! - HSV to RGB565 color conversion
//! - The rainbow palette
//! - Plasma field seeding
//! - Frame buffer and palette-cycling animation
//! - Boot splash and frame timing statistics
//! - Configuration types and parser
//! - Traits for the display, scheduler and clock collaborators

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod animation;
pub mod color;
pub mod config;
pub mod field;
pub mod frame;
pub mod palette;
pub mod splash;
pub mod stats;
pub mod traits;

pub use animation::{colorize, Animator, Phase};
pub use field::{FieldError, PlasmaField};
pub use frame::{Dimensions, FrameBuffer, FrameError};
pub use palette::{Palette, RAINBOW};
