//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in plasma-core:
//!
//! - LCD controllers (ILI9341 over SPI)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
