//! Configuration
//!
//! Typed settings plus a small parser for the TOML subset used by
//! `plasma.toml`.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
