//! Simple TOML parser for plasma configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `plasma.toml`. Anything beyond that subset is rejected or ignored.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Decimal integers with `_` separators and `0x` hex integers
//! - [section] headers
//! - Comments (# ...)
//!
//! Unknown keys are ignored so older firmware accepts newer files.

use heapless::String as HString;

use super::types::{PlasmaConfig, MAX_SPLASH_LEN};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Invalid value type or out-of-range number
    InvalidValue,
    /// String longer than its field allows
    TooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Animation,
    Splash,
}

/// Parse TOML configuration into PlasmaConfig
///
/// Keys missing from the input keep their defaults.
pub fn parse_config(input: &str) -> Result<PlasmaConfig, ParseError> {
    let mut config = PlasmaConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "animation" => Ok(Section::Animation),
        "splash" => Ok(Section::Splash),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PlasmaConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Display => match key {
            "spi_frequency_hz" => config.display.spi_frequency_hz = parse_int(value)?,
            "clear_color" => config.display.clear_color = parse_int(value)?,
            "backlight" => config.display.backlight = parse_bool(value)?,
            _ => {}
        },
        Section::Animation => {
            if key == "stats_every_cycles" {
                config.animation.stats_every_cycles = parse_int(value)?;
            }
        }
        Section::Splash => match key {
            "enabled" => config.splash.enabled = parse_bool(value)?,
            "text" => {
                let text = parse_string(value)?;
                config.splash.text =
                    HString::<MAX_SPLASH_LEN>::try_from(text).map_err(|_| ParseError::TooLong)?;
            }
            _ => {}
        },
        Section::Root => {
            // No root-level keys
        }
    }

    Ok(())
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match find_comment(value) {
        Some(hash_pos) => value[..hash_pos].trim(),
        None => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Byte offset of the first `#` outside a quoted string
fn find_comment(value: &str) -> Option<usize> {
    let mut in_string = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return Some(i),
            _ => {}
        }
    }
    None
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else if value.starts_with('"') || value.ends_with('"') {
        Err(ParseError::InvalidValue)
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse a decimal or `0x` hex integer, ignoring `_` separators
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    let mut digits: HString<24> = HString::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }

    let parsed = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    }
    .map_err(|_| ParseError::InvalidValue)?;

    T::try_from(parsed).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}
