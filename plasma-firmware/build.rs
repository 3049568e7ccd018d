//! Build script for plasma-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates plasma.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Must match `MAX_SPI_FREQUENCY_HZ` in plasma-core
const MAX_SPI_FREQUENCY_HZ: i64 = 62_500_000;

/// Must match `MAX_SPLASH_LEN` in plasma-core
const MAX_SPLASH_LEN: usize = 32;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Validate plasma.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=plasma.toml");

    let config_path = Path::new("plasma.toml");

    if !config_path.exists() {
        fail("plasma.toml not found", &["The firmware embeds plasma.toml from the crate directory."]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read plasma.toml", &[&e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail("Invalid TOML syntax in plasma.toml", &lines);
        }
    };

    let errors = check_config(&config);
    if !errors.is_empty() {
        let lines: Vec<&str> = errors.iter().map(String::as_str).collect();
        fail("Invalid plasma.toml", &lines);
    }

    println!("cargo:warning=plasma.toml validated successfully");
}

/// Collect every problem with the parsed config
fn check_config(config: &toml::Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(root) = config.as_table() else {
        return errors;
    };

    for (name, section) in root {
        if !["display", "animation", "splash"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
            continue;
        }
        if !section.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }

    if let Some(display) = config.get("display") {
        match display.get("spi_frequency_hz") {
            Some(toml::Value::Integer(hz)) if *hz <= 0 || *hz > MAX_SPI_FREQUENCY_HZ => {
                errors.push(format!(
                    "[display] spi_frequency_hz must be 1-{}",
                    MAX_SPI_FREQUENCY_HZ
                ));
            }
            Some(toml::Value::Integer(_)) | None => {}
            Some(_) => errors.push("[display] spi_frequency_hz must be an integer".into()),
        }

        match display.get("clear_color") {
            Some(toml::Value::Integer(c)) if !(0..=0xFFFF).contains(c) => {
                errors.push("[display] clear_color must be an RGB565 value 0x0000-0xFFFF".into());
            }
            Some(toml::Value::Integer(_)) | None => {}
            Some(_) => errors.push("[display] clear_color must be an integer".into()),
        }

        if let Some(v) = display.get("backlight") {
            if !v.is_bool() {
                errors.push("[display] backlight must be true or false".into());
            }
        }
    }

    if let Some(animation) = config.get("animation") {
        match animation.get("stats_every_cycles") {
            Some(toml::Value::Integer(n)) if !(0..=i64::from(u16::MAX)).contains(n) => {
                errors.push("[animation] stats_every_cycles must be 0-65535".into());
            }
            Some(toml::Value::Integer(_)) | None => {}
            Some(_) => errors.push("[animation] stats_every_cycles must be an integer".into()),
        }
    }

    if let Some(splash) = config.get("splash") {
        let enabled = splash
            .get("enabled")
            .and_then(toml::Value::as_bool)
            .unwrap_or(true);
        if let Some(v) = splash.get("enabled") {
            if !v.is_bool() {
                errors.push("[splash] enabled must be true or false".into());
            }
        }

        match splash.get("text") {
            Some(toml::Value::String(text)) => {
                if text.len() > MAX_SPLASH_LEN {
                    errors.push(format!("[splash] text must be at most {} bytes", MAX_SPLASH_LEN));
                }
                if enabled && text.is_empty() {
                    errors.push("[splash] text cannot be empty while the splash is enabled".into());
                }
            }
            Some(_) => errors.push("[splash] text must be a string".into()),
            None => {}
        }
    }

    errors
}

/// Shorten `line` to at most `width` characters, ending in "..." if cut
fn truncate_line(line: &str, width: usize) -> String {
    if line.chars().count() > width {
        let head: String = line.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[&str]) -> ! {
    let body = lines
        .iter()
        .map(|line| format!("║  • {:<62} ║", truncate_line(line, 62)))
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
