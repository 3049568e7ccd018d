//! Palette generator
//!
//! Prints the 256-entry rainbow palette (hue sweep at full saturation and
//! value) as decimal RGB565 values, eight per line, ready to paste into a
//! table initializer.

use std::fmt::Write as _;
use std::io::{self, Write};

use plasma_core::Palette;

/// Entries per output line
const PER_LINE: usize = 8;

/// Render `colors` as `"v,\t"` entries with a newline after every eighth
fn format_palette(colors: &[u16]) -> String {
    let mut out = String::with_capacity(colors.len() * 7);
    for (i, value) in colors.iter().enumerate() {
        let sep = if i % PER_LINE == PER_LINE - 1 { '\n' } else { '\t' };
        let _ = write!(out, "{value},{sep}");
    }
    out
}

fn main() {
    let palette = Palette::rainbow();

    // A closed pipe is not an error for a table dump
    let _ = io::stdout().lock().write_all(format_palette(palette.as_slice()).as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasma_core::RAINBOW;

    #[test]
    fn test_line_layout() {
        let out = format_palette(Palette::rainbow().as_slice());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 32);
        assert!(out.ends_with(",\n"));
        for line in &lines {
            assert_eq!(line.split('\t').count(), 8);
            assert!(line.ends_with(','));
        }
    }

    #[test]
    fn test_first_line() {
        let out = format_palette(Palette::rainbow().as_slice());
        let first = out.lines().next().unwrap();
        let values: Vec<u16> = first
            .split('\t')
            .map(|v| v.trim_end_matches(',').parse().unwrap())
            .collect();
        assert_eq!(values[0], 63488);
        assert_eq!(values, RAINBOW[..8].to_vec());
    }

    #[test]
    fn test_small_input() {
        assert_eq!(format_palette(&[1, 2, 3]), "1,\t2,\t3,\t");
        assert_eq!(
            format_palette(&[0, 1, 2, 3, 4, 5, 6, 7]),
            "0,\t1,\t2,\t3,\t4,\t5,\t6,\t7,\n"
        );
        assert_eq!(format_palette(&[]), "");
    }

    #[test]
    fn test_output_matches_checked_in_table() {
        let out = format_palette(Palette::rainbow().as_slice());
        let parsed: Vec<u16> = out
            .split(|c| c == '\t' || c == '\n')
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches(',').parse().unwrap())
            .collect();
        assert_eq!(parsed, RAINBOW.to_vec());
    }
}
