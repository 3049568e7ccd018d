//! Color palettes
//!
//! A palette is a ring of 256 packed RGB565 colors. Lookups take an 8-bit
//! index, so wrapping around the ring is free.

mod table;

pub use table::RAINBOW;

use crate::color::hsv_to_rgb565;

/// Number of entries in a palette
pub const PALETTE_SIZE: usize = 256;

/// 256-entry RGB565 color ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [u16; PALETTE_SIZE],
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_table(&RAINBOW)
    }
}

impl Palette {
    /// Build a palette from a precomputed table
    pub const fn from_table(table: &[u16; PALETTE_SIZE]) -> Self {
        Self { colors: *table }
    }

    /// Generate the rainbow palette from the HSV hue sweep
    ///
    /// Produces the same values as [`RAINBOW`]; the firmware uses the
    /// table so nothing is computed at boot.
    pub fn rainbow() -> Self {
        Self::from_fn(|i| hsv_to_rgb565(i, 255, 255))
    }

    /// Build a palette by evaluating `f` for every index
    pub fn from_fn(mut f: impl FnMut(u8) -> u16) -> Self {
        let mut colors = [0u16; PALETTE_SIZE];
        for (i, color) in colors.iter_mut().enumerate() {
            *color = f(i as u8);
        }
        Self { colors }
    }

    /// Color at `index`
    #[inline]
    pub fn get(&self, index: u8) -> u16 {
        self.colors[index as usize]
    }

    /// All entries in index order
    pub fn as_slice(&self) -> &[u16] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb565;

    #[test]
    fn test_rainbow_table_matches_generator() {
        let generated = Palette::rainbow();
        for (i, (&table, &gen)) in RAINBOW.iter().zip(generated.as_slice()).enumerate() {
            assert_eq!(table, gen, "palette entry {} drifted", i);
        }
    }

    #[test]
    fn test_rainbow_golden_entries() {
        let palette = Palette::default();
        assert_eq!(palette.get(0), rgb565(255, 0, 0));
        assert_eq!(palette.get(1), 63520);
        assert_eq!(palette.get(43), 65504);
        assert_eq!(palette.get(128), 0x07FF);
        assert_eq!(palette.get(255), 63488);
    }

    #[test]
    fn test_rainbow_is_a_ring() {
        // The sweep ends back on red so the cycle has no seam
        assert_eq!(RAINBOW[0], RAINBOW[PALETTE_SIZE - 1]);
    }

    #[test]
    fn test_from_fn() {
        let palette = Palette::from_fn(u16::from);
        assert_eq!(palette.get(0), 0);
        assert_eq!(palette.get(200), 200);
        assert_eq!(palette.as_slice().len(), PALETTE_SIZE);
    }
}
