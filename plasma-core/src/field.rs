//! Plasma field
//!
//! The field is a grid of 8-bit palette indexes computed once from
//! position alone. Three waves are summed: a horizontal cosine, a vertical
//! sine and a radial sine around the grid center.
//!
//! The sum is narrowed to `u8` with wraparound, never saturation. Negative
//! and overflowing values fold back into the palette, which is what draws
//! the concentric bands.

use alloc::vec::Vec;

use crate::frame::Dimensions;

/// Field errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldError {
    /// The heap could not hold the field
    Allocation { bytes: usize },
}

/// Unnarrowed field value at `(x, y)`
pub fn plasma_value(x: u16, y: u16, dimensions: &Dimensions) -> f64 {
    let x = f64::from(x);
    let y = f64::from(y);
    let (cx, cy) = dimensions.center();
    let dx = x - cx;
    let dy = y - cy;
    let dist = libm::sqrt(dx * dx + dy * dy);

    (128.0 + 128.0 * libm::cos(x / 16.0) - 128.0 + 128.0 * libm::sin(y / 32.0) - 128.0
        + 128.0 * libm::sin(dist / 8.0))
        / 3.0
}

/// Truncate toward zero, then keep the low 8 bits
///
/// `-5.6` becomes `251`, not `0`.
#[inline]
pub fn wrap_to_u8(value: f64) -> u8 {
    value as i32 as u8
}

/// Immutable grid of palette indexes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlasmaField {
    dimensions: Dimensions,
    cells: Vec<u8>,
}

impl PlasmaField {
    /// Compute the field for `dimensions`
    ///
    /// Fails only if the heap cannot hold `width × height` bytes.
    pub fn seed(dimensions: Dimensions) -> Result<Self, FieldError> {
        let bytes = dimensions.area();
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(bytes)
            .map_err(|_| FieldError::Allocation { bytes })?;

        cells.extend(
            dimensions
                .coords()
                .map(|(x, y)| wrap_to_u8(plasma_value(x, y, &dimensions))),
        );

        Ok(Self { dimensions, cells })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Value at `(x, y)`, or `None` when out of bounds
    pub fn get(&self, x: u16, y: u16) -> Option<u8> {
        self.dimensions.index(x, y).map(|i| self.cells[i])
    }

    /// Cells in row-major order
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lcd() -> Dimensions {
        Dimensions::new(320, 240).unwrap()
    }

    #[test]
    fn test_wrap_to_u8_wraps_instead_of_saturating() {
        assert_eq!(wrap_to_u8(0.0), 0);
        assert_eq!(wrap_to_u8(83.9), 83);
        assert_eq!(wrap_to_u8(-0.9), 0);
        assert_eq!(wrap_to_u8(-1.0), 255);
        assert_eq!(wrap_to_u8(-5.6), 251);
        assert_eq!(wrap_to_u8(-170.01), 86);
        assert_eq!(wrap_to_u8(256.5), 0);
        assert_eq!(wrap_to_u8(300.0), 44);
    }

    #[test]
    fn test_center_pixel() {
        // dist = 0 so the radial term vanishes:
        // (128cos(10) + 128sin(3.75) - 128) / 3 = -102.85..., wraps to 154
        let field = PlasmaField::seed(lcd()).unwrap();
        let raw = plasma_value(160, 120, &lcd());
        assert!((raw - -102.8537).abs() < 1e-3);
        assert_eq!(field.get(160, 120), Some(154));
    }

    #[test]
    fn test_corner_and_edge_pixels() {
        let field = PlasmaField::seed(lcd()).unwrap();
        // (0, 0) evaluates to -5.647, proving wraparound
        assert_eq!(field.get(0, 0), Some(251));
        assert_eq!(field.get(319, 0), Some(224));
        assert_eq!(field.get(0, 239), Some(30));
        assert_eq!(field.get(319, 239), Some(3));
        assert_eq!(field.get(100, 50), Some(5));
        assert_eq!(field.get(320, 0), None);
        assert_eq!(field.get(0, 240), None);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = PlasmaField::seed(lcd()).unwrap();
        let b = PlasmaField::seed(lcd()).unwrap();
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.cells().len(), 320 * 240);
    }

    #[test]
    fn test_cells_match_formula() {
        let dims = Dimensions::new(37, 23).unwrap();
        let field = PlasmaField::seed(dims).unwrap();
        for (x, y) in dims.coords() {
            let expected = wrap_to_u8(plasma_value(x, y, &dims));
            assert_eq!(field.get(x, y), Some(expected));
        }
    }

    #[test]
    fn test_raw_values_stay_within_wave_bounds() {
        // Each wave contributes [-128, 128]; the sum minus 128 lies in [-512, 256]
        let dims = lcd();
        for (x, y) in dims.coords().step_by(97) {
            let v = plasma_value(x, y, &dims);
            assert!(v >= -512.0 / 3.0 && v <= 256.0 / 3.0);
        }
    }

    #[test]
    fn test_single_pixel_field() {
        let dims = Dimensions::new(1, 1).unwrap();
        let field = PlasmaField::seed(dims).unwrap();
        assert_eq!(field.cells().len(), 1);
    }
}
