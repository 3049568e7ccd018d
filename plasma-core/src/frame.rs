//! Frame buffer
//!
//! A row-major grid of packed RGB565 pixels borrowed from caller-owned
//! storage. The firmware keeps the storage in a static cell; tests use a
//! `Vec`.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::color::from_color;

/// Frame errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Width or height is zero
    EmptyDimensions,
    /// Storage length does not match width × height
    SizeMismatch { expected: usize, actual: usize },
    /// Frame and field have different dimensions
    DimensionMismatch,
}

/// Width and height of a pixel grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dimensions {
    width: u16,
    height: u16,
}

impl Dimensions {
    /// Create validated dimensions
    pub const fn new(width: u16, height: u16) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::EmptyDimensions);
        }
        Ok(Self { width, height })
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of pixels
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Center point `(W/2, H/2)` without integer rounding
    pub fn center(&self) -> (f64, f64) {
        (f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Row-major index of `(x, y)`, or `None` when out of bounds
    #[inline]
    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = (u16, u16)> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

/// RGB565 frame buffer over borrowed storage
pub struct FrameBuffer<'a> {
    dimensions: Dimensions,
    pixels: &'a mut [u16],
}

impl<'a> FrameBuffer<'a> {
    /// Wrap `pixels`, which must hold exactly `width × height` entries
    pub fn new(dimensions: Dimensions, pixels: &'a mut [u16]) -> Result<Self, FrameError> {
        let expected = dimensions.area();
        if pixels.len() != expected {
            return Err(FrameError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { dimensions, pixels })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Set a pixel; out-of-bounds writes are ignored
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, color: u16) {
        if let Some(i) = self.dimensions.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<u16> {
        self.dimensions.index(x, y).map(|i| self.pixels[i])
    }

    /// Fill every pixel with `color`
    pub fn fill(&mut self, color: u16) {
        self.pixels.fill(color);
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> &[u16] {
        &self.pixels[..]
    }

    pub fn pixels_mut(&mut self) -> &mut [u16] {
        &mut self.pixels[..]
    }
}

impl OriginDimensions for FrameBuffer<'_> {
    fn size(&self) -> Size {
        Size::new(
            u32::from(self.dimensions.width),
            u32::from(self.dimensions.height),
        )
    }
}

impl DrawTarget for FrameBuffer<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) {
                self.set(x, y, from_color(color));
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(from_color(color));
        Ok(())
    }
}
