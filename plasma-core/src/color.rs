//! Color conversion
//!
//! Converts hue/saturation/value triples into the LCD's native RGB565
//! format. All arithmetic is done step by step in single precision so the
//! generated palette is bit-identical to the table shipped in
//! [`crate::palette::RAINBOW`].

use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::IntoStorage;

/// Number of hue sextants in the HSV hexcone
pub const SEXTANTS: u8 = 6;

/// Pack 8-bit channels into RGB565
///
/// Bit image `RRRRRGGGGGGBBBBB`. Only the top 5/6/5 bits of each channel
/// survive.
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    (((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16)
}

/// Split an RGB565 value back into 8-bit channels
///
/// The low bits of each returned channel are zero, so the result is
/// already quantized and repacks to the same value.
pub const fn unpack_rgb565(color: u16) -> (u8, u8, u8) {
    let r = ((color >> 8) & 0xF8) as u8;
    let g = ((color >> 3) & 0xFC) as u8;
    let b = ((color << 3) & 0xF8) as u8;
    (r, g, b)
}

/// Sextant of the hue circle an 8-bit hue falls into (0-5)
///
/// `hue / 256 * 6` is exact in `f32` for every 8-bit input, so boundary
/// hues (0 and 128) land on the sextant they start.
pub fn sextant(hue: u8) -> u8 {
    let h = f32::from(hue) / 256.0 * 6.0;
    libm::floorf(h) as u8
}

/// HSV to RGB565 conversion
///
/// Each component is normalized by dividing by 256, so full saturation and
/// value are slightly below 1.0.
pub fn hsv_to_rgb565(hue: u8, sat: u8, val: u8) -> u16 {
    let s = f32::from(sat) / 256.0;
    let v = f32::from(val) / 256.0;

    let (r, g, b) = if sat == 0 {
        (v, v, v)
    } else {
        let h = f32::from(hue) / 256.0 * 6.0;
        let i = libm::floorf(h);
        let f = h - i;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match i as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    rgb565(to_byte(r), to_byte(g), to_byte(b))
}

/// Scale a [0, 1) channel to a byte, truncating
fn to_byte(channel: f32) -> u8 {
    (f64::from(channel) * 255.0) as u8
}

/// Wrap a packed value for use with embedded-graphics
pub fn to_color(raw: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(raw))
}

/// Packed value of an embedded-graphics color
pub fn from_color(color: Rgb565) -> u16 {
    color.into_storage()
}
