//! Boot splash
//!
//! Seeding the field takes a noticeable moment on the device, so a short
//! centered message is shown first.

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

use crate::frame::FrameBuffer;

/// Default splash message
pub const SPLASH_TEXT: &str = "Initialising...";

/// Top-left origin that centers `len` monospace glyphs on `(cx, cy)`
///
/// Odd-length strings are shifted a further half glyph left. Clamps at 0.
pub fn centered_origin(cx: u32, cy: u32, font_w: u32, font_h: u32, len: u32) -> Point {
    let y = cy.saturating_sub(font_h / 2);
    let mut x = cx.saturating_sub((len / 2) * font_w);
    if len % 2 == 1 {
        x = x.saturating_sub(font_w / 2);
    }
    Point::new(x as i32, y as i32)
}

/// Clear `frame` to black and draw `text` centered in `fg`
pub fn draw_splash(frame: &mut FrameBuffer<'_>, text: &str, fg: Rgb565) {
    let size = frame.size();
    let glyph = FONT_10X20.character_size;
    let origin = centered_origin(
        size.width / 2,
        size.height / 2,
        glyph.width,
        glyph.height,
        text.chars().count() as u32,
    );

    let _ = frame.clear(Rgb565::BLACK);
    let style = MonoTextStyle::new(&FONT_10X20, fg);
    let _ = Text::with_baseline(text, origin, style, Baseline::Top).draw(frame);
}
