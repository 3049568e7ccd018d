//! Palette-cycling animation
//!
//! The field never changes. Each frame looks every field value up in the
//! palette at an offset (the phase), so colors appear to flow through a
//! static shape.

mod phase;

pub use phase::Phase;

use crate::field::PlasmaField;
use crate::frame::{FrameBuffer, FrameError};
use crate::palette::Palette;
use crate::stats::{elapsed_ms, CycleSummary, FrameStats, StepReport};
use crate::traits::{DisplaySurface, MonotonicClock, Yielder};

/// Palette index for a field value at a phase, modulo 256
#[inline]
pub fn color_index(value: u8, phase: Phase) -> u8 {
    value.wrapping_add(phase.value())
}

/// Colorize `field` into `frame` at `phase`
///
/// Field and frame must have identical dimensions.
pub fn colorize(
    field: &PlasmaField,
    palette: &Palette,
    phase: Phase,
    frame: &mut FrameBuffer<'_>,
) -> Result<(), FrameError> {
    check_dimensions(field, frame)?;
    fill(field, palette, phase, frame);
    Ok(())
}

fn check_dimensions(field: &PlasmaField, frame: &FrameBuffer<'_>) -> Result<(), FrameError> {
    if field.dimensions() != frame.dimensions() {
        return Err(FrameError::DimensionMismatch);
    }
    Ok(())
}

fn fill(field: &PlasmaField, palette: &Palette, phase: Phase, frame: &mut FrameBuffer<'_>) {
    for (pixel, &value) in frame.pixels_mut().iter_mut().zip(field.cells()) {
        *pixel = palette.get(color_index(value, phase));
    }
}

/// Runs the animation over one field, palette and frame buffer
///
/// Single owner of the frame buffer and the phase.
pub struct Animator<'a, 'f> {
    field: &'a PlasmaField,
    palette: &'a Palette,
    frame: FrameBuffer<'f>,
    phase: Phase,
    frames: u64,
}

impl<'a, 'f> Animator<'a, 'f> {
    /// Create an animator starting at phase 0
    pub fn new(
        field: &'a PlasmaField,
        palette: &'a Palette,
        frame: FrameBuffer<'f>,
    ) -> Result<Self, FrameError> {
        check_dimensions(field, &frame)?;
        Ok(Self {
            field,
            palette,
            frame,
            phase: Phase::default(),
            frames: 0,
        })
    }

    /// Phase the next frame will be drawn with
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The frame buffer as last rendered
    pub fn frame(&self) -> &FrameBuffer<'f> {
        &self.frame
    }

    /// Colorize the frame buffer at the current phase
    pub fn render(&mut self) {
        fill(self.field, self.palette, self.phase, &mut self.frame);
    }

    /// Render, present and advance the phase
    ///
    /// On a display error the phase is left unchanged.
    pub fn step<S, C>(&mut self, surface: &mut S, clock: &C) -> Result<StepReport, S::Error>
    where
        S: DisplaySurface,
        C: MonotonicClock,
    {
        let phase = self.phase;
        let dims = self.frame.dimensions();

        let start = clock.now_ms();
        self.render();
        let rendered = clock.now_ms();
        surface.present(0, 0, dims.width(), dims.height(), self.frame.pixels())?;
        let presented = clock.now_ms();

        self.phase.advance();
        self.frames += 1;

        Ok(StepReport {
            phase: phase.value(),
            render_ms: elapsed_ms(start, rendered),
            present_ms: elapsed_ms(rendered, presented),
        })
    }

    /// Run one full palette cycle, yielding after every frame
    ///
    /// The phase is back where it started when this returns `Ok`.
    pub async fn run_cycle<S, Y, C>(
        &mut self,
        surface: &mut S,
        yielder: &mut Y,
        clock: &C,
    ) -> Result<CycleSummary, S::Error>
    where
        S: DisplaySurface,
        Y: Yielder,
        C: MonotonicClock,
    {
        let mut stats = FrameStats::new();
        stats.start(clock.now_ms());

        for _ in 0..Phase::CYCLE_LEN {
            let report = self.step(surface, clock)?;
            stats.record(&report);
            yielder.yield_now().await;
        }

        Ok(stats.finish(clock.now_ms()))
    }
}
