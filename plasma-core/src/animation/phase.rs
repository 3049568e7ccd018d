//! Palette shift counter

/// Offset added to every field value before the palette lookup
///
/// Advances by [`Phase::STEP`] per frame and wraps at 256, so the
/// animation repeats every [`Phase::CYCLE_LEN`] frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Phase(u8);

impl Phase {
    /// Increment per frame
    pub const STEP: u8 = 2;

    /// Frames until the phase returns to its start
    pub const CYCLE_LEN: u32 = 256 / Self::STEP as u32;

    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Move to the next frame's phase
    pub fn advance(&mut self) {
        self.0 = self.0.wrapping_add(Self::STEP);
    }
}
