//! Display surface trait for RGB565 panels

/// Trait for an LCD the animation can draw on
///
/// Implementations own the bus and controller details. The animation core
/// only ever hands over complete rectangles of packed RGB565 pixels.
pub trait DisplaySurface {
    /// Bus or pin error of the concrete driver
    type Error;

    /// Bring the controller out of reset and configure RGB565 mode
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Fill the whole panel with one color
    fn clear(&mut self, color: u16) -> Result<(), Self::Error>;

    /// Push a rectangle of pixels to the panel
    ///
    /// - `x0`, `y0`: top-left corner on the panel
    /// - `width`, `height`: rectangle size
    /// - `pixels`: `width × height` colors, row-major
    ///
    /// Blocks until the transfer completes, which takes tens of
    /// milliseconds for a full 320x240 frame.
    fn present(
        &mut self,
        x0: u16,
        y0: u16,
        width: u16,
        height: u16,
        pixels: &[u16],
    ) -> Result<(), Self::Error>;

    /// Panel size in pixels as (width, height)
    fn size(&self) -> (u16, u16);
}
