//! Board wiring
//!
//! Raspberry Pi Pico with an ILI9341 module on SPI1:
//!
//! | Signal    | GPIO |
//! |-----------|------|
//! | SCK       | 10   |
//! | MOSI      | 11   |
//! | CS        | 9    |
//! | D/C       | 8    |
//! | RESET     | 12   |
//! | Backlight | 13   |
//!
//! The panel is write-only, so MISO is not connected.

use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::SPI1;
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_rp::Peripherals;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;

use plasma_drivers::display::Ili9341;

/// SPI bus owned by the LCD
pub type LcdBus = Spi<'static, SPI1, Blocking>;

/// LCD bus with its chip select
pub type LcdSpi = ExclusiveDevice<LcdBus, Output<'static>, Delay>;

/// The concrete display driver
pub type Lcd = Ili9341<LcdSpi, Output<'static>, Output<'static>, Delay>;

/// Peripherals used by the demo
pub struct Board {
    pub lcd: Lcd,
    pub backlight: Output<'static>,
}

impl Board {
    /// Configure pins and the LCD bus
    ///
    /// The backlight starts off. The LCD still needs `init()`.
    pub fn new(p: Peripherals, spi_frequency_hz: u32) -> Self {
        let mut spi_config = spi::Config::default();
        spi_config.frequency = spi_frequency_hz;

        let bus = Spi::new_blocking_txonly(p.SPI1, p.PIN_10, p.PIN_11, spi_config);
        let cs = Output::new(p.PIN_9, Level::High);
        let dc = Output::new(p.PIN_8, Level::Low);
        let rst = Output::new(p.PIN_12, Level::High);
        let backlight = Output::new(p.PIN_13, Level::Low);

        // GPIO outputs cannot fail
        let spi = match ExclusiveDevice::new(bus, cs, Delay) {
            Ok(spi) => spi,
            Err(e) => match e {},
        };

        Self {
            lcd: Ili9341::new(spi, dc, Some(rst), Delay),
            backlight,
        }
    }
}
