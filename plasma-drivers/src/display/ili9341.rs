//! ILI9341 TFT LCD driver (4-wire SPI)
//!
//! Drives a 320x240 ILI9341 panel in landscape orientation with 16-bit
//! RGB565 pixels.
//!
//! # Bus Protocol
//!
//! - A data/command (D/C) pin selects the meaning of each SPI byte:
//!   low for a command opcode, high for parameters or pixel data
//! - A drawing window is selected with CASET/PASET, then RAMWR starts a
//!   pixel stream that fills the window row by row
//! - Pixels are sent most significant byte first, so the native-endian
//!   `u16` values of the frame buffer are swapped on the way out

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use plasma_core::traits::DisplaySurface;

/// ILI9341 command opcodes
#[allow(dead_code)]
pub mod cmd {
    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Sleep out
    pub const SLPOUT: u8 = 0x11;
    /// Gamma curve select
    pub const GAMMASET: u8 = 0x26;
    /// Display off
    pub const DISPOFF: u8 = 0x28;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Page (row) address set
    pub const PASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
    /// Memory access control (orientation, color order)
    pub const MADCTL: u8 = 0x36;
    /// Pixel format set
    pub const PIXFMT: u8 = 0x3A;
    /// Frame rate control (normal mode)
    pub const FRMCTR1: u8 = 0xB1;
    /// Display function control
    pub const DFUNCTR: u8 = 0xB6;
    /// Power control 1
    pub const PWCTR1: u8 = 0xC0;
    /// Power control 2
    pub const PWCTR2: u8 = 0xC1;
    /// VCOM control 1
    pub const VMCTR1: u8 = 0xC5;
    /// VCOM control 2
    pub const VMCTR2: u8 = 0xC7;
    /// Power control A
    pub const PWCTRA: u8 = 0xCB;
    /// Power control B
    pub const PWCTRB: u8 = 0xCF;
    /// Positive gamma correction
    pub const GMCTRP1: u8 = 0xE0;
    /// Negative gamma correction
    pub const GMCTRN1: u8 = 0xE1;
    /// Driver timing control A
    pub const DTCA: u8 = 0xE8;
    /// Driver timing control B
    pub const DTCB: u8 = 0xEA;
    /// Power on sequence control
    pub const PWRSEQ: u8 = 0xED;
    /// Enable 3-gamma
    pub const EN3GAM: u8 = 0xF2;
    /// Pump ratio control
    pub const PUMPRC: u8 = 0xF7;
}

/// Panel width in landscape orientation
pub const WIDTH: u16 = 320;

/// Panel height in landscape orientation
pub const HEIGHT: u16 = 240;

/// MADCTL: row/column exchange (landscape) with BGR color filter
const MADCTL_LANDSCAPE: u8 = 0x20 | 0x08;

/// RGB565 for both the RGB and MCU interfaces
const PIXFMT_16BPP: u8 = 0x55;

/// Bytes per SPI write while streaming pixels
const CHUNK_BYTES: usize = 1024;

/// Power, timing and gamma setup sent after reset
///
/// Each entry is `(command, parameters)`.
const INIT_SEQUENCE: &[(u8, &[u8])] = &[
    (0xEF, &[0x03, 0x80, 0x02]),
    (cmd::PWCTRB, &[0x00, 0xC1, 0x30]),
    (cmd::PWRSEQ, &[0x64, 0x03, 0x12, 0x81]),
    (cmd::DTCA, &[0x85, 0x00, 0x78]),
    (cmd::PWCTRA, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    (cmd::PUMPRC, &[0x20]),
    (cmd::DTCB, &[0x00, 0x00]),
    (cmd::PWCTR1, &[0x23]),
    (cmd::PWCTR2, &[0x10]),
    (cmd::VMCTR1, &[0x3E, 0x28]),
    (cmd::VMCTR2, &[0x86]),
    (cmd::MADCTL, &[MADCTL_LANDSCAPE]),
    (cmd::PIXFMT, &[PIXFMT_16BPP]),
    (cmd::FRMCTR1, &[0x00, 0x18]),
    (cmd::DFUNCTR, &[0x08, 0x82, 0x27]),
    (cmd::EN3GAM, &[0x00]),
    (cmd::GAMMASET, &[0x01]),
    (
        cmd::GMCTRP1,
        &[
            0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09,
            0x00,
        ],
    ),
    (
        cmd::GMCTRN1,
        &[
            0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36,
            0x0F,
        ],
    ),
];

/// ILI9341 driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ili9341Error<SpiE, PinE> {
    /// SPI transfer failed
    Spi(SpiE),
    /// D/C or reset pin failed
    Pin(PinE),
    /// Rectangle extends past the panel
    OutOfBounds,
    /// Pixel count does not match the rectangle
    LengthMismatch,
}

/// ILI9341 LCD driver
///
/// `RST` is optional; without it the controller is reset in software.
pub struct Ili9341<SPI, DC, RST, D> {
    spi: SPI,
    dc: DC,
    rst: Option<RST>,
    delay: D,
}

impl<SPI, DC, RST, D> Ili9341<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin<Error = DC::Error>,
    D: DelayNs,
{
    /// Create a new driver; call [`DisplaySurface::init`] before drawing
    pub fn new(spi: SPI, dc: DC, rst: Option<RST>, delay: D) -> Self {
        Self {
            spi,
            dc,
            rst,
            delay,
        }
    }

    /// Send a command followed by its parameters
    fn command(
        &mut self,
        cmd: u8,
        params: &[u8],
    ) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        self.dc.set_low().map_err(Ili9341Error::Pin)?;
        self.spi.write(&[cmd]).map_err(Ili9341Error::Spi)?;

        if !params.is_empty() {
            self.dc.set_high().map_err(Ili9341Error::Pin)?;
            self.spi.write(params).map_err(Ili9341Error::Spi)?;
        }

        Ok(())
    }

    /// Select the drawing window and start a memory write
    fn set_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();

        self.command(cmd::CASET, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::PASET, &[y0h, y0l, y1h, y1l])?;
        self.command(cmd::RAMWR, &[])
    }

    /// Stream pixels into the current window
    fn write_pixels(
        &mut self,
        pixels: impl Iterator<Item = u16>,
    ) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        self.dc.set_high().map_err(Ili9341Error::Pin)?;

        let mut buf = [0u8; CHUNK_BYTES];
        let mut len = 0;
        for pixel in pixels {
            buf[len..len + 2].copy_from_slice(&pixel.to_be_bytes());
            len += 2;
            if len == CHUNK_BYTES {
                self.spi.write(&buf).map_err(Ili9341Error::Spi)?;
                len = 0;
            }
        }
        if len > 0 {
            self.spi.write(&buf[..len]).map_err(Ili9341Error::Spi)?;
        }

        Ok(())
    }

    /// Hardware reset pulse if a reset pin is wired
    fn hard_reset(&mut self) -> Result<(), Ili9341Error<SPI::Error, DC::Error>> {
        if let Some(rst) = self.rst.as_mut() {
            rst.set_high().map_err(Ili9341Error::Pin)?;
            self.delay.delay_ms(5);
            rst.set_low().map_err(Ili9341Error::Pin)?;
            self.delay.delay_ms(20);
            rst.set_high().map_err(Ili9341Error::Pin)?;
            self.delay.delay_ms(150);
        }
        Ok(())
    }
}

impl<SPI, DC, RST, D> DisplaySurface for Ili9341<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin<Error = DC::Error>,
    D: DelayNs,
{
    type Error = Ili9341Error<SPI::Error, DC::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.hard_reset()?;

        self.command(cmd::SWRESET, &[])?;
        self.delay.delay_ms(120);

        for &(c, params) in INIT_SEQUENCE {
            self.command(c, params)?;
        }

        self.command(cmd::SLPOUT, &[])?;
        self.delay.delay_ms(120);
        self.command(cmd::DISPON, &[])?;
        self.delay.delay_ms(20);

        Ok(())
    }

    fn clear(&mut self, color: u16) -> Result<(), Self::Error> {
        self.set_window(0, 0, WIDTH - 1, HEIGHT - 1)?;
        let count = WIDTH as usize * HEIGHT as usize;
        self.write_pixels(core::iter::repeat(color).take(count))
    }

    fn present(
        &mut self,
        x0: u16,
        y0: u16,
        width: u16,
        height: u16,
        pixels: &[u16],
    ) -> Result<(), Self::Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        let x1 = x0
            .checked_add(width - 1)
            .filter(|&x1| x1 < WIDTH)
            .ok_or(Ili9341Error::OutOfBounds)?;
        let y1 = y0
            .checked_add(height - 1)
            .filter(|&y1| y1 < HEIGHT)
            .ok_or(Ili9341Error::OutOfBounds)?;
        if pixels.len() != width as usize * height as usize {
            return Err(Ili9341Error::LengthMismatch);
        }

        self.set_window(x0, y0, x1, y1)?;
        self.write_pixels(pixels.iter().copied())
    }

    fn size(&self) -> (u16, u16) {
        (WIDTH, HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::spi::Operation;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Cmd(u8),
        Data(Vec<u8>),
        Reset(bool),
    }

    #[derive(Default)]
    struct Bus {
        dc_high: bool,
        ops: Vec<Op>,
        writes: usize,
    }

    type SharedBus = Rc<RefCell<Bus>>;

    // Mock SPI device; interprets bytes using the current D/C level
    struct MockSpi(SharedBus);

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            let mut bus = self.0.borrow_mut();
            for op in operations {
                if let Operation::Write(bytes) = op {
                    bus.writes += 1;
                    if bus.dc_high {
                        bus.ops.push(Op::Data(bytes.to_vec()));
                    } else {
                        for &b in bytes.iter() {
                            bus.ops.push(Op::Cmd(b));
                        }
                    }
                }
            }
            Ok(())
        }
    }

    // Mock D/C pin
    struct MockDc(SharedBus);

    impl embedded_hal::digital::ErrorType for MockDc {
        type Error = Infallible;
    }

    impl OutputPin for MockDc {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = true;
            Ok(())
        }
    }

    // Mock reset pin
    struct MockRst(SharedBus);

    impl embedded_hal::digital::ErrorType for MockRst {
        type Error = Infallible;
    }

    impl OutputPin for MockRst {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().ops.push(Op::Reset(false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().ops.push(Op::Reset(true));
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn driver(with_reset: bool) -> (Ili9341<MockSpi, MockDc, MockRst, NoDelay>, SharedBus) {
        let bus: SharedBus = Rc::new(RefCell::new(Bus::default()));
        let rst = with_reset.then(|| MockRst(bus.clone()));
        let lcd = Ili9341::new(MockSpi(bus.clone()), MockDc(bus.clone()), rst, NoDelay);
        (lcd, bus)
    }

    /// All data bytes written after the last RAMWR
    fn pixel_stream(bus: &Bus) -> Vec<u8> {
        let start = bus
            .ops
            .iter()
            .rposition(|op| *op == Op::Cmd(cmd::RAMWR))
            .expect("no RAMWR");
        bus.ops[start + 1..]
            .iter()
            .flat_map(|op| match op {
                Op::Data(bytes) => bytes.clone(),
                _ => Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_init_sequence() {
        let (mut lcd, bus) = driver(true);
        lcd.init().unwrap();

        let bus = bus.borrow();
        assert_eq!(
            &bus.ops[..3],
            &[Op::Reset(true), Op::Reset(false), Op::Reset(true)]
        );
        assert_eq!(bus.ops[3], Op::Cmd(cmd::SWRESET));

        let pixfmt = bus
            .ops
            .iter()
            .position(|op| *op == Op::Cmd(cmd::PIXFMT))
            .unwrap();
        assert_eq!(bus.ops[pixfmt + 1], Op::Data(vec![0x55]));

        let n = bus.ops.len();
        assert_eq!(bus.ops[n - 2], Op::Cmd(cmd::SLPOUT));
        assert_eq!(bus.ops[n - 1], Op::Cmd(cmd::DISPON));
    }

    #[test]
    fn test_init_without_reset_pin() {
        let (mut lcd, bus) = driver(false);
        lcd.init().unwrap();
        assert_eq!(bus.borrow().ops[0], Op::Cmd(cmd::SWRESET));
    }

    #[test]
    fn test_present_sets_window() {
        let (mut lcd, bus) = driver(false);
        lcd.present(10, 20, 2, 3, &[0; 6]).unwrap();

        let bus = bus.borrow();
        assert_eq!(
            &bus.ops[..5],
            &[
                Op::Cmd(cmd::CASET),
                Op::Data(vec![0, 10, 0, 11]),
                Op::Cmd(cmd::PASET),
                Op::Data(vec![0, 20, 0, 22]),
                Op::Cmd(cmd::RAMWR),
            ]
        );
    }

    #[test]
    fn test_present_sends_pixels_big_endian() {
        let (mut lcd, bus) = driver(false);
        lcd.present(0, 0, 2, 1, &[0xF800, 0x001F]).unwrap();

        assert_eq!(pixel_stream(&bus.borrow()), vec![0xF8, 0x00, 0x00, 0x1F]);
    }

    #[test]
    fn test_present_full_frame_in_chunks() {
        let (mut lcd, bus) = driver(false);
        let pixels: Vec<u16> = (0..(WIDTH as u32 * HEIGHT as u32))
            .map(|i| i as u16)
            .collect();
        lcd.present(0, 0, WIDTH, HEIGHT, &pixels).unwrap();

        let bus = bus.borrow();
        let stream = pixel_stream(&bus);
        assert_eq!(stream.len(), pixels.len() * 2);
        assert_eq!(&stream[2..4], &[0x00, 0x01]);
        assert_eq!(&stream[stream.len() - 2..], &pixels[pixels.len() - 1].to_be_bytes());
        // CASET, PASET (command + parameters each), RAMWR, then 150 full chunks
        assert_eq!(bus.writes, 5 + pixels.len() * 2 / CHUNK_BYTES);
    }

    #[test]
    fn test_present_rejects_bad_rectangles() {
        let (mut lcd, bus) = driver(false);
        assert_eq!(
            lcd.present(319, 0, 2, 1, &[0, 0]),
            Err(Ili9341Error::OutOfBounds)
        );
        assert_eq!(
            lcd.present(0, 239, 1, 2, &[0, 0]),
            Err(Ili9341Error::OutOfBounds)
        );
        assert_eq!(
            lcd.present(u16::MAX, 0, 2, 1, &[0, 0]),
            Err(Ili9341Error::OutOfBounds)
        );
        assert_eq!(
            lcd.present(0, 0, 2, 2, &[0, 0, 0]),
            Err(Ili9341Error::LengthMismatch)
        );
        assert!(bus.borrow().ops.is_empty());

        // Empty rectangles are a no-op
        assert_eq!(lcd.present(0, 0, 0, 5, &[]), Ok(()));
    }

    #[test]
    fn test_clear_fills_panel() {
        let (mut lcd, bus) = driver(false);
        lcd.clear(0xFFFF).unwrap();

        let bus = bus.borrow();
        assert_eq!(bus.ops[1], Op::Data(vec![0, 0, 0x01, 0x3F]));
        assert_eq!(bus.ops[3], Op::Data(vec![0, 0, 0, 0xEF]));
        let stream = pixel_stream(&bus);
        assert_eq!(stream.len(), 320 * 240 * 2);
        assert!(stream.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_size() {
        let (lcd, _) = driver(false);
        assert_eq!(lcd.size(), (320, 240));
    }
}
