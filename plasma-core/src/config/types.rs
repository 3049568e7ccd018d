//! Configuration type definitions
//!
//! Runtime settings for the plasma firmware. Display geometry is not part
//! of the configuration because the frame buffer is sized at compile time.

use heapless::String;

/// Maximum splash text length
pub const MAX_SPLASH_LEN: usize = 32;

/// Highest SPI clock the LCD bus may be configured for (Hz)
pub const MAX_SPI_FREQUENCY_HZ: u32 = 62_500_000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// SPI frequency is zero or above [`MAX_SPI_FREQUENCY_HZ`]
    SpiFrequencyOutOfRange,
    /// Splash is enabled with empty text
    EmptySplashText,
}

/// LCD settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// SPI clock (Hz)
    pub spi_frequency_hz: u32,
    /// RGB565 color the panel is cleared to after init
    pub clear_color: u16,
    /// Drive the backlight pin on
    pub backlight: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            spi_frequency_hz: 40_000_000,
            clear_color: 0xFFFF,
            backlight: true,
        }
    }
}

/// Animation logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationConfig {
    /// Log a timing summary every N palette cycles (0 disables)
    pub stats_every_cycles: u16,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            stats_every_cycles: 1,
        }
    }
}

/// Boot splash settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SplashConfig {
    /// Show the splash while the field is seeded
    pub enabled: bool,
    /// Message to center on screen
    pub text: String<MAX_SPLASH_LEN>,
}

impl Default for SplashConfig {
    fn default() -> Self {
        let mut text = String::new();
        let _ = text.push_str(crate::splash::SPLASH_TEXT);
        Self {
            enabled: true,
            text,
        }
    }
}

/// Complete firmware configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlasmaConfig {
    pub display: DisplayConfig,
    pub animation: AnimationConfig,
    pub splash: SplashConfig,
}

impl PlasmaConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let freq = self.display.spi_frequency_hz;
        if freq == 0 || freq > MAX_SPI_FREQUENCY_HZ {
            return Err(ConfigError::SpiFrequencyOutOfRange);
        }
        if self.splash.enabled && self.splash.text.is_empty() {
            return Err(ConfigError::EmptySplashText);
        }
        Ok(())
    }
}
