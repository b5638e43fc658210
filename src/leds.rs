//! WS2812 strip driver glue.
//!
//! Each strip hangs off an SPIM MOSI pin; `ws2812-spi` pre-renders the
//! 800 kHz bit stream into a borrowed buffer so no allocation happens per
//! frame. A global brightness cap keeps the candlelight look and the supply
//! current in check.
//!
//! Strip writes are fire-and-forget: errors are logged once, and recovery
//! is logged once, instead of spamming the RTT channel every frame.

use crate::config::STRIP_BRIGHTNESS;
use crate::error::Error;
use embedded_hal::spi::SpiBus;
use smart_leds::{brightness, SmartLedsWrite, RGB8};
use ws2812_spi::prerendered::Ws2812;

/// SPI bytes per LED in the pre-rendered stream (4 SPI bits per data bit).
pub const SPI_BYTES_PER_LED: usize = 12;

/// Pre-render buffer size for a strip, including latch slack.
pub const fn spi_buffer_len(led_count: usize) -> usize {
    led_count * SPI_BYTES_PER_LED + 40
}

/// One WS2812 strip with a brightness cap and a write-error latch.
pub struct Strip<'a, SPI>
where
    SPI: SpiBus<u8>,
{
    driver: Ws2812<'a, SPI>,
    level: u8,
    err_logged: bool,
}

impl<'a, SPI> Strip<'a, SPI>
where
    SPI: SpiBus<u8>,
{
    pub fn new(spi: SPI, buffer: &'a mut [u8]) -> Self {
        Self {
            driver: Ws2812::new(spi, buffer),
            level: STRIP_BRIGHTNESS,
            err_logged: false,
        }
    }

    /// Set the global brightness cap (0-255). Used by the shutdown fade.
    pub fn set_brightness(&mut self, level: u8) {
        self.level = level;
    }

    /// Push one frame out, applying the brightness cap.
    pub fn write(&mut self, frame: &[RGB8]) -> Result<(), Error> {
        let result = self
            .driver
            .write(brightness(frame.iter().copied(), self.level));

        match result {
            Err(_) if !self.err_logged => {
                defmt::warn!("LED strip write error");
                self.err_logged = true;
                Err(Error::Led)
            }
            Err(_) => Err(Error::Led),
            Ok(()) => {
                if self.err_logged {
                    defmt::info!("LED strip write recovered");
                    self.err_logged = false;
                }
                Ok(())
            }
        }
    }

    /// Blank the whole strip.
    pub fn clear(&mut self, led_count: usize) -> Result<(), Error> {
        let black = (0..led_count).map(|_| RGB8::default());
        self.driver.write(black).map_err(|_| Error::Led)
    }
}
