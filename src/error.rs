//! Unified error type for the firmware.
//!
//! We avoid `alloc` - all variants carry only fixed-size data. Implements
//! `defmt::Format` for efficient on-target logging. There is no user-visible
//! error surface on this device; callers log and carry on.

use defmt::Format;

/// Top-level error type used across the firmware.
#[derive(Debug, Format)]
pub enum Error {
    /// SPI transfer to a WS2812 strip failed.
    Led,

    /// I²C transaction to the display failed.
    Display,

    /// Flash read/write for the boot counter failed.
    Storage,
}
