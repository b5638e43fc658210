//! SSD1306 OLED display wrapper.
//!
//! Screens are a few centered lines of text, committed once per state
//! entry. Draw calls are fire-and-forget: a failed I²C transaction leaves
//! the previous frame on screen, which is harmless here.

use crate::config::Screen;
use core::fmt::Write as _;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Alignment, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style() -> embedded_graphics::mono_font::MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Render a canned screen, horizontally centered. A single line sits in the
/// middle of the panel; two or three lines stack below a raised first line,
/// matching the original enclosure artwork.
pub fn draw_screen<I2C>(display: &mut Display<I2C>, screen: &Screen)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let baselines: &[i32] = match screen.lines.len() {
        0 | 1 => &[36],
        2 => &[25, 45],
        _ => &[25, 45, 60],
    };

    for (line, &y) in screen.lines.iter().zip(baselines) {
        let _ = Text::with_alignment(line, Point::new(64, y), text_style(), Alignment::Center)
            .draw(display);
    }

    let _ = display.flush();
}

/// Blank the panel (used around the boot wipe and before sleep).
pub fn clear<I2C>(display: &mut Display<I2C>)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();
    let _ = display.flush();
}

/// One-line diagnostics splash with the boot counter, shown briefly while
/// the boot wipe runs.
pub fn draw_boot_splash<I2C>(display: &mut Display<I2C>, boot_count: u32)
where
    I2C: embedded_hal::i2c::I2c,
{
    display.clear_buffer();

    let mut line: heapless::String<16> = heapless::String::new();
    let _ = write!(line, "boot #{}", boot_count);
    let _ = Text::with_alignment(&line, Point::new(64, 36), text_style(), Alignment::Center)
        .draw(display);

    let _ = display.flush();
}
