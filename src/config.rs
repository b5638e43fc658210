//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, LED geometry and
//! canned display text live here so they can be tuned in one place.

// Timing & logic

/// Raw GPIO level must be stable this long before an edge is committed (ms).
pub const DEBOUNCE_DELAY_MS: u64 = 50;

/// No accepted press for this long puts the box into deep sleep (ms).
pub const INACTIVITY_TIMEOUT_MS: u64 = 30_000;

/// Celebration auto-returns to the idle question after this long (ms).
pub const CELEBRATION_DURATION_MS: u64 = 10_000;

/// Presses within this window of entering celebration are ignored, so the
/// winning press cannot immediately reset the box (ms).
pub const CELEBRATION_GUARD_MS: u64 = 500;

/// Number of "no" presses that triggers the button swap trick.
pub const TRIGGER_COUNT: u8 = 4;

/// Main control loop period (ms).
pub const TICK_MS: u64 = 10;

/// Length of the blocking trick-reveal pause (ms) and its animation sub-step.
pub const REVEAL_DURATION_MS: u64 = 2_000;
pub const REVEAL_FRAME_MS: u64 = 30;

// LED geometry

/// Pixels physically present on the body strip.
pub const BODY_PHYSICAL_LEDS: usize = 30;

/// Pixels actually mounted in the enclosure; the rest stay dark.
pub const BODY_ACTIVE_LEDS: usize = 9;

/// Pixels on the button strip: index 0 = "no" lamp, 1 = center, 2 = "yes" lamp.
pub const BUTTON_LEDS: usize = 3;

/// Index of the lamp next to each button, and the boot-pulse center pixel.
pub const NO_LAMP: usize = 0;
pub const CENTER_LAMP: usize = 1;
pub const YES_LAMP: usize = 2;

/// Global brightness cap applied to both strips (0-255). Kept well below
/// full scale for a soft candlelight look.
pub const STRIP_BRIGHTNESS: u8 = 150;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button YES       → P0.11  (also the System OFF wake pin)
//   Button NO        → P0.12
//   Button strip DIN → P0.13  (SPIM2 MOSI)
//   Body strip DIN   → P0.14  (SPIM3 MOSI)
//   I²C SDA          → P0.26
//   I²C SCL          → P0.27

/// GPIO port-0 pin number of the yes button, for arming the wake source.
pub const WAKE_PIN: usize = 11;

// Display text
//
// Screens are committed once per state entry; the render loop never
// re-draws them per tick.

/// One OLED screen: up to three centered lines.
#[derive(Debug, PartialEq, Eq)]
pub struct Screen {
    pub lines: &'static [&'static str],
}

pub static SCREEN_ASK: Screen = Screen {
    lines: &["WILL YOU BE MY", "VALENTINE ?"],
};

/// Escalating responses to the first few "no" presses, in order.
pub static NO_MESSAGES: [Screen; 3] = [
    Screen { lines: &["Really?"] },
    Screen { lines: &["Are you sure?"] },
    Screen { lines: &["Think again!"] },
];

pub static SCREEN_TRICK_PROMPT: Screen = Screen {
    lines: &["How about now?"],
};

pub static SCREEN_PRESSED_YES: Screen = Screen {
    lines: &["You pressed YES!"],
};

pub static SCREEN_FAIR: Screen = Screen {
    lines: &["Fair right?", "Be my valentine?"],
};

pub static SCREEN_PLEA: Screen = Screen {
    lines: &["PRETTY PLEASE??", "I promise I'm", "worth it! <3"],
};

pub static SCREEN_WIN: Screen = Screen {
    lines: &["SHE SAID YES!", "HAPPY VALENTINE", "<3 <3 <3"],
};

pub static SCREEN_WIN_FINALLY: Screen = Screen {
    lines: &["SHE SAID YES!", "(FINALLY!)", "<3 <3 <3"],
};

pub static SCREEN_GOODNIGHT: Screen = Screen {
    lines: &["Goodnight...", "<3"],
};

// Boot counter storage

/// Flash page index where the boot counter record starts (4 KB per page
/// on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 252;

/// Number of flash pages reserved for the boot counter (sequential-storage
/// needs at least two for garbage collection).
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
