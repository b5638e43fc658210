//! The render engine - per-frame LED colors as a pure function of
//! (state, time).
//!
//! Nothing in here mutates; calling a painter twice with the same state and
//! timestamp yields the same frame, which is what lets the blocking reveal
//! and boot sequences re-enter it freely without animation glitches.
//! Brightness capping happens at the strip driver, not here.

use crate::config::{BODY_ACTIVE_LEDS, NO_LAMP, YES_LAMP};
use crate::debounce::Button;
use crate::session::State;
use micromath::F32Ext;
use smart_leds::RGB8;

/// Period of the trick-mode lamp swap (ms). Fast enough that the player
/// cannot track which lamp is which.
const SWAP_PERIOD_MS: u64 = 150;

const E: f32 = core::f32::consts::E;
const PI: f32 = core::f32::consts::PI;

/// Linear remap of `x` from `in_min..in_max` to `out_min..out_max`.
fn remap(x: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (x - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Candlelight breathing level, 20..=100. `exp(sin)` gives a slow swell and
/// a quicker falloff than a plain sine; the phase offset staggers pixels
/// into a flowing wash.
fn breathe(now_ms: u64, phase_offset_ms: u64) -> u8 {
    let t = now_ms.wrapping_sub(phase_offset_ms) as f32;
    let wave = (t / 2500.0 * PI).sin().exp() - 1.0 / E;
    remap(wave, 0.0, E - 1.0 / E, 20.0, 100.0) as u8
}

/// Gentle lamp envelope, 20..=140.
fn soft_pulse(now_ms: u64) -> u8 {
    (80.0 + (now_ms as f32 / 800.0).sin() * 60.0) as u8
}

/// Urgent envelope for the final plea, clamped to 0..=200.
fn panic_pulse(now_ms: u64) -> u8 {
    let v = 100.0 + (now_ms as f32 / 150.0).sin() * 100.0;
    v.max(0.0) as u8
}

/// Heartbeat envelope for the win, clamped to 0..=255.
fn win_pulse(now_ms: u64) -> u8 {
    let v = 100.0 + (now_ms as f32 / 300.0).sin() * 155.0;
    v.clamp(0.0, 255.0) as u8
}

/// Saturated gotcha colors used while the reveal text types out.
const GOTCHA_RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
const GOTCHA_GREEN: RGB8 = RGB8 { r: 0, g: 255, b: 0 };

/// Softer pair for the rapid swap, so the trick state doesn't glare.
const SWAP_RED: RGB8 = RGB8 { r: 200, g: 0, b: 50 };
const SWAP_GREEN: RGB8 = RGB8 { r: 0, g: 200, b: 50 };

/// Paint one frame of the body (ambient) strip. Pixels past
/// `BODY_ACTIVE_LEDS` are always forced off.
pub fn body_frame(state: &State, now_ms: u64, frame: &mut [RGB8]) {
    for (i, px) in frame.iter_mut().enumerate() {
        if i >= BODY_ACTIVE_LEDS {
            *px = RGB8::default();
            continue;
        }

        *px = match state {
            State::Celebration { .. } => {
                // Flow between deep red and soft pink, phase-shifted per
                // pixel so the color travels down the strip.
                let local = 0.5 + 0.5 * (now_ms as f32 / 800.0 * PI + i as f32 * 0.5).sin();
                RGB8 {
                    r: 255,
                    g: 20 + (80.0 * local) as u8,
                    b: 30 + (90.0 * local) as u8,
                }
            }
            _ => {
                // Warm pink candlelight.
                let v = breathe(now_ms, i as u64 * 40);
                RGB8 { r: v, g: v / 4, b: v / 3 }
            }
        };
    }
}

/// Paint one frame of the button (indicator) strip.
pub fn button_frame(state: &State, now_ms: u64, frame: &mut [RGB8]) {
    for px in frame.iter_mut() {
        *px = RGB8::default();
    }

    match state {
        State::TrickPending => {
            // The tell: ends trade colors every swap period.
            if (now_ms / SWAP_PERIOD_MS) % 2 == 0 {
                frame[NO_LAMP] = SWAP_GREEN;
                frame[YES_LAMP] = SWAP_RED;
            } else {
                frame[NO_LAMP] = SWAP_RED;
                frame[YES_LAMP] = SWAP_GREEN;
            }
        }

        State::TrickReveal { pressed } => {
            // Whichever button was pressed, the layout insists it was the
            // green one.
            match pressed {
                Button::Yes => {
                    frame[NO_LAMP] = GOTCHA_RED;
                    frame[YES_LAMP] = GOTCHA_GREEN;
                }
                Button::No => {
                    frame[NO_LAMP] = GOTCHA_GREEN;
                    frame[YES_LAMP] = GOTCHA_RED;
                }
            }
        }

        State::FinalPlea => {
            let v = panic_pulse(now_ms);
            let green = RGB8 { r: 0, g: v, b: 50 };
            frame[NO_LAMP] = green;
            frame[YES_LAMP] = green;
        }

        State::Celebration { .. } => {
            let v = win_pulse(now_ms);
            let heartbeat = RGB8 { r: v / 4, g: 200, b: v / 4 };
            for px in frame.iter_mut() {
                *px = heartbeat;
            }
        }

        // Idle, escalating and the fair question all offer an honest choice:
        // red by the no button, green by the yes button.
        State::Idle | State::Escalating(_) | State::FairQuestion => {
            let v = soft_pulse(now_ms);
            frame[NO_LAMP] = RGB8 { r: v, g: 0, b: 0 };
            frame[YES_LAMP] = RGB8 { r: 0, g: v, b: 0 };
        }
    }
}
