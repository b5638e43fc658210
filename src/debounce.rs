//! Button debouncing - raw, bouncy GPIO samples in, clean press events out.
//!
//! Both buttons are sampled every control-loop tick. A channel commits a new
//! stable level only after the raw signal has sat still for the full
//! [`DEBOUNCE_DELAY_MS`](crate::config::DEBOUNCE_DELAY_MS) window; any raw
//! wiggle restarts that window. A press event fires exactly once per
//! HIGH→LOW transition of the stable level (the buttons are active-low).
//! Releases are silent.

use crate::config::DEBOUNCE_DELAY_MS;
use crate::power_logic::elapsed_ms;

/// The two physical buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Yes,
    No,
}

/// Debounce state for one button. Levels are `true` = HIGH = released.
struct Channel {
    raw_last: bool,
    stable: bool,
    last_change_ms: u64,
}

impl Channel {
    fn new(initial_raw: bool, now_ms: u64) -> Self {
        Self {
            raw_last: initial_raw,
            stable: initial_raw,
            last_change_ms: now_ms,
        }
    }

    /// Feed one raw sample; returns `true` when a press edge is committed.
    fn update(&mut self, raw: bool, now_ms: u64) -> bool {
        if raw != self.raw_last {
            // Restart the window on every wiggle, not just on settle.
            self.last_change_ms = now_ms;
            self.raw_last = raw;
        }

        if elapsed_ms(now_ms, self.last_change_ms) > DEBOUNCE_DELAY_MS && raw != self.stable {
            self.stable = raw;
            // Active-low: only the HIGH→LOW commit is a press.
            return !self.stable;
        }

        false
    }

    /// Re-prime from a live level after a blocking sequence, discarding any
    /// half-tracked edge so a press lost during the pause cannot fire late.
    fn reprime(&mut self, raw: bool, now_ms: u64) {
        self.raw_last = raw;
        self.stable = raw;
        self.last_change_ms = now_ms;
    }
}

/// Debouncer for the yes/no button pair.
pub struct Debouncer {
    yes: Channel,
    no: Channel,
}

impl Debouncer {
    /// Create from the levels read at boot, so a button held during power-up
    /// does not register as a press.
    pub fn new(raw_yes: bool, raw_no: bool, now_ms: u64) -> Self {
        Self {
            yes: Channel::new(raw_yes, now_ms),
            no: Channel::new(raw_no, now_ms),
        }
    }

    /// Sample both buttons once. At most one press is reported per tick;
    /// when both channels commit in the same tick, yes wins.
    pub fn poll(&mut self, raw_yes: bool, raw_no: bool, now_ms: u64) -> Option<Button> {
        let yes_pressed = self.yes.update(raw_yes, now_ms);
        let no_pressed = self.no.update(raw_no, now_ms);

        if yes_pressed {
            Some(Button::Yes)
        } else if no_pressed {
            Some(Button::No)
        } else {
            None
        }
    }

    /// Resynchronize with the live pin levels after a blocking reveal, boot
    /// or shutdown sequence during which no polling happened.
    pub fn resync(&mut self, raw_yes: bool, raw_no: bool, now_ms: u64) {
        self.yes.reprime(raw_yes, now_ms);
        self.no.reprime(raw_no, now_ms);
    }
}
