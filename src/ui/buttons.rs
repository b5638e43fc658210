//! Raw GPIO access for the yes/no button pair.
//!
//! Both buttons are active-low with internal pull-ups. No edge interrupts:
//! the control loop polls the raw levels every tick and the debouncer in
//! `crate::debounce` turns them into press events, so a bouncy switch can
//! never outrun the logic.

use embassy_nrf::gpio::{AnyPin, Input, Pull};

/// The two raw button inputs.
pub struct Buttons<'d> {
    yes: Input<'d>,
    no: Input<'d>,
}

impl<'d> Buttons<'d> {
    pub fn new(yes_pin: AnyPin, no_pin: AnyPin) -> Self {
        Self {
            yes: Input::new(yes_pin, Pull::Up),
            no: Input::new(no_pin, Pull::Up),
        }
    }

    /// Current raw levels as (yes, no); `true` = HIGH = released.
    pub fn sample(&self) -> (bool, bool) {
        (self.yes.is_high(), self.no.is_high())
    }
}
