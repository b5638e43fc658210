//! The interaction state machine.
//!
//! One [`Session`] value owns the current state, the "no" counter and both
//! timers; the control loop feeds it debounced presses and a per-tick time
//! check. Transitions come back as [`Effect`]/[`Tick`] values for the caller
//! to execute, so this module stays free of hardware and the render engine
//! can consume the same [`State`] without the two drifting apart.

use crate::config::{
    self, Screen, CELEBRATION_DURATION_MS, CELEBRATION_GUARD_MS, INACTIVITY_TIMEOUT_MS,
    TRIGGER_COUNT,
};
use crate::debounce::Button;
use crate::power_logic::{elapsed_ms, should_sleep};

/// Interaction states. Exactly one is active at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting for the first answer to the big question.
    Idle,
    /// One or more "no" presses so far; the count selects the comeback line.
    Escalating(u8),
    /// The lamps are swapping rapidly; the next press springs the trick.
    TrickPending,
    /// Blocking gotcha pause. The lamp layout claims the pressed button was
    /// the green one, whichever it really was.
    TrickReveal { pressed: Button },
    /// "Fair right?" - an honest yes/no is on offer again.
    FairQuestion,
    /// Last chance. Every exit from here is a win.
    FinalPlea,
    /// She said yes.
    Celebration { finally: bool },
}

/// Side effect the caller must perform after a press was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do beyond rendering the (possibly unchanged) state.
    None,
    /// Commit a new screen to the display.
    Show(&'static Screen),
    /// Run the blocking trick-reveal sequence, then call
    /// [`Session::finish_reveal`].
    BeginReveal,
    /// Celebration was manually dismissed: re-run the boot visuals and show
    /// the ask screen.
    ResetVisuals,
}

/// Result of the per-tick time check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    None,
    /// Celebration timed out: re-run the boot visuals and show the ask screen.
    CelebrationExpired,
    /// The inactivity window ran out. Reported once per idle period.
    SleepReady,
}

/// All session state, created fresh at every boot. Deep sleep destroys it.
pub struct Session {
    state: State,
    state_entered_ms: u64,
    last_activity_ms: u64,
    sleep_reported: bool,
}

impl Session {
    pub fn new(now_ms: u64) -> Self {
        Self {
            state: State::Idle,
            state_entered_ms: now_ms,
            last_activity_ms: now_ms,
            sleep_reported: false,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Accepted "no" presses so far in this round.
    pub fn no_count(&self) -> u8 {
        match self.state {
            State::Escalating(n) => n,
            State::TrickPending => TRIGGER_COUNT,
            _ => 0,
        }
    }

    /// Handle one debounced press. Refreshes the activity timer, applies the
    /// transition table and returns the side effect to execute.
    pub fn handle_press(&mut self, button: Button, now_ms: u64) -> Effect {
        self.last_activity_ms = now_ms;
        self.sleep_reported = false;

        let (next, effect) = match (self.state, button) {
            (State::Idle, Button::Yes) | (State::Escalating(_), Button::Yes) => (
                State::Celebration { finally: false },
                Effect::Show(&config::SCREEN_WIN),
            ),

            (State::Idle, Button::No) => {
                (State::Escalating(1), Effect::Show(&config::NO_MESSAGES[0]))
            }
            (State::Escalating(n), Button::No) => {
                let n = n + 1;
                if n >= TRIGGER_COUNT {
                    (State::TrickPending, Effect::Show(&config::SCREEN_TRICK_PROMPT))
                } else {
                    (State::Escalating(n), Effect::Show(&config::NO_MESSAGES[n as usize - 1]))
                }
            }

            // Either button springs the trick; the press only picks the
            // gotcha coloring.
            (State::TrickPending, pressed) => {
                (State::TrickReveal { pressed }, Effect::BeginReveal)
            }

            // Ignore presses while the reveal sub-loop owns the tick; the
            // control loop does not poll here, so this arm is only reachable
            // if a caller misuses the API.
            (State::TrickReveal { .. }, _) => (self.state, Effect::None),

            (State::FairQuestion, Button::Yes) => (
                State::Celebration { finally: false },
                Effect::Show(&config::SCREEN_WIN),
            ),
            (State::FairQuestion, Button::No) => {
                (State::FinalPlea, Effect::Show(&config::SCREEN_PLEA))
            }

            // Any press is a yes now.
            (State::FinalPlea, _) => (
                State::Celebration { finally: true },
                Effect::Show(&config::SCREEN_WIN_FINALLY),
            ),

            (State::Celebration { .. }, _) => {
                if elapsed_ms(now_ms, self.state_entered_ms) > CELEBRATION_GUARD_MS {
                    (State::Idle, Effect::ResetVisuals)
                } else {
                    // The winning press is still settling; don't let it
                    // immediately dismiss the celebration.
                    (self.state, Effect::None)
                }
            }
        };

        self.enter(next, now_ms);
        effect
    }

    /// Complete the blocking trick reveal: move on to the fair question.
    pub fn finish_reveal(&mut self, now_ms: u64) -> Effect {
        debug_assert!(matches!(self.state, State::TrickReveal { .. }));
        self.enter(State::FairQuestion, now_ms);
        Effect::Show(&config::SCREEN_FAIR)
    }

    /// Time-based auto-transitions; call once per tick after input handling.
    pub fn tick(&mut self, now_ms: u64) -> Tick {
        if matches!(self.state, State::Celebration { .. })
            && elapsed_ms(now_ms, self.state_entered_ms) > CELEBRATION_DURATION_MS
        {
            self.enter(State::Idle, now_ms);
            // Refresh activity so the box lingers awake on the question
            // instead of dozing off right after the celebration.
            self.last_activity_ms = now_ms;
            self.sleep_reported = false;
            return Tick::CelebrationExpired;
        }

        if !self.sleep_reported
            && should_sleep(now_ms, self.last_activity_ms, INACTIVITY_TIMEOUT_MS)
        {
            self.sleep_reported = true;
            return Tick::SleepReady;
        }

        Tick::None
    }

    fn enter(&mut self, next: State, now_ms: u64) {
        if next != self.state {
            self.state = next;
            self.state_entered_ms = now_ms;
        }
    }
}
