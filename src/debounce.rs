//! Button debouncing.
//!
//! Two flavours share the same acceptance rule: a press counts only if the
//! signal is still asserted one settle period after it was first seen.
//!
//! - [`poll_pressed`] samples a pin, waits the settle period with a blocking
//!   delay and samples again.
//! - [`Debouncer`] is the interrupt-driven form. An edge interrupt reports
//!   the raw edge, a one-shot timer delivers the settle sample later, and the
//!   debouncer keeps tracking the held button until release so that one
//!   physical press yields exactly one event. Edges and samples carry a
//!   microsecond timestamp; a sample taken before the settle deadline is
//!   reported as [`SampleOutcome::Early`] and leaves the state untouched.
//!
//! ```text
//!          on_edge()           sample: asserted
//!  Idle ─────────────► Settling ────────────────► Held
//!   ▲                     │                        │
//!   │  sample: released   │   sample: released     │
//!   └─────────────────────┴────────────────────────┘
//! ```

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::InputPin;

use crate::config::{DEBOUNCE_SETTLE_US, RELEASE_POLL_US};

/// Electrical level that means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pull-up input, button shorts to ground.
    Low,
    /// Pull-down input, button shorts to the supply.
    High,
}

impl ActiveLevel {
    pub fn is_asserted<P: InputPin>(self, pin: &P) -> Result<bool, P::Error> {
        match self {
            ActiveLevel::Low => pin.is_low(),
            ActiveLevel::High => pin.is_high(),
        }
    }
}

/// Returns true only if `pin` is asserted now and still asserted after
/// `settle_us` microseconds.
///
/// This is the polled form for loops that can afford to block. The firmware
/// samples its buttons from interrupts through [`Debouncer`] instead.
pub fn poll_pressed<P, D>(
    pin: &P,
    delay: &mut D,
    level: ActiveLevel,
    settle_us: u32,
) -> Result<bool, P::Error>
where
    P: InputPin,
    D: DelayUs<u32>,
{
    if !level.is_asserted(pin)? {
        return Ok(false);
    }
    delay.delay_us(settle_us);
    level.is_asserted(pin)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// Waiting for an edge; the pin's edge interrupt should be enabled.
    #[default]
    Idle,
    /// An edge was seen; waiting for the settle sample.
    Settling,
    /// A press was accepted; waiting for release.
    Held,
}

/// What a settle or release sample meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleOutcome {
    /// Still asserted after settling: a genuine press. Raise the event.
    Confirmed,
    /// Gone before the settle sample: bounce or noise.
    Rejected,
    /// Still held since the confirmed press.
    StillHeld,
    /// Released after a confirmed press.
    Released,
    /// Sampled before the settle deadline; sample again later.
    Early,
    /// Sampled while idle; nothing to do.
    Ignored,
}

impl SampleOutcome {
    /// True when the button is back to `Idle` and its edge interrupt can be re-enabled.
    pub fn rearms(self) -> bool {
        matches!(self, SampleOutcome::Rejected | SampleOutcome::Released)
    }
}

/// Per-button edge debouncer driven by interrupt and timer callbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    state: DebounceState,
    settle_until_us: u64,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            state: DebounceState::Idle,
            settle_until_us: 0,
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// True while the button needs further timer samples.
    pub fn needs_sample(&self) -> bool {
        self.state != DebounceState::Idle
    }

    /// Microseconds until this button wants its next sample, or `None` while idle.
    pub fn sample_due_in(&self, now_us: u64) -> Option<u32> {
        match self.state {
            DebounceState::Idle => None,
            DebounceState::Settling => {
                let remaining = self.settle_until_us.saturating_sub(now_us);
                Some(remaining.min(u64::from(DEBOUNCE_SETTLE_US)) as u32)
            }
            DebounceState::Held => Some(RELEASE_POLL_US),
        }
    }

    /// Records a raw edge seen at `now_us`. Returns true if a settle sample
    /// must be scheduled; edges arriving while a press is already in
    /// progress are swallowed.
    pub fn on_edge(&mut self, now_us: u64) -> bool {
        if self.state == DebounceState::Idle {
            self.state = DebounceState::Settling;
            self.settle_until_us = now_us + u64::from(DEBOUNCE_SETTLE_US);
            true
        } else {
            false
        }
    }

    /// Feeds a level sample taken by the debounce timer at `now_us`.
    ///
    /// The timer is shared between buttons, so a settle sample can arrive
    /// for a button whose own settle period has not elapsed yet.
    pub fn on_sample(&mut self, asserted: bool, now_us: u64) -> SampleOutcome {
        let (next, outcome) = match (self.state, asserted) {
            (DebounceState::Idle, _) => (DebounceState::Idle, SampleOutcome::Ignored),
            (DebounceState::Settling, _) if now_us < self.settle_until_us => {
                (DebounceState::Settling, SampleOutcome::Early)
            }
            (DebounceState::Settling, true) => (DebounceState::Held, SampleOutcome::Confirmed),
            (DebounceState::Settling, false) => (DebounceState::Idle, SampleOutcome::Rejected),
            (DebounceState::Held, true) => (DebounceState::Held, SampleOutcome::StillHeld),
            (DebounceState::Held, false) => (DebounceState::Idle, SampleOutcome::Released),
        };
        self.state = next;
        outcome
    }
}
