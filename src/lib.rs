#![cfg_attr(not(test), no_std)]

//! Time-keeping and button coordination core for a one-alarm clock.
//!
//! - **`ClockState`**: the shared elapsed-seconds counter, current time,
//!   alarm time and mode flags. The 1 Hz tick calls [`ClockState::tick`].
//! - **`PendingEvents`**: one single-slot latch per [`Button`], raised by the
//!   debounced input and taken by the foreground loop.
//! - **`Debouncer`** / **`poll_pressed`**: settle-delay debouncing, interrupt
//!   driven or blocking.
//! - **`DigitEntry`**: minutes-then-hours entry of a time value.
//! - **`AlarmEvaluator`**: one-shot alarm output.
//! - **`Coordinator`**: one iteration of the foreground loop.
//!
//! Shared state is reached through [`rtic_core::Mutex`], which RTIC shared
//! resources implement; tests use [`rtic_core::Exclusive`].

pub mod alarm;
pub mod clock;
pub mod config;
pub mod coordinator;
pub mod debounce;
pub mod digit_entry;
pub mod display;
pub mod font;
pub mod input;

pub use alarm::{AlarmEvaluator, AlarmTransition};
pub use clock::{ClockState, SetTarget, TimeOfDay};
pub use coordinator::{Coordinator, EntryActivity, PollReport};
pub use debounce::{poll_pressed, ActiveLevel, DebounceState, Debouncer, SampleOutcome};
pub use digit_entry::{DigitEntry, DigitEntryMode};
pub use input::{Button, EventLatch, PendingEvents};
