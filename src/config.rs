//! Compile-time configuration for the clock and its inputs.

use crate::clock::TimeOfDay;

/// Period of the time-keeping tick, in microseconds (1 Hz).
pub const TICK_PERIOD_US: u32 = 1_000_000;

/// How long a button must stay asserted after its edge before the press counts.
///
/// Long enough to outlast contact bounce, short enough not to miss a human press.
pub const DEBOUNCE_SETTLE_US: u32 = 20_000;

/// How often a held button is re-sampled to detect its release.
pub const RELEASE_POLL_US: u32 = 10_000;

/// Number of chained MAX7219 8x8 matrices driving the display.
pub const DISPLAY_DEVICES: usize = 4;

/// MAX7219 intensity register value (0x0..=0xF).
pub const DISPLAY_INTENSITY: u8 = 0x0;

/// Time shown at power-up; nothing survives a power loss.
pub const INITIAL_TIME: TimeOfDay = TimeOfDay::MIDNIGHT;

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
