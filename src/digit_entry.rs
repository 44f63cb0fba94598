//! Interactive minutes-then-hours entry of a time value.
//!
//! The entry is stepped once per foreground iteration with whatever
//! increment and confirm events arrived since the last step; it never
//! blocks. Every write to the shared time happens inside its own short lock
//! so the tick handler is never held off for long.

use rtic_core::Mutex;

use crate::clock::{ClockState, SetTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitEntryMode {
    Minutes,
    Hours,
    Done,
}

impl DigitEntryMode {
    fn next(self) -> Self {
        match self {
            DigitEntryMode::Minutes => DigitEntryMode::Hours,
            DigitEntryMode::Hours | DigitEntryMode::Done => DigitEntryMode::Done,
        }
    }
}

/// One in-progress edit of the clock or the alarm time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitEntry {
    target: SetTarget,
    mode: DigitEntryMode,
}

impl DigitEntry {
    /// Enters the setting mode for `target` and zeroes its hours and minutes.
    pub fn begin<C>(target: SetTarget, clock: &mut C) -> Self
    where
        C: Mutex<T = ClockState>,
    {
        clock.lock(|c| c.begin_setting(target));
        Self {
            target,
            mode: DigitEntryMode::Minutes,
        }
    }

    pub fn target(&self) -> SetTarget {
        self.target
    }

    pub fn mode(&self) -> DigitEntryMode {
        self.mode
    }

    pub fn is_done(&self) -> bool {
        self.mode == DigitEntryMode::Done
    }

    /// Applies one pass of input.
    ///
    /// The increment is applied to the digit of the current mode before the
    /// confirm advances the mode, so both take effect when they arrive
    /// together. `Done` ignores all input.
    pub fn step<C>(&mut self, clock: &mut C, increment: bool, confirm: bool) -> DigitEntryMode
    where
        C: Mutex<T = ClockState>,
    {
        if self.is_done() {
            return self.mode;
        }

        if increment {
            let target = self.target;
            let mode = self.mode;
            clock.lock(|c| {
                let time = c.time_mut(target);
                match mode {
                    DigitEntryMode::Minutes => time.increment_minutes(),
                    DigitEntryMode::Hours => time.increment_hours(),
                    DigitEntryMode::Done => {}
                }
            });
        }

        if confirm {
            self.mode = self.mode.next();
        }

        self.mode
    }
}
