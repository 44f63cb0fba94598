//! Shared test infrastructure for alarm-clock integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use core::convert::Infallible;

use alarm_clock::{Button, ClockState, Coordinator, PendingEvents, PollReport, TimeOfDay};
use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use rtic_core::{Exclusive, Mutex};

// ============================================================================
// Mock Output Pin
// ============================================================================

/// Output pin that records every level written to it
pub struct RecordingPin {
    high: bool,
    history: heapless::Vec<bool, 32>,
}

impl RecordingPin {
    pub fn new() -> Self {
        Self {
            high: false,
            history: heapless::Vec::new(),
        }
    }

    pub fn is_set_high(&self) -> bool {
        self.high
    }

    /// Every level written, in order
    pub fn history(&self) -> &[bool] {
        &self.history
    }

    pub fn rising_edges(&self) -> usize {
        self.history.iter().filter(|&&level| level).count()
    }
}

impl OutputPin for RecordingPin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        let _ = self.history.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        let _ = self.history.push(true);
        Ok(())
    }
}

// ============================================================================
// Mock Input Pin
// ============================================================================

/// Input pin that replays a fixed sequence of raw levels, one per read.
/// The last level repeats once the script runs out.
pub struct ScriptedPin {
    levels: &'static [bool],
    next: Cell<usize>,
}

impl ScriptedPin {
    pub fn new(levels: &'static [bool]) -> Self {
        Self {
            levels,
            next: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.next.get()
    }

    fn read(&self) -> bool {
        let i = self.next.get();
        self.next.set(i + 1);
        self.levels[i.min(self.levels.len() - 1)]
    }
}

impl InputPin for ScriptedPin {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.read())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.read())
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that returns immediately and accounts for the requested time
#[derive(Default)]
pub struct CountingDelay {
    pub total_us: u64,
    pub calls: usize,
}

impl DelayUs<u32> for CountingDelay {
    fn delay_us(&mut self, us: u32) {
        self.total_us += u64::from(us);
        self.calls += 1;
    }
}

// ============================================================================
// Preempting Clock Mutex
// ============================================================================

/// Clock lock that lets the tick handler "fire" just before every access,
/// as if the timer interrupt had landed between two critical sections.
///
/// Each access also checks that the state it hands out is never torn: with
/// the clock not being edited, `current` must match the counter exactly.
pub struct PreemptingClock<'a> {
    state: &'a mut ClockState,
    ticks_per_lock: u32,
    pub locks: usize,
    pub torn_reads: usize,
}

impl<'a> PreemptingClock<'a> {
    pub fn new(state: &'a mut ClockState, ticks_per_lock: u32) -> Self {
        Self {
            state,
            ticks_per_lock,
            locks: 0,
            torn_reads: 0,
        }
    }
}

impl Mutex for PreemptingClock<'_> {
    type T = ClockState;

    fn lock<R>(&mut self, f: impl FnOnce(&mut ClockState) -> R) -> R {
        for _ in 0..self.ticks_per_lock {
            self.state.tick();
        }
        self.locks += 1;
        if !self.state.is_clock_setting()
            && self.state.current() != TimeOfDay::from_elapsed(self.state.elapsed())
        {
            self.torn_reads += 1;
        }
        f(&mut *self.state)
    }
}

// ============================================================================
// Test Rig
// ============================================================================

/// Clock state, pending events and a coordinator wired the way the firmware wires them
pub struct Rig {
    pub clock: ClockState,
    pub events: PendingEvents,
    pub coordinator: Coordinator<RecordingPin>,
}

impl Rig {
    pub fn new() -> Self {
        Self::starting_at(TimeOfDay::MIDNIGHT)
    }

    pub fn starting_at(time: TimeOfDay) -> Self {
        Self {
            clock: ClockState::starting_at(time),
            events: PendingEvents::new(),
            coordinator: Coordinator::new(RecordingPin::new()),
        }
    }

    /// One foreground iteration
    pub fn poll(&mut self) -> PollReport {
        match self
            .coordinator
            .poll(&mut Exclusive(&mut self.clock), &mut Exclusive(&mut self.events))
        {
            Ok(report) => report,
            Err(never) => match never {},
        }
    }

    /// Latch a debounced press and run one iteration
    pub fn press(&mut self, button: Button) -> PollReport {
        self.events.raise(button);
        self.poll()
    }

    pub fn press_n(&mut self, button: Button, n: usize) {
        for _ in 0..n {
            self.press(button);
        }
    }

    pub fn ticks(&mut self, n: u64) {
        for _ in 0..n {
            self.clock.tick();
        }
    }

    /// Full set procedure: start, `minutes` increments, confirm, `hours` increments, confirm
    pub fn set(&mut self, confirm: Button, hours: u8, minutes: u8) -> PollReport {
        self.press(confirm);
        self.press_n(Button::Increment, minutes as usize);
        self.press(confirm);
        self.press_n(Button::Increment, hours as usize);
        self.press(confirm)
    }

    pub fn led(&self) -> &RecordingPin {
        self.coordinator.alarm().output()
    }
}
