//! The foreground control loop body.
//!
//! [`Coordinator::poll`] is one iteration: it drains the pending button
//! events, drives the digit entry (starting, stepping or committing it) and
//! then evaluates the alarm. The caller loops forever, sleeping between
//! interrupts.

use embedded_hal::digital::v2::OutputPin;
use rtic_core::Mutex;

use crate::alarm::{AlarmEvaluator, AlarmTransition};
use crate::clock::{ClockState, SetTarget, TimeOfDay};
use crate::digit_entry::{DigitEntry, DigitEntryMode};
use crate::input::{Button, PendingEvents};

/// What happened to the digit entry during one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryActivity {
    Started(SetTarget),
    Edited {
        target: SetTarget,
        mode: DigitEntryMode,
        time: TimeOfDay,
    },
    /// The entry reached `Done`: the clock was reconciled or the alarm armed.
    Committed { target: SetTarget, time: TimeOfDay },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollReport {
    pub entry: Option<EntryActivity>,
    pub alarm: Option<AlarmTransition>,
}

impl PollReport {
    /// True when nothing visible changed.
    pub fn is_quiet(&self) -> bool {
        self.entry.is_none() && self.alarm.is_none()
    }
}

/// Button events taken for one poll.
#[derive(Debug, Clone, Copy, Default)]
struct Intents {
    increment: bool,
    confirm: bool,
    start: Option<SetTarget>,
}

impl Intents {
    /// Takes the events relevant to the current phase. Presses with no
    /// meaning in that phase are taken as well and dropped, so a stale
    /// latch can never act later.
    fn take(events: &mut PendingEvents, editing: Option<SetTarget>) -> Self {
        let increment = events.take(Button::Increment);
        let clock_set = events.take(Button::ClockSet);
        let alarm_set = events.take(Button::AlarmSet);

        match editing {
            Some(SetTarget::Clock) => Self {
                increment,
                confirm: clock_set,
                start: None,
            },
            Some(SetTarget::Alarm) => Self {
                increment,
                confirm: alarm_set,
                start: None,
            },
            None => Self {
                increment,
                confirm: false,
                start: if clock_set {
                    Some(SetTarget::Clock)
                } else if alarm_set {
                    Some(SetTarget::Alarm)
                } else {
                    None
                },
            },
        }
    }
}

pub struct Coordinator<P> {
    entry: Option<DigitEntry>,
    alarm: AlarmEvaluator<P>,
}

impl<P: OutputPin> Coordinator<P> {
    pub fn new(alarm_output: P) -> Self {
        Self {
            entry: None,
            alarm: AlarmEvaluator::new(alarm_output),
        }
    }

    /// The entry in progress, if any.
    pub fn entry(&self) -> Option<&DigitEntry> {
        self.entry.as_ref()
    }

    pub fn alarm(&self) -> &AlarmEvaluator<P> {
        &self.alarm
    }

    /// Runs one iteration of the control loop.
    pub fn poll<C, E>(&mut self, clock: &mut C, events: &mut E) -> Result<PollReport, P::Error>
    where
        C: Mutex<T = ClockState>,
        E: Mutex<T = PendingEvents>,
    {
        let editing = self.entry.map(|entry| entry.target());
        let intents = events.lock(|e| Intents::take(e, editing));
        let mut report = PollReport::default();

        // The increment press only reaches the alarm when no entry consumed it.
        let mut silence_request = intents.increment;

        if let Some(entry) = self.entry.as_mut() {
            silence_request = false;
            if intents.increment || intents.confirm {
                let target = entry.target();
                let mode = entry.step(clock, intents.increment, intents.confirm);
                if mode == DigitEntryMode::Done {
                    let time = clock.lock(|c| {
                        c.finish_setting(target);
                        c.time(target)
                    });
                    self.entry = None;
                    report.entry = Some(EntryActivity::Committed { target, time });
                } else {
                    let time = clock.lock(|c| c.time(target));
                    report.entry = Some(EntryActivity::Edited { target, mode, time });
                }
            }
        } else if let Some(target) = intents.start {
            self.entry = Some(DigitEntry::begin(target, clock));
            report.entry = Some(EntryActivity::Started(target));
        }

        report.alarm = self.alarm.evaluate(clock, silence_request)?;
        Ok(report)
    }
}
