//! Alarm evaluation: fires the output once per arming when the current
//! minute matches the alarm minute, and silences it on an increment press.

use embedded_hal::digital::v2::OutputPin;
use rtic_core::Mutex;

use crate::clock::ClockState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmTransition {
    /// Output asserted.
    Fired,
    /// Output deasserted and the alarm disarmed.
    Silenced,
}

/// Decides the alarm transition for one evaluation and updates the flags.
///
/// Starting an alarm set silences a ringing alarm, since the alarm it
/// belonged to is being replaced. Otherwise nothing fires or silences while
/// a setting mode is active. Seconds are not compared, so the coincidence
/// window is the whole minute.
pub fn next_transition(state: &mut ClockState, increment: bool) -> Option<AlarmTransition> {
    if state.is_alarm_setting() && state.is_alarm_firing() {
        state.set_alarm_firing(false);
        return Some(AlarmTransition::Silenced);
    }
    if state.is_setting() {
        return None;
    }

    if state.is_alarm_firing() {
        if increment {
            state.set_alarm_firing(false);
            state.disarm_alarm();
            return Some(AlarmTransition::Silenced);
        }
    } else if state.is_alarm_armed() && state.current().same_minute(&state.alarm()) {
        state.set_alarm_firing(true);
        return Some(AlarmTransition::Fired);
    }

    None
}

/// Owns the alarm output line.
pub struct AlarmEvaluator<P> {
    output: P,
}

impl<P: OutputPin> AlarmEvaluator<P> {
    pub fn new(output: P) -> Self {
        Self { output }
    }

    /// Evaluates once and drives the output on a transition. The line is
    /// only written on transitions, never re-asserted while already firing.
    pub fn evaluate<C>(
        &mut self,
        clock: &mut C,
        increment: bool,
    ) -> Result<Option<AlarmTransition>, P::Error>
    where
        C: Mutex<T = ClockState>,
    {
        let transition = clock.lock(|c| next_transition(c, increment));
        match transition {
            Some(AlarmTransition::Fired) => self.output.set_high()?,
            Some(AlarmTransition::Silenced) => self.output.set_low()?,
            None => {}
        }
        Ok(transition)
    }

    pub fn output(&self) -> &P {
        &self.output
    }
}
