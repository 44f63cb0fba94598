//! Shared clock state: the elapsed-seconds counter, the current and alarm
//! times, and the mode flags gating who may write them.

use crate::config::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// A wall-clock time with every field kept inside its modulo range.
///
/// Seconds cannot be set directly; they only come from [`TimeOfDay::from_elapsed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self::new(0, 0);

    /// Hours and minutes, wrapped into range, with seconds at zero.
    pub const fn new(hours: u8, minutes: u8) -> Self {
        Self {
            hours: hours % 24,
            minutes: minutes % 60,
            seconds: 0,
        }
    }

    /// Derives the time of day from a count of elapsed seconds.
    pub const fn from_elapsed(elapsed: u64) -> Self {
        Self {
            hours: (elapsed % SECONDS_PER_DAY / SECONDS_PER_HOUR) as u8,
            minutes: (elapsed % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
            seconds: (elapsed % SECONDS_PER_MINUTE) as u8,
        }
    }

    pub const fn hours(&self) -> u8 {
        self.hours
    }

    pub const fn minutes(&self) -> u8 {
        self.minutes
    }

    pub const fn seconds(&self) -> u8 {
        self.seconds
    }

    /// Seconds since midnight at the start of this minute, ignoring `seconds`.
    pub const fn minute_start_seconds(&self) -> u64 {
        self.hours as u64 * SECONDS_PER_HOUR + self.minutes as u64 * SECONDS_PER_MINUTE
    }

    /// True when both times fall in the same minute of the day.
    pub const fn same_minute(&self, other: &Self) -> bool {
        self.hours == other.hours && self.minutes == other.minutes
    }

    /// Advances minutes by one, wrapping 59 -> 0 without carrying into hours.
    pub fn increment_minutes(&mut self) {
        self.minutes = (self.minutes + 1) % 60;
    }

    /// Advances hours by one, wrapping 23 -> 0.
    pub fn increment_hours(&mut self) {
        self.hours = (self.hours + 1) % 24;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::MIDNIGHT;
    }
}

impl core::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Which of the two stored times a setting operation edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetTarget {
    Clock,
    Alarm,
}

/// State shared between the tick handler and the foreground loop.
///
/// Every access goes through a lock (an RTIC shared resource in the firmware),
/// so each method observes and leaves a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    elapsed: u64,
    current: TimeOfDay,
    alarm: TimeOfDay,
    clock_setting: bool,
    alarm_setting: bool,
    alarm_armed: bool,
    alarm_firing: bool,
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockState {
    /// Clock at midnight, alarm at midnight and disarmed.
    pub const fn new() -> Self {
        Self::starting_at(TimeOfDay::MIDNIGHT)
    }

    pub const fn starting_at(time: TimeOfDay) -> Self {
        let elapsed = time.minute_start_seconds() + time.seconds as u64;
        Self {
            elapsed,
            current: TimeOfDay::from_elapsed(elapsed),
            alarm: TimeOfDay::MIDNIGHT,
            clock_setting: false,
            alarm_setting: false,
            alarm_armed: false,
            alarm_firing: false,
        }
    }

    /// Advances time by one second.
    ///
    /// While the clock is being set the counter keeps running, but
    /// `current` belongs to the editor and is left alone.
    pub fn tick(&mut self) {
        self.elapsed += 1;
        if !self.clock_setting {
            self.current = TimeOfDay::from_elapsed(self.elapsed);
        }
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn current(&self) -> TimeOfDay {
        self.current
    }

    pub fn alarm(&self) -> TimeOfDay {
        self.alarm
    }

    pub fn time(&self, target: SetTarget) -> TimeOfDay {
        match target {
            SetTarget::Clock => self.current,
            SetTarget::Alarm => self.alarm,
        }
    }

    pub(crate) fn time_mut(&mut self, target: SetTarget) -> &mut TimeOfDay {
        match target {
            SetTarget::Clock => &mut self.current,
            SetTarget::Alarm => &mut self.alarm,
        }
    }

    /// The time a display should show: the alarm while it is being edited,
    /// the current time (edited or running) otherwise.
    pub fn display_time(&self) -> TimeOfDay {
        if self.alarm_setting {
            self.alarm
        } else {
            self.current
        }
    }

    pub fn is_clock_setting(&self) -> bool {
        self.clock_setting
    }

    pub fn is_alarm_setting(&self) -> bool {
        self.alarm_setting
    }

    pub fn is_setting(&self) -> bool {
        self.clock_setting || self.alarm_setting
    }

    pub fn is_alarm_armed(&self) -> bool {
        self.alarm_armed
    }

    pub fn is_alarm_firing(&self) -> bool {
        self.alarm_firing
    }

    /// Enters a setting mode: raises the mode flag and zeroes the target
    /// time, seconds included. Editing the alarm disarms it until confirmed.
    pub fn begin_setting(&mut self, target: SetTarget) {
        match target {
            SetTarget::Clock => self.clock_setting = true,
            SetTarget::Alarm => {
                self.alarm_setting = true;
                self.alarm_armed = false;
            }
        }
        self.time_mut(target).clear();
    }

    /// Leaves a setting mode.
    ///
    /// For the clock, the counter is rebuilt from the edited hours and
    /// minutes and seconds restart at zero, in the same step that hands
    /// `current` back to the tick. For the alarm, the new time is armed.
    pub fn finish_setting(&mut self, target: SetTarget) {
        match target {
            SetTarget::Clock => {
                self.elapsed = self.current.minute_start_seconds();
                self.current = TimeOfDay::from_elapsed(self.elapsed);
                self.clock_setting = false;
            }
            SetTarget::Alarm => {
                self.alarm_armed = true;
                self.alarm_setting = false;
            }
        }
    }

    pub(crate) fn set_alarm_firing(&mut self, firing: bool) {
        self.alarm_firing = firing;
    }

    pub(crate) fn disarm_alarm(&mut self) {
        self.alarm_armed = false;
    }
}
