//! Integration tests for alarm arming, firing and silencing

mod common;
use common::*;

use alarm_clock::{AlarmTransition, Button, TimeOfDay};

/// Clock at 07:29:00 with the alarm armed for 07:30
fn armed_for_seven_thirty() -> Rig {
    let mut rig = Rig::starting_at(TimeOfDay::new(7, 29));
    rig.set(Button::AlarmSet, 7, 30);
    assert!(rig.clock.is_alarm_armed());
    rig
}

#[test]
fn fires_once_and_stays_firing_through_the_minute() {
    let mut rig = armed_for_seven_thirty();
    assert_eq!(rig.poll().alarm, None);

    rig.ticks(60);
    assert_eq!(rig.poll().alarm, Some(AlarmTransition::Fired));

    for _ in 0..59 {
        rig.ticks(1);
        assert_eq!(rig.poll().alarm, None);
        assert!(rig.clock.is_alarm_firing());
    }

    assert!(rig.led().is_set_high());
    assert_eq!(rig.led().history(), &[true]);
}

#[test]
fn coincidence_ignores_seconds() {
    let mut rig = Rig::starting_at(TimeOfDay::new(7, 30));
    rig.ticks(45);
    rig.set(Button::AlarmSet, 7, 30);

    assert_eq!(rig.clock.current().seconds(), 45);
    assert!(rig.clock.is_alarm_firing());
    assert_eq!(rig.led().rising_edges(), 1);
}

#[test]
fn increment_silences_and_disarms() {
    let mut rig = armed_for_seven_thirty();
    rig.ticks(60);
    rig.poll();

    let report = rig.press(Button::Increment);
    assert_eq!(report.alarm, Some(AlarmTransition::Silenced));
    assert!(!rig.led().is_set_high());
    assert!(!rig.clock.is_alarm_firing());
    assert!(!rig.clock.is_alarm_armed());

    // Same minute, then the same minute a day later: no re-fire.
    rig.ticks(10);
    assert_eq!(rig.poll().alarm, None);
    rig.ticks(24 * 3600);
    assert_eq!(rig.poll().alarm, None);
    assert_eq!(rig.led().history(), &[true, false]);
}

#[test]
fn increment_in_idle_is_ignored_and_not_kept_for_later() {
    let mut rig = armed_for_seven_thirty();

    let report = rig.press(Button::Increment);
    assert!(report.is_quiet());

    rig.ticks(60);
    assert_eq!(rig.poll().alarm, Some(AlarmTransition::Fired));
    assert_eq!(rig.poll().alarm, None);
    assert!(rig.clock.is_alarm_firing());
}

#[test]
fn rearming_requires_setting_the_alarm_again() {
    let mut rig = armed_for_seven_thirty();
    rig.ticks(60);
    rig.poll();
    rig.press(Button::Increment);

    rig.set(Button::AlarmSet, 7, 31);
    assert!(rig.clock.is_alarm_armed());

    rig.ticks(60);
    assert_eq!(rig.poll().alarm, Some(AlarmTransition::Fired));
    assert_eq!(rig.led().rising_edges(), 2);
}

#[test]
fn does_not_fire_while_setting_the_clock() {
    let mut rig = armed_for_seven_thirty();

    rig.press(Button::ClockSet);
    rig.press_n(Button::Increment, 30);
    rig.press(Button::ClockSet);
    rig.press_n(Button::Increment, 7);
    assert!(!rig.clock.is_alarm_firing());

    // Confirming lands on 07:30 and the alarm goes off in the same pass.
    let report = rig.press(Button::ClockSet);
    assert_eq!(report.alarm, Some(AlarmTransition::Fired));
}

#[test]
fn increments_while_firing_and_setting_go_to_the_entry() {
    let mut rig = armed_for_seven_thirty();
    rig.ticks(60);
    rig.poll();

    rig.press(Button::ClockSet);
    let report = rig.press(Button::Increment);
    assert_eq!(report.alarm, None);
    assert!(rig.clock.is_alarm_firing());
    assert_eq!(rig.clock.current().minutes(), 1);
}

#[test]
fn setting_the_alarm_while_ringing_silences_it_and_keeps_the_new_one() {
    let mut rig = armed_for_seven_thirty();
    rig.ticks(60);
    assert_eq!(rig.poll().alarm, Some(AlarmTransition::Fired));

    let report = rig.press(Button::AlarmSet);
    assert_eq!(report.alarm, Some(AlarmTransition::Silenced));
    assert!(!rig.led().is_set_high());

    rig.press(Button::AlarmSet);
    rig.press_n(Button::Increment, 8);
    rig.press(Button::AlarmSet);
    assert_eq!(rig.clock.alarm(), TimeOfDay::new(8, 0));
    assert!(rig.clock.is_alarm_armed());
    assert!(!rig.clock.is_alarm_firing());

    // A stray increment after the commit leaves the new alarm alone.
    assert!(rig.press(Button::Increment).is_quiet());
    assert!(rig.clock.is_alarm_armed());

    rig.ticks(30 * 60);
    assert_eq!(rig.poll().alarm, Some(AlarmTransition::Fired));
    assert_eq!(rig.led().history(), &[true, false, true]);
}
