//! Single-slot pending-event cells between the button interrupt (producer)
//! and the foreground loop (consumer).

/// The three physical buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Advances the digit being edited; silences a firing alarm.
    Increment,
    /// Starts and confirms setting the clock.
    ClockSet,
    /// Starts and confirms setting the alarm.
    AlarmSet,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Increment, Button::ClockSet, Button::AlarmSet];

    pub const fn index(self) -> usize {
        match self {
            Button::Increment => 0,
            Button::ClockSet => 1,
            Button::AlarmSet => 2,
        }
    }
}

/// Holds at most one undelivered press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventLatch {
    pending: bool,
}

impl EventLatch {
    /// Latches a press. Returns false if one was already pending; the two
    /// collapse into a single event.
    pub fn raise(&mut self) -> bool {
        let fresh = !self.pending;
        self.pending = true;
        fresh
    }

    /// Returns true once per latched press, clearing it.
    pub fn take(&mut self) -> bool {
        core::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// One latch per button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingEvents {
    latches: [EventLatch; 3],
}

impl PendingEvents {
    pub const fn new() -> Self {
        Self {
            latches: [EventLatch { pending: false }; 3],
        }
    }

    pub fn raise(&mut self, button: Button) -> bool {
        self.latches[button.index()].raise()
    }

    pub fn take(&mut self, button: Button) -> bool {
        self.latches[button.index()].take()
    }

    pub fn is_pending(&self, button: Button) -> bool {
        self.latches[button.index()].is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_delivers_once() {
        let mut events = PendingEvents::new();
        assert!(events.raise(Button::ClockSet));
        assert!(events.take(Button::ClockSet));
        assert!(!events.take(Button::ClockSet));
    }

    #[test]
    fn repeated_raise_collapses() {
        let mut events = PendingEvents::new();
        assert!(events.raise(Button::Increment));
        assert!(!events.raise(Button::Increment));
        assert!(events.take(Button::Increment));
        assert!(!events.take(Button::Increment));
    }

    #[test]
    fn latches_are_independent() {
        let mut events = PendingEvents::new();
        events.raise(Button::AlarmSet);

        assert!(!events.is_pending(Button::Increment));
        assert!(!events.take(Button::ClockSet));
        assert!(events.is_pending(Button::AlarmSet));
    }
}
