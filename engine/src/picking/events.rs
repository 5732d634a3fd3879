//! Picker Events
//!
//! Typed events and the per-picker subscriber list. Dispatch is synchronous
//! and runs callbacks in registration order.

use std::fmt;

use crate::input::ScreenPosition;

/// Event emitted by a [`Picker`](super::Picker).
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent<S> {
    /// The pointer started hovering a structure.
    Over(S),
    /// The pointer stopped hovering a structure.
    Out(S),
    /// Button pressed; carries the hovered structure, if any.
    Down(Option<S>),
    /// Button released; carries the hovered structure, if any.
    Up(Option<S>),
    /// Down and up resolved to the same structure.
    Click(S),
    /// Accumulated wheel counter after the step.
    Wheel(i32),
    /// Pointer moved.
    Move(ScreenPosition),
}

impl<S> PickerEvent<S> {
    pub fn kind(&self) -> PickerEventKind {
        match self {
            PickerEvent::Over(_) => PickerEventKind::Over,
            PickerEvent::Out(_) => PickerEventKind::Out,
            PickerEvent::Down(_) => PickerEventKind::Down,
            PickerEvent::Up(_) => PickerEventKind::Up,
            PickerEvent::Click(_) => PickerEventKind::Click,
            PickerEvent::Wheel(_) => PickerEventKind::Wheel,
            PickerEvent::Move(_) => PickerEventKind::Move,
        }
    }
}

/// Event names subscribers register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerEventKind {
    Over,
    Out,
    Down,
    Up,
    Click,
    Wheel,
    Move,
}

impl PickerEventKind {
    pub const ALL: [PickerEventKind; 7] = [
        PickerEventKind::Over,
        PickerEventKind::Out,
        PickerEventKind::Down,
        PickerEventKind::Up,
        PickerEventKind::Click,
        PickerEventKind::Wheel,
        PickerEventKind::Move,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PickerEventKind::Over => "over",
            PickerEventKind::Out => "out",
            PickerEventKind::Down => "down",
            PickerEventKind::Up => "up",
            PickerEventKind::Click => "click",
            PickerEventKind::Wheel => "wheel",
            PickerEventKind::Move => "move",
        }
    }
}

impl fmt::Display for PickerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle returned by [`Picker::on`](super::Picker::on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Errors from the picker's subscription API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerError {
    /// The picker was disposed; it accepts no new subscribers.
    Disposed,
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerError::Disposed => write!(f, "picker has been disposed"),
        }
    }
}

impl std::error::Error for PickerError {}

type Callback<S> = Box<dyn FnMut(&PickerEvent<S>)>;

struct Subscriber<S> {
    id: SubscriptionId,
    kind: PickerEventKind,
    callback: Callback<S>,
}

/// Ordered `(kind, callback)` registrations.
pub(crate) struct Subscribers<S> {
    entries: Vec<Subscriber<S>>,
    next_id: u64,
}

impl<S> Default for Subscribers<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<S> Subscribers<S> {
    pub(crate) fn add(
        &mut self,
        kind: PickerEventKind,
        callback: impl FnMut(&PickerEvent<S>) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push(Subscriber {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn dispatch(&mut self, event: &PickerEvent<S>) {
        let kind = event.kind();
        for entry in self.entries.iter_mut().filter(|entry| entry.kind == kind) {
            (entry.callback)(event);
        }
    }
}

impl<S> fmt::Debug for Subscribers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_dispatch_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut subs: Subscribers<u32> = Subscribers::default();

        let first = Rc::clone(&log);
        subs.add(PickerEventKind::Click, move |_| first.borrow_mut().push("first"));
        let second = Rc::clone(&log);
        subs.add(PickerEventKind::Click, move |_| second.borrow_mut().push("second"));
        let other = Rc::clone(&log);
        subs.add(PickerEventKind::Over, move |_| other.borrow_mut().push("over"));

        subs.dispatch(&PickerEvent::Click(7));
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_remove() {
        let mut subs: Subscribers<u32> = Subscribers::default();
        let id = subs.add(PickerEventKind::Wheel, |_| {});
        assert_eq!(subs.len(), 1);
        assert!(subs.remove(id));
        assert!(!subs.remove(id));
        assert_eq!(subs.len(), 0);
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(PickerEvent::<u32>::Wheel(-1).kind(), PickerEventKind::Wheel);
        assert_eq!(PickerEventKind::Click.to_string(), "click");
        assert_eq!(PickerEventKind::ALL.len(), 7);
    }
}
