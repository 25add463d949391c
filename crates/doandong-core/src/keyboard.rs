//! Window-level key event source with scoped subscriptions.

use crate::input::KeyEvent;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Rc<RefCell<dyn FnMut(&KeyEvent)>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// The global source of key presses (the window, in a browser host).
///
/// Cloning a hub yields another handle to the same listener list.
#[derive(Clone, Default)]
pub struct KeyboardHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl std::fmt::Debug for KeyboardHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays attached until the returned guard drops.
    #[must_use = "dropping the subscription detaches the listener immediately"]
    pub fn subscribe<F>(&self, listener: F) -> KeyboardSubscription
    where
        F: FnMut(&KeyEvent) + 'static,
    {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, listener));

        KeyboardSubscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }

    /// Deliver a key press to every listener attached when dispatch starts.
    pub fn dispatch(&self, event: &KeyEvent) {
        // Snapshot so listeners can subscribe or unsubscribe mid-dispatch.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            match listener.try_borrow_mut() {
                Ok(mut callback) => (&mut *callback)(event),
                Err(_) => log::warn!("Skipping re-entrant key listener for {:?}", event.key),
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Guard for an attached key listener. Dropping it detaches the listener.
pub struct KeyboardSubscription {
    listeners: Weak<RefCell<Listeners>>,
    id: u64,
}

impl std::fmt::Debug for KeyboardSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscribe_and_drop() {
        let hub = KeyboardHub::new();
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        let subscription = hub.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(hub.listener_count(), 1);

        hub.dispatch(&KeyEvent::new("Delete"));
        assert_eq!(hits.get(), 1);

        drop(subscription);
        assert_eq!(hub.listener_count(), 0);
        hub.dispatch(&KeyEvent::new("Delete"));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_drop_after_hub_gone() {
        let hub = KeyboardHub::new();
        let subscription = hub.subscribe(|_| {});
        drop(hub);
        drop(subscription);
    }

    #[test]
    fn test_unsubscribe_during_dispatch() {
        let hub = KeyboardHub::new();
        let slot: Rc<RefCell<Option<KeyboardSubscription>>> = Rc::new(RefCell::new(None));

        let inner = Rc::clone(&slot);
        let subscription = hub.subscribe(move |_| {
            inner.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(subscription);

        hub.dispatch(&KeyEvent::new("x"));
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_subscribe_during_dispatch() {
        let hub = KeyboardHub::new();
        let added: Rc<RefCell<Vec<KeyboardSubscription>>> = Rc::new(RefCell::new(Vec::new()));
        let hits = Rc::new(Cell::new(0));

        let handle = hub.clone();
        let sink = Rc::clone(&added);
        let counter = Rc::clone(&hits);
        let _outer = hub.subscribe(move |_| {
            let counter = Rc::clone(&counter);
            sink.borrow_mut()
                .push(handle.subscribe(move |_| counter.set(counter.get() + 1)));
        });

        // The listener added mid-dispatch only sees later events.
        hub.dispatch(&KeyEvent::new("a"));
        assert_eq!(hits.get(), 0);
        assert_eq!(hub.listener_count(), 2);

        hub.dispatch(&KeyEvent::new("b"));
        assert_eq!(hits.get(), 1);
        assert_eq!(hub.listener_count(), 3);
    }
}
