//! Typed, single-threaded signals with scoped connections.
//!
//! A [`Signal<T>`] carries one event type. Observers register a handler with
//! [`Signal::connect`] and receive a [`Connection`]; dropping the connection
//! deregisters the handler, so a subscription lives exactly as long as the
//! value that owns it.
//!
//! Handlers may connect or disconnect (on this or any other signal) while an
//! emit is in progress. A handler disconnected mid-emit is not called for the
//! rest of that emit.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Handler<T> = Box<dyn FnMut(&T)>;

struct Slots<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
    emit_depth: usize,
    /// Ids disconnected while their handlers were checked out by `emit`.
    disconnected_during_emit: Vec<u64>,
}

/// Type-erased view of a slot list, so a [`Connection`] does not need `T`.
trait Disconnect {
    fn disconnect(&mut self, id: u64);
}

impl<T> Disconnect for Slots<T> {
    fn disconnect(&mut self, id: u64) {
        if self.emit_depth > 0 {
            self.disconnected_during_emit.push(id);
        }
        self.handlers.retain(|(slot, _)| *slot != id);
    }
}

/// A typed event channel.
///
/// Cloning a signal yields another handle to the same set of handlers.
pub struct Signal<T> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: 'static> Signal<T> {
    /// Create a signal with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                handlers: Vec::new(),
                emit_depth: 0,
                disconnected_during_emit: Vec::new(),
            })),
        }
    }

    /// Register `handler`; it runs on every [`emit`](Self::emit) until the
    /// returned [`Connection`] is dropped.
    pub fn connect(&self, handler: impl FnMut(&T) + 'static) -> Connection {
        let id = {
            let mut slots = self.slots.borrow_mut();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.handlers.push((id, Box::new(handler)));
            id
        };
        let weak = Rc::downgrade(&self.slots);
        let slots: Weak<RefCell<dyn Disconnect>> = weak;
        Connection { id, slots }
    }

    /// Call every connected handler with `value`, in connection order.
    pub fn emit(&self, value: &T) {
        let mut running = {
            let mut slots = self.slots.borrow_mut();
            slots.emit_depth += 1;
            std::mem::take(&mut slots.handlers)
        };

        for (id, handler) in &mut running {
            let dropped = self.slots.borrow().disconnected_during_emit.contains(id);
            if !dropped {
                handler(value);
            }
        }

        let mut slots = self.slots.borrow_mut();
        let connected_during_emit = std::mem::replace(&mut slots.handlers, running);
        slots.handlers.extend(connected_during_emit);
        slots.emit_depth -= 1;
        if slots.emit_depth == 0 {
            let dropped = std::mem::take(&mut slots.disconnected_during_emit);
            slots.handlers.retain(|(id, _)| !dropped.contains(id));
        }
    }

    /// Number of live connections.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.slots.borrow().handlers.len()
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Rc::clone(&self.slots),
        }
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.slots.borrow().handlers.len())
            .finish()
    }
}

/// A live handler registration. Dropping it disconnects the handler.
#[must_use = "dropping a Connection immediately disconnects its handler"]
pub struct Connection {
    id: u64,
    slots: Weak<RefCell<dyn Disconnect>>,
}

impl Connection {
    /// Disconnect now rather than at end of scope.
    pub fn disconnect(self) {
        drop(self);
    }

    /// Whether the signal this connection belongs to still exists.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.slots.strong_count() > 0
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.borrow_mut().disconnect(self.id);
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("live", &self.is_live())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_every_handler_in_order() {
        let signal = Signal::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        let _a = signal.connect(move |v| first.borrow_mut().push(("a", *v)));
        let second = Rc::clone(&seen);
        let _b = signal.connect(move |v| second.borrow_mut().push(("b", *v)));

        signal.emit(&7);

        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_dropping_connection_disconnects() {
        let signal = Signal::<()>::new();
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        let connection = signal.connect(move |()| counter.set(counter.get() + 1));
        signal.emit(&());
        assert_eq!(signal.connection_count(), 1);

        drop(connection);
        signal.emit(&());

        assert_eq!(hits.get(), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_connection_outliving_signal_is_harmless() {
        let signal = Signal::<()>::new();
        let connection = signal.connect(|()| {});
        drop(signal);

        assert!(!connection.is_live());
        connection.disconnect();
    }

    #[test]
    fn test_disconnect_during_emit_skips_later_handler() {
        let signal = Signal::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<Connection>>> = Rc::new(RefCell::new(None));

        let slot = Rc::clone(&victim);
        let _killer = signal.connect(move |()| drop(slot.borrow_mut().take()));
        let counter = Rc::clone(&hits);
        *victim.borrow_mut() = Some(signal.connect(move |()| counter.set(counter.get() + 1)));

        signal.emit(&());
        signal.emit(&());

        assert_eq!(hits.get(), 0);
        assert_eq!(signal.connection_count(), 1);
    }

    #[test]
    fn test_connect_during_emit_runs_from_next_emit() {
        let signal = Signal::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let late: Rc<RefCell<Vec<Connection>>> = Rc::new(RefCell::new(Vec::new()));

        let handle = signal.clone();
        let counter = Rc::clone(&hits);
        let store = Rc::clone(&late);
        let _registrar = signal.connect(move |()| {
            if store.borrow().is_empty() {
                let counter = Rc::clone(&counter);
                let connection = handle.connect(move |()| counter.set(counter.get() + 1));
                store.borrow_mut().push(connection);
            }
        });

        signal.emit(&());
        assert_eq!(hits.get(), 0);

        signal.emit(&());
        assert_eq!(hits.get(), 1);
    }
}
