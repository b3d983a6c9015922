//! Event source abstraction.
//!
//! Anything that wants input implements [`InputListener`] and registers
//! itself, once per [`EventKind`], with an [`EventSource`].  Registration
//! returns a [`ListenerId`] which is the only thing needed to unsubscribe
//! again, so a component can always undo exactly what it subscribed.
//!
//! ```rust,ignore
//! let mut dispatcher = EventDispatcher::new();
//! let id = dispatcher.add_listener(EventKind::KeyDown, listener.clone());
//! dispatcher.dispatch(&InputEvent::KeyDown { code: KeyCode::KeyW });
//! dispatcher.remove_listener(id);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::input::{EventKind, InputEvent, KeyCode, MouseButton};

/// Named callbacks for every event kind.  All methods default to no-ops so
/// an implementor only overrides what it cares about.
#[allow(unused_variables)]
pub trait InputListener {
    fn on_pointer_down(&mut self, button: MouseButton, x: f64, y: f64) {}
    fn on_pointer_up(&mut self, button: MouseButton) {}
    fn on_pointer_move(&mut self, x: f64, y: f64) {}
    fn on_key_down(&mut self, code: KeyCode) {}
    fn on_key_up(&mut self, code: KeyCode) {}
}

/// Shared, single-threaded listener reference as stored by event sources.
pub type ListenerRef = Rc<RefCell<dyn InputListener>>;

/// Identifies one subscription.  Ids are never reused by a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Something listeners can subscribe to.
pub trait EventSource {
    /// Subscribe `listener` to events of `kind`.
    fn add_listener(&mut self, kind: EventKind, listener: ListenerRef) -> ListenerId;

    /// Remove a subscription.  Returns `false` if `id` was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

struct Subscription {
    id: ListenerId,
    kind: EventKind,
    listener: ListenerRef,
}

/// In-process event source.  Events are delivered synchronously, in
/// subscription order, on the calling thread.
#[derive(Default)]
pub struct EventDispatcher {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one event to every listener subscribed for its kind.
    ///
    /// A listener must not dispatch into the same source from inside its own
    /// callback; that would re-borrow it mutably.
    pub fn dispatch(&self, event: &InputEvent) {
        let kind = event.kind();
        for sub in self.subscriptions.iter().filter(|s| s.kind == kind) {
            let mut listener = sub.listener.borrow_mut();
            match *event {
                InputEvent::PointerDown { button, x, y } => listener.on_pointer_down(button, x, y),
                InputEvent::PointerUp { button } => listener.on_pointer_up(button),
                InputEvent::PointerMove { x, y } => listener.on_pointer_move(x, y),
                InputEvent::KeyDown { code } => listener.on_key_down(code),
                InputEvent::KeyUp { code } => listener.on_key_up(code),
            }
        }
    }

    /// Deliver a batch of events in order.
    pub fn dispatch_all<'a>(&self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }

    /// Number of listeners currently subscribed to `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }

    /// Total number of live subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl EventSource for EventDispatcher {
    fn add_listener(&mut self, kind: EventKind, listener: ListenerRef) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.subscriptions.push(Subscription { id, kind, listener });
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }
}
