//! Logical input events consumed by the camera controller.
//!
//! The host translates whatever its windowing layer delivers into these
//! events and hands them to an [`EventDispatcher`](crate::events::EventDispatcher).
//! Nothing in here knows about windows, DOM elements or cursors.

/// Re-exported key and mouse enums from `winit` for convenience.
// winit 0.30 keeps `KeyCode` under `winit::keyboard`; the alias saves callers
// from depending on winit just to name a key.
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// Discriminant used when subscribing to a single kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PointerDown,
    PointerUp,
    PointerMove,
    KeyDown,
    KeyUp,
}

impl EventKind {
    /// Every kind, in the order the controller subscribes to them.
    pub const ALL: [EventKind; 5] = [
        EventKind::PointerDown,
        EventKind::PointerUp,
        EventKind::PointerMove,
        EventKind::KeyDown,
        EventKind::KeyUp,
    ];
}

/// One input event.  Pointer coordinates are device pixels relative to the
/// element (window) the host listens on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { button: MouseButton, x: f64, y: f64 },
    PointerUp { button: MouseButton },
    PointerMove { x: f64, y: f64 },
    KeyDown { code: KeyCode },
    KeyUp { code: KeyCode },
}

impl InputEvent {
    /// Returns the kind listeners subscribe to for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::PointerDown { .. } => EventKind::PointerDown,
            InputEvent::PointerUp { .. } => EventKind::PointerUp,
            InputEvent::PointerMove { .. } => EventKind::PointerMove,
            InputEvent::KeyDown { .. } => EventKind::KeyDown,
            InputEvent::KeyUp { .. } => EventKind::KeyUp,
        }
    }
}
