//! Conversion from winit window events to [`InputEvent`]s.

use gallery_core::{InputEvent, KeyCode, MouseButton};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::PhysicalKey;

/// Remembers the last cursor position so button events, which winit reports
/// without coordinates, can carry one.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointerTracker {
    cursor: (f64, f64),
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    /// Returns the input event for `event`, or `None` when the controller
    /// has no interest in it.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => Some(self.moved(position.x, position.y)),
            WindowEvent::MouseInput { state, button, .. } => Some(self.button(*button, *state)),
            WindowEvent::KeyboardInput { event, .. } => key(event.physical_key, event.state),
            _ => None,
        }
    }

    fn moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.cursor = (x, y);
        InputEvent::PointerMove { x, y }
    }

    fn button(&self, button: MouseButton, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::PointerDown {
                button,
                x: self.cursor.0,
                y: self.cursor.1,
            },
            ElementState::Released => InputEvent::PointerUp { button },
        }
    }
}

/// Keys without a physical code (unidentified scancodes) are dropped.
fn key(physical: PhysicalKey, state: ElementState) -> Option<InputEvent> {
    let PhysicalKey::Code(code) = physical else {
        return None;
    };
    Some(key_event(code, state))
}

fn key_event(code: KeyCode, state: ElementState) -> InputEvent {
    match state {
        ElementState::Pressed => InputEvent::KeyDown { code },
        ElementState::Released => InputEvent::KeyUp { code },
    }
}
