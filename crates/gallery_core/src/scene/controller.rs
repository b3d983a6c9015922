use std::collections::HashMap;

use crate::input::KeyCode;

/// Logical movement direction, in camera-local terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// The four movement flags.  Several may be set at once; the controller
/// applies each one independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementFlags {
    pub fn set(&mut self, direction: MoveDirection, active: bool) {
        match direction {
            MoveDirection::Forward => self.forward = active,
            MoveDirection::Backward => self.backward = active,
            MoveDirection::Left => self.left = active,
            MoveDirection::Right => self.right = active,
        }
    }

    pub fn is_set(&self, direction: MoveDirection) -> bool {
        match direction {
            MoveDirection::Forward => self.forward,
            MoveDirection::Backward => self.backward,
            MoveDirection::Left => self.left,
            MoveDirection::Right => self.right,
        }
    }

    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Maps keys to movement directions.
///
/// Several keys may map to the same direction; that is how the letter and
/// arrow aliases share one flag.
///
/// # Example
/// ```rust,ignore
/// use gallery_core::scene::{KeyBindings, MoveDirection};
/// use gallery_core::input::KeyCode;
///
/// let mut keys = KeyBindings::with_default_layout();
/// // ZQSD layout on top of the arrows
/// keys.bind(KeyCode::KeyZ, MoveDirection::Forward);
/// keys.bind(KeyCode::KeyQ, MoveDirection::Left);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    mappings: HashMap<KeyCode, MoveDirection>,
}

impl KeyBindings {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// WASD plus arrow keys.
    pub fn with_default_layout() -> Self {
        let mut keys = Self::new();
        keys.bind(KeyCode::KeyW, MoveDirection::Forward);
        keys.bind(KeyCode::ArrowUp, MoveDirection::Forward);
        keys.bind(KeyCode::KeyA, MoveDirection::Left);
        keys.bind(KeyCode::ArrowLeft, MoveDirection::Left);
        keys.bind(KeyCode::KeyS, MoveDirection::Backward);
        keys.bind(KeyCode::ArrowDown, MoveDirection::Backward);
        keys.bind(KeyCode::KeyD, MoveDirection::Right);
        keys.bind(KeyCode::ArrowRight, MoveDirection::Right);
        keys
    }

    /// Binds `key` to `direction`, replacing any previous binding of `key`.
    pub fn bind(&mut self, key: KeyCode, direction: MoveDirection) {
        self.mappings.insert(key, direction);
    }

    /// Removes the binding for `key`, if any.
    pub fn unbind(&mut self, key: KeyCode) {
        self.mappings.remove(&key);
    }

    /// Removes all key bindings.
    pub fn clear(&mut self) {
        self.mappings.clear();
    }

    /// Direction bound to `key`, `None` for unknown keys.
    pub fn direction(&self, key: KeyCode) -> Option<MoveDirection> {
        self.mappings.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_has_alias_pairs() {
        let keys = KeyBindings::with_default_layout();
        assert_eq!(keys.len(), 8);
        let pairs = [
            (KeyCode::KeyW, KeyCode::ArrowUp, MoveDirection::Forward),
            (KeyCode::KeyA, KeyCode::ArrowLeft, MoveDirection::Left),
            (KeyCode::KeyS, KeyCode::ArrowDown, MoveDirection::Backward),
            (KeyCode::KeyD, KeyCode::ArrowRight, MoveDirection::Right),
        ];
        for (letter, arrow, dir) in pairs {
            assert_eq!(keys.direction(letter), Some(dir));
            assert_eq!(keys.direction(arrow), Some(dir));
        }
        assert_eq!(keys.direction(KeyCode::Space), None);
    }

    #[test]
    fn rebinding_overwrites() {
        let mut keys = KeyBindings::with_default_layout();
        keys.bind(KeyCode::KeyW, MoveDirection::Backward);
        assert_eq!(keys.direction(KeyCode::KeyW), Some(MoveDirection::Backward));
        keys.unbind(KeyCode::KeyW);
        assert_eq!(keys.direction(KeyCode::KeyW), None);
        keys.clear();
        assert!(keys.is_empty());
    }

    #[test]
    fn flags_are_independent() {
        let mut flags = MovementFlags::default();
        assert!(!flags.any());
        flags.set(MoveDirection::Forward, true);
        flags.set(MoveDirection::Left, true);
        assert!(flags.is_set(MoveDirection::Forward));
        assert!(flags.is_set(MoveDirection::Left));
        assert!(!flags.is_set(MoveDirection::Right));
        flags.set(MoveDirection::Forward, false);
        assert!(!flags.forward && flags.left);
    }
}
