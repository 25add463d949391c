//! Abstract pointer and keyboard events.
//!
//! Hosts translate device events into these before handing them to the
//! canvas. Pointer positions are always in screen coordinates; the canvas
//! maps them into its own space using the transform passed alongside.

use crate::shapes::ShapeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event as seen by the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Pointer pressed on top of a shape.
    DownOnShape { shape: ShapeId, position: Point },
    /// Pointer pressed on the empty canvas area.
    DownOnBackground { position: Point },
    Move { position: Point },
    Up { position: Point },
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key name as reported by the platform (`"Delete"`, `"Backspace"`, `"z"`).
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// The key went to a text or number input rather than the canvas.
    #[serde(default)]
    pub editable_target: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::NONE,
            editable_target: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark the event as typed into an input field.
    pub fn in_editable_target(mut self) -> Self {
        self.editable_target = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_event_wire_format() {
        let json = r#"{"type":"move","position":{"x":10.0,"y":20.0}}"#;
        let event: PointerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            PointerEvent::Move {
                position: Point::new(10.0, 20.0)
            }
        );
    }

    #[test]
    fn test_key_event_defaults() {
        let event: KeyEvent = serde_json::from_str(r#"{"key":"Delete"}"#).unwrap();
        assert_eq!(event, KeyEvent::new("Delete"));
        assert!(!event.modifiers.command());
    }

    #[test]
    fn test_command_modifier() {
        let mac = Modifiers {
            meta: true,
            ..Modifiers::NONE
        };
        assert!(mac.command());
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert!(ctrl.command());
        assert!(!Modifiers::NONE.command());
    }
}
