//! Keyboard shortcut bindings.

use crate::input::KeyEvent;
use serde::{Deserialize, Serialize};

/// A command a key press can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorCommand {
    DeleteSelected,
    Undo,
    Redo,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    pub key: &'static str,
    /// Ctrl, or Cmd on macOS.
    pub command: bool,
    pub shift: bool,
    pub action: EditorCommand,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        command: bool,
        shift: bool,
        action: EditorCommand,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            command,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        parts.push(if self.key.len() == 1 {
            self.key.to_uppercase()
        } else {
            self.key.to_string()
        });
        parts.join("+")
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        self.key.eq_ignore_ascii_case(&event.key)
            && self.command == event.modifiers.command()
            && self.shift == event.modifiers.shift
    }
}

/// Ordered set of shortcuts; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    shortcuts: Vec<Shortcut>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(vec![
            Shortcut::new("Delete", false, false, EditorCommand::DeleteSelected, "Delete selected shape"),
            Shortcut::new("Backspace", false, false, EditorCommand::DeleteSelected, "Delete selected shape"),
            Shortcut::new("z", true, false, EditorCommand::Undo, "Undo"),
            Shortcut::new("z", true, true, EditorCommand::Redo, "Redo"),
            Shortcut::new("y", true, false, EditorCommand::Redo, "Redo"),
        ])
    }
}

impl KeyBindings {
    pub fn new(shortcuts: Vec<Shortcut>) -> Self {
        Self { shortcuts }
    }

    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    /// First shortcut bound to a command, used for button tooltips.
    pub fn shortcut_for(&self, action: EditorCommand) -> Option<&Shortcut> {
        self.shortcuts.iter().find(|shortcut| shortcut.action == action)
    }

    /// Resolve a key press to a command.
    ///
    /// Keys typed into an editable field never resolve, so Backspace in a
    /// property input does not delete the shape.
    pub fn resolve(&self, event: &KeyEvent) -> Option<EditorCommand> {
        if event.editable_target {
            return None;
        }
        self.shortcuts
            .iter()
            .find(|shortcut| shortcut.matches(event))
            .map(|shortcut| shortcut.action)
    }
}
