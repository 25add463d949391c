//! A mounted editor: one canvas controller wired to the window's keyboard.

use crate::canvas::Canvas;
use crate::config::EditorConfig;
use crate::keyboard::{KeyboardHub, KeyboardSubscription};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// An editor instance for as long as it is mounted.
///
/// Mounting attaches exactly one key listener to the hub. Dropping the editor
/// detaches it, so remounting never stacks listeners.
#[derive(Debug)]
pub struct Editor {
    canvas: Rc<RefCell<Canvas>>,
    _keyboard: KeyboardSubscription,
}

impl Editor {
    pub fn mount(hub: &KeyboardHub, config: EditorConfig) -> Self {
        let canvas = Rc::new(RefCell::new(Canvas::with_config(config)));

        let target = Rc::downgrade(&canvas);
        let keyboard = hub.subscribe(move |event| {
            let Some(canvas) = target.upgrade() else {
                return;
            };
            match canvas.try_borrow_mut() {
                Ok(mut canvas) => {
                    if let Some(command) = canvas.handle_key(event) {
                        log::debug!("Key {:?} ran {:?}", event.key, command);
                    }
                }
                Err(_) => log::warn!("Canvas busy, dropping key {:?}", event.key),
            }
        });

        Self {
            canvas,
            _keyboard: keyboard,
        }
    }

    pub fn canvas(&self) -> Ref<'_, Canvas> {
        self.canvas.borrow()
    }

    pub fn canvas_mut(&self) -> RefMut<'_, Canvas> {
        self.canvas.borrow_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyEvent;
    use crate::shapes::ShapeKind;

    #[test]
    fn test_delete_key_removes_selected() {
        let hub = KeyboardHub::new();
        let editor = Editor::mount(&hub, EditorConfig::default());
        let id = editor.canvas_mut().add_shape(ShapeKind::Rectangle);
        editor.canvas_mut().select(Some(id));

        hub.dispatch(&KeyEvent::new("Delete"));
        assert!(editor.canvas().document().is_empty());
        assert_eq!(editor.canvas().selection(), None);
    }

    #[test]
    fn test_backspace_in_input_is_ignored() {
        let hub = KeyboardHub::new();
        let editor = Editor::mount(&hub, EditorConfig::default());
        let id = editor.canvas_mut().add_shape(ShapeKind::Circle);
        editor.canvas_mut().select(Some(id));

        hub.dispatch(&KeyEvent::new("Backspace").in_editable_target());
        assert_eq!(editor.canvas().document().len(), 1);
    }

    #[test]
    fn test_one_listener_per_mount() {
        let hub = KeyboardHub::new();
        let editor = Editor::mount(&hub, EditorConfig::default());
        assert_eq!(hub.listener_count(), 1);

        drop(editor);
        assert_eq!(hub.listener_count(), 0);

        for _ in 0..3 {
            let editor = Editor::mount(&hub, EditorConfig::default());
            assert_eq!(hub.listener_count(), 1);
            drop(editor);
        }
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_editors_are_independent() {
        let hub = KeyboardHub::new();
        let first = Editor::mount(&hub, EditorConfig::default());
        let second = Editor::mount(&hub, EditorConfig::default());
        assert_eq!(hub.listener_count(), 2);

        let id = first.canvas_mut().add_shape(ShapeKind::Rectangle);
        first.canvas_mut().select(Some(id));
        second.canvas_mut().add_shape(ShapeKind::Rectangle);

        hub.dispatch(&KeyEvent::new("Delete"));
        assert!(first.canvas().document().is_empty());
        assert_eq!(second.canvas().document().len(), 1);
    }

    #[test]
    fn test_busy_canvas_skips_key() {
        let hub = KeyboardHub::new();
        let editor = Editor::mount(&hub, EditorConfig::default());
        let id = editor.canvas_mut().add_shape(ShapeKind::Rectangle);
        editor.canvas_mut().select(Some(id));

        let held = editor.canvas_mut();
        hub.dispatch(&KeyEvent::new("Delete"));
        drop(held);
        assert_eq!(editor.canvas().document().len(), 1);
    }
}
