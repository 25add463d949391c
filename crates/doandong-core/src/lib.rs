//! Doandong Core Library
//!
//! Shape canvas controller for the Doandong pattern editor: shapes, history,
//! selection, dragging and keyboard handling, independent of any renderer.

pub mod canvas;
pub mod config;
pub mod editor;
pub mod error;
pub mod history;
pub mod input;
pub mod keyboard;
pub mod scene;
pub mod screen;
pub mod shapes;
pub mod shortcuts;

pub use canvas::{Canvas, CanvasDocument};
pub use config::{DEFAULT_HISTORY_LIMIT, EditorConfig, css_color};
pub use editor::Editor;
pub use error::{CanvasError, CanvasResult};
pub use history::History;
pub use input::{KeyEvent, Modifiers, PointerEvent};
pub use keyboard::{KeyboardHub, KeyboardSubscription};
pub use scene::{Primitive, Scene, SceneNode, Stroke};
pub use screen::ScreenTransform;
pub use shapes::{Circle, Fill, PropertyValue, Rectangle, Shape, ShapeField, ShapeId, ShapeKind};
pub use shortcuts::{EditorCommand, KeyBindings, Shortcut};
