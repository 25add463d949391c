//! Editor configuration.

use crate::shortcuts::KeyBindings;
use kurbo::Size;
use peniko::Color;

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Editor configuration.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Intrinsic size of the drawing surface.
    pub canvas_size: Size,
    pub background_color: Color,
    /// Stroke drawn around the selected shape.
    pub selection_color: Color,
    pub selection_stroke_width: f64,
    /// Maximum undo depth (`None` = unbounded).
    pub history_limit: Option<usize>,
    pub key_bindings: KeyBindings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(800.0, 600.0),
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection_color: Color::from_rgba8(0, 0, 255, 255),
            selection_stroke_width: 2.0,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
            key_bindings: KeyBindings::default(),
        }
    }
}

/// Format a colour as a CSS string (`#rrggbb`, or `#rrggbbaa` when translucent).
pub fn css_color(color: Color) -> String {
    let rgba = color.to_rgba8();
    if rgba.a == 255 {
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b, rgba.a)
    }
}
