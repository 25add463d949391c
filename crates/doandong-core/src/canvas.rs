//! Canvas document and editing controller.

use crate::config::{EditorConfig, css_color};
use crate::error::{CanvasError, CanvasResult};
use crate::history::History;
use crate::input::{KeyEvent, PointerEvent};
use crate::scene::{Primitive, Scene, SceneNode, Stroke};
use crate::screen::ScreenTransform;
use crate::shapes::{PropertyValue, Shape, ShapeField, ShapeId, ShapeKind};
use crate::shortcuts::EditorCommand;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The shapes on a canvas, back to front.
///
/// This is the unit of undo/redo: history stores whole documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasDocument {
    shapes: Vec<Shape>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of the others.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        Some(self.shapes.remove(index))
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    /// Get a mutable reference to a shape by ID.
    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id() == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.index_of(id).is_some()
    }

    /// Shapes in z-order (back to front).
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// The topmost shape under a canvas-space point.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|shape| shape.hit_test(point))
            .map(Shape::id)
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id() == id)
    }
}

/// An in-progress drag gesture.
#[derive(Debug, Clone)]
struct DragState {
    shape_id: ShapeId,
    /// Last pointer sample in canvas coordinates.
    last_point: Point,
    /// Document as it was when the gesture started.
    before: CanvasDocument,
    moved: bool,
}

/// Editing controller for one canvas session.
///
/// Owns the document history, the selection and the drag state, and turns
/// pointer and key input into document changes.
#[derive(Debug, Clone)]
pub struct Canvas {
    history: History<CanvasDocument>,
    selection: Option<ShapeId>,
    drag: Option<DragState>,
    config: EditorConfig,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            history: History::new(CanvasDocument::new(), config.history_limit),
            selection: None,
            drag: None,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The present document.
    pub fn document(&self) -> &CanvasDocument {
        self.history.present()
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.and_then(|id| self.document().get_shape(id))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Add a shape of the given kind with default geometry.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        self.settle_drag();

        let shape = Shape::with_defaults(kind);
        let id = shape.id();
        let mut next = self.document().clone();
        next.add_shape(shape);
        self.history.commit(next);

        log::debug!("Added {} {}", kind, id);
        id
    }

    /// Select a shape, or clear the selection with `None`.
    /// Returns false if the shape does not exist (selection unchanged).
    pub fn select(&mut self, id: Option<ShapeId>) -> bool {
        match id {
            Some(id) if !self.document().contains(id) => false,
            _ => {
                self.selection = id;
                true
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Start dragging a shape from a screen-space pointer position.
    /// Returns false if the shape does not exist or the point cannot be mapped.
    pub fn begin_drag(
        &mut self,
        id: ShapeId,
        screen_point: Point,
        transform: &ScreenTransform,
    ) -> bool {
        self.settle_drag();

        if !self.document().contains(id) {
            return false;
        }
        let Some(point) = to_canvas(screen_point, transform) else {
            return false;
        };

        self.selection = Some(id);
        self.drag = Some(DragState {
            shape_id: id,
            last_point: point,
            before: self.document().clone(),
            moved: false,
        });
        true
    }

    /// Move the dragged shape by the pointer delta since the last sample.
    ///
    /// Samples amend the present document; the gesture becomes a single undo
    /// step when it ends. Returns true if the shape moved.
    pub fn continue_drag(&mut self, screen_point: Point, transform: &ScreenTransform) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        if self.selection != Some(drag.shape_id) {
            return false;
        }
        let Some(point) = to_canvas(screen_point, transform) else {
            return false;
        };

        let delta = point - drag.last_point;
        if !delta.is_finite() {
            log::warn!("Ignoring pointer sample: delta {:?} is not finite", delta);
            return false;
        }
        drag.last_point = point;
        if delta.x == 0.0 && delta.y == 0.0 {
            return false;
        }

        let Some(shape) = self.history.amend().get_shape_mut(drag.shape_id) else {
            return false;
        };
        let mut moved = shape.clone();
        moved.translate(delta);
        if !moved.bounds().is_finite() {
            log::warn!("Ignoring pointer sample: {} would leave finite space", drag.shape_id);
            return false;
        }
        *shape = moved;
        drag.moved = true;
        true
    }

    /// Finish the drag gesture. Idempotent.
    /// Returns true if the gesture was recorded as an undo step.
    pub fn end_drag(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if !drag.moved {
            return false;
        }
        log::debug!("Drag of {} committed", drag.shape_id);
        self.history.record(drag.before);
        true
    }

    /// Replace one property of a shape.
    pub fn set_property(
        &mut self,
        id: ShapeId,
        field: ShapeField,
        value: impl Into<PropertyValue>,
    ) -> CanvasResult<()> {
        self.settle_drag();

        let shape = self
            .document()
            .get_shape(id)
            .ok_or(CanvasError::ShapeNotFound(id))?;
        let updated = shape.with_property(field, value.into())?;

        let mut next = self.document().clone();
        if let Some(slot) = next.get_shape_mut(id) {
            *slot = updated;
        }
        self.history.commit(next);

        log::debug!("Set {} on {}", field, id);
        Ok(())
    }

    /// Parse raw form input and apply it as a property.
    pub fn set_property_str(&mut self, id: ShapeId, field: ShapeField, raw: &str) -> CanvasResult<()> {
        let value = PropertyValue::parse(field, raw)?;
        self.set_property(id, field, value)
    }

    /// Delete a shape. Returns the removed shape, or None if it did not exist.
    pub fn delete_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.settle_drag();

        if !self.document().contains(id) {
            return None;
        }
        let mut next = self.document().clone();
        let removed = next.remove_shape(id);
        self.history.commit(next);

        if self.selection == Some(id) {
            self.selection = None;
        }
        log::debug!("Deleted {}", id);
        removed
    }

    /// Delete the selected shape, if any.
    pub fn delete_selected(&mut self) -> Option<Shape> {
        let id = self.selection?;
        self.delete_shape(id)
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.settle_drag();
        let undone = self.history.undo();
        if undone {
            self.prune_selection();
        }
        undone
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.settle_drag();
        let redone = self.history.redo();
        if redone {
            self.prune_selection();
        }
        redone
    }

    /// The topmost shape under a screen-space point.
    pub fn shape_at_screen(&self, screen_point: Point, transform: &ScreenTransform) -> Option<ShapeId> {
        let point = to_canvas(screen_point, transform)?;
        self.document().shape_at(point)
    }

    /// Classify a raw pointer press by hit testing and dispatch it.
    pub fn pointer_down(&mut self, screen_point: Point, transform: &ScreenTransform) {
        let event = match self.shape_at_screen(screen_point, transform) {
            Some(shape) => PointerEvent::DownOnShape {
                shape,
                position: screen_point,
            },
            None => PointerEvent::DownOnBackground {
                position: screen_point,
            },
        };
        self.handle_pointer(event, transform);
    }

    /// Apply a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent, transform: &ScreenTransform) {
        match event {
            PointerEvent::DownOnShape { shape, position } => {
                self.begin_drag(shape, position, transform);
            }
            PointerEvent::DownOnBackground { .. } => {
                self.end_drag();
                self.clear_selection();
            }
            PointerEvent::Move { position } => {
                self.continue_drag(position, transform);
            }
            PointerEvent::Up { .. } => {
                self.end_drag();
            }
        }
    }

    /// Apply a key press through the configured bindings.
    /// Returns the command that ran, if any.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<EditorCommand> {
        let command = self.config.key_bindings.resolve(event)?;
        let applied = match command {
            EditorCommand::DeleteSelected => self.delete_selected().is_some(),
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
        };
        applied.then_some(command)
    }

    /// Build the scene graph for the present document.
    pub fn scene(&self) -> Scene {
        let highlight = Stroke {
            color: css_color(self.config.selection_color),
            width: self.config.selection_stroke_width,
        };
        let nodes = self
            .document()
            .shapes()
            .iter()
            .map(|shape| {
                let primitive = match shape {
                    Shape::Rectangle(r) => Primitive::Rect {
                        origin: r.position,
                        width: r.width,
                        height: r.height,
                    },
                    Shape::Circle(c) => Primitive::Circle {
                        center: c.center,
                        radius: c.radius,
                    },
                };
                SceneNode {
                    id: shape.id(),
                    primitive,
                    fill: shape.fill().clone(),
                    highlight: (self.selection == Some(shape.id())).then(|| highlight.clone()),
                }
            })
            .collect();

        Scene {
            size: self.config.canvas_size,
            background: css_color(self.config.background_color),
            nodes,
        }
    }

    /// Commit any open drag before another change touches the history.
    fn settle_drag(&mut self) {
        self.end_drag();
    }

    fn prune_selection(&mut self) {
        if let Some(id) = self.selection {
            if !self.document().contains(id) {
                self.selection = None;
            }
        }
    }
}

fn to_canvas(screen_point: Point, transform: &ScreenTransform) -> Option<Point> {
    let Some(point) = transform.screen_to_canvas(screen_point) else {
        log::warn!("Ignoring pointer sample: screen transform is not invertible");
        return None;
    };
    if !point.is_finite() {
        log::warn!("Ignoring pointer sample: {:?} maps outside finite space", screen_point);
        return None;
    }
    Some(point)
}
