//! Rectangle shape.

use super::{Fill, ShapeId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle. May be negative; stored as given.
    pub width: f64,
    /// Height of the rectangle. May be negative; stored as given.
    pub height: f64,
    pub fill: Fill,
}

impl Rectangle {
    /// Where a freshly added rectangle is placed.
    pub const DEFAULT_POSITION: Point = Point::new(50.0, 50.0);
    pub const DEFAULT_WIDTH: f64 = 100.0;
    pub const DEFAULT_HEIGHT: f64 = 100.0;
    pub const DEFAULT_FILL: &'static str = "lightblue";

    /// Create a new rectangle with a fresh identity.
    pub fn new(position: Point, width: f64, height: f64, fill: Fill) -> Self {
        Self {
            id: ShapeId::new(),
            position,
            width,
            height,
            fill,
        }
    }

    /// The rectangle an "add rectangle" action creates.
    pub fn default_at_origin() -> Self {
        Self::new(
            Self::DEFAULT_POSITION,
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_HEIGHT,
            Fill::named(Self::DEFAULT_FILL),
        )
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Get the rectangle as a kurbo Rect (unnormalised).
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    pub fn bounds(&self) -> Rect {
        self.as_rect().abs()
    }

    pub fn hit_test(&self, point: Point) -> bool {
        let rect = self.bounds();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }
}
