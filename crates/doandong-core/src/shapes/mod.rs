//! Shape definitions for the pattern canvas.

mod circle;
mod fill;
mod rectangle;

pub use circle::Circle;
pub use fill::Fill;
pub use rectangle::Rectangle;

use crate::error::{CanvasError, CanvasResult};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub Uuid);

impl ShapeId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The variant tag of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl ShapeKind {
    /// Fields that `set_property` accepts for this kind.
    pub fn fields(self) -> &'static [ShapeField] {
        match self {
            ShapeKind::Rectangle => &[
                ShapeField::Fill,
                ShapeField::X,
                ShapeField::Y,
                ShapeField::Width,
                ShapeField::Height,
            ],
            ShapeKind::Circle => &[
                ShapeField::Fill,
                ShapeField::Cx,
                ShapeField::Cy,
                ShapeField::Radius,
            ],
        }
    }

    /// Check whether a field belongs to this kind.
    pub fn accepts(self, field: ShapeField) -> bool {
        self.fields().contains(&field)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Rectangle => f.write_str("rectangle"),
            ShapeKind::Circle => f.write_str("circle"),
        }
    }
}

/// An editable property of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeField {
    Fill,
    X,
    Y,
    Width,
    Height,
    Cx,
    Cy,
    Radius,
}

impl ShapeField {
    pub fn name(self) -> &'static str {
        match self {
            ShapeField::Fill => "fill",
            ShapeField::X => "x",
            ShapeField::Y => "y",
            ShapeField::Width => "width",
            ShapeField::Height => "height",
            ShapeField::Cx => "cx",
            ShapeField::Cy => "cy",
            ShapeField::Radius => "radius",
        }
    }

    /// Whether the field holds a number (everything except the fill).
    pub fn is_numeric(self) -> bool {
        !matches!(self, ShapeField::Fill)
    }
}

impl fmt::Display for ShapeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeField {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fill" => Ok(ShapeField::Fill),
            "x" => Ok(ShapeField::X),
            "y" => Ok(ShapeField::Y),
            "width" => Ok(ShapeField::Width),
            "height" => Ok(ShapeField::Height),
            "cx" => Ok(ShapeField::Cx),
            "cy" => Ok(ShapeField::Cy),
            "r" | "radius" => Ok(ShapeField::Radius),
            other => Err(CanvasError::UnknownField(other.to_string())),
        }
    }
}

/// A typed value for `set_property`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Number(f64),
    Fill(Fill),
}

impl PropertyValue {
    /// Parse raw form input for the given field.
    ///
    /// Numeric fields require a finite number; non-numeric text is rejected
    /// rather than coerced. The fill field requires a valid CSS colour.
    pub fn parse(field: ShapeField, raw: &str) -> CanvasResult<Self> {
        if field.is_numeric() {
            let trimmed = raw.trim();
            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(PropertyValue::Number(value)),
                _ => Err(CanvasError::InvalidNumber {
                    field,
                    input: raw.to_string(),
                }),
            }
        } else {
            Fill::parse(raw).map(PropertyValue::Fill)
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<Fill> for PropertyValue {
    fn from(fill: Fill) -> Self {
        PropertyValue::Fill(fill)
    }
}

/// A drawable shape: a closed sum over the supported primitives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
}

impl Shape {
    /// Create a shape of the given kind with default geometry and fill.
    pub fn with_defaults(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::default_at_origin()),
            ShapeKind::Circle => Shape::Circle(Circle::default_at_origin()),
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(r) => r.id,
            Shape::Circle(c) => c.id,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
        }
    }

    pub fn fill(&self) -> &Fill {
        match self {
            Shape::Rectangle(r) => &r.fill,
            Shape::Circle(c) => &c.fill,
        }
    }

    /// Bounding box in canvas coordinates, normalised for negative sizes.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(r) => r.bounds(),
            Shape::Circle(c) => c.bounds(),
        }
    }

    /// Check if a canvas-space point lies inside this shape.
    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Rectangle(r) => r.hit_test(point),
            Shape::Circle(c) => c.hit_test(point),
        }
    }

    /// Move the shape by a delta. Rectangles move their top-left corner (and
    /// so both corners), circles move their center.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Rectangle(r) => r.position += delta,
            Shape::Circle(c) => c.center += delta,
        }
    }

    /// Return a copy with one property replaced.
    ///
    /// The field must belong to this shape's kind and the value must have the
    /// field's type. Numbers are taken as given, negative sizes included.
    pub fn with_property(&self, field: ShapeField, value: PropertyValue) -> CanvasResult<Shape> {
        let kind = self.kind();
        if !kind.accepts(field) {
            return Err(CanvasError::FieldNotApplicable { field, kind });
        }

        let mut updated = self.clone();
        match (&mut updated, field, value) {
            (Shape::Rectangle(r), ShapeField::Fill, PropertyValue::Fill(fill)) => r.fill = fill,
            (Shape::Circle(c), ShapeField::Fill, PropertyValue::Fill(fill)) => c.fill = fill,
            (Shape::Rectangle(r), ShapeField::X, PropertyValue::Number(n)) => r.position.x = n,
            (Shape::Rectangle(r), ShapeField::Y, PropertyValue::Number(n)) => r.position.y = n,
            (Shape::Rectangle(r), ShapeField::Width, PropertyValue::Number(n)) => r.width = n,
            (Shape::Rectangle(r), ShapeField::Height, PropertyValue::Number(n)) => r.height = n,
            (Shape::Circle(c), ShapeField::Cx, PropertyValue::Number(n)) => c.center.x = n,
            (Shape::Circle(c), ShapeField::Cy, PropertyValue::Number(n)) => c.center.y = n,
            (Shape::Circle(c), ShapeField::Radius, PropertyValue::Number(n)) => c.radius = n,
            _ => return Err(CanvasError::ValueTypeMismatch { field }),
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_sets_per_kind() {
        assert!(ShapeKind::Rectangle.accepts(ShapeField::X));
        assert!(ShapeKind::Rectangle.accepts(ShapeField::Fill));
        assert!(!ShapeKind::Rectangle.accepts(ShapeField::Radius));
        assert!(ShapeKind::Circle.accepts(ShapeField::Cx));
        assert!(!ShapeKind::Circle.accepts(ShapeField::Width));
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("cx".parse::<ShapeField>().unwrap(), ShapeField::Cx);
        assert_eq!("r".parse::<ShapeField>().unwrap(), ShapeField::Radius);
        assert!(matches!(
            "rotation".parse::<ShapeField>(),
            Err(CanvasError::UnknownField(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        let err = PropertyValue::parse(ShapeField::X, "12px").unwrap_err();
        assert!(matches!(err, CanvasError::InvalidNumber { field: ShapeField::X, .. }));
        assert!(PropertyValue::parse(ShapeField::Radius, "NaN").is_err());
        assert!(PropertyValue::parse(ShapeField::Radius, "inf").is_err());
        assert!(PropertyValue::parse(ShapeField::Y, "").is_err());
    }

    #[test]
    fn test_parse_accepts_numbers_and_fills() {
        assert_eq!(
            PropertyValue::parse(ShapeField::Width, " -20.5 ").unwrap(),
            PropertyValue::Number(-20.5)
        );
        assert_eq!(
            PropertyValue::parse(ShapeField::Fill, "#ff0000").unwrap(),
            PropertyValue::Fill(Fill::parse("#ff0000").unwrap())
        );
    }

    #[test]
    fn test_with_property_rejects_foreign_field() {
        let shape = Shape::with_defaults(ShapeKind::Circle);
        let err = shape
            .with_property(ShapeField::Width, PropertyValue::Number(10.0))
            .unwrap_err();
        assert!(matches!(
            err,
            CanvasError::FieldNotApplicable {
                field: ShapeField::Width,
                kind: ShapeKind::Circle
            }
        ));
    }

    #[test]
    fn test_with_property_rejects_wrong_value_type() {
        let shape = Shape::with_defaults(ShapeKind::Rectangle);
        let err = shape
            .with_property(ShapeField::X, PropertyValue::Fill(Fill::parse("red").unwrap()))
            .unwrap_err();
        assert!(matches!(err, CanvasError::ValueTypeMismatch { field: ShapeField::X }));
    }

    #[test]
    fn test_with_property_keeps_original() {
        let shape = Shape::with_defaults(ShapeKind::Rectangle);
        let original = shape.clone();
        let updated = shape
            .with_property(ShapeField::Height, PropertyValue::Number(-40.0))
            .unwrap();
        assert_eq!(shape, original);
        assert_eq!(updated.id(), original.id());
        match updated {
            Shape::Rectangle(r) => assert!((r.height + 40.0).abs() < f64::EPSILON),
            Shape::Circle(_) => panic!("kind changed"),
        }
    }

    #[test]
    fn test_translate() {
        let mut rect = Shape::with_defaults(ShapeKind::Rectangle);
        rect.translate(Vec2::new(10.0, 5.0));
        let bounds = rect.bounds();
        assert!((bounds.x0 - 60.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 55.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 100.0).abs() < f64::EPSILON);

        let mut circle = Shape::with_defaults(ShapeKind::Circle);
        circle.translate(Vec2::new(-3.0, 4.0));
        match circle {
            Shape::Circle(c) => {
                assert!((c.center.x - 97.0).abs() < f64::EPSILON);
                assert!((c.center.y - 104.0).abs() < f64::EPSILON);
                assert!((c.radius - 50.0).abs() < f64::EPSILON);
            }
            Shape::Rectangle(_) => panic!("kind changed"),
        }
    }
}
