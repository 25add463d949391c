//! Canvas errors.

use crate::shapes::{ShapeField, ShapeId, ShapeKind};
use thiserror::Error;

/// Errors reported by canvas operations.
///
/// An operation that returns one of these has left the canvas unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CanvasError {
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("Field '{field}' does not apply to a {kind}")]
    FieldNotApplicable { field: ShapeField, kind: ShapeKind },
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Value for '{field}' has the wrong type")]
    ValueTypeMismatch { field: ShapeField },
    #[error("Invalid number for '{field}': {input:?}")]
    InvalidNumber { field: ShapeField, input: String },
    #[error("Invalid fill colour: {0:?}")]
    InvalidFill(String),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
