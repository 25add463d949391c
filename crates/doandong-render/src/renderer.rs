//! Renderer trait abstraction.

use doandong_core::scene::Scene;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Non-finite geometry on node {0}")]
    NonFinite(String),
    #[error("Output formatting failed")]
    Format(#[from] std::fmt::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Trait for rendering backends.
///
/// A renderer consumes the scene graph emitted by the canvas and produces
/// some output (markup, a command buffer, pixels).
pub trait Renderer: Send + Sync {
    type Output;

    /// Render one frame of the scene.
    fn render(&mut self, scene: &Scene) -> RenderResult<Self::Output>;
}
