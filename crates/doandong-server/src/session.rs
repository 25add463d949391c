//! Editor sessions: one canvas controller per client.

use crate::error::ApiError;
use dashmap::DashMap;
use dashmap::mapref::one::RefMut;
use doandong_core::{
    Canvas, EditorConfig, KeyEvent, Modifiers, PointerEvent, Scene, ScreenTransform, ShapeField,
    ShapeId, ShapeKind,
};
use doandong_render::SvgRenderer;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// One editing action sent by a client.
///
/// Pointer positions are screen coordinates; `transform` is the canvas's
/// current canvas-to-screen affine and defaults to identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorAction {
    AddShape {
        kind: ShapeKind,
    },
    Select {
        shape: Option<ShapeId>,
    },
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        transform: ScreenTransform,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        transform: ScreenTransform,
    },
    PointerUp,
    /// Raw form input; parsed per field.
    SetProperty {
        shape: ShapeId,
        field: String,
        value: String,
    },
    Delete {
        shape: ShapeId,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        editable_target: bool,
    },
    Undo,
    Redo,
}

/// What a client sees of its session after each request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub session: Uuid,
    pub scene: Scene,
    pub can_undo: bool,
    pub can_redo: bool,
    pub selected: Option<ShapeId>,
    pub dragging: bool,
    /// Identity of the shape created by this request, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<ShapeId>,
}

impl SessionView {
    fn of(session: Uuid, canvas: &Canvas) -> Self {
        Self {
            session,
            scene: canvas.scene(),
            can_undo: canvas.can_undo(),
            can_redo: canvas.can_redo(),
            selected: canvas.selection(),
            dragging: canvas.is_dragging(),
            created: None,
        }
    }
}

/// Bounds on how many sessions live and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions untouched for this long are evicted.
    pub idle_timeout: Duration,
    /// Creating a session beyond this many live ones fails.
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            max_sessions: 1024,
        }
    }
}

struct Session {
    canvas: Canvas,
    last_seen: Instant,
}

/// Live sessions, each exclusively owning its canvas.
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
    config: EditorConfig,
    limits: SessionLimits,
}

impl SessionStore {
    pub fn new(config: EditorConfig, limits: SessionLimits) -> Self {
        Self {
            sessions: DashMap::new(),
            config,
            limits,
        }
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    /// Start a session. Idle sessions are evicted first; if the store is
    /// still full the request is refused.
    pub fn create(&self) -> Result<SessionView, ApiError> {
        self.evict_idle(Instant::now());
        if self.len() >= self.limits.max_sessions {
            tracing::warn!("Refusing new session: {} live", self.len());
            return Err(ApiError::TooManySessions(self.limits.max_sessions));
        }

        let id = Uuid::new_v4();
        let canvas = Canvas::with_config(self.config.clone());
        let view = SessionView::of(id, &canvas);
        self.sessions.insert(
            id,
            Session {
                canvas,
                last_seen: Instant::now(),
            },
        );
        tracing::info!("Session {} created ({} live)", id, self.len());
        Ok(view)
    }

    pub fn view(&self, id: Uuid) -> Result<SessionView, ApiError> {
        self.with_canvas(id, |canvas| SessionView::of(id, canvas))
    }

    /// Apply one action and return the resulting view.
    pub fn apply(&self, id: Uuid, action: EditorAction) -> Result<SessionView, ApiError> {
        let mut session = self.touch(id)?;
        let canvas = &mut session.canvas;

        let created = apply_action(canvas, action)?;
        let mut view = SessionView::of(id, canvas);
        view.created = created;
        Ok(view)
    }

    pub fn render_svg(&self, id: Uuid) -> Result<String, ApiError> {
        let scene = self.with_canvas(id, Canvas::scene)?;
        Ok(SvgRenderer::new().render_to_string(&scene)?)
    }

    /// Run `f` against a session's canvas, marking the session as active.
    pub fn with_canvas<R>(&self, id: Uuid, f: impl FnOnce(&Canvas) -> R) -> Result<R, ApiError> {
        let session = self.touch(id)?;
        Ok(f(&session.canvas))
    }

    /// End a session, discarding its state.
    pub fn remove(&self, id: Uuid) -> Result<(), ApiError> {
        match self.sessions.remove(&id) {
            Some(_) => {
                tracing::info!("Session {} closed", id);
                Ok(())
            }
            None => Err(ApiError::SessionNotFound(id)),
        }
    }

    /// Drop sessions idle for at least the configured timeout as of `now`.
    /// Returns how many were evicted.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let before = self.len();
        let timeout = self.limits.idle_timeout;
        self.sessions
            .retain(|_, session| now.saturating_duration_since(session.last_seen) < timeout);
        let evicted = before.saturating_sub(self.len());
        if evicted > 0 {
            tracing::info!("Evicted {} idle sessions ({} live)", evicted, self.len());
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    fn touch(&self, id: Uuid) -> Result<RefMut<'_, Uuid, Session>, ApiError> {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or(ApiError::SessionNotFound(id))?;
        session.last_seen = Instant::now();
        Ok(session)
    }
}

fn apply_action(canvas: &mut Canvas, action: EditorAction) -> Result<Option<ShapeId>, ApiError> {
    match action {
        EditorAction::AddShape { kind } => return Ok(Some(canvas.add_shape(kind))),
        EditorAction::Select { shape } => {
            if !canvas.select(shape) {
                tracing::debug!("Ignoring selection of missing shape");
            }
        }
        EditorAction::PointerDown { x, y, transform } => {
            canvas.pointer_down(Point::new(x, y), &transform);
        }
        EditorAction::PointerMove { x, y, transform } => {
            canvas.handle_pointer(
                PointerEvent::Move {
                    position: Point::new(x, y),
                },
                &transform,
            );
        }
        EditorAction::PointerUp => {
            canvas.end_drag();
        }
        EditorAction::SetProperty {
            shape,
            field,
            value,
        } => {
            let field: ShapeField = field.parse()?;
            canvas.set_property_str(shape, field, &value)?;
        }
        EditorAction::Delete { shape } => {
            canvas.delete_shape(shape);
        }
        EditorAction::Key {
            key,
            modifiers,
            editable_target,
        } => {
            let event = KeyEvent {
                key,
                modifiers,
                editable_target,
            };
            if let Some(command) = canvas.handle_key(&event) {
                tracing::debug!("Key {:?} ran {:?}", event.key, command);
            }
        }
        EditorAction::Undo => {
            canvas.undo();
        }
        EditorAction::Redo => {
            canvas.redo();
        }
    }
    Ok(None)
}
