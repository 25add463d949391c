//! Doandong Web Server
//!
//! Serves the home, editor and pattern detail pages, and hosts editor
//! sessions behind a small JSON API. `GET /editor?session={id}` renders the
//! editor page from a live session.
//!
//! ## API
//!
//! ```text
//! POST   /api/sessions                  create a session
//! GET    /api/sessions/{id}             current view
//! POST   /api/sessions/{id}/actions     apply one action
//! GET    /api/sessions/{id}/scene.svg   rendered canvas
//! DELETE /api/sessions/{id}             end the session
//! ```
//!
//! Actions are JSON with a `type` tag:
//! ```json
//! { "type": "add_shape", "kind": "rectangle" }
//! { "type": "pointer_down", "x": 60.0, "y": 60.0 }
//! { "type": "set_property", "shape": "<uuid>", "field": "fill", "value": "#ff0000" }
//! ```

mod config;
mod error;
mod pages;
mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use config::ServerConfig;
use doandong_core::{Canvas, EditorConfig};
use error::ApiError;
use serde::Deserialize;
use session::{EditorAction, SessionStore, SessionView};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use uuid::Uuid;

type AppState = Arc<SessionStore>;

/// Longest pause between idle-session sweeps.
const MAX_SWEEP_PERIOD: Duration = Duration::from_secs(60);
const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(10);

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doandong_server=info,tower_http=info".into()),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    let state = Arc::new(SessionStore::new(EditorConfig::default(), config.sessions));
    let _eviction = spawn_eviction(state.clone());
    let app = router(state);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.addr, e);
            std::process::exit(1);
        }
    };
    info!("Doandong server listening on {}", config.addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}

/// Periodically drop sessions that have been idle past their timeout.
fn spawn_eviction(store: AppState) -> JoinHandle<()> {
    let period = (store.limits().idle_timeout / 2).clamp(MIN_SWEEP_PERIOD, MAX_SWEEP_PERIOD);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            store.evict_idle(Instant::now());
        }
    })
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/editor", get(editor_page))
        .route("/patterns/{id}", get(pattern_page))
        .route("/health", get(health))
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/actions", post(apply_action))
        .route("/api/sessions/{id}/scene.svg", get(scene_svg))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Home page
async fn index() -> Html<String> {
    Html(pages::home())
}

#[derive(Debug, Deserialize)]
struct EditorQuery {
    session: Option<Uuid>,
}

/// Editor page, either blank or showing a live session.
async fn editor_page(
    State(store): State<AppState>,
    Query(query): Query<EditorQuery>,
) -> Result<Html<String>, ApiError> {
    let html = match query.session {
        Some(id) => store.with_canvas(id, |canvas| pages::editor(canvas, Some(id)))??,
        None => pages::editor(&Canvas::new(), None)?,
    };
    Ok(Html(html))
}

async fn pattern_page(Path(id): Path<String>) -> Html<String> {
    Html(pages::pattern_detail(&id))
}

/// Health check
async fn health() -> &'static str {
    "ok"
}

async fn create_session(
    State(store): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    Ok((StatusCode::CREATED, Json(store.create()?)))
}

async fn get_session(
    State(store): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(store.view(id)?))
}

async fn apply_action(
    State(store): State<AppState>,
    Path(id): Path<Uuid>,
    Json(action): Json<EditorAction>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(store.apply(id, action)?))
}

async fn scene_svg(
    State(store): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let svg = store.render_svg(id)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

async fn delete_session(
    State(store): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    store.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doandong_core::ShapeKind;
    use session::SessionLimits;

    fn state() -> AppState {
        Arc::new(SessionStore::new(EditorConfig::default(), SessionLimits::default()))
    }

    /// Serve the router on an ephemeral port and return its base URL.
    async fn spawn_app(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let state = state();
        let (status, Json(view)) = create_session(State(state.clone())).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(!view.can_undo);
        let id = view.session;

        let Json(view) = apply_action(
            State(state.clone()),
            Path(id),
            Json(EditorAction::AddShape {
                kind: ShapeKind::Circle,
            }),
        )
        .await
        .unwrap();
        assert!(view.can_undo);
        assert!(view.created.is_some());

        let Json(view) = get_session(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(view.scene.nodes.len(), 1);

        let status = delete_session(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = get_session(State(state), Path(id)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_property_is_unprocessable() {
        let state = state();
        let id = state.create().unwrap().session;
        let shape = state
            .apply(id, EditorAction::AddShape { kind: ShapeKind::Rectangle })
            .unwrap()
            .created
            .unwrap();

        let err = apply_action(
            State(state.clone()),
            Path(id),
            Json(EditorAction::SetProperty {
                shape,
                field: "x".to_string(),
                value: "left".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_scene_svg_unknown_session() {
        let result = scene_svg(State(state()), Path(Uuid::new_v4())).await;
        assert!(matches!(result, Err(ApiError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_session_over_cap() {
        let state = Arc::new(SessionStore::new(
            EditorConfig::default(),
            SessionLimits {
                max_sessions: 1,
                ..SessionLimits::default()
            },
        ));
        create_session(State(state.clone())).await.unwrap();
        let err = create_session(State(state)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_eviction_task_drops_idle_sessions() {
        let state = Arc::new(SessionStore::new(
            EditorConfig::default(),
            SessionLimits {
                idle_timeout: Duration::from_millis(40),
                ..SessionLimits::default()
            },
        ));
        state.create().unwrap();
        assert_eq!(state.len(), 1);

        let task = spawn_eviction(state.clone());
        tokio::time::sleep(Duration::from_millis(400)).await;
        task.abort();
        assert_eq!(state.len(), 0);
    }

    #[tokio::test]
    async fn test_http_pages() {
        let base = spawn_app(state()).await;
        let client = reqwest::Client::new();

        let res = client.get(format!("{base}/")).send().await.unwrap();
        assert_eq!(res.status().as_u16(), 200);
        assert!(res.text().await.unwrap().contains("도안제작"));

        let res = client.get(format!("{base}/patterns/42")).send().await.unwrap();
        assert_eq!(res.status().as_u16(), 200);
        assert!(res.text().await.unwrap().contains("<strong>42</strong>"));

        let res = client.get(format!("{base}/editor")).send().await.unwrap();
        assert_eq!(res.status().as_u16(), 200);
        let html = res.text().await.unwrap();
        assert!(html.contains("두들"));
        assert!(!html.contains("data-session"));

        let res = client.get(format!("{base}/health")).send().await.unwrap();
        assert_eq!(res.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_http_rejects_bad_input() {
        let state = state();
        let id = state.create().unwrap().session;
        let base = spawn_app(state).await;
        let client = reqwest::Client::new();

        let res = client
            .get(format!("{base}/api/sessions/not-a-uuid"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 400);

        let res = client
            .get(format!("{base}/api/sessions/{}", Uuid::new_v4()))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 404);
        let body: serde_json::Value = res.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("Session not found"));

        let actions = format!("{base}/api/sessions/{id}/actions");
        let res = client
            .post(&actions)
            .header("content-type", "application/json")
            .body("{\"type\": ")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 400);

        let res = client
            .post(&actions)
            .json(&serde_json::json!({ "type": "explode" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 422);

        let res = client
            .get(format!("{base}/editor?session={}", Uuid::new_v4()))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn test_http_session_flow() {
        let base = spawn_app(state()).await;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{base}/api/sessions"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 201);
        let view: SessionView = res.json().await.unwrap();
        let id = view.session;

        let page = client
            .get(format!("{base}/editor?session={id}"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(page.contains(&format!(r#"data-session="{id}""#)));
        assert!(page.contains("disabled>Undo<"));

        let actions = format!("{base}/api/sessions/{id}/actions");
        let view: SessionView = client
            .post(&actions)
            .json(&serde_json::json!({ "type": "add_shape", "kind": "circle" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let circle = view.created.unwrap();
        let view: SessionView = client
            .post(&actions)
            .json(&serde_json::json!({ "type": "select", "shape": circle }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(view.selected, Some(circle));

        let page = client
            .get(format!("{base}/editor?session={id}"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(page.contains("색상"));
        assert!(page.contains(r#"value="lightgreen""#));
        assert!(page.contains(">Delete<"));
        assert!(!page.contains("disabled>Undo<"));

        let res = client
            .get(format!("{base}/api/sessions/{id}/scene.svg"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 200);
        assert_eq!(
            res.headers()["content-type"].to_str().unwrap(),
            "image/svg+xml"
        );
        assert!(res.text().await.unwrap().contains("<circle"));

        let res = client
            .delete(format!("{base}/api/sessions/{id}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 204);

        let res = client
            .get(format!("{base}/api/sessions/{id}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 404);
    }
}
