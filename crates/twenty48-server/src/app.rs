use std::path::Path;

use axum::{
    Router,
    routing::{any, get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::GameSettings;
use crate::routes;
use crate::session::Session;

#[derive(Clone)]
pub struct AppState {
    pub session: Session,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::new(Session::new(settings.seed, settings.lock_finished))
    }
}

/// API routes, plus `static_dir` (when given) for every other path.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/new-game", any(routes::new_game))
        .route(
            "/api/move",
            post(routes::submit_move).fallback(routes::method_not_allowed),
        )
        .route("/api/state", any(routes::get_state))
        .route("/healthz", get(routes::get_health));

    let router = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    router
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
