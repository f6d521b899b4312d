use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;
use twenty48_engine::engine::ParseMoveError;

/// Client errors raised at the HTTP boundary. None of them touch the game.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Invalid request")]
    InvalidRequest(#[from] serde_json::Error),
    #[error("Invalid direction")]
    InvalidDirection(#[from] ParseMoveError),
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::InvalidDirection(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidRequest(err) => warn!("rejected move payload: {err}"),
            ApiError::InvalidDirection(err) => warn!("rejected move: {err}"),
            ApiError::MethodNotAllowed => warn!("rejected move: wrong method"),
        }
        (self.status(), self.to_string()).into_response()
    }
}
