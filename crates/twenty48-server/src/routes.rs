use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;
use serde::de::Error as _;
use serde_json::Value;
use twenty48_engine::engine::{GameState, Move};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Default)]
pub struct MoveRequest {
    /// Missing field decodes to "" and is rejected as an invalid direction.
    direction: String,
}

impl MoveRequest {
    /// Decode the first JSON value in `body`; anything after it is ignored.
    ///
    /// `null` is an empty request. Object keys match `direction` ignoring
    /// ASCII case, with an exact match taking precedence.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
        // An empty stream means a blank body; re-parse it for the EOF error.
        let value = values.next().unwrap_or_else(|| serde_json::from_slice(body))?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(mut fields) => {
                let field = fields.remove("direction").or_else(|| {
                    let key = fields
                        .keys()
                        .find(|k| k.eq_ignore_ascii_case("direction"))
                        .cloned()?;
                    fields.remove(&key)
                });
                match field {
                    None | Some(Value::Null) => Ok(Self::default()),
                    Some(direction) => Ok(Self {
                        direction: serde_json::from_value(direction)?,
                    }),
                }
            }
            other => Err(serde_json::Error::custom(format!(
                "expected a move object, found {other}"
            ))),
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
}

pub async fn new_game(State(state): State<AppState>) -> Json<GameState> {
    Json(state.session.new_game())
}

pub async fn get_state(State(state): State<AppState>) -> Json<GameState> {
    Json(state.session.current())
}

/// The body is decoded without checking `Content-Type`.
pub async fn submit_move(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GameState>, ApiError> {
    let request = MoveRequest::from_body(&body)?;
    let direction: Move = request.direction.parse()?;
    Ok(Json(state.session.submit_move(direction)))
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::Value;
    use tower::ServiceExt;
    use twenty48_engine::engine::{Board, Game};

    use crate::app::{AppState, build_router};
    use crate::session::Session;

    fn app(session: &Session) -> Router {
        build_router(AppState::new(session.clone()), None)
    }

    async fn send(router: Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn json(body: &str) -> Value {
        serde_json::from_str(body).unwrap()
    }

    fn non_zero(v: &Value) -> Vec<u64> {
        v["board"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|row| row.as_array().unwrap().iter().map(|c| c.as_u64().unwrap()))
            .filter(|&c| c != 0)
            .collect()
    }

    fn install(session: &Session, rows: [[u32; 4]; 4]) {
        session.install(Game::from_parts(
            Board::from_rows(rows),
            0,
            StdRng::seed_from_u64(0),
        ));
    }

    #[tokio::test]
    async fn new_game_returns_fresh_snapshot() {
        let session = Session::new(Some(1), false);
        let (status, body) = send(app(&session), Method::GET, "/api/new-game", "").await;
        assert_eq!(status, StatusCode::OK);
        let v = json(&body);
        assert_eq!(v["score"], 0);
        assert_eq!(v["gameOver"], false);
        assert_eq!(v["won"], false);
        let tiles = non_zero(&v);
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|&t| t == 2 || t == 4));
    }

    #[tokio::test]
    async fn new_game_and_state_accept_any_method() {
        let session = Session::new(Some(1), false);
        let (status, _) = send(app(&session), Method::POST, "/api/new-game", "").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(app(&session), Method::PUT, "/api/state", "").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn state_is_lazy_and_stable() {
        let session = Session::new(Some(2), false);
        let (status, first) = send(app(&session), Method::GET, "/api/state", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(non_zero(&json(&first)).len(), 2);
        let (_, second) = send(app(&session), Method::GET, "/api/state", "").await;
        assert_eq!(json(&first), json(&second));
    }

    #[tokio::test]
    async fn move_applies_to_session() {
        let session = Session::new(Some(3), false);
        install(&session, [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let (status, body) = send(
            app(&session),
            Method::POST,
            "/api/move",
            r#"{"direction":"left"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let v = json(&body);
        assert_eq!(v["score"], 4);
        assert_eq!(v["board"][0][0], 4);
        assert_eq!(non_zero(&v).len(), 2);
        assert_eq!(session.current().score, 4);
    }

    #[tokio::test]
    async fn unchanged_move_still_returns_board() {
        let session = Session::new(Some(3), false);
        install(&session, [[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let (status, body) = send(
            app(&session),
            Method::POST,
            "/api/move",
            r#"{"direction":"up"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let v = json(&body);
        assert_eq!(v["board"][0], serde_json::json!([2, 4, 0, 0]));
        assert_eq!(v["score"], 0);
    }

    #[tokio::test]
    async fn malformed_payload_is_rejected() {
        let session = Session::new(Some(4), false);
        let before = session.current();
        let (status, body) = send(app(&session), Method::POST, "/api/move", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid request");
        assert_eq!(session.current(), before);
    }

    #[tokio::test]
    async fn unknown_direction_is_rejected() {
        let session = Session::new(Some(4), false);
        let before = session.current();
        for payload in [r#"{"direction":"Up"}"#, r#"{"direction":"north"}"#, "{}"] {
            let (status, body) = send(app(&session), Method::POST, "/api/move", payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
            assert_eq!(body, "Invalid direction");
        }
        assert_eq!(session.current(), before);
    }

    #[tokio::test]
    async fn move_reads_only_the_first_value() {
        let session = Session::new(Some(3), false);
        install(&session, [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let (status, body) = send(
            app(&session),
            Method::POST,
            "/api/move",
            r#"{"direction":"left"}xyz"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["score"], 4);
    }

    #[tokio::test]
    async fn move_key_ignores_case() {
        let session = Session::new(Some(3), false);
        install(&session, [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let (status, body) = send(
            app(&session),
            Method::POST,
            "/api/move",
            r#"{"Direction":"left"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["score"], 4);
    }

    #[tokio::test]
    async fn null_payload_is_an_invalid_direction() {
        let session = Session::new(Some(4), false);
        let before = session.current();
        for payload in ["null", r#"{"direction":null}"#] {
            let (status, body) = send(app(&session), Method::POST, "/api/move", payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
            assert_eq!(body, "Invalid direction");
        }
        assert_eq!(session.current(), before);
    }

    #[tokio::test]
    async fn wrong_shapes_are_invalid_requests() {
        let session = Session::new(Some(4), false);
        let before = session.current();
        for payload in ["", "  ", r#"{"direction":5}"#, "[1,2]", r#""left""#] {
            let (status, body) = send(app(&session), Method::POST, "/api/move", payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload:?}");
            assert_eq!(body, "Invalid request");
        }
        assert_eq!(session.current(), before);
    }

    #[tokio::test]
    async fn move_requires_post() {
        let session = Session::new(Some(4), false);
        let before = session.current();
        let (status, body) = send(app(&session), Method::GET, "/api/move", "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body, "Method not allowed");
        assert_eq!(session.current(), before);
    }

    #[tokio::test]
    async fn responses_allow_any_origin() {
        let session = Session::new(Some(5), false);
        let request = Request::builder()
            .uri("/api/state")
            .header(header::ORIGIN, "http://example.com")
            .body(Body::empty())
            .unwrap();
        let response = app(&session).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let session = Session::new(Some(5), false);
        let (status, body) = send(app(&session), Method::GET, "/healthz", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body)["status"], "ok");
    }

    #[tokio::test]
    async fn serves_static_files() {
        let td = tempfile::tempdir().unwrap();
        std::fs::write(td.path().join("index.html"), "<h1>2048</h1>").unwrap();
        let session = Session::new(Some(6), false);
        let router = build_router(AppState::new(session), Some(td.path()));
        let (status, body) = send(router.clone(), Method::GET, "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<h1>2048</h1>");
        let (status, _) = send(router, Method::GET, "/api/state", "").await;
        assert_eq!(status, StatusCode::OK);
    }
}
