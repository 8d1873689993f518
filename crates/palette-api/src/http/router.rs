//! Axum router configuration with middleware.
//!
//! All routes are under `/api/`.
//! Middleware: CORS (any origin), tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Persona chat
        .route("/chat", post(handlers::chat::chat))
        // Session notes
        .route("/notes", post(handlers::notes::save_notes))
        .route("/notes/{child_id}", get(handlers::notes::get_notes));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use palette_types::config::AppConfig;

    /// Router over a fresh seeded database in a temp data directory.
    async fn test_app() -> (Router, TempDir) {
        let tmp = TempDir::new().unwrap();
        let state = AppState::build(AppConfig::default(), tmp.path().to_path_buf())
            .await
            .unwrap();
        state.seed_service.seed(state.engine.catalog()).await.unwrap();
        (build_router(state), tmp)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _tmp) = test_app().await;
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_chat_first_reply() {
        let (app, _tmp) = test_app().await;
        let (status, body) = send(
            &app,
            post_json("/api/chat", json!({ "message": "hi", "persona": "aarav", "history": [] })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["response"],
            "Hi! I'm Aarav. Sometimes it's hard to breathe, but drawing makes me feel better."
        );
        assert!(body["timestamp"].is_string());
        assert_eq!(body["therapist"]["name"], "Dr. Sarah Chen");
        assert_eq!(body["therapist"]["art_match"], true);
        assert_eq!(body["therapist"]["match_score"], 100);
    }

    #[tokio::test]
    async fn test_chat_rotates_with_child_turns() {
        let (app, _tmp) = test_app().await;
        let history = json!([
            { "sender": "child", "text": "Hi" },
            { "sender": "assistant", "text": "Hello" },
            { "sender": "child", "text": "I like painting" },
        ]);
        let (status, body) = send(
            &app,
            post_json(
                "/api/chat",
                json!({ "message": "hi", "persona": "dani", "history": history }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["response"],
            "Sometimes I feel different from other kids, but my art shows I'm special."
        );
        assert_eq!(body["therapist"]["name"], "Dr. Michael Rodriguez");
    }

    #[tokio::test]
    async fn test_chat_matches_by_condition() {
        let (app, _tmp) = test_app().await;
        let (status, body) = send(
            &app,
            post_json("/api/chat", json!({ "message": "hi", "persona": "leo" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["therapist"]["name"], "Dr. Emily Thompson");
        assert_eq!(body["therapist"]["art_match"], true);
        assert_eq!(body["therapist"]["match_score"], 100);
    }

    #[tokio::test]
    async fn test_chat_invalid_persona() {
        let (app, _tmp) = test_app().await;
        let (status, body) = send(
            &app,
            post_json("/api/chat", json!({ "message": "hi", "persona": "zoe" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid persona ID" }));
    }

    #[tokio::test]
    async fn test_chat_missing_parameters() {
        let (app, _tmp) = test_app().await;
        for payload in [
            json!({ "persona": "aarav" }),
            json!({ "message": "hi" }),
            json!({ "message": "", "persona": "aarav" }),
        ] {
            let (status, body) = send(&app, post_json("/api/chat", payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Missing required parameters" }));
        }
    }

    #[tokio::test]
    async fn test_chat_malformed_body() {
        let (app, _tmp) = test_app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required parameters");
    }

    #[tokio::test]
    async fn test_save_then_get_notes() {
        let (app, _tmp) = test_app().await;

        let (status, body) = send(
            &app,
            post_json(
                "/api/notes",
                json!({
                    "childId": 1,
                    "sessionNotes": "Drew a house with a big sun",
                    "emotionalState": "calm",
                    "artEngagement": 4,
                    "artForm": "drawing",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Notes saved successfully");
        let first_session = body["sessionId"].as_i64().unwrap();
        assert!(body["timestamp"].is_string());

        let (status, body) = send(
            &app,
            post_json(
                "/api/notes",
                json!({ "childId": "1", "sessionNotes": "Painted the sea" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_ne!(body["sessionId"].as_i64().unwrap(), first_session);

        let (status, body) = send(&app, get("/api/notes/1")).await;
        assert_eq!(status, StatusCode::OK);
        let notes = body.as_array().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0]["text"], "Painted the sea");
        assert_eq!(notes[1]["text"], "Drew a house with a big sun");
        assert_eq!(notes[1]["indicators"]["emotional_state"], "calm");
        assert_eq!(notes[1]["indicators"]["art_engagement"], 4);
        assert!(notes[0]["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_save_notes_missing_fields() {
        let (app, _tmp) = test_app().await;
        for payload in [
            json!({ "sessionNotes": "No child" }),
            json!({ "childId": 1 }),
            json!({ "childId": 1, "sessionNotes": "" }),
        ] {
            let (status, body) = send(&app, post_json("/api/notes", payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "error": "Missing required fields" }));
        }

        let (_, body) = send(&app, get("/api/notes/1")).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_save_notes_unknown_child() {
        let (app, _tmp) = test_app().await;
        let (status, body) = send(
            &app,
            post_json(
                "/api/notes",
                json!({ "childId": 999, "sessionNotes": "Nobody here" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to save notes" }));

        let (_, body) = send(&app, get("/api/notes/999")).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_get_notes_empty_and_non_numeric() {
        let (app, _tmp) = test_app().await;

        let (status, body) = send(&app, get("/api/notes/2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = send(&app, get("/api/notes/abc")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}
