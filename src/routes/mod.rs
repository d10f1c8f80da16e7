//! Router assembly: game API, session cookie middleware, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, Level};

use crate::state::AppState;

pub mod http;
pub mod identity;

/// Build the application router with:
/// - game API under `/api/game/...`, every route behind the `sessionId` cookie middleware
/// - liveness at `/api/health`
/// - CORS for the configured frontend origin, with credentials
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let game = Router::new()
        .route("/start", get(http::http_start_game))
        .route("/daily", get(http::http_start_game))
        .route("/answer", post(http::http_post_answer))
        .route("/status", get(http::http_get_status))
        .route("/reset", delete(http::http_reset))
        .route("/regenerate", post(http::http_regenerate))
        .route("/content", delete(http::http_clear_content))
        .route("/stats", get(http::http_get_stats))
        .route("/languages", get(http::http_get_languages))
        .layer(middleware::from_fn_with_state(state.clone(), identity::session_cookie));

    Router::new()
        .nest("/api/game", game)
        .route("/api/health", get(http::http_health))
        .with_state(state.clone())
        .layer(cors_layer(&state.config.server.frontend_url))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Credentials require an explicit origin; an unparsable one disables cross-origin access.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);
    match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            error!(target: "cropgen_backend", %frontend_url, error = %e, "Invalid FRONTEND_URL; CORS origin not set");
            layer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, RetrySettings};
    use crate::content::tests::CountingSource;
    use crate::store::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app_with(dev_routes: bool) -> Router {
        let mut cfg = GameConfig::default();
        cfg.retry = RetrySettings { attempts: 3, backoff_ms: 0 };
        cfg.server.dev_routes = dev_routes;
        let state = AppState::with_parts(cfg, Arc::new(MemoryStore::new()), Arc::new(CountingSource::new(0)));
        build_router(Arc::new(state))
    }

    fn app() -> Router {
        app_with(true)
    }

    async fn body_json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn set_cookie(res: &Response) -> Option<String> {
        res.headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    /// `sessionId=<value>` from a Set-Cookie header.
    fn session_pair(set_cookie: &str) -> String {
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut b = Request::builder().uri(uri);
        if let Some(c) = cookie {
            b = b.header(header::COOKIE, c);
        }
        b.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, cookie: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn first_contact_issues_session_cookie() {
        let res = app().oneshot(get("/api/game/start?language=hindi", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = set_cookie(&res).expect("cookie issued");
        assert!(cookie.starts_with("sessionId="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));

        let body = body_json(res).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["isNewGame"], json!(true));
        assert_eq!(body["data"]["language"], json!("hi"));
        assert_eq!(body["data"]["questions"].as_array().unwrap().len(), 12);
        assert!(body["data"]["questions"][0].get("correctAnswer").is_none());
    }

    #[tokio::test]
    async fn cookie_round_trip_resumes_and_answers() {
        let app = app();
        let res = app.clone().oneshot(get("/api/game/daily", None)).await.unwrap();
        let cookie = session_pair(&set_cookie(&res).unwrap());

        let res = app.clone().oneshot(get("/api/game/start", Some(&cookie))).await.unwrap();
        assert!(set_cookie(&res).is_none());
        assert_eq!(body_json(res).await["data"]["isNewGame"], json!(false));

        let answer = r#"{"questionIndex": 0, "selectedOption": 1}"#;
        let res = app.clone().oneshot(post_json("/api/game/answer", &cookie, answer)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["data"]["answeredCount"], json!(1));

        let res = app.clone().oneshot(post_json("/api/game/answer", &cookie, answer)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await, json!({"success": false, "error": "Question already answered"}));

        let res = app.clone().oneshot(get("/api/game/status", Some(&cookie))).await.unwrap();
        let body = body_json(res).await;
        assert_eq!(body["data"]["hasActiveGame"], json!(true));
        assert_eq!(body["data"]["answeredCount"], json!(1));
    }

    #[tokio::test]
    async fn answer_errors_map_to_client_statuses() {
        let app = app();
        let cookie = "sessionId=6f1c2a3e-8d4b-4c1e-9a77-2b5d0e9f1a10";

        let body = r#"{"questionIndex": 0, "selectedOption": 0}"#;
        let res = app.clone().oneshot(post_json("/api/game/answer", cookie, body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        app.clone().oneshot(get("/api/game/start", Some(cookie))).await.unwrap();

        let res = app.clone().oneshot(post_json("/api/game/answer", cookie, r#"{"questionIndex": 12, "selectedOption": 0}"#)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await["error"], json!("Question not found"));

        let res = app.clone().oneshot(post_json("/api/game/answer", cookie, r#"{"questionIndex": 1}"#)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = app.clone().oneshot(post_json("/api/game/answer", cookie, "{not json")).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["success"], json!(false));
    }

    #[tokio::test]
    async fn reset_deletes_game_and_clears_cookie() {
        let app = app();
        let res = app.clone().oneshot(get("/api/game/start", None)).await.unwrap();
        let cookie = session_pair(&set_cookie(&res).unwrap());

        let req = Request::builder()
            .method("DELETE")
            .uri("/api/game/reset")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(set_cookie(&res).unwrap().contains("Max-Age=0"));

        let res = app.clone().oneshot(get("/api/game/status", Some(&cookie))).await.unwrap();
        assert_eq!(body_json(res).await["data"]["hasActiveGame"], json!(false));
    }

    #[tokio::test]
    async fn regenerate_is_hidden_when_dev_routes_are_off() {
        let req = || Request::builder().method("POST").uri("/api/game/regenerate?language=en").body(Body::empty()).unwrap();

        let res = app_with(false).oneshot(req()).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app_with(true).oneshot(req()).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["data"]["language"], json!("en"));

        let clear = || Request::builder().method("DELETE").uri("/api/game/content").body(Body::empty()).unwrap();
        let res = app_with(false).oneshot(clear()).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn languages_and_health() {
        let app = app();
        let res = app.clone().oneshot(get("/api/game/languages", None)).await.unwrap();
        let body = body_json(res).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 10);
        assert_eq!(body["data"][1]["backendKey"], json!("hindi"));

        let res = app.oneshot(get("/api/health", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body, json!({"success": true, "data": {"ok": true}}));
    }
}
