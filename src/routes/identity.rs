//! Session identity: the `sessionId` cookie.
//!
//! Reads a UUID from the request cookie, or issues a fresh UUIDv4 and sets it
//! on the response. Handlers receive the id as an `Extension<SessionId>`.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use cookie::{time::Duration, Cookie, SameSite};
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::SESSION_TTL_HOURS;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "sessionId";

#[derive(Clone, Debug)]
pub struct SessionId(pub String);

pub async fn session_cookie(State(state): State<Arc<AppState>>, mut req: Request, next: Next) -> Response {
    let (id, fresh) = match read_session_id(&req) {
        Some(id) => (id, false),
        None => (Uuid::new_v4().to_string(), true),
    };
    req.extensions_mut().insert(SessionId(id.clone()));

    let mut res = next.run(req).await;

    // A handler that already set the cookie (reset) has the last word.
    if fresh && !res.headers().contains_key(header::SET_COOKIE) {
        let cookie = issue_cookie(&id, state.config.server.secure_cookies);
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(v) => {
                res.headers_mut().append(header::SET_COOKIE, v);
                debug!(target: "session", session_id = %id, "Issued session cookie");
            }
            Err(e) => error!(target: "session", error = %e, "Failed to encode session cookie"),
        }
    }
    res
}

fn read_session_id(req: &Request) -> Option<String> {
    req.headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| Cookie::split_parse(s))
        .filter_map(|c| c.ok())
        .find(|c| c.name() == SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
        .map(|u| u.to_string())
}

pub fn issue_cookie(id: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::hours(SESSION_TTL_HOURS))
        .build()
}

/// Expired `sessionId` cookie, sent on reset.
pub fn removal_cookie() -> Cookie<'static> {
    let mut c = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    c.make_removal();
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn reads_valid_uuid_among_other_cookies() {
        let id = Uuid::new_v4().to_string();
        let req = Request::builder()
            .header(header::COOKIE, format!("theme=dark; sessionId={id}"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(read_session_id(&req), Some(id));
    }

    #[test]
    fn garbage_session_value_is_ignored() {
        let req = Request::builder()
            .header(header::COOKIE, "sessionId=not-a-uuid")
            .body(Body::empty())
            .unwrap();
        assert_eq!(read_session_id(&req), None);
    }

    #[test]
    fn production_cookie_is_secure() {
        let c = issue_cookie("abc", true).to_string();
        assert!(c.contains("Secure"));
        assert!(c.contains("HttpOnly"));
        assert!(removal_cookie().to_string().contains("Max-Age=0"));
    }
}
