//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; `ApiError` turns `GameError` into an enveloped status.

use std::sync::Arc;
use axum::{
  extract::{rejection::JsonRejection, Query, State},
  http::{header, StatusCode},
  response::{IntoResponse, Response},
  Extension, Json,
};
use chrono::Utc;
use tracing::{error, info, instrument, warn};

use crate::error::GameError;
use crate::language::{supported_languages, Language};
use crate::logic;
use crate::progress::PlayerStats;
use crate::protocol::*;
use crate::routes::identity::{removal_cookie, SessionId};
use crate::state::AppState;

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

#[derive(Debug)]
pub struct ApiError {
  status: StatusCode,
  message: String,
}

impl ApiError {
  fn bad_request(message: impl Into<String>) -> Self {
    Self { status: StatusCode::BAD_REQUEST, message: message.into() }
  }

  fn not_found(message: impl Into<String>) -> Self {
    Self { status: StatusCode::NOT_FOUND, message: message.into() }
  }

  fn internal(message: impl Into<String>) -> Self {
    Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into() }
  }
}

impl From<GameError> for ApiError {
  fn from(e: GameError) -> Self {
    if e.is_client_error() {
      warn!(target: "session", error = %e, "Rejected request");
    }
    match e {
      GameError::NotFound(_) | GameError::QuestionNotFound => Self::not_found(e.to_string()),
      GameError::AlreadyAnswered | GameError::InvalidInput(_) => Self::bad_request(e.to_string()),
      GameError::ContentGenerationFailed(_) => {
        error!(target: "cropgen_backend", error = %e, "Content unavailable");
        Self::internal("Could not prepare today's game. Please try again later.")
      }
      other => {
        error!(target: "cropgen_backend", error = %other, "Unhandled error at HTTP boundary");
        Self::internal("Internal server error")
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status, Json(Envelope::err(self.message))).into_response()
  }
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(Envelope::ok(HealthOut { ok: true })) }

#[instrument(level = "info", skip(state, session), fields(session_id = %session.0, language = ?q.language))]
pub async fn http_start_game(
  State(state): State<Arc<AppState>>,
  Extension(session): Extension<SessionId>,
  Query(q): Query<LanguageQuery>,
) -> ApiResult<GameView> {
  let view = logic::start_game(&state, &session.0, q.language.as_deref(), Utc::now()).await?;
  info!(target: "session", crop = %view.crop, lang = %view.language, new = view.is_new_game, "HTTP game served");
  let message = if view.is_new_game {
    format!("Today's tips are about {} farming! Answer questions to unlock tips.", view.crop)
  } else {
    "You have already started today's game. Come back tomorrow for new tips!".to_string()
  };
  Ok(Json(Envelope::ok(view).with_message(message)))
}

#[instrument(level = "info", skip(state, session, body), fields(session_id = %session.0))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Extension(session): Extension<SessionId>,
  body: Result<Json<AnswerIn>, JsonRejection>,
) -> ApiResult<AnswerOut> {
  let Json(body) = body.map_err(|rej| {
    warn!(target: "session", error = %rej.body_text(), "Rejected answer body");
    ApiError::bad_request(rej.body_text())
  })?;
  let out = logic::submit_answer(&state, &session.0, &body, Utc::now()).await?;
  let message = if out.is_correct {
    "Correct! You unlocked a farming tip!"
  } else {
    "Wrong answer. Try the next question!"
  };
  Ok(Json(Envelope::ok(out).with_message(message)))
}

#[instrument(level = "info", skip(state, session), fields(session_id = %session.0))]
pub async fn http_get_status(
  State(state): State<Arc<AppState>>,
  Extension(session): Extension<SessionId>,
) -> ApiResult<StatusOut> {
  let out = logic::status(&state, &session.0, Utc::now()).await?;
  Ok(Json(Envelope::ok(out)))
}

#[instrument(level = "info", skip(state, session), fields(session_id = %session.0))]
pub async fn http_reset(
  State(state): State<Arc<AppState>>,
  Extension(session): Extension<SessionId>,
) -> Result<impl IntoResponse, ApiError> {
  let out = logic::reset(&state, &session.0, Utc::now()).await?;
  let envelope = Envelope::ok(out).with_message("Game reset successfully. Start a new game!");
  Ok(([(header::SET_COOKIE, removal_cookie().to_string())], Json(envelope)))
}

#[instrument(level = "info", skip(state), fields(language = ?q.language))]
pub async fn http_regenerate(
  State(state): State<Arc<AppState>>,
  Query(q): Query<LanguageQuery>,
) -> ApiResult<RegenerateOut> {
  if !state.config.server.dev_routes {
    return Err(ApiError::not_found("Not found"));
  }
  let out = logic::regenerate(&state, q.language.as_deref(), Utc::now()).await?;
  Ok(Json(Envelope::ok(out).with_message("Content regenerated")))
}

#[instrument(level = "info", skip(state))]
pub async fn http_clear_content(State(state): State<Arc<AppState>>) -> ApiResult<ClearOut> {
  if !state.config.server.dev_routes {
    return Err(ApiError::not_found("Not found"));
  }
  let out = logic::clear_content(&state).await?;
  Ok(Json(Envelope::ok(out)))
}

#[instrument(level = "info", skip(state, session), fields(session_id = %session.0))]
pub async fn http_get_stats(
  State(state): State<Arc<AppState>>,
  Extension(session): Extension<SessionId>,
) -> ApiResult<PlayerStats> {
  let stats = logic::stats(&state, &session.0).await?;
  Ok(Json(Envelope::ok(stats)))
}

pub async fn http_get_languages() -> Json<Envelope<&'static [Language]>> {
  Json(Envelope::ok(supported_languages()))
}
