//! Minimal Gemini client for our use-case.
//!
//! We only call `models/{model}:generateContent` with a single text prompt and
//! return the first candidate's text. One attempt per call: the whole request
//! (send + body read) runs under a deadline and is dropped when it expires.
//! Retry policy belongs to the caller.
//!
//! NOTE: We never log the API key (it travels in the query string) and we only
//! log response sizes, not contents.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::config::GenerationSettings;
use crate::error::{GameError, Result};
use crate::util::trunc_for_log;

/// Anything that turns a prompt into raw model text within a deadline.
#[async_trait]
pub trait TextGenerator: Send + Sync {
  async fn generate(&self, prompt: &str, timeout: Duration) -> Result<String>;
}

#[derive(Clone)]
pub struct GeminiClient {
  pub client: reqwest::Client,
  api_key: String,
  pub base_url: String,
  pub model: String,
  pub temperature: f32,
  pub max_output_tokens: u32,
}

impl GeminiClient {
  pub fn new(api_key: String, settings: &GenerationSettings) -> Result<Self> {
    let client = reqwest::Client::builder()
      .connect_timeout(Duration::from_secs(10))
      .build()
      .map_err(|e| GameError::UpstreamError(e.to_string()))?;

    Ok(Self {
      client,
      api_key,
      base_url: settings.base_url.trim_end_matches('/').to_string(),
      model: settings.model.clone(),
      temperature: settings.temperature,
      max_output_tokens: settings.max_output_tokens,
    })
  }

  /// Construct the client if we find GEMINI_API_KEY; otherwise return None.
  pub fn from_env(settings: &GenerationSettings) -> Option<Self> {
    let api_key = std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty())?;
    match Self::new(api_key, settings) {
      Ok(c) => Some(c),
      Err(e) => {
        error!(target: "cropgen_backend", error = %e, "Failed to build Gemini HTTP client");
        None
      }
    }
  }

  async fn call(&self, prompt: &str) -> Result<String> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let req = GenerateRequest {
      contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
      generation_config: GenerationConfig {
        temperature: self.temperature,
        max_output_tokens: self.max_output_tokens,
      },
    };

    let res = self.client.post(&url)
      .query(&[("key", self.api_key.as_str())])
      .header(USER_AGENT, "cropgen-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&req).send().await
      .map_err(|e| GameError::UpstreamError(e.without_url().to_string()))?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      return Err(classify_failure(status, &body));
    }

    let body: GenerateResponse = res.json().await
      .map_err(|e| GameError::UpstreamError(format!("invalid response body: {}", e.without_url())))?;
    if let Some(usage) = &body.usage_metadata {
      info!(prompt_tokens = ?usage.prompt_token_count, output_tokens = ?usage.candidates_token_count, total_tokens = ?usage.total_token_count, "Gemini usage");
    }
    extract_text(body)
  }
}

#[async_trait]
impl TextGenerator for GeminiClient {
  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len(), timeout_ms = timeout.as_millis() as u64))]
  async fn generate(&self, prompt: &str, timeout: Duration) -> Result<String> {
    let start = Instant::now();
    let result = match tokio::time::timeout(timeout, self.call(prompt)).await {
      Ok(r) => r,
      Err(_) => Err(GameError::Timeout),
    };
    let elapsed = start.elapsed();

    match &result {
      Ok(text) => info!(?elapsed, response_len = text.len(), "Gemini call succeeded"),
      Err(GameError::QuotaExceeded) => error!(?elapsed, "Gemini quota exceeded"),
      Err(e) => warn!(?elapsed, error = %e, "Gemini call failed"),
    }
    result
  }
}

/// Quota exhaustion is reported distinctly from other upstream failures.
pub fn classify_failure(status: StatusCode, body: &str) -> GameError {
  if status == StatusCode::TOO_MANY_REQUESTS || body.to_lowercase().contains("quota") {
    return GameError::QuotaExceeded;
  }
  let msg = extract_gemini_error(body).unwrap_or_else(|| trunc_for_log(body, 200));
  GameError::UpstreamError(format!("Gemini HTTP {}: {}", status, msg))
}

fn extract_text(body: GenerateResponse) -> Result<String> {
  body.candidates
    .into_iter()
    .next()
    .and_then(|c| c.content)
    .and_then(|c| c.parts.into_iter().next())
    .and_then(|p| p.text)
    .filter(|t| !t.trim().is_empty())
    .ok_or(GameError::EmptyResponse)
}

// --- Wire DTOs ---

#[derive(Serialize)]
struct GenerateRequest {
  contents: Vec<Content>,
  #[serde(rename = "generationConfig")]
  generation_config: GenerationConfig,
}
#[derive(Serialize)]
struct Content { parts: Vec<Part> }
#[derive(Serialize)]
struct Part { text: String }
#[derive(Serialize)]
struct GenerationConfig {
  temperature: f32,
  #[serde(rename = "maxOutputTokens")]
  max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
  #[serde(default)] candidates: Vec<Candidate>,
  #[serde(default, rename = "usageMetadata")] usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate { #[serde(default)] content: Option<CandidateContent> }
#[derive(Deserialize)]
struct CandidateContent { #[serde(default)] parts: Vec<CandidatePart> }
#[derive(Deserialize)]
struct CandidatePart { #[serde(default)] text: Option<String> }
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
  #[serde(default)] prompt_token_count: Option<u32>,
  #[serde(default)] candidates_token_count: Option<u32>,
  #[serde(default)] total_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Gemini error body.
fn extract_gemini_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::{http::StatusCode as AxStatus, routing::post, Json, Router};
  use serde_json::{json, Value};

  async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
  }

  fn client_for(base_url: String) -> GeminiClient {
    let settings = GenerationSettings { base_url, ..GenerationSettings::default() };
    GeminiClient::new("test-key".into(), &settings).unwrap()
  }

  const PATH: &str = "/models/*call";

  #[tokio::test]
  async fn returns_first_candidate_text() {
    let router = Router::new().route(PATH, post(|Json(body): Json<Value>| async move {
      assert_eq!(body["generationConfig"]["maxOutputTokens"], 4000);
      Json(json!({"candidates": [{"content": {"parts": [{"text": "[{\"text\":\"hi\"}]"}]}}]}))
    }));
    let client = client_for(serve(router).await);
    let text = client.generate("prompt", Duration::from_secs(5)).await.unwrap();
    assert_eq!(text, "[{\"text\":\"hi\"}]");
  }

  #[tokio::test]
  async fn http_429_is_quota_exceeded() {
    let router = Router::new().route(PATH, post(|| async { (AxStatus::TOO_MANY_REQUESTS, "slow down") }));
    let client = client_for(serve(router).await);
    let err = client.generate("p", Duration::from_secs(5)).await.unwrap_err();
    assert_eq!(err, GameError::QuotaExceeded);
  }

  #[tokio::test]
  async fn server_error_is_upstream_error() {
    let router = Router::new().route(PATH, post(|| async {
      (AxStatus::INTERNAL_SERVER_ERROR, Json(json!({"error": {"message": "boom"}})))
    }));
    let client = client_for(serve(router).await);
    match client.generate("p", Duration::from_secs(5)).await.unwrap_err() {
      GameError::UpstreamError(msg) => assert!(msg.contains("boom")),
      other => panic!("unexpected {other:?}"),
    }
  }

  #[tokio::test]
  async fn missing_text_is_empty_response() {
    let router = Router::new().route(PATH, post(|| async { Json(json!({"candidates": []})) }));
    let client = client_for(serve(router).await);
    let err = client.generate("p", Duration::from_secs(5)).await.unwrap_err();
    assert_eq!(err, GameError::EmptyResponse);
  }

  #[tokio::test]
  async fn slow_upstream_times_out() {
    let router = Router::new().route(PATH, post(|| async {
      tokio::time::sleep(Duration::from_secs(5)).await;
      Json(json!({}))
    }));
    let client = client_for(serve(router).await);
    let err = client.generate("p", Duration::from_millis(100)).await.unwrap_err();
    assert_eq!(err, GameError::Timeout);
  }

  #[test]
  fn quota_keyword_in_body_is_quota_exceeded() {
    let err = classify_failure(StatusCode::FORBIDDEN, "You exceeded your current Quota");
    assert_eq!(err, GameError::QuotaExceeded);
  }
}
