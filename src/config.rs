//! Loading game configuration (prompts + generation/retry/server tunables) from TOML and env.
//!
//! See `GameConfig` for the expected schema. Every section is optional; missing
//! fields fall back to defaults.

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
  pub prompts: Prompts,
  pub generation: GenerationSettings,
  pub retry: RetrySettings,
  pub server: ServerSettings,
}

/// Prompts used by the content generators. Placeholders: `{crop}`, `{language}`,
/// `{instruction}`, `{count}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub tips_template: String,
  pub mcqs_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      tips_template: r#"You are an Indian agriculture expert specializing in {crop} farming.
{instruction}

Generate exactly {count} practical farming tips for {crop} in {language}.

CRITICAL: Return ONLY a valid JSON array. No markdown, no code blocks, no explanation.

Format:
[
  {"text": "Tip 1 in {language}"},
  {"text": "Tip 2 in {language}"}
]

Rules:
- Write completely in {language} language
- Each tip: 1-2 lines, practical, actionable
- Focus on Indian farming conditions
- Cover: soil preparation, sowing, irrigation, fertilization, pest control, harvesting
- Return ONLY the JSON array with exactly {count} items"#.into(),
      mcqs_template: r#"You are an Indian agriculture expert. Create a quiz about {crop} farming.
{instruction}

Generate exactly {count} multiple choice questions in {language}.

CRITICAL: Return ONLY a valid JSON array. No markdown, no code blocks, no extra text.

Format:
[
  {
    "question": "Question text in {language}?",
    "options": ["Option 1", "Option 2", "Option 3", "Option 4"],
    "correctAnswer": 0,
    "explanation": "Brief explanation in {language}."
  }
]

Rules:
- Write completely in {language} language
- correctAnswer: index (0-3) of the correct option
- Exactly 4 options per question
- Questions about: cultivation, soil, water, fertilizers, pest management, harvesting
- Brief explanations (1-2 sentences)
- Focus on Indian farming context
- Return ONLY the JSON array with exactly {count} items"#.into(),
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
  pub base_url: String,
  pub model: String,
  pub temperature: f32,
  pub max_output_tokens: u32,
  pub tips_timeout_secs: u64,
  pub mcqs_timeout_secs: u64,
}

impl Default for GenerationSettings {
  fn default() -> Self {
    Self {
      base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
      model: "gemini-2.5-flash".into(),
      temperature: 0.7,
      max_output_tokens: 4000,
      tips_timeout_secs: 20,
      mcqs_timeout_secs: 25,
    }
  }
}

impl GenerationSettings {
  pub fn tips_timeout(&self) -> Duration { Duration::from_secs(self.tips_timeout_secs) }
  pub fn mcqs_timeout(&self) -> Duration { Duration::from_secs(self.mcqs_timeout_secs) }
}

/// Bounded retry around each generation sub-call in the content store.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
  pub attempts: u32,
  pub backoff_ms: u64,
}

impl Default for RetrySettings {
  fn default() -> Self {
    Self { attempts: 3, backoff_ms: 2000 }
  }
}

impl RetrySettings {
  pub fn backoff(&self) -> Duration { Duration::from_millis(self.backoff_ms) }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
  pub port: u16,
  pub frontend_url: String,
  /// Marks the session cookie `Secure`.
  pub secure_cookies: bool,
  /// Enables the dev routes `POST /api/game/regenerate` and `DELETE /api/game/content`.
  pub dev_routes: bool,
}

impl Default for ServerSettings {
  fn default() -> Self {
    Self {
      port: 3001,
      frontend_url: "http://localhost:3000".into(),
      secure_cookies: false,
      dev_routes: true,
    }
  }
}

/// Load `GameConfig` from GAME_CONFIG_PATH (if set), then apply env overrides.
/// On any parsing/IO error the defaults are used.
pub fn load_game_config_from_env() -> GameConfig {
  let mut cfg = match std::env::var("GAME_CONFIG_PATH") {
    Ok(path) => match std::fs::read_to_string(&path) {
      Ok(s) => match toml::from_str::<GameConfig>(&s) {
        Ok(cfg) => {
          info!(target: "cropgen_backend", %path, "Loaded game config (TOML)");
          cfg
        }
        Err(e) => {
          error!(target: "cropgen_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
          GameConfig::default()
        }
      },
      Err(e) => {
        error!(target: "cropgen_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
        GameConfig::default()
      }
    },
    Err(_) => GameConfig::default(),
  };
  apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
  cfg
}

fn apply_env_overrides(cfg: &mut GameConfig, get: impl Fn(&str) -> Option<String>) {
  if let Some(port) = get("PORT").and_then(|p| p.parse::<u16>().ok()) {
    cfg.server.port = port;
  }
  if let Some(url) = get("GEMINI_BASE_URL") {
    cfg.generation.base_url = url;
  }
  if let Some(model) = get("GEMINI_MODEL") {
    cfg.generation.model = model;
  }
  if let Some(url) = get("FRONTEND_URL") {
    cfg.server.frontend_url = url;
  }
  if get("APP_ENV").as_deref() == Some("production") {
    cfg.server.secure_cookies = true;
    cfg.server.dev_routes = false;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  #[test]
  fn partial_toml_keeps_defaults() {
    let cfg: GameConfig = toml::from_str("[retry]\nattempts = 5\n[generation]\ntips_timeout_secs = 7\n").unwrap();
    assert_eq!(cfg.retry.attempts, 5);
    assert_eq!(cfg.retry.backoff_ms, 2000);
    assert_eq!(cfg.generation.tips_timeout(), Duration::from_secs(7));
    assert_eq!(cfg.generation.mcqs_timeout_secs, 25);
    assert!(cfg.prompts.tips_template.contains("{crop}"));
  }

  #[test]
  fn generation_timeouts_cover_both_calls() {
    let cfg: GameConfig = toml::from_str("[generation]\nmcqs_timeout_secs = 40\ndefault_timeout_secs = 30\n").unwrap();
    assert_eq!(cfg.generation.tips_timeout(), Duration::from_secs(20));
    assert_eq!(cfg.generation.mcqs_timeout(), Duration::from_secs(40));
  }

  #[test]
  fn production_env_locks_down_server() {
    let env: HashMap<&str, &str> = [("APP_ENV", "production"), ("PORT", "8080"), ("GEMINI_MODEL", "gemini-pro")].into();
    let mut cfg = GameConfig::default();
    apply_env_overrides(&mut cfg, |k| env.get(k).map(|v| v.to_string()));
    assert!(cfg.server.secure_cookies);
    assert!(!cfg.server.dev_routes);
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.generation.model, "gemini-pro");
  }
}
