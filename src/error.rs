//! Crate-wide error type.
//!
//! Generation and parsing failures are absorbed by the content generators;
//! session errors are client-input errors; everything else is internal.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
  #[error("generation quota exceeded")]
  QuotaExceeded,

  #[error("generation request timed out")]
  Timeout,

  #[error("generation returned an empty response")]
  EmptyResponse,

  #[error("upstream generation error: {0}")]
  UpstreamError(String),

  #[error("failed to parse generated JSON for {context}")]
  MalformedGenerationOutput { context: String },

  #[error("content generation failed: {0}")]
  ContentGenerationFailed(String),

  #[error("{0}")]
  NotFound(String),

  #[error("Question already answered")]
  AlreadyAnswered,

  #[error("Question not found")]
  QuestionNotFound,

  #[error("{0}")]
  InvalidInput(String),
}

impl GameError {
  /// Errors caused by the caller's input rather than by the service.
  pub fn is_client_error(&self) -> bool {
    matches!(
      self,
      GameError::NotFound(_)
        | GameError::AlreadyAnswered
        | GameError::QuestionNotFound
        | GameError::InvalidInput(_)
    )
  }
}
