//! Per-session daily progress: the game state machine on top of a bundle.
//!
//! Unstarted (no record) -> Active -> Completed; a record past `expires_at`
//! reads as Unstarted again. Time is always passed in by the caller.
//!
//! Records are keyed by the game date they started on, but live for 24h from
//! creation, so a game started late in the day is still found after midnight.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::calendar::game_date;
use crate::domain::{
  session_ttl, AnswerRecord, ContentBundle, SessionKey, SessionProgress, POINTS_PER_CORRECT,
};
use crate::error::{GameError, Result};
use crate::store::DocumentStore;

/// Completed games considered for stats.
const STATS_WINDOW: usize = 30;

/// What a successful submission reveals to the player.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
  pub question_index: usize,
  pub selected_option: u8,
  pub is_correct: bool,
  pub correct_answer: u8,
  pub explanation: String,
  /// The tip at the same index, unlocked only by a correct answer.
  pub tip: Option<String>,
  pub points_earned: u32,
  pub progress: SessionProgress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
  pub total_games: usize,
  pub total_score: u32,
  pub best_score: u32,
  pub current_streak: u32,
  pub average_score: u32,
}

pub struct ProgressTracker {
  store: Arc<dyn DocumentStore>,
}

impl ProgressTracker {
  pub fn new(store: Arc<dyn DocumentStore>) -> Self {
    Self { store }
  }

  /// Live record for (session, date), or None when absent or expired.
  pub async fn current(&self, session_id: &str, date: NaiveDate, now: DateTime<Utc>) -> Result<Option<SessionProgress>> {
    let key = SessionKey { session_id: session_id.to_string(), date };
    Ok(self.store.find_session(&key).await?.filter(|s| !s.is_expired(now)))
  }

  /// The caller's live record at `now`: today's, else yesterday's if it is
  /// still within its 24h and unfinished. A finished game never blocks a new day.
  pub async fn live(&self, session_id: &str, now: DateTime<Utc>) -> Result<Option<SessionProgress>> {
    let today = game_date(now);
    if let Some(s) = self.current(session_id, today, now).await? {
      return Ok(Some(s));
    }
    let Some(yesterday) = today.pred_opt() else {
      return Ok(None);
    };
    Ok(self.current(session_id, yesterday, now).await?.filter(|s| !s.is_completed))
  }

  /// Resume the live record or start a new Active one for `bundle`.
  /// Returns the record and whether it was just created. A resumed record
  /// may belong to an earlier game date than `bundle`.
  #[instrument(level = "info", skip(self, bundle), fields(%session_id, date = %bundle.date))]
  pub async fn start(&self, session_id: &str, bundle: &ContentBundle, now: DateTime<Utc>) -> Result<(SessionProgress, bool)> {
    if let Some(live) = self.live(session_id, now).await? {
      return Ok((live, false));
    }

    // Housekeeping: anything expired for more than a full day is history we no longer need.
    self.store.purge_expired_sessions(now - session_ttl()).await?;

    let streak = self.carried_streak(session_id, bundle.date).await?;
    let fresh = SessionProgress::new(session_id, bundle, streak, now);
    let stored = self.store.insert_session_if_absent(fresh, now).await?;
    let created = stored.is_new();
    if created {
      info!(target: "session", %session_id, crop = %bundle.crop, streak, "Session started");
    }
    Ok((stored.into_inner(), created))
  }

  /// Yesterday's streak survives only if yesterday's game was completed.
  async fn carried_streak(&self, session_id: &str, date: NaiveDate) -> Result<u32> {
    let Some(yesterday) = date.checked_sub_signed(Duration::days(1)) else {
      return Ok(0);
    };
    let key = SessionKey { session_id: session_id.to_string(), date: yesterday };
    Ok(self.store
      .find_session(&key)
      .await?
      .filter(|s| s.is_completed)
      .map(|s| s.streak)
      .unwrap_or(0))
  }

  /// Record one answer against the live record for `bundle.date`.
  #[instrument(level = "info", skip(self, bundle), fields(%session_id, date = %bundle.date))]
  pub async fn submit_answer(
    &self,
    session_id: &str,
    bundle: &ContentBundle,
    question_index: usize,
    selected_option: u8,
    now: DateTime<Utc>,
  ) -> Result<AnswerOutcome> {
    let current = self
      .current(session_id, bundle.date, now)
      .await?
      .ok_or_else(|| GameError::NotFound("No active game found. Please start a new game.".into()))?;

    let question = bundle.questions.get(question_index).ok_or(GameError::QuestionNotFound)?;
    if current.answer_for(question_index).is_some() {
      return Err(GameError::AlreadyAnswered);
    }

    let is_correct = selected_option == question.correct_answer;
    let points_earned = if is_correct { POINTS_PER_CORRECT } else { 0 };
    let answer = AnswerRecord { question_index, selected_option, is_correct, answered_at: now };

    // The store re-checks uniqueness atomically; the check above only gives a cheap early error.
    let progress = self.store.push_answer(&current.key(), answer, points_earned, now).await?;

    info!(
      target: "session",
      %session_id,
      question_index,
      is_correct,
      score = progress.score,
      answered = progress.answers.len(),
      completed = progress.is_completed,
      "Answer recorded"
    );

    Ok(AnswerOutcome {
      question_index,
      selected_option,
      is_correct,
      correct_answer: question.correct_answer,
      explanation: question.explanation.clone(),
      tip: if is_correct { bundle.tips.get(question_index).map(|t| t.text.clone()) } else { None },
      points_earned,
      progress,
    })
  }

  /// Delete the record for (session, date) unconditionally.
  pub async fn reset(&self, session_id: &str, date: NaiveDate) -> Result<bool> {
    let key = SessionKey { session_id: session_id.to_string(), date };
    let removed = self.store.delete_session(&key).await?;
    info!(target: "session", %session_id, removed, "Session reset");
    Ok(removed)
  }

  /// Summary over the most recent completed games.
  pub async fn stats(&self, session_id: &str) -> Result<PlayerStats> {
    let mut completed: Vec<SessionProgress> = self
      .store
      .sessions_for(session_id)
      .await?
      .into_iter()
      .filter(|s| s.is_completed)
      .collect();
    completed.sort_by(|a, b| b.date.cmp(&a.date));
    completed.truncate(STATS_WINDOW);

    let total_games = completed.len();
    let total_score: u32 = completed.iter().map(|s| s.score).sum();
    Ok(PlayerStats {
      total_games,
      total_score,
      best_score: completed.iter().map(|s| s.score).max().unwrap_or(0),
      current_streak: completed.first().map(|s| s.streak).unwrap_or(0),
      average_score: if total_games > 0 {
        (total_score as f64 / total_games as f64).round() as u32
      } else {
        0
      },
    })
  }
}
