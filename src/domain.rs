//! Domain models: tips, questions, the daily content bundle and per-session progress.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Tips and questions per bundle; also the answer count that completes a game.
pub const ITEMS_PER_GAME: usize = 12;
/// Options per question.
pub const OPTIONS_PER_QUESTION: usize = 4;
/// Points awarded for a correct answer.
pub const POINTS_PER_CORRECT: u32 = 10;
/// A session is resumable for this many hours after creation.
pub const SESSION_TTL_HOURS: i64 = 24;

pub fn session_ttl() -> Duration {
  Duration::hours(SESSION_TTL_HOURS)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipRecord {
  pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
  pub question: String,
  pub options: Vec<String>,
  pub correct_answer: u8,
  pub explanation: String,
}

/// Identity of a bundle. `language` is always a canonical code ("en", "hi", ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleKey {
  pub date: NaiveDate,
  pub crop: String,
  pub language: String,
}

/// One day's generated content for a crop/language. Immutable once stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentBundle {
  pub date: NaiveDate,
  pub crop: String,
  pub language: String,
  pub tips: Vec<TipRecord>,
  pub questions: Vec<QuestionRecord>,
  pub generated_at: DateTime<Utc>,
}

impl ContentBundle {
  pub fn key(&self) -> BundleKey {
    BundleKey { date: self.date, crop: self.crop.clone(), language: self.language.clone() }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
  pub question_index: usize,
  pub selected_option: u8,
  pub is_correct: bool,
  pub answered_at: DateTime<Utc>,
}

/// Identity of a progress record: one per session per game date.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
  pub session_id: String,
  pub date: NaiveDate,
}

/// Per-session, per-day answer state layered over a bundle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionProgress {
  pub session_id: String,
  pub date: NaiveDate,
  pub crop: String,
  pub language: String,
  pub answers: Vec<AnswerRecord>,
  pub score: u32,
  pub streak: u32,
  pub is_completed: bool,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
  #[serde(default)]
  pub completed_at: Option<DateTime<Utc>>,
}

impl SessionProgress {
  pub fn new(session_id: &str, bundle: &ContentBundle, streak: u32, now: DateTime<Utc>) -> Self {
    Self {
      session_id: session_id.to_string(),
      date: bundle.date,
      crop: bundle.crop.clone(),
      language: bundle.language.clone(),
      answers: Vec::new(),
      score: 0,
      streak,
      is_completed: false,
      created_at: now,
      expires_at: now + session_ttl(),
      completed_at: None,
    }
  }

  pub fn key(&self) -> SessionKey {
    SessionKey { session_id: self.session_id.clone(), date: self.date }
  }

  pub fn bundle_key(&self) -> BundleKey {
    BundleKey { date: self.date, crop: self.crop.clone(), language: self.language.clone() }
  }

  /// Past `expires_at` the record is treated as absent.
  pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
    now >= self.expires_at
  }

  pub fn answer_for(&self, question_index: usize) -> Option<&AnswerRecord> {
    self.answers.iter().find(|a| a.question_index == question_index)
  }

  pub fn correct_count(&self) -> usize {
    self.answers.iter().filter(|a| a.is_correct).count()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn bundle() -> ContentBundle {
    ContentBundle {
      date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
      crop: "Rice".into(),
      language: "en".into(),
      tips: vec![],
      questions: vec![],
      generated_at: Utc::now(),
    }
  }

  #[test]
  fn new_session_expires_a_day_after_creation() {
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
    let s = SessionProgress::new("abc", &bundle(), 2, now);
    assert_eq!(s.expires_at, now + Duration::hours(24));
    assert_eq!(s.streak, 2);
    assert!(!s.is_expired(now + Duration::hours(23)));
    assert!(s.is_expired(now + Duration::hours(24)));
    assert_eq!(s.bundle_key(), bundle().key());
  }
}
