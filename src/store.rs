//! Document store contract and the in-memory implementation.
//!
//! The store is where the invariants that must hold under concurrency live:
//! - one bundle per `BundleKey` (`insert_bundle_if_absent` is first-writer-wins)
//! - one live progress record per `SessionKey` (`insert_session_if_absent`)
//! - one answer per question index (`push_answer` is a conditional update)

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::{AnswerRecord, BundleKey, ContentBundle, SessionKey, SessionProgress, ITEMS_PER_GAME};
use crate::error::{GameError, Result};

/// Result of a conditional insert: ours, or the one that was already there.
#[derive(Debug, Clone, PartialEq)]
pub enum Inserted<T> {
  New(T),
  Existing(T),
}

impl<T> Inserted<T> {
  pub fn into_inner(self) -> T {
    match self {
      Inserted::New(t) | Inserted::Existing(t) => t,
    }
  }

  pub fn is_new(&self) -> bool {
    matches!(self, Inserted::New(_))
  }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
  async fn find_bundle(&self, key: &BundleKey) -> Result<Option<ContentBundle>>;
  /// Insert unless a bundle with the same key exists; then return that one.
  async fn insert_bundle_if_absent(&self, bundle: ContentBundle) -> Result<Inserted<ContentBundle>>;
  /// Unconditional upsert, used only by forced regeneration.
  async fn replace_bundle(&self, bundle: ContentBundle) -> Result<()>;
  /// Delete every bundle dated before `cutoff`.
  async fn delete_bundles_before(&self, cutoff: NaiveDate) -> Result<usize>;
  async fn delete_all_bundles(&self) -> Result<usize>;

  /// Raw read, expired or not.
  async fn find_session(&self, key: &SessionKey) -> Result<Option<SessionProgress>>;
  /// Insert unless a record live at `now` exists; then return that one. Expired records are replaced.
  async fn insert_session_if_absent(&self, session: SessionProgress, now: DateTime<Utc>) -> Result<Inserted<SessionProgress>>;
  /// Append `answer` and add `points`, atomically.
  ///
  /// Fails with `NotFound` when no record is live at `now` and with
  /// `AlreadyAnswered` when the question index is already present. Marks the
  /// record completed (and bumps the streak) once answers reach the game size.
  async fn push_answer(&self, key: &SessionKey, answer: AnswerRecord, points: u32, now: DateTime<Utc>) -> Result<SessionProgress>;
  async fn delete_session(&self, key: &SessionKey) -> Result<bool>;
  async fn sessions_for(&self, session_id: &str) -> Result<Vec<SessionProgress>>;
  /// TTL sweep: delete records whose `expires_at` is before `cutoff`.
  async fn purge_expired_sessions(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}

#[derive(Clone, Default)]
pub struct MemoryStore {
  bundles: Arc<RwLock<HashMap<BundleKey, ContentBundle>>>,
  sessions: Arc<RwLock<HashMap<SessionKey, SessionProgress>>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl DocumentStore for MemoryStore {
  async fn find_bundle(&self, key: &BundleKey) -> Result<Option<ContentBundle>> {
    Ok(self.bundles.read().await.get(key).cloned())
  }

  #[instrument(level = "debug", skip(self, bundle), fields(date = %bundle.date, crop = %bundle.crop, lang = %bundle.language))]
  async fn insert_bundle_if_absent(&self, bundle: ContentBundle) -> Result<Inserted<ContentBundle>> {
    let mut bundles = self.bundles.write().await;
    let key = bundle.key();
    if let Some(existing) = bundles.get(&key) {
      debug!(target: "content", "Bundle already present; keeping first writer");
      return Ok(Inserted::Existing(existing.clone()));
    }
    bundles.insert(key, bundle.clone());
    Ok(Inserted::New(bundle))
  }

  async fn replace_bundle(&self, bundle: ContentBundle) -> Result<()> {
    self.bundles.write().await.insert(bundle.key(), bundle);
    Ok(())
  }

  async fn delete_bundles_before(&self, cutoff: NaiveDate) -> Result<usize> {
    let mut bundles = self.bundles.write().await;
    let before = bundles.len();
    bundles.retain(|k, _| k.date >= cutoff);
    Ok(before - bundles.len())
  }

  async fn delete_all_bundles(&self) -> Result<usize> {
    let mut bundles = self.bundles.write().await;
    let n = bundles.len();
    bundles.clear();
    Ok(n)
  }

  async fn find_session(&self, key: &SessionKey) -> Result<Option<SessionProgress>> {
    Ok(self.sessions.read().await.get(key).cloned())
  }

  async fn insert_session_if_absent(&self, session: SessionProgress, now: DateTime<Utc>) -> Result<Inserted<SessionProgress>> {
    let mut sessions = self.sessions.write().await;
    let key = session.key();
    if let Some(existing) = sessions.get(&key) {
      if !existing.is_expired(now) {
        return Ok(Inserted::Existing(existing.clone()));
      }
    }
    sessions.insert(key, session.clone());
    Ok(Inserted::New(session))
  }

  #[instrument(level = "debug", skip(self, answer), fields(session = %key.session_id, question = answer.question_index))]
  async fn push_answer(&self, key: &SessionKey, answer: AnswerRecord, points: u32, now: DateTime<Utc>) -> Result<SessionProgress> {
    let mut sessions = self.sessions.write().await;
    let session = sessions
      .get_mut(key)
      .filter(|s| !s.is_expired(now))
      .ok_or_else(|| GameError::NotFound("No active game found. Please start a new game.".into()))?;

    if session.answer_for(answer.question_index).is_some() {
      return Err(GameError::AlreadyAnswered);
    }

    session.answers.push(answer);
    session.score += points;
    if !session.is_completed && session.answers.len() >= ITEMS_PER_GAME {
      session.is_completed = true;
      session.completed_at = Some(now);
      session.streak += 1;
    }
    Ok(session.clone())
  }

  async fn delete_session(&self, key: &SessionKey) -> Result<bool> {
    Ok(self.sessions.write().await.remove(key).is_some())
  }

  async fn sessions_for(&self, session_id: &str) -> Result<Vec<SessionProgress>> {
    Ok(self.sessions.read().await
      .values()
      .filter(|s| s.session_id == session_id)
      .cloned()
      .collect())
  }

  async fn purge_expired_sessions(&self, cutoff: DateTime<Utc>) -> Result<usize> {
    let mut sessions = self.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, s| s.expires_at >= cutoff);
    Ok(before - sessions.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
  }

  fn bundle(date: NaiveDate, crop: &str) -> ContentBundle {
    ContentBundle {
      date,
      crop: crop.into(),
      language: "en".into(),
      tips: vec![],
      questions: vec![],
      generated_at: Utc::now(),
    }
  }

  fn answer(i: usize, correct: bool) -> AnswerRecord {
    AnswerRecord { question_index: i, selected_option: 0, is_correct: correct, answered_at: Utc::now() }
  }

  #[tokio::test]
  async fn first_bundle_writer_wins() {
    let store = MemoryStore::new();
    let mut a = bundle(day(), "Rice");
    a.tips.push(crate::domain::TipRecord { text: "first".into() });
    let b = bundle(day(), "Rice");

    assert!(store.insert_bundle_if_absent(a.clone()).await.unwrap().is_new());
    let second = store.insert_bundle_if_absent(b).await.unwrap();
    assert_eq!(second, Inserted::Existing(a));
  }

  #[tokio::test]
  async fn sweep_drops_bundles_older_than_cutoff() {
    let store = MemoryStore::new();
    let yesterday = day().pred_opt().unwrap();
    store.insert_bundle_if_absent(bundle(day(), "Rice")).await.unwrap();
    store.insert_bundle_if_absent(bundle(yesterday, "Wheat")).await.unwrap();
    store.insert_bundle_if_absent(bundle(yesterday.pred_opt().unwrap(), "Maize")).await.unwrap();
    assert_eq!(store.delete_bundles_before(yesterday).await.unwrap(), 1);
    assert!(store.find_bundle(&bundle(day(), "Rice").key()).await.unwrap().is_some());
    assert!(store.find_bundle(&bundle(yesterday, "Wheat").key()).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn concurrent_duplicate_answers_score_once() {
    let store = MemoryStore::new();
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
    let s = SessionProgress::new("sid", &bundle(day(), "Rice"), 0, now);
    let key = s.key();
    store.insert_session_if_absent(s, now).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
      let store = store.clone();
      let key = key.clone();
      handles.push(tokio::spawn(async move { store.push_answer(&key, answer(3, true), 10, now).await }));
    }
    let mut ok = 0;
    for h in handles {
      match h.await.unwrap() {
        Ok(_) => ok += 1,
        Err(e) => assert_eq!(e, GameError::AlreadyAnswered),
      }
    }
    assert_eq!(ok, 1);
    assert_eq!(store.find_session(&key).await.unwrap().unwrap().score, 10);
  }

  #[tokio::test]
  async fn expired_session_is_replaced_and_rejects_answers() {
    let store = MemoryStore::new();
    let t0 = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
    let s = SessionProgress::new("sid", &bundle(day(), "Rice"), 0, t0);
    let key = s.key();
    store.insert_session_if_absent(s, t0).await.unwrap();

    let later = t0 + Duration::hours(25);
    let err = store.push_answer(&key, answer(0, true), 10, later).await.unwrap_err();
    assert!(matches!(err, GameError::NotFound(_)));

    let fresh = SessionProgress::new("sid", &bundle(day(), "Rice"), 0, later);
    assert!(store.insert_session_if_absent(fresh, later).await.unwrap().is_new());
  }

  #[tokio::test]
  async fn purge_removes_only_old_records() {
    let store = MemoryStore::new();
    let t0 = Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap();
    let old = SessionProgress::new("a", &bundle(day(), "Rice"), 0, t0);
    let fresh = SessionProgress::new("b", &bundle(day(), "Rice"), 0, t0 + Duration::hours(40));
    store.insert_session_if_absent(old, t0).await.unwrap();
    store.insert_session_if_absent(fresh, t0).await.unwrap();
    assert_eq!(store.purge_expired_sessions(t0 + Duration::hours(30)).await.unwrap(), 1);
    assert_eq!(store.sessions_for("b").await.unwrap().len(), 1);
  }
}
