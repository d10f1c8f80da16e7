//! Daily content memoization: one bundle per (date, crop, language).
//!
//! Generation for a key is single-flight within the process (a per-key async
//! mutex) and first-writer-wins across processes (`insert_bundle_if_absent`).
//! Each generation sub-call sits in a bounded retry loop with fixed backoff.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::config::RetrySettings;
use crate::domain::{BundleKey, ContentBundle, ITEMS_PER_GAME};
use crate::error::{GameError, Result};
use crate::generator::ContentSource;
use crate::store::DocumentStore;

pub struct DailyContent {
  store: Arc<dyn DocumentStore>,
  source: Arc<dyn ContentSource>,
  retry: RetrySettings,
  inflight: Mutex<HashMap<BundleKey, Arc<Mutex<()>>>>,
}

impl DailyContent {
  pub fn new(store: Arc<dyn DocumentStore>, source: Arc<dyn ContentSource>, retry: RetrySettings) -> Self {
    Self { store, source, retry, inflight: Mutex::new(HashMap::new()) }
  }

  pub async fn find(&self, key: &BundleKey) -> Result<Option<ContentBundle>> {
    self.store.find_bundle(key).await
  }

  /// Stored bundle for `key`, generating and persisting it on first request.
  #[instrument(level = "info", skip(self), fields(date = %key.date, crop = %key.crop, lang = %key.language))]
  pub async fn get_or_generate(&self, key: &BundleKey) -> Result<ContentBundle> {
    if let Some(bundle) = self.store.find_bundle(key).await? {
      return Ok(bundle);
    }

    let gate = self.gate_for(key).await;
    let _guard = gate.lock().await;

    // Another request may have finished generating while we waited.
    if let Some(bundle) = self.store.find_bundle(key).await? {
      info!(target: "content", "Bundle generated by a concurrent request");
      return Ok(bundle);
    }

    let swept = self.sweep(key.date).await?;
    if swept > 0 {
      info!(target: "content", swept, "Removed bundles from previous days");
    }

    let bundle = self.build(key).await?;
    let stored = self.store.insert_bundle_if_absent(bundle).await?;
    if stored.is_new() {
      info!(target: "content", "Content saved");
    } else {
      warn!(target: "content", "Lost bundle insert race; serving stored bundle");
    }
    Ok(stored.into_inner())
  }

  /// Dev-only: generate fresh content for `key`, replacing whatever is stored.
  #[instrument(level = "info", skip(self), fields(date = %key.date, crop = %key.crop, lang = %key.language))]
  pub async fn regenerate(&self, key: &BundleKey) -> Result<ContentBundle> {
    let gate = self.gate_for(key).await;
    let _guard = gate.lock().await;
    let bundle = self.build(key).await?;
    self.store.replace_bundle(bundle.clone()).await?;
    warn!(target: "content", "Bundle force-regenerated");
    Ok(bundle)
  }

  /// Retention: drop every bundle older than yesterday. Yesterday's stay while
  /// a game started late on that day can still be live.
  pub async fn sweep(&self, today: NaiveDate) -> Result<usize> {
    let cutoff = today.pred_opt().unwrap_or(today);
    self.inflight.lock().await.retain(|k, _| k.date >= cutoff);
    self.store.delete_bundles_before(cutoff).await
  }

  pub async fn clear_all(&self) -> Result<usize> {
    self.inflight.lock().await.clear();
    self.store.delete_all_bundles().await
  }

  async fn gate_for(&self, key: &BundleKey) -> Arc<Mutex<()>> {
    self.inflight.lock().await.entry(key.clone()).or_default().clone()
  }

  async fn build(&self, key: &BundleKey) -> Result<ContentBundle> {
    let tips = self
      .with_retries("tips", || self.source.tips(&key.crop, &key.language))
      .await?;
    let questions = self
      .with_retries("mcqs", || self.source.mcqs(&key.crop, &key.language))
      .await?;

    if tips.len() != ITEMS_PER_GAME || questions.len() != ITEMS_PER_GAME {
      error!(target: "content", tips = tips.len(), questions = questions.len(), "Generated content has the wrong size");
      return Err(GameError::ContentGenerationFailed("generated content has the wrong size".into()));
    }

    Ok(ContentBundle {
      date: key.date,
      crop: key.crop.clone(),
      language: key.language.clone(),
      tips,
      questions,
      generated_at: Utc::now(),
    })
  }

  async fn with_retries<T, F, Fut>(&self, what: &str, mut attempt_fn: F) -> Result<T>
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
  {
    let attempts = self.retry.attempts.max(1);
    let mut attempt = 1;
    loop {
      match attempt_fn().await {
        Ok(v) => return Ok(v),
        Err(e) if attempt >= attempts => {
          error!(target: "content", %what, attempt, error = %e, "Generation failed; retries exhausted");
          return Err(GameError::ContentGenerationFailed(format!("failed to generate {what}: {e}")));
        }
        Err(e) => {
          warn!(target: "content", %what, attempt, error = %e, "Generation attempt failed; retrying");
          tokio::time::sleep(self.retry.backoff()).await;
          attempt += 1;
        }
      }
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::domain::{QuestionRecord, TipRecord};
  use crate::seeds::{fallback_mcqs, fallback_tips};
  use crate::store::MemoryStore;
  use async_trait::async_trait;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::time::Duration;

  /// Fallback-backed source that fails the first `fail_first` calls of each kind.
  pub(crate) struct CountingSource {
    pub tip_calls: AtomicUsize,
    pub mcq_calls: AtomicUsize,
    pub fail_first: usize,
    pub delay: Duration,
  }

  impl CountingSource {
    pub fn new(fail_first: usize) -> Self {
      Self { tip_calls: AtomicUsize::new(0), mcq_calls: AtomicUsize::new(0), fail_first, delay: Duration::ZERO }
    }
  }

  #[async_trait]
  impl ContentSource for CountingSource {
    async fn tips(&self, crop: &str, _language: &str) -> Result<Vec<TipRecord>> {
      tokio::time::sleep(self.delay).await;
      if self.tip_calls.fetch_add(1, Ordering::SeqCst) < self.fail_first {
        return Err(GameError::Timeout);
      }
      Ok(fallback_tips(crop, "english"))
    }

    async fn mcqs(&self, crop: &str, _language: &str) -> Result<Vec<QuestionRecord>> {
      if self.mcq_calls.fetch_add(1, Ordering::SeqCst) < self.fail_first {
        return Err(GameError::QuotaExceeded);
      }
      Ok(fallback_mcqs(crop, "english"))
    }
  }

  fn no_wait() -> RetrySettings {
    RetrySettings { attempts: 3, backoff_ms: 0 }
  }

  fn key(date: NaiveDate) -> BundleKey {
    BundleKey { date, crop: "Rice".into(), language: "en".into() }
  }

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
  }

  #[tokio::test]
  async fn second_call_returns_identical_bundle_without_generating() {
    let source = Arc::new(CountingSource::new(0));
    let content = DailyContent::new(Arc::new(MemoryStore::new()), source.clone(), no_wait());

    let first = content.get_or_generate(&key(today())).await.unwrap();
    let second = content.get_or_generate(&key(today())).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(source.tip_calls.load(Ordering::SeqCst), 1);
    assert_eq!(source.mcq_calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn concurrent_requests_generate_once() {
    let mut source = CountingSource::new(0);
    source.delay = Duration::from_millis(50);
    let source = Arc::new(source);
    let content = Arc::new(DailyContent::new(Arc::new(MemoryStore::new()), source.clone(), no_wait()));

    let handles: Vec<_> = (0..6)
      .map(|_| {
        let content = content.clone();
        tokio::spawn(async move { content.get_or_generate(&key(today())).await.unwrap() })
      })
      .collect();
    let mut bundles = Vec::new();
    for h in handles {
      bundles.push(h.await.unwrap());
    }
    assert!(bundles.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(source.tip_calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn transient_failures_are_retried() {
    let source = Arc::new(CountingSource::new(2));
    let content = DailyContent::new(Arc::new(MemoryStore::new()), source.clone(), no_wait());
    let bundle = content.get_or_generate(&key(today())).await.unwrap();
    assert_eq!(bundle.tips.len(), ITEMS_PER_GAME);
    assert_eq!(source.tip_calls.load(Ordering::SeqCst), 3);
    assert_eq!(source.mcq_calls.load(Ordering::SeqCst), 3);
  }

  #[tokio::test]
  async fn exhausted_retries_are_fatal_and_store_nothing() {
    let store = Arc::new(MemoryStore::new());
    let source = Arc::new(CountingSource::new(3));
    let content = DailyContent::new(store.clone(), source.clone(), no_wait());
    let err = content.get_or_generate(&key(today())).await.unwrap_err();
    assert!(matches!(err, GameError::ContentGenerationFailed(_)));
    assert_eq!(source.tip_calls.load(Ordering::SeqCst), 3);
    assert_eq!(source.mcq_calls.load(Ordering::SeqCst), 0);
    assert!(store.find_bundle(&key(today())).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn new_day_sweeps_old_bundles() {
    let store = Arc::new(MemoryStore::new());
    let content = DailyContent::new(store.clone(), Arc::new(CountingSource::new(0)), no_wait());
    let yesterday = today().pred_opt().unwrap();
    let older = yesterday.pred_opt().unwrap();
    content.get_or_generate(&key(older)).await.unwrap();
    content.get_or_generate(&key(yesterday)).await.unwrap();
    content.get_or_generate(&key(today())).await.unwrap();
    assert!(store.find_bundle(&key(older)).await.unwrap().is_none());
    assert!(store.find_bundle(&key(yesterday)).await.unwrap().is_some());
    assert_eq!(content.clear_all().await.unwrap(), 2);
  }

  #[tokio::test]
  async fn regenerate_bypasses_memoization() {
    let source = Arc::new(CountingSource::new(0));
    let content = DailyContent::new(Arc::new(MemoryStore::new()), source.clone(), no_wait());
    content.get_or_generate(&key(today())).await.unwrap();
    content.regenerate(&key(today())).await.unwrap();
    assert_eq!(source.tip_calls.load(Ordering::SeqCst), 2);
  }
}
