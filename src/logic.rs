//! Game flows behind the HTTP handlers: start/resume, answer, status, reset, stats, regenerate.
//!
//! Every flow takes `now` explicitly; handlers pass `Utc::now()`.

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::calendar::{crop_for_date, game_date, time_remaining};
use crate::domain::{BundleKey, ContentBundle, SessionProgress, ITEMS_PER_GAME, OPTIONS_PER_QUESTION};
use crate::error::{GameError, Result};
use crate::language::resolve;
use crate::progress::PlayerStats;
use crate::protocol::*;
use crate::state::AppState;

/// Today's key for a requested language.
pub fn todays_key(language: Option<&str>, now: DateTime<Utc>) -> BundleKey {
  let date = game_date(now);
  BundleKey {
    date,
    crop: crop_for_date(date).to_string(),
    language: resolve(language.unwrap_or_default()).code.to_string(),
  }
}

/// Resume the caller's live game, or start one on today's bundle.
/// A game begun late yesterday stays live until its own expiry.
#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn start_game(state: &AppState, session_id: &str, language: Option<&str>, now: DateTime<Utc>) -> Result<GameView> {
  if let Some(live) = state.tracker.live(session_id, now).await? {
    let bundle = bundle_for(state, &live).await?;
    info!(target: "session", %session_id, answered = live.answers.len(), "Resuming game");
    return Ok(game_view(&bundle, &live, false, now));
  }

  let key = todays_key(language, now);
  let bundle = state.content.get_or_generate(&key).await?;
  let (progress, created) = state.tracker.start(session_id, &bundle, now).await?;

  // A concurrent start may have won with a different language.
  let bundle = if progress.bundle_key() == bundle.key() { bundle } else { bundle_for(state, &progress).await? };
  Ok(game_view(&bundle, &progress, created, now))
}

#[instrument(level = "info", skip(state, body), fields(%session_id))]
pub async fn submit_answer(state: &AppState, session_id: &str, body: &AnswerIn, now: DateTime<Utc>) -> Result<AnswerOut> {
  let (Some(question_index), Some(selected_option)) = (body.question_index, body.selected_option) else {
    return Err(GameError::InvalidInput("questionIndex and selectedOption are required".into()));
  };
  if selected_option as usize >= OPTIONS_PER_QUESTION {
    return Err(GameError::InvalidInput(format!(
      "selectedOption must be between 0 and {}",
      OPTIONS_PER_QUESTION - 1
    )));
  }

  let live = state
    .tracker
    .live(session_id, now)
    .await?
    .ok_or_else(|| GameError::NotFound("No active game found. Please start a new game.".into()))?;
  let bundle = bundle_for(state, &live).await?;

  let outcome = state.tracker.submit_answer(session_id, &bundle, question_index, selected_option, now).await?;
  Ok(AnswerOut {
    question_index: outcome.question_index,
    selected_option: outcome.selected_option,
    is_correct: outcome.is_correct,
    correct_answer: outcome.correct_answer,
    explanation: outcome.explanation,
    tip: outcome.tip,
    points_earned: outcome.points_earned,
    total_score: outcome.progress.score,
    answered_count: outcome.progress.answers.len(),
    is_game_complete: outcome.progress.is_completed,
    streak: outcome.progress.streak,
  })
}

pub async fn status(state: &AppState, session_id: &str, now: DateTime<Utc>) -> Result<StatusOut> {
  let game = state
    .tracker
    .live(session_id, now)
    .await?
    .map(|s| StatusDetail {
      crop: s.crop.clone(),
      language: s.language.clone(),
      score: s.score,
      answered_count: s.answers.len(),
      total_questions: ITEMS_PER_GAME,
      is_completed: s.is_completed,
      streak: s.streak,
      timer: time_remaining(s.created_at, now),
    });
  Ok(StatusOut { has_active_game: game.is_some(), game })
}

/// Delete the live game, wherever its date falls; today's record otherwise.
pub async fn reset(state: &AppState, session_id: &str, now: DateTime<Utc>) -> Result<ResetOut> {
  let date = match state.tracker.live(session_id, now).await? {
    Some(live) => live.date,
    None => game_date(now),
  };
  let removed = state.tracker.reset(session_id, date).await?;
  Ok(ResetOut { removed })
}

pub async fn stats(state: &AppState, session_id: &str) -> Result<PlayerStats> {
  state.tracker.stats(session_id).await
}

/// Dev-only: replace today's bundle for `language` with freshly generated content.
#[instrument(level = "info", skip(state))]
pub async fn regenerate(state: &AppState, language: Option<&str>, now: DateTime<Utc>) -> Result<RegenerateOut> {
  let key = todays_key(language, now);
  let bundle = state.content.regenerate(&key).await?;
  Ok(RegenerateOut {
    date: bundle.date,
    crop: bundle.crop,
    language: bundle.language,
    generated_at: bundle.generated_at,
  })
}

/// Dev-only: drop every stored bundle. Live sessions regenerate theirs on next access.
pub async fn clear_content(state: &AppState) -> Result<ClearOut> {
  let deleted_bundles = state.content.clear_all().await?;
  warn!(target: "content", deleted_bundles, "All bundles cleared");
  Ok(ClearOut { deleted_bundles })
}

/// The bundle a live record was started on. Regenerated again if it was cleared out from under us.
async fn bundle_for(state: &AppState, progress: &SessionProgress) -> Result<ContentBundle> {
  let key = progress.bundle_key();
  match state.content.find(&key).await? {
    Some(b) => Ok(b),
    None => {
      warn!(target: "content", date = %key.date, crop = %key.crop, lang = %key.language, "Bundle missing for live session; regenerating");
      state.content.get_or_generate(&key).await
    }
  }
}

fn game_view(bundle: &ContentBundle, progress: &SessionProgress, is_new_game: bool, now: DateTime<Utc>) -> GameView {
  let questions = bundle
    .questions
    .iter()
    .enumerate()
    .map(|(index, q)| {
      let answered = progress.answer_for(index);
      QuestionView {
        index,
        question: q.question.clone(),
        options: q.options.clone(),
        is_answered: answered.is_some(),
        correct_answer: answered.map(|_| q.correct_answer),
        explanation: answered.map(|_| q.explanation.clone()),
        user_answer: answered.map(|a| a.selected_option),
        is_correct: answered.map(|a| a.is_correct),
      }
    })
    .collect();

  let tips = bundle
    .tips
    .iter()
    .enumerate()
    .map(|(index, t)| {
      let unlocked = progress.answer_for(index).is_some_and(|a| a.is_correct);
      TipView { index, unlocked, text: unlocked.then(|| t.text.clone()) }
    })
    .collect();

  GameView {
    is_new_game,
    date: bundle.date,
    crop: bundle.crop.clone(),
    language: bundle.language.clone(),
    tips,
    questions,
    score: progress.score,
    answered_count: progress.answers.len(),
    correct_count: progress.correct_count(),
    total_questions: ITEMS_PER_GAME,
    is_completed: progress.is_completed,
    streak: progress.streak,
    timer: time_remaining(progress.created_at, now),
  }
}
