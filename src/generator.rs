//! Tips and MCQ generation: prompt -> model -> JSON recovery -> per-field repair.
//!
//! Both generators are total. Any failure along the way (no client, quota,
//! timeout, upstream error, unrecoverable output) is logged and replaced by the
//! curated fallback set for the language.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::{GenerationSettings, Prompts};
use crate::domain::{QuestionRecord, TipRecord, ITEMS_PER_GAME, OPTIONS_PER_QUESTION};
use crate::error::{GameError, Result};
use crate::gemini::TextGenerator;
use crate::language::{self, Language};
use crate::recovery::parse_records;
use crate::seeds::{fallback_mcq, fallback_mcqs, fallback_tips, filler_tip};
use crate::util::fill_template;

const GENERIC_EXPLANATION: &str = "This is the correct answer based on agricultural best practices.";

/// Where the content store gets tips and questions from.
#[async_trait]
pub trait ContentSource: Send + Sync {
  async fn tips(&self, crop: &str, language: &str) -> Result<Vec<TipRecord>>;
  async fn mcqs(&self, crop: &str, language: &str) -> Result<Vec<QuestionRecord>>;
}

pub struct ContentGenerator {
  client: Option<Arc<dyn TextGenerator>>,
  prompts: Prompts,
  tips_timeout: Duration,
  mcqs_timeout: Duration,
}

impl ContentGenerator {
  pub fn new(client: Option<Arc<dyn TextGenerator>>, prompts: Prompts, settings: &GenerationSettings) -> Self {
    Self {
      client,
      prompts,
      tips_timeout: settings.tips_timeout(),
      mcqs_timeout: settings.mcqs_timeout(),
    }
  }

  /// Exactly `ITEMS_PER_GAME` tips, from the model when possible.
  #[instrument(level = "info", skip(self), fields(%crop, %language))]
  pub async fn generate_tips(&self, crop: &str, language: &str) -> Vec<TipRecord> {
    let lang = language::resolve(language);
    match self.try_tips(crop, lang).await {
      Ok(tips) => {
        info!(target: "content", %crop, lang = lang.code, count = tips.len(), source = "model", "Tips generated");
        tips
      }
      Err(e) => {
        warn!(target: "content", %crop, lang = lang.code, error = %e, source = "fallback", "Tips generation failed; using fallback");
        fallback_tips(crop, lang.backend_key)
      }
    }
  }

  /// Exactly `ITEMS_PER_GAME` questions, from the model when possible.
  #[instrument(level = "info", skip(self), fields(%crop, %language))]
  pub async fn generate_mcqs(&self, crop: &str, language: &str) -> Vec<QuestionRecord> {
    let lang = language::resolve(language);
    match self.try_mcqs(crop, lang).await {
      Ok(mcqs) => {
        info!(target: "content", %crop, lang = lang.code, count = mcqs.len(), source = "model", "MCQs generated");
        mcqs
      }
      Err(e) => {
        warn!(target: "content", %crop, lang = lang.code, error = %e, source = "fallback", "MCQs generation failed; using fallback");
        fallback_mcqs(crop, lang.backend_key)
      }
    }
  }

  fn prompt(&self, template: &str, crop: &str, lang: &Language) -> String {
    let count = ITEMS_PER_GAME.to_string();
    fill_template(
      template,
      &[
        ("crop", crop),
        ("language", lang.display_name),
        ("instruction", lang.instruction),
        ("count", count.as_str()),
      ],
    )
  }

  fn client(&self) -> Result<&Arc<dyn TextGenerator>> {
    self.client
      .as_ref()
      .ok_or_else(|| GameError::UpstreamError("generation disabled (no GEMINI_API_KEY)".into()))
  }

  async fn try_tips(&self, crop: &str, lang: &Language) -> Result<Vec<TipRecord>> {
    let client = self.client()?;
    let prompt = self.prompt(&self.prompts.tips_template, crop, lang);
    let text = client.generate(&prompt, self.tips_timeout).await?;
    let records = parse_records(&text, "Tips")?;
    if records.is_empty() {
      return Err(GameError::MalformedGenerationOutput { context: "Tips".into() });
    }
    Ok(validate_tips(&records, crop))
  }

  async fn try_mcqs(&self, crop: &str, lang: &Language) -> Result<Vec<QuestionRecord>> {
    let client = self.client()?;
    let prompt = self.prompt(&self.prompts.mcqs_template, crop, lang);
    let text = client.generate(&prompt, self.mcqs_timeout).await?;
    let records = parse_records(&text, "MCQs")?;
    if records.is_empty() {
      return Err(GameError::MalformedGenerationOutput { context: "MCQs".into() });
    }
    Ok(validate_mcqs(&records, crop, lang.backend_key))
  }
}

#[async_trait]
impl ContentSource for ContentGenerator {
  async fn tips(&self, crop: &str, language: &str) -> Result<Vec<TipRecord>> {
    Ok(self.generate_tips(crop, language).await)
  }

  async fn mcqs(&self, crop: &str, language: &str) -> Result<Vec<QuestionRecord>> {
    Ok(self.generate_mcqs(crop, language).await)
  }
}

fn non_empty_str(v: Option<&Value>) -> Option<String> {
  v.and_then(Value::as_str)
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
}

/// Normalize recovered records to exactly `ITEMS_PER_GAME` tips.
pub fn validate_tips(records: &[Value], crop: &str) -> Vec<TipRecord> {
  let mut tips: Vec<TipRecord> = records
    .iter()
    .take(ITEMS_PER_GAME)
    .enumerate()
    .map(|(i, v)| {
      let text = match v {
        Value::String(_) => non_empty_str(Some(v)),
        _ => non_empty_str(v.get("text")),
      };
      TipRecord { text: text.unwrap_or_else(|| format!("Farming tip {} for {}", i + 1, crop)) }
    })
    .collect();

  while tips.len() < ITEMS_PER_GAME {
    tips.push(filler_tip(crop));
  }
  tips
}

/// Normalize recovered records to exactly `ITEMS_PER_GAME` questions.
/// Fields are repaired independently; short lists are padded from the fallback set.
pub fn validate_mcqs(records: &[Value], crop: &str, backend_key: &str) -> Vec<QuestionRecord> {
  let mut questions: Vec<QuestionRecord> = records
    .iter()
    .take(ITEMS_PER_GAME)
    .enumerate()
    .map(|(i, v)| repair_question(v, i, crop))
    .collect();

  while questions.len() < ITEMS_PER_GAME {
    questions.push(fallback_mcq(crop, questions.len(), backend_key));
  }
  questions
}

fn option_label(i: usize) -> String {
  format!("Option {}", (b'A' + i as u8) as char)
}

fn repair_question(v: &Value, index: usize, crop: &str) -> QuestionRecord {
  let question = non_empty_str(v.get("question"))
    .unwrap_or_else(|| format!("Question {} about {}?", index + 1, crop));

  let options = match v.get("options").and_then(Value::as_array) {
    Some(opts) if opts.len() == OPTIONS_PER_QUESTION => opts
      .iter()
      .enumerate()
      .map(|(i, o)| non_empty_str(Some(o)).unwrap_or_else(|| option_label(i)))
      .collect(),
    _ => (0..OPTIONS_PER_QUESTION).map(option_label).collect(),
  };

  let correct_answer = ["correctAnswer", "correctAnswerIndex", "correct_answer"]
    .iter()
    .find_map(|k| v.get(*k).and_then(Value::as_u64))
    .filter(|i| *i < OPTIONS_PER_QUESTION as u64)
    .map(|i| i as u8)
    .unwrap_or(0);

  let explanation = non_empty_str(v.get("explanation")).unwrap_or_else(|| GENERIC_EXPLANATION.to_string());

  QuestionRecord { question, options, correct_answer, explanation }
}
