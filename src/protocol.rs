//! Public protocol structs for the HTTP API (serde ready, camelCase on the wire).
//! Every response is wrapped in `Envelope`: `{success, data}` or `{success: false, error}`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::TimeRemaining;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), message: None, error: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    pub fn err(error: impl Into<String>) -> Self {
        Self { success: false, data: None, message: None, error: Some(error.into()) }
    }
}

//
// Requests
//

#[derive(Debug, Default, Deserialize)]
pub struct LanguageQuery {
    pub language: Option<String>,
}

/// Fields are optional so a missing one becomes a descriptive 400 instead of a serde message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerIn {
    pub question_index: Option<usize>,
    pub selected_option: Option<u8>,
}

//
// Responses
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub is_new_game: bool,
    pub date: NaiveDate,
    pub crop: String,
    pub language: String,
    pub tips: Vec<TipView>,
    pub questions: Vec<QuestionView>,
    pub score: u32,
    pub answered_count: usize,
    pub correct_count: usize,
    pub total_questions: usize,
    pub is_completed: bool,
    pub streak: u32,
    pub timer: TimeRemaining,
}

/// A tip stays locked (no text) until its question is answered correctly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TipView {
    pub index: usize,
    pub unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Answer key and explanation are revealed only once the question is answered.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
    pub is_answered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOut {
    pub question_index: usize,
    pub selected_option: u8,
    pub is_correct: bool,
    pub correct_answer: u8,
    pub explanation: String,
    pub tip: Option<String>,
    pub points_earned: u32,
    pub total_score: u32,
    pub answered_count: usize,
    pub is_game_complete: bool,
    pub streak: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusOut {
    pub has_active_game: bool,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub game: Option<StatusDetail>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetail {
    pub crop: String,
    pub language: String,
    pub score: u32,
    pub answered_count: usize,
    pub total_questions: usize,
    pub is_completed: bool,
    pub streak: u32,
    pub timer: TimeRemaining,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetOut {
    pub removed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateOut {
    pub date: NaiveDate,
    pub crop: String,
    pub language: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearOut {
    pub deleted_bundles: usize,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_omits_absent_fields() {
        let ok = serde_json::to_value(Envelope::ok(ResetOut { removed: true }).with_message("done")).unwrap();
        assert_eq!(ok, json!({"success": true, "data": {"removed": true}, "message": "done"}));

        let err = serde_json::to_value(Envelope::err("Question not found")).unwrap();
        assert_eq!(err, json!({"success": false, "error": "Question not found"}));
    }

    #[test]
    fn answer_body_accepts_camel_case_and_missing_fields() {
        let body: AnswerIn = serde_json::from_value(json!({"questionIndex": 3, "selectedOption": 1})).unwrap();
        assert_eq!((body.question_index, body.selected_option), (Some(3), Some(1)));

        let body: AnswerIn = serde_json::from_value(json!({"questionIndex": 3})).unwrap();
        assert_eq!(body.selected_option, None);
    }

    #[test]
    fn inactive_status_is_flat() {
        let out = serde_json::to_value(StatusOut { has_active_game: false, game: None }).unwrap();
        assert_eq!(out, json!({"hasActiveGame": false}));
    }
}
