//! Recovering a JSON array of records from raw model output.
//!
//! Model text is untrusted: it may be fenced in markdown, carry trailing
//! commas, single-quoted keys or stray control characters. Recovery runs an
//! ordered chain of pure strategies and returns the first that yields records:
//!
//! 1. strict: the whole text is a JSON array
//! 2. cleaned: strip fences, slice `[`..`]`, drop trailing commas and control chars
//! 3. per-object: parse each `{...}` on its own, repairing the ones that fail

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{GameError, Result};

static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)```json\s*").expect("valid regex"));
static FENCE_ANY: Lazy<Regex> = Lazy::new(|| Regex::new(r"```\s*").expect("valid regex"));
static TRAILING_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*([}\]])").expect("valid regex"));
static CONTROL_CHARS: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").expect("valid regex"));
static FLAT_OBJECT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^{}]*\}").expect("valid regex"));
static BARE_KEY: Lazy<Regex> =
  Lazy::new(|| Regex::new(r#"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:"#).expect("valid regex"));

type Strategy = fn(&str) -> Option<Vec<Value>>;

const STRATEGIES: &[(&str, Strategy)] = &[
  ("strict", parse_strict),
  ("cleaned", parse_cleaned),
  ("per_object", parse_per_object),
];

/// Parse `text` into records. `context` names the payload ("Tips", "MCQs") for logs and errors.
pub fn parse_records(text: &str, context: &str) -> Result<Vec<Value>> {
  for (name, strategy) in STRATEGIES {
    match strategy(text) {
      Some(records) => {
        debug!(target: "content", %context, strategy = %name, records = records.len(), "Recovered JSON records");
        return Ok(records);
      }
      None => debug!(target: "content", %context, strategy = %name, "JSON recovery strategy failed"),
    }
  }
  warn!(target: "content", %context, text_len = text.len(), "All JSON recovery strategies failed");
  Err(GameError::MalformedGenerationOutput { context: context.to_string() })
}

fn as_array(value: Value) -> Option<Vec<Value>> {
  match value {
    Value::Array(items) => Some(items),
    _ => None,
  }
}

fn parse_strict(text: &str) -> Option<Vec<Value>> {
  serde_json::from_str::<Value>(text.trim()).ok().and_then(as_array)
}

/// Fence/trailing-comma/control-char cleanup. Returns None when no array brackets exist.
pub fn clean_json_text(text: &str) -> Option<String> {
  let unfenced = FENCE_OPEN.replace_all(text, "");
  let unfenced = FENCE_ANY.replace_all(&unfenced, "");
  let trimmed = unfenced.trim();

  let start = trimmed.find('[')?;
  let end = trimmed.rfind(']')?;
  if end < start {
    return None;
  }
  let sliced = &trimmed[start..=end];
  let no_trailing = TRAILING_COMMA.replace_all(sliced, "$1");
  Some(CONTROL_CHARS.replace_all(&no_trailing, "").into_owned())
}

fn parse_cleaned(text: &str) -> Option<Vec<Value>> {
  let cleaned = clean_json_text(text)?;
  serde_json::from_str::<Value>(&cleaned).ok().and_then(as_array)
}

fn repair_object(raw: &str) -> String {
  let fixed = TRAILING_COMMA.replace_all(raw, "$1");
  let fixed = fixed.replace('\'', "\"");
  BARE_KEY.replace_all(&fixed, "$1\"$2\":").into_owned()
}

fn parse_per_object(text: &str) -> Option<Vec<Value>> {
  let objects: Vec<Value> = FLAT_OBJECT
    .find_iter(text)
    .filter_map(|m| {
      let raw = m.as_str();
      serde_json::from_str::<Value>(raw)
        .or_else(|_| serde_json::from_str::<Value>(&repair_object(raw)))
        .ok()
    })
    .collect();

  if objects.is_empty() { None } else { Some(objects) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn strict_array_parses_directly() {
    let out = parse_records(r#"[{"text":"a"},{"text":"b"}]"#, "Tips").unwrap();
    assert_eq!(out, vec![json!({"text":"a"}), json!({"text":"b"})]);
  }

  #[test]
  fn fenced_output_with_trailing_commas_is_cleaned() {
    let raw = "Here you go:\n```json\n[\n  {\"text\": \"a\",},\n  {\"text\": \"b\"},\n]\n```\n";
    let out = parse_records(raw, "Tips").unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[1]["text"], "b");
  }

  #[test]
  fn control_characters_are_stripped() {
    let raw = "[{\"text\": \"a\u{0007}b\"}]";
    let out = parse_records(raw, "Tips").unwrap();
    assert_eq!(out[0]["text"], "ab");
  }

  #[test]
  fn single_quoted_and_bare_keys_are_repaired_per_object() {
    let raw = "[{'text': 'one'}, {text: \"two\",}, {\"text\": \"three\"} oops";
    let out = parse_records(raw, "Tips").unwrap();
    let texts: Vec<_> = out.iter().map(|v| v["text"].as_str().unwrap().to_string()).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
  }

  #[test]
  fn per_object_keeps_whatever_parses() {
    let raw = "{\"text\": \"ok\"} {broken: [} {\"text\": \"also ok\"}";
    let out = parse_records(raw, "Tips").unwrap();
    assert_eq!(out.len(), 2);
  }

  #[test]
  fn hopeless_input_is_a_tagged_error() {
    for raw in ["", "no json here", "[1, 2", "{{{{", "```json\n```"] {
      let err = parse_records(raw, "MCQs").unwrap_err();
      assert_eq!(err, GameError::MalformedGenerationOutput { context: "MCQs".into() });
    }
  }

  #[test]
  fn non_array_top_level_falls_through_to_object_extraction() {
    let out = parse_records(r#"{"text": "solo"}"#, "Tips").unwrap();
    assert_eq!(out, vec![json!({"text": "solo"})]);
  }

  #[test]
  fn clean_requires_brackets() {
    assert!(clean_json_text("nothing").is_none());
    assert_eq!(clean_json_text("x [1,2,] y").as_deref(), Some("[1,2]"));
  }
}
