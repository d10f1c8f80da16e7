//! Language resolution: code, backend key or display name -> canonical descriptor.

use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Language {
  pub code: &'static str,
  pub display_name: &'static str,
  pub backend_key: &'static str,
  #[serde(skip)]
  pub instruction: &'static str,
  pub supported: bool,
}

pub static LANGUAGES: &[Language] = &[
  Language { code: "en", display_name: "English", backend_key: "english", instruction: "Generate in English language", supported: true },
  Language { code: "hi", display_name: "Hindi", backend_key: "hindi", instruction: "Generate in Hindi language (हिंदी भाषा में तैयार करें)", supported: true },
  Language { code: "mr", display_name: "Marathi", backend_key: "marathi", instruction: "Generate in Marathi language (मराठी भाषेत तयार करा)", supported: true },
  Language { code: "gu", display_name: "Gujarati", backend_key: "gujarati", instruction: "Generate in Gujarati language (ગુજરાતી ભાષામાં બનાવો)", supported: true },
  Language { code: "bn", display_name: "Bengali", backend_key: "bengali", instruction: "Generate in Bengali language (বাংলা ভাষায় তৈরি করুন)", supported: true },
  Language { code: "ta", display_name: "Tamil", backend_key: "tamil", instruction: "Generate in Tamil language (தமிழ் மொழியில் உருவாக்கவும்)", supported: true },
  Language { code: "ur", display_name: "Urdu", backend_key: "urdu", instruction: "Generate in Urdu language (اردو زبان میں بنائیں)", supported: true },
  Language { code: "fr", display_name: "French", backend_key: "french", instruction: "Generate in French language (Générer en français)", supported: true },
  Language { code: "de", display_name: "German", backend_key: "german", instruction: "Generate in German language (Auf Deutsch generieren)", supported: true },
  Language { code: "es", display_name: "Spanish", backend_key: "spanish", instruction: "Generate in Spanish language (Generar en español)", supported: true },
];

pub fn english() -> &'static Language {
  &LANGUAGES[0]
}

/// Resolve free-form input. Total: unknown input logs a warning and yields English.
pub fn resolve(input: &str) -> &'static Language {
  let needle = input.trim().to_lowercase();
  if needle.is_empty() {
    return english();
  }

  let found = LANGUAGES
    .iter()
    .find(|l| l.code == needle)
    .or_else(|| LANGUAGES.iter().find(|l| l.backend_key == needle))
    .or_else(|| LANGUAGES.iter().find(|l| l.display_name.to_lowercase() == needle));

  match found {
    Some(lang) => lang,
    None => {
      warn!(target: "content", input = %input, "Unknown language; defaulting to English");
      english()
    }
  }
}

pub fn supported_languages() -> &'static [Language] {
  LANGUAGES
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_codes_keys_and_names_case_insensitively() {
    assert_eq!(resolve("HINDI").code, "hi");
    assert_eq!(resolve("hi").code, "hi");
    assert_eq!(resolve("  Marathi ").code, "mr");
    assert_eq!(resolve("spanish").code, "es");
    assert_eq!(resolve("DE").code, "de");
  }

  #[test]
  fn unknown_or_empty_input_falls_back_to_english() {
    assert_eq!(resolve("हिंदी").code, "en");
    assert_eq!(resolve("klingon").code, "en");
    assert_eq!(resolve("").code, "en");
  }

  #[test]
  fn table_has_unique_codes() {
    let mut codes: Vec<_> = supported_languages().iter().map(|l| l.code).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), LANGUAGES.len());
  }
}
