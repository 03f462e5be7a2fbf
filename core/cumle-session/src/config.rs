//! User-facing texts, overridable from a TOML file.
//!
//! Every field has a built-in (Turkish) default, so a config file only needs
//! the keys it changes:
//!
//! ```toml
//! export_file_name = "alistirmalar.json"
//!
//! [messages]
//! correct = "Harika!"
//! ```

use std::path::Path;

use cumle_grader::Verdict;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub messages: Messages,
    pub placeholders: Placeholders,
    /// Suggested file name for exports.
    pub export_file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub correct: String,
    pub mismatch: String,
    pub missing_words: String,
    pub incomplete_authoring: String,
    /// More role selections than the sentence has words.
    pub selection_mismatch: String,
    pub invalid_import: String,
    pub unknown_word: String,
    pub confirm_delete: String,
}

/// Texts of the stand-in sentence shown when there is nothing to practise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    /// The exercise set could not be loaded.
    pub load_failure: String,
    /// The set became empty.
    pub empty_set: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            messages: Messages::default(),
            placeholders: Placeholders::default(),
            export_file_name: "sentences.json".to_string(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            correct: "Tebrikler! Cümle analizi doğru.".to_string(),
            mismatch: "Bazı sözcükler yanlış yerde. Tekrar deneyin.".to_string(),
            missing_words: "Lütfen tüm sözcükleri yerleştirin.".to_string(),
            incomplete_authoring: "Lütfen tüm sözcüklere öğe atayın.".to_string(),
            selection_mismatch: "Öğe seçimleri cümledeki sözcüklerle uyuşmuyor.".to_string(),
            invalid_import: "Geçersiz dosya formatı".to_string(),
            unknown_word: "Bu sözcük cümlede yok.".to_string(),
            confirm_delete: "Bu cümleyi silmek istediğinizden emin misiniz?".to_string(),
        }
    }
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            load_failure: "Cümle yüklenemedi. Lütfen sayfayı yenileyin.".to_string(),
            empty_set: "Lütfen yeni bir cümle ekleyin".to_string(),
        }
    }
}

impl Messages {
    pub fn for_verdict(&self, verdict: Verdict) -> &str {
        match verdict {
            Verdict::Correct => &self.correct,
            Verdict::Mismatch => &self.mismatch,
            Verdict::MissingWords => &self.missing_words,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }
}
