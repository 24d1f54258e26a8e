//! Core, format-agnostic types for xliffcodec.
//! The reader decodes into these; the writer serializes them.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

/// A single translatable string together with its (optional) translation
/// and resolved language.
///
/// For a source-side unit, `key` and `value` both hold the source text.
/// For a target-side unit, `key` holds the source text and `value` the
/// translation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Unit {
    /// Stable identifier of the translatable string. Never absent; for
    /// source units this is the source text itself.
    pub key: String,

    /// Textual content in this unit's language. `None` means no translation
    /// exists yet; a blank string is treated the same way by the writer.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub value: Option<String>,

    /// The resolved language tag (e.g. "en-US"). Assigned by the reader once
    /// the file-level language is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub lang: Option<String>,
}

impl Unit {
    /// Creates a unit with no language assigned yet.
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Unit {
            key: key.into(),
            value,
            lang: None,
        }
    }

    /// Creates a unit with a resolved language.
    pub fn with_lang(key: impl Into<String>, value: Option<String>, lang: impl Into<String>) -> Self {
        Unit {
            key: key.into(),
            value,
            lang: Some(lang.into()),
        }
    }

    /// Whether this unit carries a usable translation: a value that is
    /// non-null and non-blank after trimming. The writer emits a `target`
    /// element only for units where this holds.
    pub fn has_translation(&self) -> bool {
        matches!(&self.value, Some(value) if !value.trim().is_empty())
    }

    /// Parses the unit's language tag as a BCP 47 language identifier.
    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.lang.as_ref()?.parse().ok()
    }

    /// Check if this unit is tagged with a specific language.
    pub fn has_language(&self, lang: &str) -> bool {
        match (
            self.parse_language_identifier(),
            lang.parse::<LanguageIdentifier>(),
        ) {
            (Some(lang_id), Ok(target_lang)) => lang_id.language == target_lang.language,
            _ => false,
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unit {{ key: {}, value: {:?}, lang: {:?} }}",
            self.key, self.value, self.lang
        )
    }
}
