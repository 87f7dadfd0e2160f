//! Normalization configuration.
//!
//! Configuration comes in two layers:
//!
//! - [`NormalizationSettings`] is the plain, serializable option set. It is
//!   what gets written to and read from JSON.
//! - [`NormalizationConfig`] is the compiled, immutable form. Patterns are
//!   compiled once here and the config is then shared by reference (usually
//!   behind an `Arc`) by every classifier and normalizer call of a run.
//!
//! All configuration errors surface from [`NormalizationConfig::from_settings`];
//! nothing is validated per token.
//!
//! # Examples
//!
//! ```
//! use clinorm::analysis::config::NormalizationConfig;
//!
//! let config = NormalizationConfig::builder()
//!     .punctuation_pattern(r"^[.,!?;:]+$")
//!     .skip_word_pattern(r"^(the|a|an)$")
//!     .min_len_normalize(4)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.is_punctuation_match("."));
//! assert!(config.is_skip_word_match("the"));
//! ```

use std::fs;
use std::path::Path;

use ahash::AHashSet;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ClinormError, Result};

/// Serializable option set for the classifier, normalizer and spell-check step.
///
/// Patterns are required; every other option has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizationSettings {
    /// Pattern matched against the lowercased text to detect punctuation.
    pub punctuation_pattern: Option<String>,

    /// Surface strings exempted from punctuation skipping.
    #[serde(default)]
    pub keep_punct: Vec<String>,

    /// Pattern matched against the lowercased text for skip-listed words.
    pub skip_word_pattern: Option<String>,

    /// Whether the tokenizer's stopword flag also triggers a skip.
    #[serde(default)]
    pub skip_stopwords: bool,

    /// Tokens whose lowercased text is shorter than this bypass lemmatization.
    #[serde(default)]
    pub min_len_normalize: usize,

    /// POS tags whose tokens keep their lowercased surface form.
    #[serde(default)]
    pub do_not_normalize: Vec<String>,

    /// Whether to attempt spell correction.
    #[serde(default)]
    pub spell_check_enabled: bool,

    /// Minimum surface length for spell correction.
    #[serde(default)]
    pub spell_check_len_limit: usize,
}

impl Default for NormalizationSettings {
    fn default() -> Self {
        NormalizationSettings {
            punctuation_pattern: None,
            keep_punct: Vec::new(),
            skip_word_pattern: None,
            skip_stopwords: false,
            min_len_normalize: 0,
            do_not_normalize: Vec::new(),
            spell_check_enabled: false,
            spell_check_len_limit: 0,
        }
    }
}

/// Words skipped by the clinical preset.
const CLINICAL_SKIP_WORDS: &[&str] = &[
    "nos", "ambiguous", "-", "and", "or", "ht", "and/or", "wt", "bmi", "l", "s", "a", "in",
];

/// Penn Treebank tags whose surface form carries meaning lost by lemmatization.
const CLINICAL_DO_NOT_NORMALIZE: &[&str] = &["VBD", "VBG", "VBN", "VBP", "JJS", "JJR"];

impl NormalizationSettings {
    /// Preset tuned for clinical notes.
    pub fn clinical() -> Self {
        let skip_words = CLINICAL_SKIP_WORDS
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");

        NormalizationSettings {
            punctuation_pattern: Some(r"[^a-z0-9]+$".to_string()),
            keep_punct: vec![".".to_string(), ":".to_string()],
            skip_word_pattern: Some(format!("({skip_words})$")),
            skip_stopwords: false,
            min_len_normalize: 5,
            do_not_normalize: CLINICAL_DO_NOT_NORMALIZE
                .iter()
                .map(|s| s.to_string())
                .collect(),
            spell_check_enabled: true,
            spell_check_len_limit: 7,
        }
    }

    /// Parse settings from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Serialize the settings to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Compiled, immutable configuration shared by all calls of a run.
#[derive(Debug, Clone)]
pub struct NormalizationConfig {
    punctuation: Regex,
    keep_punct: AHashSet<String>,
    skip_words: Regex,
    skip_stopwords: bool,
    min_len_normalize: usize,
    do_not_normalize: AHashSet<String>,
    spell_check_enabled: bool,
    spell_check_len_limit: usize,
    settings: NormalizationSettings,
}

impl NormalizationConfig {
    /// Compile settings into a config.
    ///
    /// Patterns are anchored at the start of the lowercased text, so a pattern
    /// matches when it matches a prefix of the text.
    pub fn from_settings(settings: NormalizationSettings) -> Result<Self> {
        let punctuation = compile_pattern(
            "punctuation_pattern",
            settings.punctuation_pattern.as_deref(),
        )?;
        let skip_words = compile_pattern("skip_word_pattern", settings.skip_word_pattern.as_deref())?;

        Ok(NormalizationConfig {
            punctuation,
            keep_punct: settings.keep_punct.iter().cloned().collect(),
            skip_words,
            skip_stopwords: settings.skip_stopwords,
            min_len_normalize: settings.min_len_normalize,
            do_not_normalize: settings.do_not_normalize.iter().cloned().collect(),
            spell_check_enabled: settings.spell_check_enabled,
            spell_check_len_limit: settings.spell_check_len_limit,
            settings,
        })
    }

    /// Compile the clinical preset.
    pub fn clinical() -> Result<Self> {
        Self::from_settings(NormalizationSettings::clinical())
    }

    /// Read and compile settings from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_settings(NormalizationSettings::from_json_file(path)?)
    }

    /// Create a new builder for NormalizationConfig.
    pub fn builder() -> NormalizationConfigBuilder {
        NormalizationConfigBuilder::default()
    }

    /// Whether the punctuation pattern matches the lowercased text.
    pub fn is_punctuation_match(&self, lower: &str) -> bool {
        self.punctuation.is_match(lower)
    }

    /// Whether a surface string is exempted from punctuation skipping.
    pub fn keeps_punct(&self, text: &str) -> bool {
        self.keep_punct.contains(text)
    }

    /// Whether the skip-word pattern matches the lowercased text.
    pub fn is_skip_word_match(&self, lower: &str) -> bool {
        self.skip_words.is_match(lower)
    }

    pub fn skip_stopwords(&self) -> bool {
        self.skip_stopwords
    }

    pub fn min_len_normalize(&self) -> usize {
        self.min_len_normalize
    }

    /// Whether a POS tag is exempted from lemmatization.
    pub fn is_normalization_exempt(&self, pos: Option<&str>) -> bool {
        match pos {
            Some(pos) => !self.do_not_normalize.is_empty() && self.do_not_normalize.contains(pos),
            None => false,
        }
    }

    pub fn spell_check_enabled(&self) -> bool {
        self.spell_check_enabled
    }

    pub fn spell_check_len_limit(&self) -> usize {
        self.spell_check_len_limit
    }

    /// The settings this config was compiled from.
    pub fn settings(&self) -> &NormalizationSettings {
        &self.settings
    }
}

fn compile_pattern(name: &str, pattern: Option<&str>) -> Result<Regex> {
    let pattern = pattern.ok_or_else(|| ClinormError::missing_option(name))?;
    Regex::new(&format!("^(?:{pattern})"))
        .map_err(|e| ClinormError::config(format!("invalid `{name}` pattern: {e}")))
}

/// Fluent builder for [`NormalizationConfig`].
#[derive(Debug, Clone, Default)]
pub struct NormalizationConfigBuilder {
    settings: NormalizationSettings,
}

impl NormalizationConfigBuilder {
    /// Start from existing settings.
    pub fn from_settings(settings: NormalizationSettings) -> Self {
        NormalizationConfigBuilder { settings }
    }

    pub fn punctuation_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.settings.punctuation_pattern = Some(pattern.into());
        self
    }

    pub fn keep_punct<I, S>(mut self, punct: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.keep_punct = punct.into_iter().map(Into::into).collect();
        self
    }

    pub fn skip_word_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.settings.skip_word_pattern = Some(pattern.into());
        self
    }

    pub fn skip_stopwords(mut self, skip: bool) -> Self {
        self.settings.skip_stopwords = skip;
        self
    }

    pub fn min_len_normalize(mut self, len: usize) -> Self {
        self.settings.min_len_normalize = len;
        self
    }

    pub fn do_not_normalize<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.do_not_normalize = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn spell_check(mut self, enabled: bool, len_limit: usize) -> Self {
        self.settings.spell_check_enabled = enabled;
        self.settings.spell_check_len_limit = len_limit;
        self
    }

    /// Compile the configuration.
    pub fn build(self) -> Result<NormalizationConfig> {
        NormalizationConfig::from_settings(self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> NormalizationConfig {
        NormalizationConfig::builder()
            .punctuation_pattern(r"^[.,!?;:]+$")
            .skip_word_pattern(r"^(the|a|an)$")
            .min_len_normalize(4)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder() {
        let config = scenario();
        assert!(config.is_punctuation_match("."));
        assert!(config.is_punctuation_match("?!"));
        assert!(!config.is_punctuation_match("a."));
        assert!(config.is_skip_word_match("an"));
        assert!(!config.is_skip_word_match("and"));
        assert_eq!(config.min_len_normalize(), 4);
        assert!(!config.skip_stopwords());
        assert!(!config.spell_check_enabled());
    }

    #[test]
    fn test_patterns_anchor_at_start() {
        let config = NormalizationConfig::builder()
            .punctuation_pattern(r"[^a-z0-9]+")
            .skip_word_pattern("nos$")
            .build()
            .unwrap();

        assert!(config.is_punctuation_match("-"));
        assert!(config.is_punctuation_match("(left"));
        assert!(!config.is_punctuation_match("left)"));
        assert!(config.is_skip_word_match("nos"));
        assert!(!config.is_skip_word_match("pharynos"));
    }

    #[test]
    fn test_missing_pattern() {
        let err = NormalizationConfig::builder()
            .skip_word_pattern("^x$")
            .build()
            .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("punctuation_pattern"));
    }

    #[test]
    fn test_malformed_pattern() {
        let err = NormalizationConfig::builder()
            .punctuation_pattern("[unclosed")
            .skip_word_pattern("^x$")
            .build()
            .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("invalid `punctuation_pattern` pattern"));
    }

    #[test]
    fn test_do_not_normalize() {
        let config = NormalizationConfig::builder()
            .punctuation_pattern("^$")
            .skip_word_pattern("^$")
            .do_not_normalize(["VBG"])
            .build()
            .unwrap();

        assert!(config.is_normalization_exempt(Some("VBG")));
        assert!(!config.is_normalization_exempt(Some("NN")));
        assert!(!config.is_normalization_exempt(None));
    }

    #[test]
    fn test_clinical_preset() {
        let config = NormalizationConfig::clinical().unwrap();
        assert!(config.is_punctuation_match(","));
        assert!(config.keeps_punct("."));
        assert!(config.is_skip_word_match("and/or"));
        assert!(config.is_skip_word_match("nos"));
        assert!(!config.is_skip_word_match("nose"));
        assert!(config.is_normalization_exempt(Some("VBG")));
        assert!(config.spell_check_enabled());
        assert_eq!(config.spell_check_len_limit(), 7);
        assert_eq!(config.min_len_normalize(), 5);
    }

    #[test]
    fn test_settings_json() {
        let json = r#"{
            "punctuation_pattern": "^[.,]+$",
            "skip_word_pattern": "^(the)$",
            "keep_punct": [":"],
            "min_len_normalize": 3
        }"#;
        let settings = NormalizationSettings::from_json_str(json).unwrap();
        assert_eq!(settings.keep_punct, vec![":".to_string()]);
        assert_eq!(settings.min_len_normalize, 3);
        assert!(!settings.spell_check_enabled);

        let round = NormalizationSettings::from_json_str(&settings.to_json_string().unwrap());
        assert_eq!(round.unwrap(), settings);

        let config = NormalizationConfig::from_settings(settings.clone()).unwrap();
        assert_eq!(config.settings(), &settings);
    }

    #[test]
    fn test_settings_rejects_unknown_option() {
        let json = r#"{"punctuation_pattern": ".", "skip_word_pattern": ".", "lemmatize": true}"#;
        assert!(NormalizationSettings::from_json_str(json).is_err());
    }
}
