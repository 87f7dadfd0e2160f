//! Token and annotation types.
//!
//! A [`Token`] is what an upstream tokenizer/lemmatizer hands to this crate:
//! surface text, lowercased text, lemma, part-of-speech tag, stopword flag and
//! position. Tokens are read-only here. Everything this crate decides about a
//! token is returned as a separate [`TokenAnnotation`] that refers back to the
//! token by position, so collaborator-owned data is never mutated.
//!
//! # Examples
//!
//! ```
//! use clinorm::analysis::token::Token;
//!
//! let token = Token::new("Running", 3).with_lemma("run").with_pos("VERB");
//! assert_eq!(token.lower, "running");
//! assert_eq!(token.lemma, "run");
//! assert_eq!(token.position, 3);
//! assert!(!token.is_pronoun());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lemma sentinel used by lemmatizers for pronouns that have no distinct lemma.
pub const PRONOUN_LEMMA: &str = "-PRON-";

/// A single token produced by the tokenizer/lemmatizer collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text as it appears in the document
    pub text: String,

    /// Lowercased surface text
    pub lower: String,

    /// Canonical form, or [`PRONOUN_LEMMA`] for pronouns
    pub lemma: String,

    /// Part-of-speech tag, if the tokenizer assigned one
    pub pos: Option<String>,

    /// Stopword flag set by the tokenizer
    pub is_stop: bool,

    /// Index of the token within its document (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,
}

impl Token {
    /// Create a token whose lowercased text and lemma are derived from `text`.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        let text = text.into();
        let lower = text.to_lowercase();
        Token {
            lemma: lower.clone(),
            lower,
            text,
            pos: None,
            is_stop: false,
            position,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Create a token with byte offsets into the source text.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        let mut token = Token::new(text, position);
        token.start_offset = start_offset;
        token.end_offset = end_offset;
        token
    }

    /// Set the lemma.
    pub fn with_lemma<S: Into<String>>(mut self, lemma: S) -> Self {
        self.lemma = lemma.into();
        self
    }

    /// Set the part-of-speech tag.
    pub fn with_pos<S: Into<String>>(mut self, pos: S) -> Self {
        self.pos = Some(pos.into());
        self
    }

    /// Set the stopword flag.
    pub fn stopword(mut self, is_stop: bool) -> Self {
        self.is_stop = is_stop;
        self
    }

    /// Length of the lowercased text in characters.
    pub fn lower_len(&self) -> usize {
        self.lower.chars().count()
    }

    /// Length of the surface text in characters.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the lemma is the pronoun sentinel.
    pub fn is_pronoun(&self) -> bool {
        self.lemma == PRONOUN_LEMMA
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Why a token was excluded from concept matching.
///
/// Exactly one reason is recorded per skipped token; the first matching rule
/// wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Matched the punctuation pattern and is not in `keep_punct`
    Punctuation,
    /// Matched the skip-word pattern
    SkipWord,
    /// Flagged as a stopword while `skip_stopwords` is on
    Stopword,
    /// Lemma is the pronoun sentinel (set during normalization)
    Pronoun,
    /// A collaborator call failed and the token was skipped by policy
    CollaboratorFailure,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Punctuation => "punctuation",
            SkipReason::SkipWord => "skip_word",
            SkipReason::Stopword => "stopword",
            SkipReason::Pronoun => "pronoun",
            SkipReason::CollaboratorFailure => "collaborator_failure",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule produced a token's normalized form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationSource {
    /// Shorter than `min_len_normalize`, lowercased surface kept
    ShortWord,
    /// POS tag listed in `do_not_normalize`, lowercased surface kept
    ExemptPos,
    /// Lowercased lemma
    Lemma,
    /// Replaced by a spell-correction candidate
    SpellCorrection,
}

impl NormalizationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationSource::ShortWord => "short_word",
            NormalizationSource::ExemptPos => "exempt_pos",
            NormalizationSource::Lemma => "lemma",
            NormalizationSource::SpellCorrection => "spell_correction",
        }
    }
}

impl fmt::Display for NormalizationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The per-token result of classification and normalization.
///
/// Invariants:
/// - `is_punctuation` implies `to_skip`
/// - `to_skip` implies `normalized_form` is `None`
/// - `to_skip` if and only if `skip_reason` is `Some`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAnnotation {
    /// Position of the annotated token within its document
    pub position: usize,

    pub is_punctuation: bool,

    pub to_skip: bool,

    /// Key for downstream concept-dictionary lookup
    pub normalized_form: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_by: Option<NormalizationSource>,
}

impl TokenAnnotation {
    /// Annotation for a token excluded from matching.
    pub fn skipped(position: usize, reason: SkipReason) -> Self {
        TokenAnnotation {
            position,
            is_punctuation: reason == SkipReason::Punctuation,
            to_skip: true,
            normalized_form: None,
            skip_reason: Some(reason),
            normalized_by: None,
        }
    }

    /// Annotation for a token kept with a normalized form.
    pub fn normalized<S: Into<String>>(
        position: usize,
        form: S,
        source: NormalizationSource,
    ) -> Self {
        TokenAnnotation {
            position,
            is_punctuation: false,
            to_skip: false,
            normalized_form: Some(form.into()),
            skip_reason: None,
            normalized_by: Some(source),
        }
    }

    /// The normalized form, if the token is kept.
    pub fn form(&self) -> Option<&str> {
        self.normalized_form.as_deref()
    }
}
