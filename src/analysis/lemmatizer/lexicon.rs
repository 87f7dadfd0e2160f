//! Lookup-table lemmatizer.
//!
//! Splits text with a regular expression, then looks every lowercased token up
//! in a lexicon of `surface -> (lemma, POS)` entries. Words missing from the
//! lexicon are their own lemma. English personal pronouns map to the
//! `-PRON-` sentinel and a built-in English stopword list sets the stopword
//! flag.
//!
//! Lexicon files are tab-separated, one entry per line:
//!
//! ```text
//! # surface   lemma   [POS]
//! running     run     VBG
//! patients    patient NNS
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use regex::Regex;

use crate::analysis::lemmatizer::Lemmatizer;
use crate::analysis::token::{PRONOUN_LEMMA, Token};
use crate::error::{ClinormError, Result};

/// Words, numbers with internal hyphens/slashes/apostrophes, or punctuation runs.
const DEFAULT_PATTERN: &str = r"\w+(?:[-/']\w+)*|[^\w\s]+";

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

const PERSONAL_PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
    "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves",
];

const PRONOUN_POS: &str = "PRP";

/// A lexicon entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexiconEntry {
    pub lemma: String,
    pub pos: Option<String>,
}

/// A lemmatizer backed by an in-memory lexicon.
#[derive(Clone, Debug)]
pub struct LexiconLemmatizer {
    pattern: Arc<Regex>,
    entries: AHashMap<String, LexiconEntry>,
    stop_words: Arc<AHashSet<String>>,
    pronouns: Arc<AHashSet<String>>,
}

impl LexiconLemmatizer {
    /// Create a lemmatizer with the default pattern and an empty lexicon.
    pub fn new() -> Self {
        Self::with_pattern(DEFAULT_PATTERN).expect("Default token pattern should be valid")
    }

    /// Create a lemmatizer with a custom token pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| ClinormError::config(format!("Invalid token pattern: {e}")))?;

        Ok(LexiconLemmatizer {
            pattern: Arc::new(regex),
            entries: AHashMap::new(),
            stop_words: Arc::new(DEFAULT_ENGLISH_STOP_WORDS.iter().map(|s| s.to_string()).collect()),
            pronouns: Arc::new(PERSONAL_PRONOUNS.iter().map(|s| s.to_string()).collect()),
        })
    }

    /// Load a lexicon file with the default pattern.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut lemmatizer = Self::new();
        lemmatizer.load_lexicon(&content)?;
        Ok(lemmatizer)
    }

    /// Add entries parsed from tab-separated lexicon text.
    pub fn load_lexicon(&mut self, content: &str) -> Result<usize> {
        let mut added = 0;
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            match fields.as_slice() {
                [surface, lemma] => self.add_entry(*surface, *lemma, None),
                [surface, lemma, pos] => {
                    let pos = (!pos.is_empty()).then(|| pos.to_string());
                    self.add_entry(*surface, *lemma, pos)
                }
                _ => {
                    return Err(ClinormError::invalid_argument(format!(
                        "lexicon line {}: expected `surface<TAB>lemma[<TAB>POS]`",
                        line_no + 1
                    )));
                }
            }
            added += 1;
        }
        Ok(added)
    }

    /// Add or replace a lexicon entry. Lookups are case-insensitive.
    pub fn add_entry<S, L>(&mut self, surface: S, lemma: L, pos: Option<String>)
    where
        S: AsRef<str>,
        L: Into<String>,
    {
        self.entries.insert(
            surface.as_ref().to_lowercase(),
            LexiconEntry {
                lemma: lemma.into(),
                pos,
            },
        );
    }

    /// Builder-style [`add_entry`](Self::add_entry).
    pub fn with_entry<S, L>(mut self, surface: S, lemma: L, pos: Option<&str>) -> Self
    where
        S: AsRef<str>,
        L: Into<String>,
    {
        self.add_entry(surface, lemma, pos.map(str::to_string));
        self
    }

    /// Replace the stopword list.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = Arc::new(words.into_iter().map(Into::into).collect());
        self
    }

    /// Look up a word.
    pub fn entry(&self, word: &str) -> Option<&LexiconEntry> {
        self.entries.get(&word.to_lowercase())
    }

    /// Get the number of lexicon entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn token_for(&self, text: &str, position: usize, start: usize, end: usize) -> Token {
        let mut token = Token::with_offsets(text, position, start, end);
        token.is_stop = self.stop_words.contains(&token.lower);

        if let Some(entry) = self.entries.get(&token.lower) {
            token.lemma = entry.lemma.clone();
            token.pos = entry.pos.clone();
        } else if self.pronouns.contains(&token.lower) {
            token.lemma = PRONOUN_LEMMA.to_string();
            token.pos = Some(PRONOUN_POS.to_string());
        }
        token
    }
}

impl Default for LexiconLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for LexiconLemmatizer {
    fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self
            .pattern
            .find_iter(text)
            .enumerate()
            .map(|(position, mat)| self.token_for(mat.as_str(), position, mat.start(), mat.end()))
            .collect())
    }

    fn lemmatize_word(&self, word: &str) -> Result<Token> {
        Ok(self.token_for(word, 0, 0, word.len()))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
