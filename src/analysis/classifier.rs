//! Token classification: punctuation / skip / keep.
//!
//! The classifier is the first stage of annotation. It decides whether a token
//! is excluded from concept matching before any normalization work is done.
//! Rules, highest priority first:
//!
//! 1. `punctuation`: the punctuation pattern matches the lowercased text and
//!    the surface text is not in `keep_punct`
//! 2. `skip_word`: the skip-word pattern matches the lowercased text
//! 3. `stopword`: `skip_stopwords` is on and the token is flagged as a stopword
//! 4. `keep`: everything else
//!
//! # Examples
//!
//! ```
//! use clinorm::analysis::classifier::TokenClassifier;
//! use clinorm::analysis::config::NormalizationConfig;
//! use clinorm::analysis::token::{SkipReason, Token};
//!
//! let config = NormalizationConfig::builder()
//!     .punctuation_pattern(r"^[.,!?;:]+$")
//!     .skip_word_pattern(r"^(the|a|an)$")
//!     .build()
//!     .unwrap();
//! let classifier = TokenClassifier::new();
//!
//! let class = classifier.classify(&Token::new(".", 0), &config);
//! assert!(class.is_punctuation());
//! assert!(class.to_skip());
//!
//! let class = classifier.classify(&Token::new("The", 1), &config);
//! assert_eq!(class.skip_reason(), Some(SkipReason::SkipWord));
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::config::NormalizationConfig;
use crate::analysis::rule::{Rule, RuleChain, RuleMatch};
use crate::analysis::token::{SkipReason, Token};

/// Result of classifying a single token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Excluded from matching for the given reason
    Skip(SkipReason),
    /// Passed on to normalization
    Keep,
}

impl Classification {
    pub fn is_punctuation(&self) -> bool {
        matches!(self, Classification::Skip(SkipReason::Punctuation))
    }

    pub fn to_skip(&self) -> bool {
        matches!(self, Classification::Skip(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Classification::Skip(reason) => Some(*reason),
            Classification::Keep => None,
        }
    }
}

const PUNCTUATION: Rule<Classification> = Rule::new(
    "punctuation",
    |token, config| config.is_punctuation_match(&token.lower) && !config.keeps_punct(&token.text),
    |_, _| Classification::Skip(SkipReason::Punctuation),
);

const SKIP_WORD: Rule<Classification> = Rule::new(
    "skip_word",
    |token, config| config.is_skip_word_match(&token.lower),
    |_, _| Classification::Skip(SkipReason::SkipWord),
);

const STOPWORD: Rule<Classification> = Rule::new(
    "stopword",
    |token, config| config.skip_stopwords() && token.is_stop,
    |_, _| Classification::Skip(SkipReason::Stopword),
);

/// Tags tokens as punctuation, skipped or kept.
#[derive(Debug)]
pub struct TokenClassifier {
    rules: RuleChain<Classification>,
}

impl TokenClassifier {
    /// Create a classifier with the standard rule order.
    pub fn new() -> Self {
        TokenClassifier {
            rules: RuleChain::new("keep", |_, _| Classification::Keep)
                .then(PUNCTUATION)
                .then(SKIP_WORD)
                .then(STOPWORD),
        }
    }

    /// Classify a token.
    pub fn classify(&self, token: &Token, config: &NormalizationConfig) -> Classification {
        self.classify_traced(token, config).outcome
    }

    /// Classify a token and report which rule decided.
    pub fn classify_traced(
        &self,
        token: &Token,
        config: &NormalizationConfig,
    ) -> RuleMatch<Classification> {
        self.rules.evaluate(token, config)
    }

    /// Rule names in priority order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.rule_names()
    }
}

impl Default for TokenClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(skip_stopwords: bool) -> NormalizationConfig {
        NormalizationConfig::builder()
            .punctuation_pattern(r"[^a-z0-9]+$")
            .keep_punct([":"])
            .skip_word_pattern(r"(the|a|an|-)$")
            .skip_stopwords(skip_stopwords)
            .build()
            .unwrap()
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            TokenClassifier::new().rule_names(),
            vec!["punctuation", "skip_word", "stopword", "keep"]
        );
    }

    #[test]
    fn test_punctuation() {
        let classifier = TokenClassifier::new();
        let class = classifier.classify(&Token::new(",", 0), &config(false));
        assert_eq!(class, Classification::Skip(SkipReason::Punctuation));
        assert!(class.is_punctuation());
        assert!(class.to_skip());
    }

    #[test]
    fn test_keep_punct_exemption() {
        let classifier = TokenClassifier::new();
        let class = classifier.classify(&Token::new(":", 0), &config(false));
        assert_eq!(class, Classification::Keep);
    }

    #[test]
    fn test_punctuation_dominates_skip_word() {
        // "-" matches both patterns
        let classifier = TokenClassifier::new();
        let traced = classifier.classify_traced(&Token::new("-", 0), &config(false));
        assert_eq!(traced.rule, "punctuation");
        assert_eq!(traced.outcome, Classification::Skip(SkipReason::Punctuation));
    }

    #[test]
    fn test_skip_word_uses_lowercased_text() {
        let classifier = TokenClassifier::new();
        let class = classifier.classify(&Token::new("THE", 0), &config(false));
        assert_eq!(class, Classification::Skip(SkipReason::SkipWord));
        assert!(!class.is_punctuation());
    }

    #[test]
    fn test_skip_word_dominates_stopword() {
        let classifier = TokenClassifier::new();
        let token = Token::new("the", 0).stopword(true);
        let class = classifier.classify(&token, &config(true));
        assert_eq!(class.skip_reason(), Some(SkipReason::SkipWord));
    }

    #[test]
    fn test_stopword_only_when_enabled() {
        let classifier = TokenClassifier::new();
        let token = Token::new("was", 0).stopword(true);

        assert_eq!(classifier.classify(&token, &config(false)), Classification::Keep);
        assert_eq!(
            classifier.classify(&token, &config(true)),
            Classification::Skip(SkipReason::Stopword)
        );
    }

    #[test]
    fn test_keep() {
        let classifier = TokenClassifier::new();
        let class = classifier.classify(&Token::new("Fever", 0), &config(true));
        assert_eq!(class, Classification::Keep);
        assert!(!class.to_skip());
        assert_eq!(class.skip_reason(), None);
    }
}
