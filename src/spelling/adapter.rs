//! Spell-correction step of normalization.
//!
//! A kept token is sent to the spell checker only when all of these hold:
//!
//! - its surface text has at least `spell_check_len_limit` characters
//! - it is not punctuation
//! - its lowercased text contains no digit
//! - the checker does not already recognize its lowercased text
//!
//! When the checker returns a candidate, the candidate is re-lemmatized and
//! the short-word / exempt-POS / lemma rules of the normalizer pick between
//! its lowercased surface form and its lowercased lemma.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::classifier::Classification;
use crate::analysis::config::NormalizationConfig;
use crate::analysis::lemmatizer::Lemmatizer;
use crate::analysis::normalizer::{Normalization, candidate_rules};
use crate::analysis::rule::RuleChain;
use crate::analysis::token::{NormalizationSource, Token};
use crate::error::{ClinormError, Result};
use crate::spelling::checker::SpellChecker;

/// Connects the normalizer to the spell-checker and lemmatizer collaborators.
pub struct SpellCorrectionAdapter {
    checker: Arc<dyn SpellChecker>,
    lemmatizer: Arc<dyn Lemmatizer>,
    rules: RuleChain<Normalization>,
}

impl SpellCorrectionAdapter {
    pub fn new(checker: Arc<dyn SpellChecker>, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        SpellCorrectionAdapter {
            checker,
            lemmatizer,
            rules: candidate_rules(),
        }
    }

    /// Whether correction should be attempted for a token.
    ///
    /// Only the dictionary-membership check calls into the checker, and only
    /// after the cheap local conditions pass.
    pub fn should_attempt(
        &self,
        token: &Token,
        classification: Classification,
        config: &NormalizationConfig,
    ) -> Result<bool> {
        if token.text_len() < config.spell_check_len_limit()
            || classification.is_punctuation()
            || token.lower.chars().any(|c| c.is_ascii_digit())
        {
            return Ok(false);
        }

        let known = self
            .checker
            .contains(&token.lower)
            .map_err(|e| self.checker_error(e, token))?;
        Ok(!known)
    }

    /// Possibly replace `current` with the normal form of a correction.
    pub fn maybe_correct(
        &self,
        token: &Token,
        classification: Classification,
        current: Normalization,
        config: &NormalizationConfig,
    ) -> Result<Normalization> {
        if !self.should_attempt(token, classification, config)? {
            return Ok(current);
        }

        let Some(candidate) = self
            .checker
            .fix(&token.lower)
            .map_err(|e| self.checker_error(e, token))?
        else {
            return Ok(current);
        };

        let mut corrected = self
            .lemmatizer
            .lemmatize_word(&candidate)
            .map_err(|e| {
                ClinormError::from_collaborator(self.lemmatizer.name(), e).at_position(token.position)
            })?;
        corrected.position = token.position;

        let decided = self.rules.evaluate(&corrected, config);
        debug!(
            "token {} {:?}: corrected to {:?}, rule {} -> {:?}",
            token.position, token.text, candidate, decided.rule, decided.outcome.form
        );

        Ok(Normalization::new(
            decided.outcome.form,
            NormalizationSource::SpellCorrection,
        ))
    }

    fn checker_error(&self, error: ClinormError, token: &Token) -> ClinormError {
        ClinormError::from_collaborator(self.checker.name(), error).at_position(token.position)
    }
}

impl fmt::Debug for SpellCorrectionAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpellCorrectionAdapter")
            .field("checker", &self.checker.name())
            .field("lemmatizer", &self.lemmatizer.name())
            .field("rules", &self.rules)
            .finish()
    }
}
