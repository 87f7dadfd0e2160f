//! Token normalization: the lookup form of a kept token.
//!
//! Only tokens the classifier kept reach this stage. Rules, highest priority
//! first:
//!
//! 1. `short_word`: lowercased text shorter than `min_len_normalize` keeps its
//!    lowercased surface form
//! 2. `exempt_pos`: POS tag listed in `do_not_normalize` keeps its lowercased
//!    surface form
//! 3. `pronoun`: lemma is `-PRON-`; the form is the lemma and the token is
//!    skipped after the fact
//! 4. `lemma`: the lowercased lemma
//!
//! The length rule runs before the pronoun rule, so a pronoun shorter than
//! `min_len_normalize` ("it", "we") is kept with its surface form. This order
//! is part of the contract.
//!
//! When spell checking is enabled and a [`SpellCorrectionAdapter`] is attached,
//! the adapter gets a chance to replace the form of every token still kept.

use log::debug;

use crate::analysis::classifier::Classification;
use crate::analysis::config::NormalizationConfig;
use crate::analysis::rule::{Rule, RuleChain, RuleMatch};
use crate::analysis::token::{NormalizationSource, SkipReason, Token};
use crate::error::Result;
use crate::spelling::adapter::SpellCorrectionAdapter;

/// Outcome of the normalization rules for one token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalization {
    /// The computed lookup form
    pub form: String,
    /// Rule that produced the form
    pub source: NormalizationSource,
    /// Set when normalization excludes the token after classification kept it
    pub skip_reason: Option<SkipReason>,
}

impl Normalization {
    pub fn new<S: Into<String>>(form: S, source: NormalizationSource) -> Self {
        Normalization {
            form: form.into(),
            source,
            skip_reason: None,
        }
    }

    pub fn to_skip(&self) -> bool {
        self.skip_reason.is_some()
    }
}

pub(crate) const SHORT_WORD: Rule<Normalization> = Rule::new(
    "short_word",
    |token, config| token.lower_len() < config.min_len_normalize(),
    |token, _| Normalization::new(token.lower.clone(), NormalizationSource::ShortWord),
);

pub(crate) const EXEMPT_POS: Rule<Normalization> = Rule::new(
    "exempt_pos",
    |token, config| config.is_normalization_exempt(token.pos.as_deref()),
    |token, _| Normalization::new(token.lower.clone(), NormalizationSource::ExemptPos),
);

pub(crate) const PRONOUN: Rule<Normalization> = Rule::new(
    "pronoun",
    |token, _| token.is_pronoun(),
    |token, _| Normalization {
        form: token.lemma.clone(),
        source: NormalizationSource::Lemma,
        skip_reason: Some(SkipReason::Pronoun),
    },
);

pub(crate) fn lemma_form(token: &Token, _: &NormalizationConfig) -> Normalization {
    Normalization::new(token.lemma.to_lowercase(), NormalizationSource::Lemma)
}

/// The full normalization chain.
pub fn normalization_rules() -> RuleChain<Normalization> {
    RuleChain::new("lemma", lemma_form)
        .then(SHORT_WORD)
        .then(EXEMPT_POS)
        .then(PRONOUN)
}

/// The subset re-run for spell-correction candidates: no pronoun handling.
pub fn candidate_rules() -> RuleChain<Normalization> {
    RuleChain::new("lemma", lemma_form)
        .then(SHORT_WORD)
        .then(EXEMPT_POS)
}

/// Computes normalized forms for kept tokens.
#[derive(Debug)]
pub struct TokenNormalizer {
    rules: RuleChain<Normalization>,
    spelling: Option<SpellCorrectionAdapter>,
}

impl TokenNormalizer {
    /// Create a normalizer without spell correction.
    pub fn new() -> Self {
        TokenNormalizer {
            rules: normalization_rules(),
            spelling: None,
        }
    }

    /// Attach a spell-correction step.
    pub fn with_spelling(mut self, adapter: SpellCorrectionAdapter) -> Self {
        self.spelling = Some(adapter);
        self
    }

    /// Whether a spell-correction step is attached.
    pub fn has_spelling(&self) -> bool {
        self.spelling.is_some()
    }

    /// Run the rule chain only, without spell correction.
    pub fn apply_rules(&self, token: &Token, config: &NormalizationConfig) -> RuleMatch<Normalization> {
        self.rules.evaluate(token, config)
    }

    /// Normalize a classified token.
    ///
    /// Returns `Ok(None)` for tokens the classifier skipped; they never enter
    /// this stage. Errors only come from the spell-correction collaborators.
    pub fn normalize(
        &self,
        token: &Token,
        classification: Classification,
        config: &NormalizationConfig,
    ) -> Result<Option<Normalization>> {
        if classification.to_skip() {
            return Ok(None);
        }
        self.normalize_kept(token, config).map(Some)
    }

    /// Normalize a token the classifier kept.
    pub fn normalize_kept(&self, token: &Token, config: &NormalizationConfig) -> Result<Normalization> {
        let RuleMatch { rule, outcome } = self.apply_rules(token, config);
        debug!("token {} {:?}: rule {rule} -> {:?}", token.position, token.text, outcome.form);

        if outcome.to_skip() || !config.spell_check_enabled() {
            return Ok(outcome);
        }

        match &self.spelling {
            Some(adapter) => adapter.maybe_correct(token, Classification::Keep, outcome, config),
            None => Ok(outcome),
        }
    }

    /// Rule names in priority order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.rule_names()
    }
}

impl Default for TokenNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
