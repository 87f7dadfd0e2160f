//! Annotation pipeline: classify, normalize, spell-correct.
//!
//! [`AnnotationPipeline`] is the entry point of the crate. It owns the shared
//! immutable configuration, both rule engines and the collaborators, and turns
//! a document (raw text or pre-tokenized) into [`DocumentAnnotations`]: one
//! [`TokenAnnotation`] per token, in token order.
//!
//! ```text
//! token ─▶ classify ─┬─▶ skip ───────────────────────────────▶ annotation
//!                    └─▶ keep ─▶ normalize ─▶ spell-correct ──▶ annotation
//! ```
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use clinorm::analysis::config::NormalizationConfig;
//! use clinorm::analysis::lemmatizer::LexiconLemmatizer;
//! use clinorm::analysis::pipeline::AnnotationPipeline;
//!
//! let config = NormalizationConfig::builder()
//!     .punctuation_pattern(r"^[.,!?;:]+$")
//!     .skip_word_pattern(r"^(the|a|an)$")
//!     .min_len_normalize(4)
//!     .build()
//!     .unwrap();
//! let lemmatizer = LexiconLemmatizer::new().with_entry("running", "run", Some("VERB"));
//!
//! let pipeline = AnnotationPipeline::builder(Arc::new(config), Arc::new(lemmatizer)).build();
//! let doc = pipeline.annotate_text("The running.").unwrap();
//!
//! assert!(doc.get(0).unwrap().to_skip);
//! assert_eq!(doc.get(1).unwrap().form(), Some("run"));
//! assert!(doc.get(2).unwrap().is_punctuation);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{trace, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::classifier::{Classification, TokenClassifier};
use crate::analysis::config::NormalizationConfig;
use crate::analysis::lemmatizer::Lemmatizer;
use crate::analysis::normalizer::TokenNormalizer;
use crate::analysis::token::{SkipReason, Token, TokenAnnotation};
use crate::error::{ClinormError, Result};
use crate::spelling::adapter::SpellCorrectionAdapter;
use crate::spelling::checker::SpellChecker;

/// What to do when a collaborator call fails for a single token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaboratorErrorPolicy {
    /// Skip the token, record an incident and continue with the document.
    #[default]
    SkipToken,
    /// Abort the document and return the error.
    Propagate,
}

/// A collaborator failure absorbed by [`CollaboratorErrorPolicy::SkipToken`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIncident {
    pub position: usize,
    pub message: String,
}

/// Annotations for one document, indexed like the token sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAnnotations {
    annotations: Vec<TokenAnnotation>,
    incidents: Vec<TokenIncident>,
    cancelled: bool,
}

impl DocumentAnnotations {
    /// Annotation at `index` in the annotated token slice.
    ///
    /// For tokens produced by [`Lemmatizer::analyze`] the index equals the
    /// token position. Use [`TokenAnnotation::position`] when annotating a
    /// slice taken from the middle of a document.
    pub fn get(&self, index: usize) -> Option<&TokenAnnotation> {
        self.annotations.get(index)
    }

    pub fn annotations(&self) -> &[TokenAnnotation] {
        &self.annotations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenAnnotation> {
        self.annotations.iter()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Collaborator failures that were turned into skipped tokens.
    pub fn incidents(&self) -> &[TokenIncident] {
        &self.incidents
    }

    /// Whether annotation stopped early because of a cancellation request.
    ///
    /// A cancelled document holds only the tokens fully annotated before the
    /// request was seen.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Positions and normalized forms of the tokens kept for matching.
    pub fn kept(&self) -> impl Iterator<Item = (usize, &str)> {
        self.annotations
            .iter()
            .filter_map(|a| a.form().map(|form| (a.position, form)))
    }
}

impl<'a> IntoIterator for &'a DocumentAnnotations {
    type Item = &'a TokenAnnotation;
    type IntoIter = std::slice::Iter<'a, TokenAnnotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}

/// Builder for [`AnnotationPipeline`].
pub struct AnnotationPipelineBuilder {
    config: Arc<NormalizationConfig>,
    lemmatizer: Arc<dyn Lemmatizer>,
    spell_checker: Option<Arc<dyn SpellChecker>>,
    error_policy: CollaboratorErrorPolicy,
}

impl AnnotationPipelineBuilder {
    /// Attach a spell checker. It is only consulted when the configuration
    /// enables spell checking.
    pub fn spell_checker(mut self, checker: Arc<dyn SpellChecker>) -> Self {
        self.spell_checker = Some(checker);
        self
    }

    pub fn error_policy(mut self, policy: CollaboratorErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn build(self) -> AnnotationPipeline {
        let mut normalizer = TokenNormalizer::new();
        match self.spell_checker {
            Some(checker) => {
                normalizer = normalizer.with_spelling(SpellCorrectionAdapter::new(
                    checker,
                    Arc::clone(&self.lemmatizer),
                ));
            }
            None if self.config.spell_check_enabled() => {
                warn!("spell checking is enabled but no spell checker was supplied; skipping correction");
            }
            None => {}
        }

        AnnotationPipeline {
            config: self.config,
            classifier: TokenClassifier::new(),
            normalizer,
            lemmatizer: self.lemmatizer,
            error_policy: self.error_policy,
        }
    }
}

/// Classifies and normalizes tokens for concept lookup.
///
/// The pipeline holds no mutable state; one instance can annotate any number
/// of documents, from any number of threads.
pub struct AnnotationPipeline {
    config: Arc<NormalizationConfig>,
    classifier: TokenClassifier,
    normalizer: TokenNormalizer,
    lemmatizer: Arc<dyn Lemmatizer>,
    error_policy: CollaboratorErrorPolicy,
}

impl AnnotationPipeline {
    /// Start building a pipeline.
    pub fn builder(
        config: Arc<NormalizationConfig>,
        lemmatizer: Arc<dyn Lemmatizer>,
    ) -> AnnotationPipelineBuilder {
        AnnotationPipelineBuilder {
            config,
            lemmatizer,
            spell_checker: None,
            error_policy: CollaboratorErrorPolicy::default(),
        }
    }

    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    pub fn classifier(&self) -> &TokenClassifier {
        &self.classifier
    }

    pub fn normalizer(&self) -> &TokenNormalizer {
        &self.normalizer
    }

    pub fn error_policy(&self) -> CollaboratorErrorPolicy {
        self.error_policy
    }

    /// Annotate one token.
    ///
    /// Errors come only from collaborator calls and carry the token position.
    /// The error policy is not applied here.
    pub fn annotate_token(&self, token: &Token) -> Result<TokenAnnotation> {
        let classification = self.classifier.classify(token, &self.config);
        trace!("token {} {:?}: {:?}", token.position, token.text, classification);

        if let Classification::Skip(reason) = classification {
            return Ok(TokenAnnotation::skipped(token.position, reason));
        }

        let normalization = self.normalizer.normalize_kept(token, &self.config)?;
        Ok(match normalization.skip_reason {
            Some(reason) => TokenAnnotation::skipped(token.position, reason),
            None => TokenAnnotation::normalized(
                token.position,
                normalization.form,
                normalization.source,
            ),
        })
    }

    /// Annotate a token sequence in order.
    pub fn annotate_tokens(&self, tokens: &[Token]) -> Result<DocumentAnnotations> {
        self.annotate_tokens_with_cancel(tokens, &AtomicBool::new(false))
    }

    /// Annotate a token sequence, stopping between tokens once `cancel` is set.
    pub fn annotate_tokens_with_cancel(
        &self,
        tokens: &[Token],
        cancel: &AtomicBool,
    ) -> Result<DocumentAnnotations> {
        let mut document = DocumentAnnotations {
            annotations: Vec::with_capacity(tokens.len()),
            ..Default::default()
        };

        for token in tokens {
            if cancel.load(Ordering::Acquire) {
                document.cancelled = true;
                break;
            }

            match self.annotate_token(token) {
                Ok(annotation) => document.annotations.push(annotation),
                Err(e)
                    if e.is_collaborator()
                        && self.error_policy == CollaboratorErrorPolicy::SkipToken =>
                {
                    warn!("skipping token {} {:?}: {e}", token.position, token.text);
                    document.incidents.push(TokenIncident {
                        position: token.position,
                        message: e.to_string(),
                    });
                    document.annotations.push(TokenAnnotation::skipped(
                        token.position,
                        SkipReason::CollaboratorFailure,
                    ));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(document)
    }

    /// Tokenize a document with the lemmatizer and annotate it.
    ///
    /// A failing tokenizer call is always returned as an error; the error
    /// policy only covers per-token calls.
    pub fn annotate_text(&self, text: &str) -> Result<DocumentAnnotations> {
        let tokens = self
            .lemmatizer
            .analyze(text)
            .map_err(|e| ClinormError::from_collaborator(self.lemmatizer.name(), e))?;
        self.annotate_tokens(&tokens)
    }

    /// Annotate independent documents in parallel.
    ///
    /// Results come back in input order.
    pub fn annotate_documents<S>(&self, texts: &[S]) -> Vec<Result<DocumentAnnotations>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.annotate_text(text.as_ref()))
            .collect()
    }

    /// Annotate independent pre-tokenized documents in parallel.
    pub fn annotate_token_documents(
        &self,
        documents: &[Vec<Token>],
    ) -> Vec<Result<DocumentAnnotations>> {
        documents
            .par_iter()
            .map(|tokens| self.annotate_tokens(tokens))
            .collect()
    }

    /// Tokenize a document without annotating it.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        self.lemmatizer
            .analyze(text)
            .map_err(|e| ClinormError::from_collaborator(self.lemmatizer.name(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lemmatizer::LexiconLemmatizer;
    use crate::analysis::token::{NormalizationSource, PRONOUN_LEMMA};

    fn pipeline() -> AnnotationPipeline {
        let config = NormalizationConfig::builder()
            .punctuation_pattern(r"^[.,!?;:]+$")
            .skip_word_pattern(r"^(the|a|an)$")
            .min_len_normalize(4)
            .build()
            .unwrap();
        let lemmatizer = LexiconLemmatizer::new()
            .with_entry("running", "run", Some("VERB"))
            .with_entry("themselves", PRONOUN_LEMMA, Some("PRP"));
        AnnotationPipeline::builder(Arc::new(config), Arc::new(lemmatizer)).build()
    }

    #[test]
    fn test_annotate_text() {
        let doc = pipeline().annotate_text("The patients themselves were running.").unwrap();
        assert_eq!(doc.len(), 6);

        let skipped: Vec<Option<SkipReason>> = doc.iter().map(|a| a.skip_reason).collect();
        assert_eq!(
            skipped,
            vec![
                Some(SkipReason::SkipWord),
                None,
                Some(SkipReason::Pronoun),
                None,
                None,
                Some(SkipReason::Punctuation),
            ]
        );

        let kept: Vec<(usize, &str)> = doc.kept().collect();
        assert_eq!(kept, vec![(1, "patients"), (3, "were"), (4, "run")]);
        assert_eq!(doc.get(3).unwrap().normalized_by, Some(NormalizationSource::Lemma));
        assert!(doc.incidents().is_empty());
        assert!(!doc.is_cancelled());
    }

    #[test]
    fn test_pronoun_annotation_has_no_form() {
        let doc = pipeline().annotate_text("themselves").unwrap();
        let annotation = doc.get(0).unwrap();
        assert!(annotation.to_skip);
        assert!(!annotation.is_punctuation);
        assert_eq!(annotation.normalized_form, None);
    }

    #[test]
    fn test_cancelled_before_start() {
        let tokens = pipeline().tokenize("running fever").unwrap();
        let cancel = AtomicBool::new(true);
        let doc = pipeline().annotate_tokens_with_cancel(&tokens, &cancel).unwrap();
        assert!(doc.is_cancelled());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_annotate_documents_preserves_order() {
        let pipeline = pipeline();
        let texts = vec!["running", "the", "fever", "."];
        let results = pipeline.annotate_documents(&texts);

        let forms: Vec<Option<String>> = results
            .into_iter()
            .map(|r| r.unwrap().get(0).unwrap().normalized_form.clone())
            .collect();
        assert_eq!(
            forms,
            vec![Some("run".to_string()), None, Some("fever".to_string()), None]
        );
    }

    #[test]
    fn test_policy_defaults_to_skip_token() {
        assert_eq!(pipeline().error_policy(), CollaboratorErrorPolicy::SkipToken);
    }

    #[test]
    fn test_get_indexes_annotated_slice() {
        let tokens = vec![
            Token::new("running", 10).with_lemma("run"),
            Token::new(".", 11),
        ];
        let doc = pipeline().annotate_tokens(&tokens).unwrap();

        assert_eq!(doc.get(0).unwrap().position, 10);
        assert_eq!(doc.get(0).unwrap().form(), Some("run"));
        assert_eq!(doc.get(1).unwrap().position, 11);
        assert!(doc.get(10).is_none());

        let kept: Vec<(usize, &str)> = doc.kept().collect();
        assert_eq!(kept, vec![(10, "run")]);
    }

    #[test]
    fn test_builder_attaches_spelling() {
        use crate::spelling::corrector::DictionaryCorrector;
        use crate::spelling::dictionary::SpellingDictionary;

        assert!(!pipeline().normalizer().has_spelling());

        let config = NormalizationConfig::builder()
            .punctuation_pattern(r"^[.,!?;:]+$")
            .skip_word_pattern(r"^(the|a|an)$")
            .spell_check(true, 5)
            .build()
            .unwrap();
        let checker = DictionaryCorrector::new(SpellingDictionary::from_words(["fever"]));
        let pipeline = AnnotationPipeline::builder(Arc::new(config), Arc::new(LexiconLemmatizer::new()))
            .spell_checker(Arc::new(checker))
            .build();
        assert!(pipeline.normalizer().has_spelling());
    }
}
