//! # clinorm
//!
//! Token classification and normalization for clinical concept annotation.
//!
//! Given a lemmatized token sequence, clinorm decides for every token whether
//! it is punctuation, whether it should be excluded from concept matching,
//! and what normalized form should be used for lookup.
//!
//! ## Features
//!
//! - Ordered, first-match-wins rule chains for skipping and normalization
//! - Optional spell correction through a pluggable checker
//! - Immutable, shareable configuration validated at construction
//! - Parallel annotation of independent documents

pub mod analysis;
pub mod cli;
pub mod error;
pub mod spelling;
pub mod util;

pub mod prelude {
    pub use crate::analysis::{
        AnnotationPipeline, CollaboratorErrorPolicy, DocumentAnnotations, Lemmatizer,
        LexiconLemmatizer, NormalizationConfig, NormalizationSettings, SkipReason, Token,
        TokenAnnotation,
    };
    pub use crate::error::{ClinormError, Result};
    pub use crate::spelling::{DictionaryCorrector, SpellChecker, SpellingDictionary};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
