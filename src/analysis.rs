//! Token classification and normalization.
//!
//! Tokens come from a [`Lemmatizer`](lemmatizer::Lemmatizer) collaborator and
//! pass through two ordered rule chains: the [`classifier`] decides whether a
//! token is skipped, and the [`normalizer`] computes the lookup form of every
//! kept token. [`pipeline::AnnotationPipeline`] ties both together.

pub mod classifier;
pub mod config;
pub mod lemmatizer;
pub mod normalizer;
pub mod pipeline;
pub mod rule;
pub mod token;

pub use classifier::{Classification, TokenClassifier};
pub use config::{NormalizationConfig, NormalizationSettings};
pub use lemmatizer::{Lemmatizer, LexiconLemmatizer};
pub use normalizer::{Normalization, TokenNormalizer};
pub use pipeline::{AnnotationPipeline, CollaboratorErrorPolicy, DocumentAnnotations};
pub use token::{NormalizationSource, SkipReason, Token, TokenAnnotation};
