//! Spell correction for kept tokens.
//!
//! The [`checker::SpellChecker`] trait is the collaborator boundary. The
//! [`adapter`] decides when to consult it and how to normalize a correction.
//! [`corrector::DictionaryCorrector`] is an edit-distance implementation over
//! a word-frequency [`dictionary`].

pub mod adapter;
pub mod checker;
pub mod corrector;
pub mod dictionary;
pub mod levenshtein;

pub use adapter::SpellCorrectionAdapter;
pub use checker::SpellChecker;
pub use corrector::{CorrectorConfig, DictionaryCorrector};
pub use dictionary::SpellingDictionary;
