//! Tokenizer/lemmatizer collaborator.
//!
//! Tokenization and lemmatization happen outside this crate. The core only
//! needs two things from that collaborator: an ordered token sequence for a
//! document, and a single-word re-lemmatization used when a spell-correction
//! candidate replaces a token.
//!
//! [`lexicon::LexiconLemmatizer`] is a small lookup-table implementation used
//! by the CLI and the tests.
//!
//! # Examples
//!
//! Implementing a custom lemmatizer:
//!
//! ```
//! use clinorm::analysis::lemmatizer::Lemmatizer;
//! use clinorm::analysis::token::Token;
//! use clinorm::error::Result;
//!
//! struct CommaLemmatizer;
//!
//! impl Lemmatizer for CommaLemmatizer {
//!     fn analyze(&self, text: &str) -> Result<Vec<Token>> {
//!         Ok(text
//!             .split(',')
//!             .enumerate()
//!             .map(|(i, s)| Token::new(s.trim(), i))
//!             .collect())
//!     }
//!
//!     fn lemmatize_word(&self, word: &str) -> Result<Token> {
//!         Ok(Token::new(word, 0))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "comma"
//!     }
//! }
//! ```

use crate::analysis::token::Token;
use crate::error::Result;

/// Produces lemmatized tokens for the annotation pipeline.
///
/// The trait requires `Send + Sync` so one instance can serve documents
/// annotated concurrently. Wrap a collaborator that is only `Send` in
/// [`Serialized`](crate::util::serialized::Serialized).
pub trait Lemmatizer: Send + Sync {
    /// Tokenize and lemmatize a document.
    ///
    /// Tokens must come back in document order with `position` equal to their
    /// index in the returned vector.
    fn analyze(&self, text: &str) -> Result<Vec<Token>>;

    /// Lemmatize a single word, such as a spell-correction candidate.
    fn lemmatize_word(&self, word: &str) -> Result<Token>;

    /// Get the name of this lemmatizer (for logging and error reports).
    fn name(&self) -> &'static str;
}

pub mod lexicon;

pub use lexicon::LexiconLemmatizer;
