//! Mutex-serialized collaborators.
//!
//! The pipeline shares its collaborators across threads, so [`Lemmatizer`] and
//! [`SpellChecker`] require `Send + Sync`. Collaborators that need `&mut self`
//! (a caching checker, a handle to a single-threaded model) implement the
//! `*Mut` traits instead and are wrapped in [`Serialized`], which runs one call
//! at a time behind a `parking_lot::Mutex`.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use clinorm::error::Result;
//! use clinorm::spelling::checker::SpellChecker;
//! use clinorm::util::serialized::{Serialized, SpellCheckerMut};
//!
//! #[derive(Default)]
//! struct CountingChecker {
//!     seen: HashMap<String, usize>,
//! }
//!
//! impl SpellCheckerMut for CountingChecker {
//!     fn contains(&mut self, word: &str) -> Result<bool> {
//!         *self.seen.entry(word.to_string()).or_default() += 1;
//!         Ok(word == "fever")
//!     }
//!
//!     fn fix(&mut self, _word: &str) -> Result<Option<String>> {
//!         Ok(None)
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "counting"
//!     }
//! }
//!
//! let checker: Arc<dyn SpellChecker> = Arc::new(Serialized::new(CountingChecker::default()));
//! assert!(checker.contains("fever").unwrap());
//! assert_eq!(checker.name(), "counting");
//! ```

use parking_lot::Mutex;

use crate::analysis::lemmatizer::Lemmatizer;
use crate::analysis::token::Token;
use crate::error::Result;
use crate::spelling::checker::SpellChecker;

/// A lemmatizer that needs exclusive access for each call.
pub trait LemmatizerMut: Send {
    fn analyze(&mut self, text: &str) -> Result<Vec<Token>>;

    fn lemmatize_word(&mut self, word: &str) -> Result<Token>;

    fn name(&self) -> &'static str;
}

/// A spell checker that needs exclusive access for each call.
pub trait SpellCheckerMut: Send {
    fn contains(&mut self, word: &str) -> Result<bool>;

    fn fix(&mut self, word: &str) -> Result<Option<String>>;

    fn name(&self) -> &'static str;
}

/// Serializes calls into a collaborator that is not safe for concurrent use.
#[derive(Debug, Default)]
pub struct Serialized<T> {
    inner: Mutex<T>,
}

impl<T> Serialized<T> {
    pub fn new(inner: T) -> Self {
        Serialized {
            inner: Mutex::new(inner),
        }
    }

    /// Unwrap the collaborator.
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T: LemmatizerMut> Lemmatizer for Serialized<T> {
    fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        self.inner.lock().analyze(text)
    }

    fn lemmatize_word(&self, word: &str) -> Result<Token> {
        self.inner.lock().lemmatize_word(word)
    }

    fn name(&self) -> &'static str {
        self.inner.lock().name()
    }
}

impl<T: SpellCheckerMut> SpellChecker for Serialized<T> {
    fn contains(&self, word: &str) -> Result<bool> {
        self.inner.lock().contains(word)
    }

    fn fix(&self, word: &str) -> Result<Option<String>> {
        self.inner.lock().fix(word)
    }

    fn name(&self) -> &'static str {
        self.inner.lock().name()
    }
}
