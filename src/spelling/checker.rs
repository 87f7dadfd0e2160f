//! Spell-checker collaborator.

use crate::error::Result;

/// Dictionary membership and single-best correction.
///
/// The trait requires `Send + Sync` so one checker can serve documents
/// annotated concurrently. Wrap a checker that is only `Send` in
/// [`Serialized`](crate::util::serialized::Serialized).
///
/// # Examples
///
/// ```
/// use clinorm::error::Result;
/// use clinorm::spelling::checker::SpellChecker;
///
/// struct NeverWrong;
///
/// impl SpellChecker for NeverWrong {
///     fn contains(&self, _word: &str) -> Result<bool> {
///         Ok(true)
///     }
///
///     fn fix(&self, _word: &str) -> Result<Option<String>> {
///         Ok(None)
///     }
///
///     fn name(&self) -> &'static str {
///         "never_wrong"
///     }
/// }
/// ```
pub trait SpellChecker: Send + Sync {
    /// Whether the word is recognized as correctly spelled.
    fn contains(&self, word: &str) -> Result<bool>;

    /// The best single correction for a word, if any.
    fn fix(&self, word: &str) -> Result<Option<String>>;

    /// Get the name of this checker (for logging and error reports).
    fn name(&self) -> &'static str;
}
