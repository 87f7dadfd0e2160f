//! Error types for the clinorm library.
//!
//! All fallible operations return [`ClinormError`] through the crate-wide
//! [`Result`] alias. Two families matter to callers:
//!
//! - configuration errors, raised once while a
//!   [`NormalizationConfig`](crate::analysis::config::NormalizationConfig) is
//!   compiled (bad pattern, missing option), and
//! - collaborator errors, raised when a lemmatizer or spell checker call fails
//!   while a particular token is being annotated.
//!
//! # Examples
//!
//! ```
//! use clinorm::error::{ClinormError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(ClinormError::config("missing required option `punctuation_pattern`"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for clinorm operations.
#[derive(Error, Debug)]
pub enum ClinormError {
    /// I/O errors (config, lexicon or dictionary files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors (malformed pattern, missing required option)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A lemmatizer or spell checker call failed.
    ///
    /// `position` is the index of the offending token when the failure
    /// happened while annotating a token, `None` for document-level calls.
    #[error("{}", format_collaborator(.collaborator, .position, .message))]
    Collaborator {
        collaborator: String,
        position: Option<usize>,
        message: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

fn format_collaborator(collaborator: &str, position: &Option<usize>, message: &str) -> String {
    match position {
        Some(position) => {
            format!("Collaborator error ({collaborator}) at token {position}: {message}")
        }
        None => format!("Collaborator error ({collaborator}): {message}"),
    }
}

/// Result type alias for operations that may fail with ClinormError.
pub type Result<T> = std::result::Result<T, ClinormError>;

impl ClinormError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ClinormError::Config(msg.into())
    }

    /// Create a configuration error for an option that was not supplied.
    pub fn missing_option(name: &str) -> Self {
        ClinormError::Config(format!("missing required option `{name}`"))
    }

    /// Create a new collaborator error that is not yet tied to a token.
    pub fn collaborator<N: Into<String>, S: Into<String>>(collaborator: N, msg: S) -> Self {
        ClinormError::Collaborator {
            collaborator: collaborator.into(),
            position: None,
            message: msg.into(),
        }
    }

    /// Attach the offending token position to a collaborator error.
    ///
    /// Other variants are returned unchanged.
    pub fn at_position(self, token_position: usize) -> Self {
        match self {
            ClinormError::Collaborator {
                collaborator,
                message,
                ..
            } => ClinormError::Collaborator {
                collaborator,
                position: Some(token_position),
                message,
            },
            other => other,
        }
    }

    /// Report a failed call into a collaborator.
    ///
    /// Collaborator errors pass through unchanged; any other error is wrapped
    /// so callers can tell collaborator failures apart by variant.
    pub fn from_collaborator(collaborator: &str, error: ClinormError) -> Self {
        match error {
            ClinormError::Collaborator { .. } => error,
            other => ClinormError::collaborator(collaborator, other.to_string()),
        }
    }

    /// Token position of a collaborator error, if known.
    pub fn position(&self) -> Option<usize> {
        match self {
            ClinormError::Collaborator { position, .. } => *position,
            _ => None,
        }
    }

    /// Whether this error was raised while building the configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, ClinormError::Config(_))
    }

    /// Whether this error came from a collaborator call.
    pub fn is_collaborator(&self) -> bool {
        matches!(self, ClinormError::Collaborator { .. })
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ClinormError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ClinormError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = ClinormError::config("bad pattern");
        assert_eq!(error.to_string(), "Configuration error: bad pattern");
        assert!(error.is_config());

        let error = ClinormError::missing_option("skip_word_pattern");
        assert_eq!(
            error.to_string(),
            "Configuration error: missing required option `skip_word_pattern`"
        );
    }

    #[test]
    fn test_collaborator_position() {
        let error = ClinormError::collaborator("dictionary", "backend offline");
        assert_eq!(error.position(), None);
        assert_eq!(
            error.to_string(),
            "Collaborator error (dictionary): backend offline"
        );

        let error = error.at_position(7);
        assert!(error.is_collaborator());
        assert_eq!(error.position(), Some(7));
        assert_eq!(
            error.to_string(),
            "Collaborator error (dictionary) at token 7: backend offline"
        );
    }

    #[test]
    fn test_from_collaborator_wraps_other_errors() {
        let io_error = io::Error::new(io::ErrorKind::TimedOut, "slow");
        let error = ClinormError::from_collaborator("lexicon", io_error.into()).at_position(2);
        assert!(error.is_collaborator());
        assert_eq!(
            error.to_string(),
            "Collaborator error (lexicon) at token 2: I/O error: slow"
        );
    }

    #[test]
    fn test_at_position_leaves_other_variants() {
        let error = ClinormError::other("boom").at_position(3);
        assert_eq!(error.position(), None);
        assert_eq!(error.to_string(), "Error: boom");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = ClinormError::from(io_error);

        match error {
            ClinormError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
