//! Error types and result type for the strnorm crate.
//!
//! The core transforms (`is_valid_utf8`, `remove_accents`, `flatten`,
//! `with_byte_safe_encoding`) are total and never fail. Errors only come from
//! the opt-in surfaces: the depth-checked flattener, locale tag parsing and
//! process configuration.
//!
//! # Examples
//!
//! ```
//! use strnorm::{Result, NormError};
//!
//! fn parse_tag(tag: &str) -> Result<()> {
//!     Err(NormError::invalid_parameter(format!("Unknown locale: {}", tag)))
//! }
//!
//! assert!(parse_tag("xx_XX").is_err());
//! ```
//!
//! # Error Variants
//!
//! - [`NormError::InvalidInput`]: input outside the documented domain (too deeply nested)
//! - [`NormError::InvalidParameter`]: unknown locale tags, encoding labels, double configuration
//! - [`NormError::ParserError`]: configuration could not be parsed

use snafu::{Snafu, Backtrace};

// Re-export snafu for context providers
pub use snafu;

/// Main error type for the strnorm crate.
///
/// All errors include automatic backtrace capture for debugging purposes.
/// Use the helper methods on `NormError` for convenient error construction.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum NormError {
    /// Input is outside the domain an operation accepts.
    #[snafu(display("Invalid input: {message}"))]
    InvalidInput {
        message: String,
        backtrace: Backtrace,
    },

    /// Function was called with invalid parameters.
    #[snafu(display("Invalid parameter: {message}"))]
    InvalidParameter {
        message: String,
        backtrace: Backtrace,
    },

    /// Error parsing JSON configuration.
    #[snafu(display("Parser error: {source}"))]
    ParserError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        backtrace: Backtrace,
    },
}

impl From<serde_json::Error> for NormError {
    fn from(source: serde_json::Error) -> Self {
        Self::ParserError {
            source: Box::new(source),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Helper methods for creating errors without context providers.
impl NormError {
    /// Creates an `InvalidInput` error with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use strnorm::NormError;
    ///
    /// let error = NormError::invalid_input("nesting deeper than 512 levels");
    /// assert!(error.is_invalid_input());
    /// ```
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidParameter` error with the given message.
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidParameter` error for an encoding label `encoding_rs` does not know.
    pub fn unknown_encoding<S: Into<String>>(label: S) -> Self {
        Self::InvalidParameter {
            message: format!("Invalid encoding: {}", label.into()),
            backtrace: Backtrace::capture(),
        }
    }

    /// Checks if this error is an `InvalidInput` variant.
    pub fn is_invalid_input(&self) -> bool {
        if let NormError::InvalidInput { .. } = self {
            return true;
        }
        false
    }
}

/// A specialized `Result` type for strnorm operations.
pub type Result<T> = std::result::Result<T, NormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = NormError::invalid_input("too deep");
        assert_eq!(e.to_string(), "Invalid input: too deep");
        assert!(e.is_invalid_input());

        let e = NormError::unknown_encoding("klingon");
        assert_eq!(e.to_string(), "Invalid parameter: Invalid encoding: klingon");
        assert!(!e.is_invalid_input());
    }

    #[test]
    fn test_from_serde_json() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: NormError = source.into();
        assert!(matches!(e, NormError::ParserError { .. }));
        assert!(e.to_string().starts_with("Parser error:"));
    }
}
