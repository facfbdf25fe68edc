//! # strnorm - String Normalization Helpers
//!
//! This crate provides a small set of text normalization utilities for code
//! that has to cope with text of unknown encoding.
//!
//! ## Features
//!
//! - **UTF-8 detection**: a lenient, structural check that also accepts the
//!   historical five- and six-byte sequences
//! - **Accent removal**: transliterate Latin-1, Latin Extended-A, Romanian,
//!   Vietnamese and Pinyin characters to ASCII, for UTF-8 and for legacy
//!   ISO-8859-1 input
//! - **Locale digraphs**: opt-in German, Danish and Catalan spellings
//! - **Flattening**: collapse arbitrarily nested sequences into one vector
//! - **Byte-safe regions**: temporarily force byte-for-byte length semantics
//!   when the host overloads them with a multi-byte interpretation
//!
//! ## Quick Start
//!
//! ```
//! use strnorm::{flatten, is_valid_utf8, remove_accents, remove_accents_str, Nested};
//!
//! assert!(is_valid_utf8("Fran\u{e7}ois".as_bytes()));
//! assert_eq!(remove_accents_str("Fran\u{e7}ois"), "Francois");
//!
//! // Not UTF-8, so treated as ISO-8859-1
//! assert_eq!(&*remove_accents(b"\xE6on"), b"aeon");
//!
//! let nested = vec![Nested::list([Nested::Scalar("a"), Nested::Null]), Nested::Scalar("b")];
//! assert_eq!(flatten(&nested, Vec::new()), vec!["a", "b"]);
//! ```
//!
//! ## Architecture
//!
//! - [`encoding`]: interpretation-mode guard and the UTF-8 scanner
//! - [`transliterate`]: accent removal and its static tables
//! - [`utils`]: the sequence flattener
//! - [`config`]: process-wide settings, detected once
//!
//! ## Error Handling
//!
//! The core transforms never fail. Opt-in surfaces (depth-checked flattening,
//! locale parsing, configuration) return [`Result<T>`] with [`NormError`],
//! built with `snafu`.

pub mod config;
pub mod encoding;
pub mod error;
pub mod transliterate;
pub mod utils;

// Re-export commonly used items for convenience
pub use encoding::{ByteSafeGuard, enter, exit, is_valid_utf8, with_byte_safe_encoding};
pub use transliterate::{
    Locale, remove_accents, remove_accents_for_locale, remove_accents_str,
    remove_accents_str_for_locale,
};
pub use utils::{Nested, flatten, flatten_bounded, flatten_checked};

// Re-export error types for convenience
pub use error::{NormError, Result, snafu};
