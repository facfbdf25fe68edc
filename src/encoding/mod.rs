// Encoding detection and interpretation-mode handling
//
// This module provides the lenient UTF-8 scanner used to pick a transliteration
// table, and the save/restore stack that keeps byte counts stable when the host
// overloads length semantics.

pub mod mode_guard;
pub mod utf8_scan;

pub use mode_guard::{
    ByteSafeGuard, EnvironmentGuard, TextEnvironment,
    byte_safe_encoding, enter, exit, with_byte_safe_encoding,
};
pub use utf8_scan::{ScanError, ScanErrorKind, is_valid_utf8, scan_utf8, sequence_len};
