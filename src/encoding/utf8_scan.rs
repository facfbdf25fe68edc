//! Lenient UTF-8 detection.
//!
//! This is the structural check used to decide whether text is UTF-8 or a
//! legacy single-byte encoding. It follows the original (pre-RFC 3629) UTF-8
//! design, where a leader byte may announce up to five continuation bytes:
//!
//! | Bytes | Leader        | Continuation bytes |
//! |-------|---------------|--------------------|
//! | 1     | `0xxxxxxx`    | -                  |
//! | 2     | `110xxxxx`    | `10xxxxxx` × 1     |
//! | 3     | `1110xxxx`    | `10xxxxxx` × 2     |
//! | 4     | `11110xxx`    | `10xxxxxx` × 3     |
//! | 5     | `111110xx`    | `10xxxxxx` × 4     |
//! | 6     | `1111110x`    | `10xxxxxx` × 5     |
//!
//! Only the bit patterns are checked. Overlong forms, surrogates and code
//! points above U+10FFFF are accepted, so this is *not* a replacement for
//! `std::str::from_utf8`.

use snafu::Snafu;

use super::mode_guard;

/// Where and why a scan failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(display("{kind} at byte {offset}"))]
pub struct ScanError {
    /// Byte offset of the offending byte (the leader, for truncated sequences).
    pub offset: usize,
    pub kind: ScanErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// A continuation byte (0x80-0xBF), 0xFE or 0xFF where a leader was expected.
    InvalidLeader,
    /// A byte not matching `10xxxxxx` inside a multi-byte sequence.
    InvalidContinuation,
    /// Input ended before all announced continuation bytes were seen.
    Truncated,
}

impl core::fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLeader => write!(f, "invalid leader byte"),
            Self::InvalidContinuation => write!(f, "invalid continuation byte"),
            Self::Truncated => write!(f, "truncated sequence"),
        }
    }
}

/// Total sequence length announced by a leader byte, or `None` if the byte
/// cannot start a sequence.
///
/// ```
/// use strnorm::encoding::sequence_len;
///
/// assert_eq!(sequence_len(b'a'), Some(1));
/// assert_eq!(sequence_len(0xC3), Some(2));
/// assert_eq!(sequence_len(0xFC), Some(6));
/// assert_eq!(sequence_len(0x80), None);
/// ```
#[inline]
pub fn sequence_len(leader: u8) -> Option<usize> {
    match leader {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        0xF8..=0xFB => Some(5),
        0xFC..=0xFD => Some(6),
        // 0x80..=0xBF are continuation bytes, 0xFE and 0xFF never appear
        _ => None,
    }
}

#[inline]
fn is_continuation_byte(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Scans `input` and reports the first structural error.
pub fn scan_utf8(input: &[u8]) -> Result<(), ScanError> {
    // Measured under the byte-transparent mode so an overloaded host cannot
    // shorten the count to characters.
    let len = mode_guard::with_byte_safe_encoding(|| mode_guard::str_len(input)).min(input.len());
    let mut pos = 0;

    while pos < len {
        let seq_len = match sequence_len(input[pos]) {
            Some(1) => {
                pos += 1;
                continue;
            }
            Some(n) => n,
            None => {
                return Err(ScanError {
                    offset: pos,
                    kind: ScanErrorKind::InvalidLeader,
                });
            }
        };

        for i in 1..seq_len {
            let at = pos + i;
            if at >= len {
                return Err(ScanError {
                    offset: pos,
                    kind: ScanErrorKind::Truncated,
                });
            }
            if !is_continuation_byte(input[at]) {
                return Err(ScanError {
                    offset: at,
                    kind: ScanErrorKind::InvalidContinuation,
                });
            }
        }
        pos += seq_len;
    }
    Ok(())
}

/// Returns true if every sequence in `input` is structurally valid UTF-8,
/// including the historical five- and six-byte forms.
///
/// # Examples
///
/// ```
/// use strnorm::is_valid_utf8;
///
/// assert!(is_valid_utf8(b""));
/// assert!(is_valid_utf8("Fran\u{e7}ois".as_bytes()));
/// assert!(is_valid_utf8(&[0xF8, 0x88, 0x80, 0x80, 0x80]));
/// assert!(!is_valid_utf8(b"Fran\xE7ois"));
/// ```
pub fn is_valid_utf8(input: &[u8]) -> bool {
    scan_utf8(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::mode_guard::TextEnvironment;

    #[test]
    fn test_empty_and_ascii() {
        assert!(is_valid_utf8(b""));
        assert!(is_valid_utf8(b"Hello, world!\n\t\x00\x7F"));
    }

    #[test]
    fn test_modern_sequences() {
        assert!(is_valid_utf8("é".as_bytes()));
        assert!(is_valid_utf8("€".as_bytes()));
        assert!(is_valid_utf8("日本語".as_bytes()));
        assert!(is_valid_utf8("🎉".as_bytes()));
        assert!(is_valid_utf8("Tiếng Việt có dấu".as_bytes()));
    }

    #[test]
    fn test_historical_five_and_six_byte_forms() {
        for leader in 0xF8..=0xFB {
            assert!(is_valid_utf8(&[leader, 0x80, 0xBF, 0x80, 0xBF]), "leader {leader:#x}");
        }
        for leader in 0xFC..=0xFD {
            assert!(is_valid_utf8(&[leader, 0x80, 0x80, 0x80, 0x80, 0x80]), "leader {leader:#x}");
        }
        // a strict validator rejects all of these
        assert!(std::str::from_utf8(&[0xF8, 0x80, 0x80, 0x80, 0x80]).is_err());
    }

    #[test]
    fn test_lenient_about_code_point_ranges() {
        // overlong NUL
        assert!(is_valid_utf8(&[0xC0, 0x80]));
        // surrogate U+D800
        assert!(is_valid_utf8(&[0xED, 0xA0, 0x80]));
        // beyond U+10FFFF
        assert!(is_valid_utf8(&[0xF4, 0x90, 0x80, 0x80]));
    }

    #[test]
    fn test_invalid_leaders() {
        for byte in [0x80u8, 0xBF, 0xFE, 0xFF] {
            assert_eq!(
                scan_utf8(&[b'a', byte]),
                Err(ScanError { offset: 1, kind: ScanErrorKind::InvalidLeader })
            );
        }
    }

    #[test]
    fn test_invalid_continuation() {
        // second byte's top bits are 11, not 10
        assert_eq!(
            scan_utf8(&[0xC3, 0xC3]),
            Err(ScanError { offset: 1, kind: ScanErrorKind::InvalidContinuation })
        );
        assert_eq!(
            scan_utf8(&[0xE2, 0x82, b'A']),
            Err(ScanError { offset: 2, kind: ScanErrorKind::InvalidContinuation })
        );
        // latin-1 "é" followed by ASCII
        assert!(!is_valid_utf8(b"caf\xE9 au lait"));
    }

    #[test]
    fn test_truncated() {
        assert_eq!(
            scan_utf8(b"ab\xE2\x82"),
            Err(ScanError { offset: 2, kind: ScanErrorKind::Truncated })
        );
        assert_eq!(
            scan_utf8(&[0xFC, 0x80, 0x80, 0x80, 0x80]),
            Err(ScanError { offset: 0, kind: ScanErrorKind::Truncated })
        );
        assert!(!is_valid_utf8(&[0xC3]));
    }

    #[test]
    fn test_stable_under_overloaded_mode() {
        mode_guard::install(TextEnvironment::new(encoding_rs::UTF_8, true));
        // counted as 2 characters under UTF-8, but all 4 bytes must be scanned
        assert!(!is_valid_utf8(b"\xC3\xA9\xE2\x82"));
        assert!(is_valid_utf8("é€".as_bytes()));
        assert_eq!(mode_guard::active_mode(), encoding_rs::UTF_8);
        assert_eq!(mode_guard::depth(), 0);
    }

    #[test]
    fn test_error_display() {
        let e = ScanError { offset: 3, kind: ScanErrorKind::Truncated };
        assert_eq!(e.to_string(), "truncated sequence at byte 3");

        let e = scan_utf8(b"ok\xFF").unwrap_err();
        assert_eq!(e.to_string(), "invalid leader byte at byte 2");
        let boxed: Box<dyn std::error::Error> = Box::new(e);
        assert!(boxed.source().is_none());
    }
}
