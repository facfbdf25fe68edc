//! Accent transliteration.
//!
//! [`remove_accents`] replaces accented Latin, Vietnamese and a few Pinyin
//! characters with their closest ASCII spelling. The input is classified with
//! the lenient UTF-8 scanner first:
//!
//! - valid UTF-8: every code point found in [`tables::UTF8_TABLE`] is replaced;
//! - anything else is treated as ISO-8859-1: bytes are translated one-for-one
//!   through the legacy table, and ligatures such as 0xE6 ("æ") expand to two
//!   characters.
//!
//! Pure ASCII input is returned untouched without being scanned.
//!
//! # Examples
//!
//! ```
//! use strnorm::{remove_accents, remove_accents_str};
//!
//! assert_eq!(remove_accents_str("Fran\u{e7}ois"), "Francois");
//! assert_eq!(&*remove_accents(b"\xC2\xA3100"), b"100");
//! assert_eq!(&*remove_accents(b"\xE2\x82\xAC50"), b"E50");
//! assert_eq!(&*remove_accents(b"\xE6"), b"ae");
//! ```

pub mod locale;
pub mod tables;

pub use locale::Locale;

use std::borrow::Cow;

use log::debug;

use crate::encoding::utf8_scan::{scan_utf8, sequence_len};
use tables::{LEGACY_TABLE, UTF8_TABLE, Utf8Table};

/// Replaces recognised accented characters with ASCII equivalents.
///
/// Returns the input borrowed when nothing needed replacing.
pub fn remove_accents(input: &[u8]) -> Cow<'_, [u8]> {
    remove_accents_for_locale(input, None)
}

/// Like [`remove_accents`], additionally applying `locale`'s digraph rules.
///
/// Locale rules only apply to UTF-8 input; legacy single-byte input is
/// transliterated exactly as without a locale.
///
/// ```
/// use strnorm::{Locale, remove_accents_for_locale};
///
/// let text = "Gr\u{f6}\u{df}e".as_bytes();
/// assert_eq!(&*remove_accents_for_locale(text, None), b"Grose");
/// assert_eq!(&*remove_accents_for_locale(text, Some(Locale::German)), b"Groesse");
/// ```
pub fn remove_accents_for_locale(input: &[u8], locale: Option<Locale>) -> Cow<'_, [u8]> {
    if input.is_ascii() {
        return Cow::Borrowed(input);
    }
    match scan_utf8(input) {
        Ok(()) => {
            debug!("Transliterating {} bytes as UTF-8", input.len());
            transliterate_utf8(input, locale)
        }
        Err(e) => {
            debug!("Input is not UTF-8 ({}), assuming ISO-8859-1", e);
            transliterate_legacy(input)
        }
    }
}

/// [`remove_accents`] for text already known to be UTF-8.
pub fn remove_accents_str(text: &str) -> Cow<'_, str> {
    remove_accents_str_for_locale(text, None)
}

/// [`remove_accents_for_locale`] for text already known to be UTF-8.
pub fn remove_accents_str_for_locale(text: &str, locale: Option<Locale>) -> Cow<'_, str> {
    match remove_accents_for_locale(text.as_bytes(), locale) {
        Cow::Borrowed(_) => Cow::Borrowed(text),
        // whole code points are replaced by ASCII, so the result stays UTF-8
        Cow::Owned(bytes) => Cow::Owned(
            String::from_utf8(bytes)
                .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()),
        ),
    }
}

fn transliterate_utf8(input: &[u8], locale: Option<Locale>) -> Cow<'_, [u8]> {
    let overrides = locale.and_then(|l| l.overrides());
    match locale.and_then(|l| l.sequence_rule()) {
        Some((from, to)) => match replace_all(input, from.as_bytes(), to.as_bytes()) {
            Cow::Borrowed(joined) => replace_code_points(joined, overrides),
            Cow::Owned(joined) => Cow::Owned(replace_code_points(&joined, overrides).into_owned()),
        },
        None => replace_code_points(input, overrides),
    }
}

/// Walks `input` one sequence at a time, replacing table hits.
///
/// Table keys are complete sequences starting with a leader byte, so matching
/// only at sequence boundaries finds every occurrence in valid input.
fn replace_code_points<'a>(input: &'a [u8], overrides: Option<&Utf8Table>) -> Cow<'a, [u8]> {
    let mut output: Option<Vec<u8>> = None;
    let mut pos = 0;

    while pos < input.len() {
        let width = sequence_len(input[pos]).unwrap_or(1).min(input.len() - pos);
        let seq = &input[pos..pos + width];
        let replacement = if width > 1 {
            overrides
                .and_then(|table| table.get(seq))
                .or_else(|| UTF8_TABLE.get(seq))
        } else {
            None
        };

        if let Some(replacement) = replacement {
            let out = output.get_or_insert_with(|| {
                let mut out = Vec::with_capacity(input.len());
                out.extend_from_slice(&input[..pos]);
                out
            });
            out.extend_from_slice(replacement.as_bytes());
        } else if let Some(out) = output.as_mut() {
            out.extend_from_slice(seq);
        }
        pos += width;
    }

    match output {
        Some(out) => Cow::Owned(out),
        None => Cow::Borrowed(input),
    }
}

fn replace_all<'a>(haystack: &'a [u8], needle: &[u8], replacement: &[u8]) -> Cow<'a, [u8]> {
    if needle.is_empty() {
        return Cow::Borrowed(haystack);
    }
    let mut output: Option<Vec<u8>> = None;
    let mut pos = 0;
    let mut copied = 0;

    while pos + needle.len() <= haystack.len() {
        if &haystack[pos..pos + needle.len()] == needle {
            let out = output.get_or_insert_with(|| Vec::with_capacity(haystack.len()));
            out.extend_from_slice(&haystack[copied..pos]);
            out.extend_from_slice(replacement);
            pos += needle.len();
            copied = pos;
        } else {
            pos += 1;
        }
    }

    match output {
        Some(mut out) => {
            out.extend_from_slice(&haystack[copied..]);
            Cow::Owned(out)
        }
        None => Cow::Borrowed(haystack),
    }
}

fn transliterate_legacy(input: &[u8]) -> Cow<'_, [u8]> {
    let table = &*LEGACY_TABLE;
    let unchanged = input
        .iter()
        .all(|&b| table.digraph(b).is_none() && table.single(b) == b);
    if unchanged {
        return Cow::Borrowed(input);
    }

    let mut output = Vec::with_capacity(input.len() + input.len() / 8);
    for &byte in input {
        match table.digraph(byte) {
            Some(expansion) => output.extend_from_slice(expansion.as_bytes()),
            None => output.push(table.single(byte)),
        }
    }
    Cow::Owned(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::tables::{LEGACY_DIGRAPHS, LEGACY_SINGLE_IN, UTF8_PAIRS};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_ascii_is_borrowed() {
        for text in ["", "plain ascii", "tabs\tand\nnewlines", "\x00\x7F"] {
            let result = remove_accents(text.as_bytes());
            assert!(matches!(result, Cow::Borrowed(_)));
            assert_eq!(&*result, text.as_bytes());
        }
    }

    #[test]
    fn test_utf8_literal_cases() {
        init_logger();
        assert_eq!(&*remove_accents(b"Fran\xC3\xA7ois"), b"Francois");
        assert_eq!(&*remove_accents(b"\xC2\xA3100"), b"100");
        assert_eq!(&*remove_accents(b"\xE2\x82\xAC50"), b"E50");
        assert_eq!(remove_accents_str("Æsir Þór"), "AEsir THor");
        assert_eq!(remove_accents_str("Straße"), "Strase");
        assert_eq!(remove_accents_str("Łódź Żółć"), "Lodz Zolc");
        assert_eq!(remove_accents_str("Șțș Ţ"), "Sts T");
        assert_eq!(remove_accents_str("Tiếng Việt có dấu"), "Tieng Viet co dau");
        assert_eq!(remove_accents_str("Nguyễn Thị Minh Khai"), "Nguyen Thi Minh Khai");
        assert_eq!(remove_accents_str("ɑ"), "a");
    }

    #[test]
    fn test_unmapped_utf8_is_kept() {
        assert_eq!(remove_accents_str("日本語 é"), "日本語 e");
        assert_eq!(remove_accents_str("l·l ×÷"), "l·l ×÷");
        assert!(matches!(remove_accents_str("日本語"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_historical_sequences_keep_utf8_path() {
        let mut input = vec![0xF8, 0x88, 0x80, 0x80, 0x80];
        input.extend_from_slice("é".as_bytes());
        let mut expected = vec![0xF8, 0x88, 0x80, 0x80, 0x80];
        expected.push(b'e');
        assert_eq!(remove_accents(&input).into_owned(), expected);
    }

    #[test]
    fn test_legacy_path() {
        init_logger();
        assert_eq!(&*remove_accents(b"\xE6"), b"ae");
        assert_eq!(&*remove_accents(b"\xC6gir"), b"AEgir");
        assert_eq!(&*remove_accents(b"caf\xE9 cr\xE8me"), b"cafe creme");
        assert_eq!(&*remove_accents(b"\xDF\xFE\xF0\xD0\xDE"), b"ssthdhDHTH");
        assert_eq!(&*remove_accents(b"\x8Cuvre \x9Cuf"), b"OEuvre oeuf");
        assert_eq!(&*remove_accents(b"\x80 \x83 \xA2 \xA5 \xB5"), b"E f c Y u");
        // pound sign has no legacy replacement
        assert_eq!(&*remove_accents(b"\xA3"), b"\xA3");
        assert!(matches!(remove_accents(b"\xA3\xA9"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_legacy_entries_are_idempotent() {
        let bytes = LEGACY_SINGLE_IN
            .iter()
            .copied()
            .chain(LEGACY_DIGRAPHS.iter().map(|&(b, _)| b));
        for byte in bytes {
            let once = remove_accents(&[byte]).into_owned();
            assert!(once.is_ascii(), "{byte:#x}");
            assert_eq!(&*remove_accents(&once), &once[..], "{byte:#x}");
        }
    }

    #[test]
    fn test_utf8_entries_are_idempotent() {
        for &(from, to) in UTF8_PAIRS {
            let once = remove_accents_str(from).into_owned();
            assert_eq!(once, to);
            assert_eq!(remove_accents_str(&once), once);
        }
    }

    #[test]
    fn test_locale_rules() {
        assert_eq!(
            remove_accents_str_for_locale("Größe Übung", Some(Locale::German)),
            "Groesse Uebung"
        );
        assert_eq!(remove_accents_str("Größe Übung"), "Grose Ubung");
        assert_eq!(
            remove_accents_str_for_locale("Ærø Åbenrå", Some(Locale::Danish)),
            "Aeroe Aabenraa"
        );
        assert_eq!(remove_accents_str("Ærø Åbenrå"), "AEro Abenra");
        assert_eq!(
            remove_accents_str_for_locale("col·lecció", Some(Locale::Catalan)),
            "colleccio"
        );
        assert_eq!(remove_accents_str("col·lecció"), "col·leccio");
        // legacy input ignores locale rules
        assert_eq!(&*remove_accents_for_locale(b"\xE4", Some(Locale::German)), b"a");
    }

    #[test]
    fn test_replace_all() {
        assert_eq!(&*replace_all(b"abcabc", b"bc", b"X"), b"aXaX");
        assert_eq!(&*replace_all(b"aaa", b"aa", b"b"), b"ba");
        assert!(matches!(replace_all(b"abc", b"zz", b"y"), Cow::Borrowed(_)));
        assert!(matches!(replace_all(b"a", b"abc", b"y"), Cow::Borrowed(_)));
    }
}
