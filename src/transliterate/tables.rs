//! Static transliteration tables.
//!
//! Two tables exist because the input is classified first: the UTF-8 table is
//! keyed by the byte sequence of one code point, the legacy table by single
//! ISO-8859-1 / windows-1252 bytes. Both are built once on first use.
//!
//! Authored pair lists are inserted in order, so a key listed twice keeps its
//! last replacement. [`UTF8_PAIRS`] itself lists every code point exactly once,
//! so the ordering rule only matters for tables built from other lists.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Replacement table keyed by the UTF-8 encoding of a single code point.
pub type Utf8Table = HashMap<&'static [u8], &'static str>;

/// Code point to ASCII replacements used when the input is UTF-8.
#[rustfmt::skip]
pub const UTF8_PAIRS: &[(&str, &str)] = &[
    // Latin-1 Supplement
    ("À", "A"), ("Á", "A"), ("Â", "A"), ("Ã", "A"),
    ("Ä", "A"), ("Å", "A"), ("Æ", "AE"), ("Ç", "C"),
    ("È", "E"), ("É", "E"), ("Ê", "E"), ("Ë", "E"),
    ("Ì", "I"), ("Í", "I"), ("Î", "I"), ("Ï", "I"),
    ("Ð", "D"), ("Ñ", "N"), ("Ò", "O"), ("Ó", "O"),
    ("Ô", "O"), ("Õ", "O"), ("Ö", "O"), ("Ù", "U"),
    ("Ú", "U"), ("Û", "U"), ("Ü", "U"), ("Ý", "Y"),
    ("Þ", "TH"), ("ß", "s"), ("à", "a"), ("á", "a"),
    ("â", "a"), ("ã", "a"), ("ä", "a"), ("å", "a"),
    ("æ", "ae"), ("ç", "c"), ("è", "e"), ("é", "e"),
    ("ê", "e"), ("ë", "e"), ("ì", "i"), ("í", "i"),
    ("î", "i"), ("ï", "i"), ("ð", "d"), ("ñ", "n"),
    ("ò", "o"), ("ó", "o"), ("ô", "o"), ("õ", "o"),
    ("ö", "o"), ("ø", "o"), ("ù", "u"), ("ú", "u"),
    ("û", "u"), ("ü", "u"), ("ý", "y"), ("þ", "th"),
    ("ÿ", "y"), ("Ø", "O"),
    // Latin Extended-A; ŉ Ŋ ŋ follow the N/n alternation of the authored list
    ("Ā", "A"), ("ā", "a"), ("Ă", "A"), ("ă", "a"),
    ("Ą", "A"), ("ą", "a"), ("Ć", "C"), ("ć", "c"),
    ("Ĉ", "C"), ("ĉ", "c"), ("Ċ", "C"), ("ċ", "c"),
    ("Č", "C"), ("č", "c"), ("Ď", "D"), ("ď", "d"),
    ("Đ", "D"), ("đ", "d"), ("Ē", "E"), ("ē", "e"),
    ("Ĕ", "E"), ("ĕ", "e"), ("Ė", "E"), ("ė", "e"),
    ("Ę", "E"), ("ę", "e"), ("Ě", "E"), ("ě", "e"),
    ("Ĝ", "G"), ("ĝ", "g"), ("Ğ", "G"), ("ğ", "g"),
    ("Ġ", "G"), ("ġ", "g"), ("Ģ", "G"), ("ģ", "g"),
    ("Ĥ", "H"), ("ĥ", "h"), ("Ħ", "H"), ("ħ", "h"),
    ("Ĩ", "I"), ("ĩ", "i"), ("Ī", "I"), ("ī", "i"),
    ("Ĭ", "I"), ("ĭ", "i"), ("Į", "I"), ("į", "i"),
    ("İ", "I"), ("ı", "i"), ("Ĳ", "IJ"), ("ĳ", "ij"),
    ("Ĵ", "J"), ("ĵ", "j"), ("Ķ", "K"), ("ķ", "k"),
    ("ĸ", "k"), ("Ĺ", "L"), ("ĺ", "l"), ("Ļ", "L"),
    ("ļ", "l"), ("Ľ", "L"), ("ľ", "l"), ("Ŀ", "L"),
    ("ŀ", "l"), ("Ł", "L"), ("ł", "l"), ("Ń", "N"),
    ("ń", "n"), ("Ņ", "N"), ("ņ", "n"), ("Ň", "N"),
    ("ň", "n"), ("ŉ", "N"), ("Ŋ", "n"), ("ŋ", "N"),
    ("Ō", "O"), ("ō", "o"), ("Ŏ", "O"), ("ŏ", "o"),
    ("Ő", "O"), ("ő", "o"), ("Œ", "OE"), ("œ", "oe"),
    ("Ŕ", "R"), ("ŕ", "r"), ("Ŗ", "R"), ("ŗ", "r"),
    ("Ř", "R"), ("ř", "r"), ("Ś", "S"), ("ś", "s"),
    ("Ŝ", "S"), ("ŝ", "s"), ("Ş", "S"), ("ş", "s"),
    ("Š", "S"), ("š", "s"), ("Ţ", "T"), ("ţ", "t"),
    ("Ť", "T"), ("ť", "t"), ("Ŧ", "T"), ("ŧ", "t"),
    ("Ũ", "U"), ("ũ", "u"), ("Ū", "U"), ("ū", "u"),
    ("Ŭ", "U"), ("ŭ", "u"), ("Ů", "U"), ("ů", "u"),
    ("Ű", "U"), ("ű", "u"), ("Ų", "U"), ("ų", "u"),
    ("Ŵ", "W"), ("ŵ", "w"), ("Ŷ", "Y"), ("ŷ", "y"),
    ("Ÿ", "Y"), ("Ź", "Z"), ("ź", "z"), ("Ż", "Z"),
    ("ż", "z"), ("Ž", "Z"), ("ž", "z"), ("ſ", "s"),
    // Latin Extended-B
    ("Ș", "S"), ("ș", "s"), ("Ț", "T"), ("ț", "t"),
    // Euro sign
    ("€", "E"),
    // Pound sign
    ("£", ""),
    // Vietnamese vowels, unmarked
    ("Ơ", "O"), ("ơ", "o"), ("Ư", "U"), ("ư", "u"),
    // Vietnamese, grave accent
    ("Ầ", "A"), ("ầ", "a"), ("Ằ", "A"), ("ằ", "a"),
    ("Ề", "E"), ("ề", "e"), ("Ồ", "O"), ("ồ", "o"),
    ("Ờ", "O"), ("ờ", "o"), ("Ừ", "U"), ("ừ", "u"),
    ("Ỳ", "Y"), ("ỳ", "y"),
    // Vietnamese, hook above
    ("Ả", "A"), ("ả", "a"), ("Ẩ", "A"), ("ẩ", "a"),
    ("Ẳ", "A"), ("ẳ", "a"), ("Ẻ", "E"), ("ẻ", "e"),
    ("Ể", "E"), ("ể", "e"), ("Ỉ", "I"), ("ỉ", "i"),
    ("Ỏ", "O"), ("ỏ", "o"), ("Ổ", "O"), ("ổ", "o"),
    ("Ở", "O"), ("ở", "o"), ("Ủ", "U"), ("ủ", "u"),
    ("Ử", "U"), ("ử", "u"), ("Ỷ", "Y"), ("ỷ", "y"),
    // Vietnamese, tilde
    ("Ẫ", "A"), ("ẫ", "a"), ("Ẵ", "A"), ("ẵ", "a"),
    ("Ẽ", "E"), ("ẽ", "e"), ("Ễ", "E"), ("ễ", "e"),
    ("Ỗ", "O"), ("ỗ", "o"), ("Ỡ", "O"), ("ỡ", "o"),
    ("Ữ", "U"), ("ữ", "u"), ("Ỹ", "Y"), ("ỹ", "y"),
    // Vietnamese, acute accent
    ("Ấ", "A"), ("ấ", "a"), ("Ắ", "A"), ("ắ", "a"),
    ("Ế", "E"), ("ế", "e"), ("Ố", "O"), ("ố", "o"),
    ("Ớ", "O"), ("ớ", "o"), ("Ứ", "U"), ("ứ", "u"),
    // Vietnamese, dot below
    ("Ạ", "A"), ("ạ", "a"), ("Ậ", "A"), ("ậ", "a"),
    ("Ặ", "A"), ("ặ", "a"), ("Ẹ", "E"), ("ẹ", "e"),
    ("Ệ", "E"), ("ệ", "e"), ("Ị", "I"), ("ị", "i"),
    ("Ọ", "O"), ("ọ", "o"), ("Ộ", "O"), ("ộ", "o"),
    ("Ợ", "O"), ("ợ", "o"), ("Ụ", "U"), ("ụ", "u"),
    ("Ự", "U"), ("ự", "u"), ("Ỵ", "Y"), ("ỵ", "y"),
    // Hanyu Pinyin
    ("ɑ", "a"),
];

/// Bytes translated one-for-one on the legacy path, paired with [`LEGACY_SINGLE_OUT`].
pub const LEGACY_SINGLE_IN: &[u8] = b"\x80\x83\x8a\x8e\x9a\x9e\
    \x9f\xa2\xa5\xb5\xc0\xc1\xc2\
    \xc3\xc4\xc5\xc7\xc8\xc9\xca\
    \xcb\xcc\xcd\xce\xcf\xd1\xd2\
    \xd3\xd4\xd5\xd6\xd8\xd9\xda\
    \xdb\xdc\xdd\xe0\xe1\xe2\xe3\
    \xe4\xe5\xe7\xe8\xe9\xea\xeb\
    \xec\xed\xee\xef\xf1\xf2\xf3\
    \xf4\xf5\xf6\xf8\xf9\xfa\xfb\
    \xfc\xfd\xff";

pub const LEGACY_SINGLE_OUT: &[u8] =
    b"EfSZszYcYuAAAAAACEEEEIIIINOOOOOOUUUUYaaaaaaceeeeiiiinoooooouuuuyy";

/// Legacy bytes that expand to two ASCII characters.
pub const LEGACY_DIGRAPHS: &[(u8, &str)] = &[
    (0x8c, "OE"), (0x9c, "oe"), (0xc6, "AE"), (0xd0, "DH"), (0xde, "TH"),
    (0xdf, "ss"), (0xe6, "ae"), (0xf0, "dh"), (0xfe, "th"),
];

/// Builds a UTF-8 table from authored pairs. Later duplicates overwrite earlier ones.
pub fn build_utf8_table(pairs: &[(&'static str, &'static str)]) -> Utf8Table {
    let mut table = HashMap::with_capacity(pairs.len());
    for &(from, to) in pairs {
        table.insert(from.as_bytes(), to);
    }
    table
}

/// Byte-indexed replacements for text assumed to be ISO-8859-1.
pub struct LegacyTable {
    single: [u8; 256],
    digraphs: [Option<&'static str>; 256],
}

impl LegacyTable {
    pub fn new() -> Self {
        let mut single = [0u8; 256];
        for (i, slot) in single.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for (&from, &to) in LEGACY_SINGLE_IN.iter().zip(LEGACY_SINGLE_OUT) {
            single[from as usize] = to;
        }
        let mut digraphs = [None; 256];
        for &(from, to) in LEGACY_DIGRAPHS {
            digraphs[from as usize] = Some(to);
        }
        Self { single, digraphs }
    }

    /// One-for-one replacement; bytes without one map to themselves.
    #[inline]
    pub fn single(&self, byte: u8) -> u8 {
        self.single[byte as usize]
    }

    #[inline]
    pub fn digraph(&self, byte: u8) -> Option<&'static str> {
        self.digraphs[byte as usize]
    }
}

impl Default for LegacyTable {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    pub static ref UTF8_TABLE: Utf8Table = build_utf8_table(UTF8_PAIRS);
    pub static ref LEGACY_TABLE: LegacyTable = LegacyTable::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_keys_are_single_code_points() {
        for &(from, to) in UTF8_PAIRS {
            assert_eq!(from.chars().count(), 1, "{from}");
            assert!(from.len() >= 2, "{from} is ASCII");
            assert!(to.is_ascii() && to.len() <= 2, "{from} -> {to}");
        }
        assert_eq!(UTF8_TABLE.len(), UTF8_PAIRS.len());
    }

    #[test]
    fn test_last_duplicate_wins() {
        let table = build_utf8_table(&[("ọ", "o"), ("ö", "o"), ("ọ", "O")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table["ọ".as_bytes()], "O");
    }

    #[test]
    fn test_legacy_tables_line_up() {
        assert_eq!(LEGACY_SINGLE_IN.len(), LEGACY_SINGLE_OUT.len());
        assert_eq!(LEGACY_SINGLE_IN.len(), 65);
        for &(byte, _) in LEGACY_DIGRAPHS {
            assert!(!LEGACY_SINGLE_IN.contains(&byte), "{byte:#x} mapped twice");
        }
    }

    #[test]
    fn test_legacy_lookups() {
        let table = LegacyTable::new();
        assert_eq!(table.single(0xe9), b'e');
        assert_eq!(table.single(0x80), b'E');
        assert_eq!(table.single(0xa3), 0xa3);
        assert_eq!(table.single(b'x'), b'x');
        assert_eq!(table.digraph(0xe6), Some("ae"));
        assert_eq!(table.digraph(0xe9), None);
    }
}
