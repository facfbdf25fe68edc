//! Locale-specific digraphs.
//!
//! Some languages transliterate letters differently from the base table, e.g.
//! German writes "ä" as "ae" rather than "a". These rules are opt-in: the
//! default [`remove_accents`](super::remove_accents) never applies them.

use std::collections::HashMap;
use std::str::FromStr;

use lazy_static::lazy_static;

use super::tables::{Utf8Table, build_utf8_table};
use crate::{NormError, Result};

/// Locales with their own transliteration rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    /// de_DE, de_DE_formal, de_CH, de_CH_informal, de_AT
    German,
    /// da_DK
    Danish,
    /// ca
    Catalan,
}

impl FromStr for Locale {
    type Err = NormError;

    fn from_str(tag: &str) -> Result<Self> {
        let tag = tag.trim().replace('-', "_");
        match tag.as_str() {
            "de_DE" | "de_DE_formal" | "de_CH" | "de_CH_informal" | "de_AT" => Ok(Locale::German),
            "da_DK" => Ok(Locale::Danish),
            "ca" => Ok(Locale::Catalan),
            _ => Err(NormError::invalid_parameter(format!("Unsupported locale: {}", tag))),
        }
    }
}

#[rustfmt::skip]
const GERMAN_PAIRS: &[(&str, &str)] = &[
    ("Ä", "Ae"), ("ä", "ae"), ("Ö", "Oe"), ("ö", "oe"),
    ("Ü", "Ue"), ("ü", "ue"), ("ß", "ss"),
];

#[rustfmt::skip]
const DANISH_PAIRS: &[(&str, &str)] = &[
    ("Æ", "Ae"), ("æ", "ae"), ("Ø", "Oe"), ("ø", "oe"),
    ("Å", "Aa"), ("å", "aa"),
];

/// Catalan flown dot: "l·l" becomes "ll".
pub const CATALAN_GEMINATE: (&str, &str) = ("l·l", "ll");

lazy_static! {
    static ref LOCALE_TABLES: HashMap<Locale, Utf8Table> = {
        let mut tables = HashMap::new();
        tables.insert(Locale::German, build_utf8_table(GERMAN_PAIRS));
        tables.insert(Locale::Danish, build_utf8_table(DANISH_PAIRS));
        tables
    };
}

impl Locale {
    /// Per-code-point overrides taking precedence over the base UTF-8 table.
    pub fn overrides(&self) -> Option<&'static Utf8Table> {
        LOCALE_TABLES.get(self)
    }

    /// Multi-character replacement applied before the per-code-point pass.
    pub fn sequence_rule(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Locale::Catalan => Some(CATALAN_GEMINATE),
            _ => None,
        }
    }
}
