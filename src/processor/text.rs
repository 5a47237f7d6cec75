//! Missing-value detection and text normalization shared by every parser.

use crate::models::RawValue;

/// Spellings scraped listings use for "no information".
pub const MISSING_SYNONYMS: &[&str] = &[
    "",
    "nan",
    "none",
    "null",
    "-",
    "yok",
    "belirtilmemiş",
    "belirtilmemis",
];

/// Operating system treats a bare "yok" as "no OS installed", not as missing.
pub const OS_MISSING_SYNONYMS: &[&str] =
    &["", "nan", "none", "null", "-", "belirtilmemiş", "belirtilmemis"];

/// Substrings that void a whole GPU memory value, e.g. "8 GB (belirtilmemiş)".
pub const GPU_MEMORY_MISSING_MARKERS: &[&str] =
    &["belirtilmemiş", "belirtilmemis", "none", "yok", "nan", "null"];

/// Substrings that void a whole drive capacity value, e.g. "SSD yok".
pub const CAPACITY_MISSING_MARKERS: &[&str] = &["yok", "belirtilmemiş", "belirtilmemis"];

pub fn contains_marker(s: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| s.contains(marker))
}

/// "Shared with system memory" as listings spell it. An upper-case `I` lowers
/// to a dotted `i`, so "PAYLAŞIMLI" arrives as "paylaşimli".
pub const SHARED_MEMORY_SPELLINGS: &[&str] = &["paylaşımlı", "paylaşimli", "paylasimli"];

pub fn mentions_shared_memory(s: &str) -> bool {
    SHARED_MEMORY_SPELLINGS.iter().any(|spelling| s.contains(spelling))
}

/// Lower-cases, collapses whitespace runs and trims.
///
/// Lower-casing a Turkish `İ` yields `i` followed by U+0307; the combining dot
/// is dropped so that `SİYAH` and `siyah` compare equal.
pub fn normalize_text(s: &str) -> String {
    s.to_lowercase()
        .replace('\u{307}', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_missing_text(s: &str) -> bool {
    is_missing_in(s, MISSING_SYNONYMS)
}

pub fn is_missing_in(s: &str, synonyms: &[&str]) -> bool {
    synonyms.contains(&normalize_text(s).as_str())
}

/// Whether a raw value carries no information at all.
pub fn is_missing(value: &RawValue) -> bool {
    match value {
        RawValue::Text(s) => is_missing_text(s),
        other => other.is_absent(),
    }
}

/// Normalized text of a categorical input, or `None` when the value is a
/// number, absent, or one of `synonyms`.
pub fn clean_text(value: &RawValue, synonyms: &[&str]) -> Option<String> {
    let s = normalize_text(value.as_text()?);
    if synonyms.contains(&s.as_str()) {
        None
    } else {
        Some(s)
    }
}

/// `clean_text` with the shared synonym set.
pub fn categorical_text(value: &RawValue) -> Option<String> {
    clean_text(value, MISSING_SYNONYMS)
}
