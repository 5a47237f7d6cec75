//! Listing-level categorical attributes: brand, intended use, color, weight
//! and operating system.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use super::cascade::{Rule, first_match};
use super::text::{MISSING_SYNONYMS, OS_MISSING_SYNONYMS, categorical_text, clean_text};
use crate::models::{
    COLOR_LABELS, INTENDED_USE_LABELS, OPERATING_SYSTEM_LABELS, RawValue, WEIGHT_LABELS,
};

lazy_static! {
    static ref BRAND_MAP: HashMap<&'static str, &'static str> = HashMap::from([
        ("hp", "hp"),
        ("hewlett packard", "hp"),
        ("h.p.", "hp"),
        ("lenovo", "lenovo"),
        ("asus", "asus"),
        ("dell", "dell"),
        ("msi", "msi"),
        ("acer", "acer"),
        ("monster", "monster"),
        ("casper", "casper"),
        ("game garaj", "game garaj"),
        ("erazer", "erazer"),
        ("huawei", "huawei"),
        ("samsung", "samsung"),
        ("gigabyte", "gigabyte"),
        ("hometech", "hometech"),
        ("xiaomi", "xiaomi"),
        ("microsoft", "microsoft"),
        ("toshiba", "toshiba"),
        ("tecno", "tecno"),
        ("i-life", "i-life"),
        ("ilife", "i-life"),
        ("i-life digital", "i-life"),
    ]);
    static ref KILOGRAMS: Regex = Regex::new(r"([0-9]+(?:[.,][0-9]+)?)\s*kg").unwrap();
}

/// Brand names are looked up in a fixed table; unknown brands pass through
/// in normalized form.
pub fn parse_brand(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?;
    Some(BRAND_MAP.get(s.as_str()).map_or(s, |brand| brand.to_string()))
}

fn is_home_school(s: &str) -> Option<String> {
    let home = s.contains("ev") || s.contains("home");
    let school = ["okul", "öğrenci", "ogrenci", "school"].iter().any(|k| s.contains(k));
    (home && school).then(|| "home-school".to_string())
}

pub static INTENDED_USE_RULES: &[Rule] = &[
    Rule::Canonical(INTENDED_USE_LABELS),
    Rule::AnyOf { keywords: &["oyun", "gaming"], label: "gaming" },
    Rule::AnyOf { keywords: &["ofis", "office", "iş", "is"], label: "office-work" },
    Rule::Custom { name: "home-school", resolve: is_home_school },
    Rule::AnyOf { keywords: &["tasarım", "tasarim", "design"], label: "design" },
    Rule::Exact { values: &["ev", "home"], label: "home" },
];

/// Collapses the many usage descriptions into a handful of classes;
/// unmatched descriptions pass through.
pub fn parse_intended_use(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?;
    Some(first_match(INTENDED_USE_RULES, &s).unwrap_or(s))
}

/// Gray is checked first so "metalik gri" or "uzay grisi" never fall into
/// another family.
pub static COLOR_RULES: &[Rule] = &[
    Rule::AnyOf { keywords: &["gri", "grey", "gray"], label: "gray" },
    Rule::AnyOf { keywords: &["siyah", "black", "onyx"], label: "black" },
    Rule::AnyOf { keywords: &["mavi", "lacivert", "blue"], label: "blue" },
    Rule::AnyOf { keywords: &["gümüş", "silver"], label: "silver" },
    Rule::AnyOf { keywords: &["beyaz", "white"], label: "white" },
    Rule::Exact {
        values: &["renkli", "çok renkli", "cok renkli", "multicolor"],
        label: "multicolor",
    },
    Rule::Canonical(COLOR_LABELS),
];

/// Keeps only the first listed color and reduces it to its color family.
///
/// Dotted-i artifacts such as `si̇yah` are already folded by text
/// normalization.
pub fn parse_color(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?;
    let first = s
        .split([';', '/', '|', '-', ','])
        .map(str::trim)
        .find(|part| !part.is_empty())?;
    if MISSING_SYNONYMS.contains(&first) {
        return None;
    }

    let first = match first {
        "black" => "siyah",
        "white" => "beyaz",
        "grey" | "gray" => "gri",
        "silver" => "gümüş",
        "blue" => "mavi",
        other => other,
    };
    Some(first_match(COLOR_RULES, first).unwrap_or_else(|| first.to_string()))
}

/// Band phrasings checked against the input with all whitespace removed.
pub static WEIGHT_BAND_RULES: &[Rule] = &[
    Rule::Canonical(WEIGHT_LABELS),
    Rule::AnyOf { keywords: &["2kgvealt", "1-2kg"], label: "2kg-and-below" },
    Rule::AnyOf { keywords: &["2-4kg"], label: "2-4kg" },
    Rule::AnyOf { keywords: &["4kgveuzeri", "4kgveust"], label: "4kg-and-above" },
];

fn weight_band(kg: f64) -> &'static str {
    if kg <= 2.0 {
        "2kg-and-below"
    } else if kg <= 4.0 {
        "2-4kg"
    } else {
        "4kg-and-above"
    }
}

/// Buckets a device weight into one of three bands. Inputs that already name
/// a band are recognised without parsing a number.
pub fn parse_weight(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?
        .replace('ı', "i")
        .replace('ü', "u")
        .replace(['–', '—'], "-");

    let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(band) = first_match(WEIGHT_BAND_RULES, &compact) {
        return Some(band);
    }

    let kg = KILOGRAMS
        .captures(&s)?
        .get(1)?
        .as_str()
        .replace(',', ".")
        .parse::<f64>()
        .ok()?;
    if kg > 0.0 && kg <= 10.0 {
        Some(weight_band(kg).to_string())
    } else {
        None
    }
}

fn is_freedos(s: &str) -> Option<String> {
    let no_os = ["free dos", "freedos", "işletim sistemi yok", "isletim sistemi yok", "no os"]
        .iter()
        .any(|k| s.contains(k));
    (no_os || s.starts_with("yok")).then(|| "freedos".to_string())
}

fn is_plain_linux(s: &str) -> Option<String> {
    (s.contains("linux") && !s.contains("windows")).then(|| "linux".to_string())
}

pub static OPERATING_SYSTEM_RULES: &[Rule] = &[
    Rule::Canonical(OPERATING_SYSTEM_LABELS),
    Rule::Custom { name: "freedos", resolve: is_freedos },
    Rule::AnyOf { keywords: &["android"], label: "linux" },
    Rule::AnyOf { keywords: &["ubuntu"], label: "ubuntu" },
    Rule::Custom { name: "linux", resolve: is_plain_linux },
    Rule::AllOf { keywords: &["windows", "pro"], label: "windows pro" },
    Rule::AnyOf { keywords: &["windows"], label: "windows home" },
];

/// Operating system family. A bare "yok" means no OS was shipped, so it maps
/// to `freedos` instead of missing.
pub fn parse_operating_system(value: &RawValue) -> Option<String> {
    let s = clean_text(value, OS_MISSING_SYNONYMS)?;
    Some(first_match(OPERATING_SYSTEM_RULES, &s).unwrap_or_else(|| "unknown".to_string()))
}
