//! Attribute recovery from free-text listing titles. Only used to fill fields
//! the structured attribute table left missing.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{Field, RawValue};

/// SSD capacities that actually occur in listings; anything else read from
/// a title is treated as a misparse.
pub const ALLOWED_SSD_GB: &[u32] = &[4, 120, 128, 250, 256, 500, 512, 1024, 2048, 4096, 8192];

/// Display features in the order they are searched for.
pub const FEATURES_PRIORITY: &[&str] =
    &["Retina", "OLED", "WQXGA", "WUXGA", "QHD+", "QHD", "Full HD", "FHD", "HD"];

const RESOLUTION_FEATURES: &[((u32, u32), &str)] = &[
    ((1920, 1080), "Full HD"),
    ((1920, 1200), "WUXGA"),
    ((2560, 1600), "WQXGA"),
    ((2560, 1440), "QHD"),
    ((2880, 1800), "QHD+"),
    ((3200, 2000), "QHD+"),
];

const APPLE_RETINA_RESOLUTIONS: &[(u32, u32)] = &[
    (2560, 1664),
    (2880, 1864),
    (3024, 1964),
    (3456, 2234),
    (3840, 2400),
];

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[-_/|]+").unwrap();
    static ref GB_TOKEN: Regex = Regex::new(r"(?i)([0-9]{1,4})\s*gb").unwrap();
    static ref HZ_TOKEN: Regex = Regex::new(r"(?i)([0-9]{1,3})\s*hz").unwrap();
    static ref SSD_GB: Regex = Regex::new(concat!(
        r"(?:^|[^0-9])([0-9]{1,4})\s*gb",
        r"\s*(?:nvme\s*)?(?:m\.?2\s*)?(?:ssd|gbssd)\b"
    ))
    .unwrap();
    static ref SSD_TB: Regex = Regex::new(concat!(
        r"(?:^|[^0-9])([0-9]+(?:\.[0-9]+)?)\s*tb",
        r"\s*(?:nvme\s*)?(?:m\.?2\s*)?(?:ssd|gbssd)\b"
    ))
    .unwrap();
    static ref RESOLUTION_PAIR: Regex =
        Regex::new(r"([0-9]{3,4})\s*[x×X]\s*([0-9]{3,4})").unwrap();
}

/// Everything the extractor could read from one title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleAttributes {
    pub memory_gb: Option<u32>,
    pub storage_gb: Option<u32>,
    pub refresh_hz: Option<u32>,
    pub display_feature: Option<&'static str>,
}

impl TitleAttributes {
    pub fn is_empty(&self) -> bool {
        *self == TitleAttributes::default()
    }

    /// Raw value to feed through `field`'s normalizer, if the title had one.
    pub fn raw_value_for(&self, field: Field) -> Option<RawValue> {
        match field {
            Field::RamSize => self.memory_gb.map(|gb| RawValue::Number(gb as f64)),
            Field::SsdCapacity => self.storage_gb.map(|gb| RawValue::Number(gb as f64)),
            Field::RefreshRate => self.refresh_hz.map(|hz| RawValue::Number(hz as f64)),
            Field::DisplayStandard => self.display_feature.map(RawValue::from),
            _ => None,
        }
    }
}

/// Fields the title can backfill, in the order they are filled.
pub const TITLE_FALLBACK_FIELDS: [Field; 4] =
    [Field::RamSize, Field::SsdCapacity, Field::RefreshRate, Field::DisplayStandard];

pub fn extract_title_attributes(title: &str) -> TitleAttributes {
    let storage_gb = ssd_gb_from_title(title);
    TitleAttributes {
        memory_gb: memory_gb_from_title(title, storage_gb),
        storage_gb,
        refresh_hz: refresh_rate_from_title(title),
        display_feature: display_feature_from_title(title),
    }
}

/// Keeps digits of "512GB" together while splitting "i5-512gb/ssd".
fn soft_clean(title: &str) -> String {
    let s = title.to_lowercase();
    let s = SEPARATORS.replace_all(&s, " ").replace(',', ".");
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn validate_ssd_gb(gb: u32) -> Option<u32> {
    ALLOWED_SSD_GB.contains(&gb).then_some(gb)
}

/// SSD capacity in GB: the largest SSD-tagged size in the title, accepted
/// only if it is a real-world capacity.
pub fn ssd_gb_from_title(title: &str) -> Option<u32> {
    let t = soft_clean(title);

    let terabytes = SSD_TB.captures_iter(&t).filter_map(|caps| {
        let tb = caps.get(1)?.as_str().parse::<f64>().ok()?;
        let gb = (tb * 1024.0).round();
        (gb <= u32::MAX as f64).then_some(gb as u32)
    });
    let gigabytes = SSD_GB
        .captures_iter(&t)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok());

    terabytes.chain(gigabytes).max().and_then(validate_ssd_gb)
}

/// Memory size in GB.
///
/// Titles are conventionally ordered CPU, RAM, storage, so when the title
/// mentions an SSD the sizes before it are tried first. A size equal to the
/// SSD capacity is never taken as memory.
pub fn memory_gb_from_title(title: &str, storage_gb: Option<u32>) -> Option<u32> {
    let low = title.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let tokens: Vec<(u32, usize)> = GB_TOKEN
        .captures_iter(&low)
        .filter_map(|caps| {
            let gb = caps.get(1)?.as_str().parse::<u32>().ok()?;
            Some((gb, caps.get(0)?.end()))
        })
        .collect();

    match low.find("ssd") {
        Some(ssd_pos) => {
            let before = first_memory(tokens.iter().filter(|(_, end)| *end <= ssd_pos), storage_gb);
            before.or_else(|| {
                first_memory(tokens.iter().filter(|(_, end)| *end > ssd_pos), storage_gb)
            })
        }
        None => first_memory(tokens.iter(), storage_gb),
    }
}

fn first_memory<'a>(
    mut candidates: impl Iterator<Item = &'a (u32, usize)>,
    storage_gb: Option<u32>,
) -> Option<u32> {
    candidates
        .find(|(gb, _)| *gb <= 128 && Some(*gb) != storage_gb)
        .map(|(gb, _)| *gb)
}

/// Highest refresh rate in the title, ignoring implausible values.
pub fn refresh_rate_from_title(title: &str) -> Option<u32> {
    HZ_TOKEN
        .captures_iter(title)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .filter(|hz| *hz <= 300)
        .max()
}

pub fn display_feature_from_title(title: &str) -> Option<&'static str> {
    let low = title.to_lowercase();

    if low.contains("liquid retina") {
        return Some("Retina");
    }
    if low.contains("wqhd") {
        return Some("QHD");
    }
    if let Some(feature) = FEATURES_PRIORITY
        .iter()
        .find(|feature| low.contains(&feature.to_lowercase()))
    {
        return Some(*feature);
    }

    let caps = RESOLUTION_PAIR.captures(title)?;
    let pair = (
        caps.get(1)?.as_str().parse::<u32>().ok()?,
        caps.get(2)?.as_str().parse::<u32>().ok()?,
    );
    if let Some((_, feature)) = RESOLUTION_FEATURES.iter().find(|(res, _)| *res == pair) {
        return Some(*feature);
    }
    let is_apple = low.contains("apple") || low.contains("macbook");
    (is_apple && APPLE_RETINA_RESOLUTIONS.contains(&pair)).then_some("Retina")
}

/// "512 GB" / "1 TB"
pub fn format_storage(gb: u32) -> String {
    if gb >= 1024 && gb % 1024 == 0 {
        format!("{} TB", gb / 1024)
    } else {
        format!("{gb} GB")
    }
}

pub fn format_memory(gb: u32) -> String {
    format!("{gb} GB")
}

pub fn format_refresh_rate(hz: u32) -> String {
    format!("{hz} Hz")
}
