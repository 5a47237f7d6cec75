//! Parsers for the numeric attributes. Every parser is total: anything it
//! cannot read, or reads outside the field's range, comes back as `None`.

use lazy_static::lazy_static;
use regex::Regex;

use super::text::{
    CAPACITY_MISSING_MARKERS, GPU_MEMORY_MISSING_MARKERS, MISSING_SYNONYMS, contains_marker,
    mentions_shared_memory, normalize_text,
};
use crate::models::{
    CAPACITY_RANGE, CORE_COUNT_RANGE, CPU_FREQUENCY_RANGE, CPU_GENERATION_RANGE, GPU_MEMORY_RANGE,
    NumericRange, PRICE_RANGE, RAM_SIZE_RANGE, REFRESH_RATE_RANGE, RawValue, SCREEN_SIZE_RANGE,
};

/// Value reported for GPU memory listed as shared with system RAM.
pub const DEFAULT_SHARED_GPU_MEMORY_GB: f64 = 0.0;

lazy_static! {
    static ref GENERATION_NESIL: Regex = Regex::new(r"([0-9]+)\s*\.?\s*nesil").unwrap();
    static ref GENERATION_SERIES: Regex = Regex::new(r"series\s*([0-9]+)").unwrap();
    static ref GENERATION_APPLE: Regex = Regex::new(r"\bm\s*([0-9]+)\b").unwrap();
    static ref BARE_INTEGER: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref LEADING_INTEGER: Regex = Regex::new(r"^([0-9]+)\+?").unwrap();
    static ref FIRST_INTEGER: Regex = Regex::new(r"([0-9]+)").unwrap();
    static ref GB_AND_BELOW: Regex = Regex::new(r"([0-9]+)\s*gb.*alt").unwrap();
    static ref CAPACITY_SEPARATORS: Regex = Regex::new(r"[;|/]").unwrap();
    static ref TERABYTES: Regex = Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*tb").unwrap();
    static ref GIGABYTES: Regex = Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*gb").unwrap();
    static ref INCHES: Regex = Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*inç").unwrap();
    static ref NON_PRICE_CHARS: Regex = Regex::new(r"[^0-9,.]").unwrap();
}

/// Either a literal number, validated by range only, or lower-cased text.
enum NumericInput {
    Literal(f64),
    Text(String),
}

fn numeric_input(value: &RawValue) -> Option<NumericInput> {
    match value {
        RawValue::Missing => None,
        RawValue::Number(n) if n.is_nan() => None,
        RawValue::Number(n) => Some(NumericInput::Literal(*n)),
        RawValue::Text(s) => Some(NumericInput::Text(normalize_text(s))),
    }
}

/// Text input with the shared missing synonyms filtered out.
fn present_text(s: String) -> Option<String> {
    (!MISSING_SYNONYMS.contains(&s.as_str())).then_some(s)
}

fn capture_number(re: &Regex, s: &str) -> Option<f64> {
    re.captures(s)?.get(1)?.as_str().parse::<f64>().ok()
}

fn parse_literal_or(
    value: &RawValue,
    range: NumericRange,
    parse_text: impl FnOnce(String) -> Option<f64>,
) -> Option<f64> {
    let parsed = match numeric_input(value)? {
        NumericInput::Literal(n) => n,
        NumericInput::Text(s) => parse_text(s)?,
    };
    range.admit(parsed)
}

/// "13. Nesil", "Series 2", "Apple M3" or a bare "12".
pub fn parse_cpu_generation(value: &RawValue) -> Option<f64> {
    parse_literal_or(value, CPU_GENERATION_RANGE, |s| {
        let s = present_text(s)?;
        [&*GENERATION_NESIL, &*GENERATION_SERIES, &*GENERATION_APPLE]
            .into_iter()
            .find_map(|re| re.is_match(&s).then(|| capture_number(re, &s)))
            .unwrap_or_else(|| {
                if BARE_INTEGER.is_match(&s) {
                    s.parse::<f64>().ok()
                } else {
                    None
                }
            })
    })
}

/// "8", "16+", "10 çekirdek".
pub fn parse_core_count(value: &RawValue) -> Option<f64> {
    parse_literal_or(value, CORE_COUNT_RANGE, |s| {
        capture_number(&LEADING_INTEGER, &present_text(s)?)
    })
}

/// "4,7 GHz" -> 4.7
pub fn parse_max_cpu_frequency(value: &RawValue) -> Option<f64> {
    parse_literal_or(value, CPU_FREQUENCY_RANGE, |s| {
        s.replace("ghz", "")
            .replace(' ', "")
            .replace(',', ".")
            .parse::<f64>()
            .ok()
    })
}

/// "16 GB" -> 16
pub fn parse_ram_size(value: &RawValue) -> Option<f64> {
    parse_literal_or(value, RAM_SIZE_RANGE, |s| {
        capture_number(&FIRST_INTEGER, &present_text(s)?)
    })
}

/// Dedicated GPU memory in GB. Memory shared with system RAM is reported as
/// `shared_value` rather than missing.
pub fn parse_gpu_memory(value: &RawValue, shared_value: f64) -> Option<f64> {
    let s = match numeric_input(value)? {
        NumericInput::Literal(n) => return GPU_MEMORY_RANGE.admit(n),
        NumericInput::Text(s) => s,
    };

    if mentions_shared_memory(&s) {
        return Some(shared_value);
    }

    if contains_marker(&s, GPU_MEMORY_MISSING_MARKERS) {
        return None;
    }

    // "4 GB ve altı" names the upper bound of a bucket
    let parsed = if GB_AND_BELOW.is_match(&s) {
        capture_number(&GB_AND_BELOW, &s)
    } else {
        capture_number(&FIRST_INTEGER, &s)
    };
    GPU_MEMORY_RANGE.admit(parsed?)
}

/// Drive capacity in GB. Multi-value listings ("256 GB; 512 GB") resolve to
/// the largest capacity mentioned, not the sum.
pub fn parse_capacity_gb(value: &RawValue) -> Option<f64> {
    parse_literal_or(value, CAPACITY_RANGE, |s| {
        let s = s.replace(',', ".");
        if contains_marker(&s, CAPACITY_MISSING_MARKERS)
            || ["none", "nan", "", "null"].contains(&s.as_str())
        {
            return None;
        }

        let best = CAPACITY_SEPARATORS
            .split(&s)
            .map(str::trim)
            .flat_map(|part| {
                let tb = capture_number(&TERABYTES, part).map(|tb| tb * 1024.0);
                let gb = capture_number(&GIGABYTES, part);
                [tb, gb]
            })
            .flatten()
            .fold(0.0_f64, f64::max);
        Some(best)
    })
}

/// `15,6 inç` -> 15.6
pub fn parse_screen_size(value: &RawValue) -> Option<f64> {
    parse_literal_or(value, SCREEN_SIZE_RANGE, |s| {
        let s = present_text(s)?.replace(',', ".");
        capture_number(&INCHES, &s)
    })
}

/// "144 Hz" -> 144
pub fn parse_refresh_rate(value: &RawValue) -> Option<f64> {
    parse_literal_or(value, REFRESH_RATE_RANGE, |s| {
        present_text(s)?.replace("hz", "").trim().parse::<f64>().ok()
    })
}

/// Price in TRY. Handles Turkish formatting ("44.799,23"), dot thousands
/// separators ("45.999") and currency markers ("₺ 12000 TL").
pub fn parse_price(value: &RawValue) -> Option<f64> {
    parse_literal_or(value, PRICE_RANGE, |s| {
        let s = s.replace('₺', "").replace("tl", "");
        let s: String = s.split_whitespace().collect();
        let mut s = NON_PRICE_CHARS.replace_all(&s, "").into_owned();

        if s.contains('.') && s.contains(',') {
            s = s.replace('.', "").replace(',', ".");
        } else {
            if s.contains('.') {
                let groups: Vec<&str> = s.split('.').collect();
                // a trailing group of exactly three digits is a thousands group
                if groups.last().is_some_and(|g| g.len() == 3) {
                    s = groups.concat();
                }
            }
            if s.contains(',') {
                s = s.replace(',', ".");
            }
        }

        s.parse::<f64>().ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn text(s: &str) -> RawValue {
        RawValue::text(s)
    }

    #[rstest]
    #[case("13. Nesil", Some(13.0))]
    #[case("12 nesil", Some(12.0))]
    #[case("Series 2", Some(2.0))]
    #[case("Apple M3", Some(3.0))]
    #[case("M2", Some(2.0))]
    #[case("11", Some(11.0))]
    #[case("16. Nesil", None)]
    #[case("0", None)]
    #[case("Belirtilmemiş", None)]
    #[case("Raptor Lake", None)]
    fn test_cpu_generation(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_cpu_generation(&text(input)), expected);
    }

    #[test]
    fn test_cpu_generation_literals() {
        assert_eq!(parse_cpu_generation(&RawValue::Number(1.0)), Some(1.0));
        assert_eq!(parse_cpu_generation(&RawValue::Number(15.0)), Some(15.0));
        assert_eq!(parse_cpu_generation(&RawValue::Number(15.5)), None);
        assert_eq!(parse_cpu_generation(&RawValue::Number(f64::NAN)), None);
        assert_eq!(parse_cpu_generation(&RawValue::Missing), None);
    }

    #[rstest]
    #[case("8", Some(8.0))]
    #[case("16+", Some(16.0))]
    #[case("24", Some(24.0))]
    #[case("25", None)]
    #[case("0", None)]
    #[case("Çekirdek: 8", None)]
    #[case("yok", None)]
    fn test_core_count(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_core_count(&text(input)), expected);
    }

    #[rstest]
    #[case("4,7 GHz", Some(4.7))]
    #[case("5.2GHz", Some(5.2))]
    #[case("1", Some(1.0))]
    #[case("6.0 ghz", Some(6.0))]
    #[case("6,1 GHz", None)]
    #[case("0.9", None)]
    #[case("Turbo", None)]
    fn test_max_cpu_frequency(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_max_cpu_frequency(&text(input)), expected);
    }

    #[rstest]
    #[case("16 GB", Some(16.0))]
    #[case("8GB DDR4", Some(8.0))]
    #[case("256 GB", Some(256.0))]
    #[case("512 GB", None)]
    #[case("Belirtilmemiş", None)]
    #[case("GB", None)]
    fn test_ram_size(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_ram_size(&text(input)), expected);
    }

    #[test]
    fn test_ram_size_literal() {
        assert_eq!(parse_ram_size(&RawValue::Number(32.0)), Some(32.0));
        assert_eq!(parse_ram_size(&RawValue::Number(0.5)), None);
    }

    #[rstest]
    #[case("Paylaşımlı", Some(DEFAULT_SHARED_GPU_MEMORY_GB))]
    #[case("paylasimli bellek", Some(DEFAULT_SHARED_GPU_MEMORY_GB))]
    #[case("PAYLAŞIMLI", Some(DEFAULT_SHARED_GPU_MEMORY_GB))]
    #[case("8 GB", Some(8.0))]
    #[case("4 GB ve altı", Some(4.0))]
    #[case("32 GB", Some(32.0))]
    #[case("64 GB", None)]
    #[case("Yok", None)]
    #[case("Belirtilmemiş", None)]
    #[case("", None)]
    fn test_gpu_memory(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_gpu_memory(&text(input), DEFAULT_SHARED_GPU_MEMORY_GB), expected);
    }

    #[test]
    fn test_gpu_memory_shared_value_is_configurable() {
        assert_eq!(parse_gpu_memory(&text("Paylaşımlı"), -1.0), Some(-1.0));
    }

    #[rstest]
    #[case("512 GB", Some(512.0))]
    #[case("1 TB", Some(1024.0))]
    #[case("2.5 TB", Some(2560.0))]
    #[case("2,5 TB", Some(2560.0))]
    #[case("256 GB; 512 GB", Some(512.0))]
    #[case("1 TB | 512 GB", Some(1024.0))]
    #[case("128 GB / 256 GB", Some(256.0))]
    #[case("16 GB", None)]
    #[case("16 TB", None)]
    #[case("Yok", None)]
    #[case("SSD Yok", None)]
    #[case("512", None)]
    fn test_capacity(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_capacity_gb(&text(input)), expected);
    }

    #[test]
    fn test_capacity_boundaries() {
        assert_eq!(parse_capacity_gb(&text("32 GB")), Some(32.0));
        assert_eq!(parse_capacity_gb(&RawValue::Number(8000.0)), Some(8000.0));
        assert_eq!(parse_capacity_gb(&RawValue::Number(8000.5)), None);
    }

    #[rstest]
    #[case("15,6 inç", Some(15.6))]
    #[case("14 İnç", Some(14.0))]
    #[case("16.0inç", Some(16.0))]
    #[case("7 inç", Some(7.0))]
    #[case("27 inç", None)]
    #[case("15.6", None)]
    #[case("15.6 inch", None)]
    fn test_screen_size(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_screen_size(&text(input)), expected);
    }

    #[rstest]
    #[case("144 Hz", Some(144.0))]
    #[case("60hz", Some(60.0))]
    #[case("360 Hz", Some(360.0))]
    #[case("480 Hz", None)]
    #[case("24 Hz", None)]
    #[case("120 Hz / 60 Hz", None)]
    fn test_refresh_rate(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_refresh_rate(&text(input)), expected);
    }

    #[rstest]
    #[case("44.799,23", Some(44799.23))]
    #[case("45.999", Some(45999.0))]
    #[case("₺ 12000 TL", Some(12000.0))]
    #[case("44799,23", Some(44799.23))]
    #[case("1.234.567", None)]
    #[case("12.999,00 TL", Some(12999.0))]
    #[case("999", None)]
    #[case("200.001", None)]
    #[case("fiyat yok", None)]
    fn test_price(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_price(&text(input)), expected);
    }

    #[test]
    fn test_price_literals() {
        assert_eq!(parse_price(&RawValue::Number(1000.0)), Some(1000.0));
        assert_eq!(parse_price(&RawValue::Number(200000.0)), Some(200000.0));
        assert_eq!(parse_price(&RawValue::Number(200000.01)), None);
    }
}
