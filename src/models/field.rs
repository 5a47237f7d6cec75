use serde::{Deserialize, Serialize};
use std::fmt;

use super::data_models::CanonicalValue;
use crate::processor::text::{
    CAPACITY_MISSING_MARKERS, GPU_MEMORY_MISSING_MARKERS, MISSING_SYNONYMS, OS_MISSING_SYNONYMS,
};

/// Every attribute the engine knows how to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CpuGeneration,
    CoreCount,
    MaxCpuFrequency,
    RamSize,
    GpuMemory,
    SsdCapacity,
    HddCapacity,
    ScreenSize,
    RefreshRate,
    Price,
    Brand,
    IntendedUse,
    Color,
    Weight,
    CpuFamily,
    RamType,
    GpuModel,
    GpuType,
    GpuVramType,
    Resolution,
    DisplayStandard,
    PanelType,
    OperatingSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Categorical,
}

/// Closed interval a numeric value must fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Out-of-range values become missing; nothing is clamped.
    pub fn admit(&self, value: f64) -> Option<f64> {
        self.contains(value).then_some(value)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FieldDomain {
    Range(NumericRange),
    /// Output is always one of these labels.
    Closed(&'static [&'static str]),
    /// Known labels, but unmatched text is passed through normalized.
    Open(&'static [&'static str]),
    /// `{width}x{height}` within the given width and height ranges.
    Resolution {
        width: NumericRange,
        height: NumericRange,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: Field,
    pub kind: FieldKind,
    /// Whole values (after normalization) that mean "no information".
    pub missing_synonyms: &'static [&'static str],
    /// Substrings that make the whole value missing wherever they appear,
    /// so "8 GB yok" is missing rather than 8.
    pub missing_markers: &'static [&'static str],
    pub domain: FieldDomain,
}

impl FieldSpec {
    /// Whether `value` is something this field may legitimately hold.
    pub fn admits(&self, value: &CanonicalValue) -> bool {
        match (value, &self.domain) {
            (CanonicalValue::Missing, _) => true,
            (CanonicalValue::Number(n), FieldDomain::Range(range)) => range.contains(*n),
            (CanonicalValue::Category(label), FieldDomain::Closed(labels)) => {
                labels.contains(&label.as_str())
            }
            (CanonicalValue::Category(label), FieldDomain::Open(_)) => {
                !label.is_empty() && !self.missing_synonyms.contains(&label.as_str())
            }
            (CanonicalValue::Category(label), FieldDomain::Resolution { width, height }) => label
                .split_once('x')
                .and_then(|(w, h)| Some((w.parse::<f64>().ok()?, h.parse::<f64>().ok()?)))
                .is_some_and(|(w, h)| width.contains(w) && height.contains(h)),
            _ => false,
        }
    }

    /// Labels the field is known to produce (empty for numeric fields).
    pub fn labels(&self) -> &'static [&'static str] {
        match self.domain {
            FieldDomain::Closed(labels) | FieldDomain::Open(labels) => labels,
            _ => &[],
        }
    }
}

pub const CPU_GENERATION_RANGE: NumericRange = NumericRange::new(1.0, 15.0);
pub const CORE_COUNT_RANGE: NumericRange = NumericRange::new(1.0, 24.0);
pub const CPU_FREQUENCY_RANGE: NumericRange = NumericRange::new(1.0, 6.0);
pub const RAM_SIZE_RANGE: NumericRange = NumericRange::new(1.0, 256.0);
pub const GPU_MEMORY_RANGE: NumericRange = NumericRange::new(1.0, 32.0);
pub const CAPACITY_RANGE: NumericRange = NumericRange::new(32.0, 8000.0);
pub const SCREEN_SIZE_RANGE: NumericRange = NumericRange::new(7.0, 20.0);
pub const REFRESH_RATE_RANGE: NumericRange = NumericRange::new(30.0, 360.0);
pub const PRICE_RANGE: NumericRange = NumericRange::new(1000.0, 200000.0);
pub const RESOLUTION_WIDTH: NumericRange = NumericRange::new(800.0, 10000.0);
pub const RESOLUTION_HEIGHT: NumericRange = NumericRange::new(500.0, 10000.0);

pub const BRAND_LABELS: &[&str] = &[
    "hp", "lenovo", "asus", "dell", "msi", "acer", "monster", "casper", "game garaj", "erazer",
    "huawei", "samsung", "gigabyte", "hometech", "xiaomi", "microsoft", "toshiba", "tecno",
    "i-life",
];
pub const INTENDED_USE_LABELS: &[&str] =
    &["gaming", "office-work", "home-school", "design", "home"];
pub const COLOR_LABELS: &[&str] = &["gray", "black", "blue", "silver", "white", "multicolor"];
pub const WEIGHT_LABELS: &[&str] = &["2kg-and-below", "2-4kg", "4kg-and-above"];
pub const CPU_FAMILY_LABELS: &[&str] = &[
    "intel core ultra 5",
    "intel core ultra 7",
    "intel core ultra 9",
    "intel core i3",
    "intel core i5",
    "intel core i7",
    "intel core i9",
    "intel celeron",
    "intel n-series",
    "intel core m",
    "amd ryzen ai 7",
    "amd ryzen ai 9",
    "amd ryzen ai",
    "amd ryzen 3",
    "amd ryzen 5",
    "amd ryzen 7",
    "amd ryzen 9",
    "amd ryzen",
    "qualcomm snapdragon x",
    "amd legacy",
    "mediatek",
    "intel",
    "unknown",
];
pub const RAM_TYPE_LABELS: &[&str] = &[
    "ddr3", "ddr4", "ddr5", "lpddr3", "lpddr4", "lpddr4x", "lpddr5", "lpddr5x", "unified",
];
/// Fixed GPU model labels; `nvidia {rtx|gtx|mx} N[ ti]` are generated on top of these.
pub const GPU_MODEL_LABELS: &[&str] = &[
    "integrated",
    "qualcomm adreno",
    "nvidia rtx ada",
    "nvidia (other)",
    "intel integrated",
    "amd integrated",
    "unknown",
];
pub const GPU_TYPE_LABELS: &[&str] =
    &["dedicated_high_end", "shared", "integrated", "dedicated", "unknown"];
pub const GPU_VRAM_TYPE_LABELS: &[&str] = &[
    "shared", "gddr4", "gddr5", "gddr5x", "gddr6", "gddr6x", "gddr7", "ddr3", "ddr4", "ddr5",
];
pub const DISPLAY_STANDARD_LABELS: &[&str] = &[
    "oled", "uhd_4k", "wqxga", "wuxga", "wqhd", "qhd_plus", "qhd", "fhd", "hd", "other",
];
pub const PANEL_TYPE_LABELS: &[&str] = &[
    "ips", "tn", "va", "wva", "sva", "oled", "lcd", "led", "mini led", "tft", "ltps",
];
pub const OPERATING_SYSTEM_LABELS: &[&str] =
    &["freedos", "linux", "ubuntu", "windows pro", "windows home", "unknown"];

const fn numeric(field: Field, range: NumericRange) -> FieldSpec {
    FieldSpec {
        field,
        kind: FieldKind::Numeric,
        missing_synonyms: MISSING_SYNONYMS,
        missing_markers: &[],
        domain: FieldDomain::Range(range),
    }
}

const fn numeric_with_markers(
    field: Field,
    range: NumericRange,
    missing_markers: &'static [&'static str],
) -> FieldSpec {
    FieldSpec { missing_markers, ..numeric(field, range) }
}

const fn categorical(field: Field, domain: FieldDomain) -> FieldSpec {
    FieldSpec {
        field,
        kind: FieldKind::Categorical,
        missing_synonyms: MISSING_SYNONYMS,
        missing_markers: &[],
        domain,
    }
}

pub static FIELD_SPECS: [FieldSpec; 23] = [
    numeric(Field::CpuGeneration, CPU_GENERATION_RANGE),
    numeric(Field::CoreCount, CORE_COUNT_RANGE),
    numeric(Field::MaxCpuFrequency, CPU_FREQUENCY_RANGE),
    numeric(Field::RamSize, RAM_SIZE_RANGE),
    // "paylaşımlı" is checked before the markers and maps to the shared sentinel
    numeric_with_markers(Field::GpuMemory, GPU_MEMORY_RANGE, GPU_MEMORY_MISSING_MARKERS),
    numeric_with_markers(Field::SsdCapacity, CAPACITY_RANGE, CAPACITY_MISSING_MARKERS),
    numeric_with_markers(Field::HddCapacity, CAPACITY_RANGE, CAPACITY_MISSING_MARKERS),
    numeric(Field::ScreenSize, SCREEN_SIZE_RANGE),
    numeric(Field::RefreshRate, REFRESH_RATE_RANGE),
    numeric(Field::Price, PRICE_RANGE),
    categorical(Field::Brand, FieldDomain::Open(BRAND_LABELS)),
    categorical(Field::IntendedUse, FieldDomain::Open(INTENDED_USE_LABELS)),
    categorical(Field::Color, FieldDomain::Open(COLOR_LABELS)),
    categorical(Field::Weight, FieldDomain::Closed(WEIGHT_LABELS)),
    categorical(Field::CpuFamily, FieldDomain::Closed(CPU_FAMILY_LABELS)),
    categorical(Field::RamType, FieldDomain::Closed(RAM_TYPE_LABELS)),
    // nvidia model labels carry a model number, so the vocabulary stays open
    categorical(Field::GpuModel, FieldDomain::Open(GPU_MODEL_LABELS)),
    categorical(Field::GpuType, FieldDomain::Closed(GPU_TYPE_LABELS)),
    categorical(Field::GpuVramType, FieldDomain::Closed(GPU_VRAM_TYPE_LABELS)),
    categorical(
        Field::Resolution,
        FieldDomain::Resolution {
            width: RESOLUTION_WIDTH,
            height: RESOLUTION_HEIGHT,
        },
    ),
    categorical(Field::DisplayStandard, FieldDomain::Closed(DISPLAY_STANDARD_LABELS)),
    categorical(Field::PanelType, FieldDomain::Closed(PANEL_TYPE_LABELS)),
    FieldSpec {
        field: Field::OperatingSystem,
        kind: FieldKind::Categorical,
        missing_synonyms: OS_MISSING_SYNONYMS,
        missing_markers: &[],
        domain: FieldDomain::Closed(OPERATING_SYSTEM_LABELS),
    },
];

impl Field {
    pub const ALL: [Field; 23] = [
        Field::CpuGeneration,
        Field::CoreCount,
        Field::MaxCpuFrequency,
        Field::RamSize,
        Field::GpuMemory,
        Field::SsdCapacity,
        Field::HddCapacity,
        Field::ScreenSize,
        Field::RefreshRate,
        Field::Price,
        Field::Brand,
        Field::IntendedUse,
        Field::Color,
        Field::Weight,
        Field::CpuFamily,
        Field::RamType,
        Field::GpuModel,
        Field::GpuType,
        Field::GpuVramType,
        Field::Resolution,
        Field::DisplayStandard,
        Field::PanelType,
        Field::OperatingSystem,
    ];

    /// Canonical column name, used when a field has to be added to a record.
    pub fn name(self) -> &'static str {
        match self {
            Field::CpuGeneration => "CPU generation",
            Field::CoreCount => "Core count",
            Field::MaxCpuFrequency => "Max CPU frequency",
            Field::RamSize => "RAM size",
            Field::GpuMemory => "GPU memory",
            Field::SsdCapacity => "SSD capacity",
            Field::HddCapacity => "HDD capacity",
            Field::ScreenSize => "Screen size",
            Field::RefreshRate => "Refresh rate",
            Field::Price => "Price",
            Field::Brand => "Brand",
            Field::IntendedUse => "Intended use",
            Field::Color => "Color",
            Field::Weight => "Weight",
            Field::CpuFamily => "CPU family",
            Field::RamType => "RAM type",
            Field::GpuModel => "GPU model",
            Field::GpuType => "GPU type",
            Field::GpuVramType => "GPU VRAM type",
            Field::Resolution => "Resolution",
            Field::DisplayStandard => "Display standard",
            Field::PanelType => "Panel type",
            Field::OperatingSystem => "Operating system",
        }
    }

    pub fn spec(self) -> &'static FieldSpec {
        // FIELD_SPECS is laid out in declaration order
        &FIELD_SPECS[self as usize]
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    pub fn is_numeric(self) -> bool {
        self.kind() == FieldKind::Numeric
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
