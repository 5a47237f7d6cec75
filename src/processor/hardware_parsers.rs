//! Hardware categorical attributes: CPU family, RAM type, GPU model/type/VRAM,
//! resolution, display standard and panel type.

use lazy_static::lazy_static;
use regex::Regex;

use super::cascade::{Rule, first_match};
use super::text::{SHARED_MEMORY_SPELLINGS, categorical_text, mentions_shared_memory};
use crate::models::{
    CPU_FAMILY_LABELS, DISPLAY_STANDARD_LABELS, GPU_MODEL_LABELS, GPU_TYPE_LABELS,
    RESOLUTION_HEIGHT, RESOLUTION_WIDTH, RawValue,
};

lazy_static! {
    static ref CORE_ULTRA: Regex = Regex::new(r"(?:intel\s*)?core ultra\s*(5|7|9)\b").unwrap();
    static ref INTEL_ULTRA: Regex = Regex::new(r"\bintel\s*ultra(?:\s*core)?\s*(5|7|9)\b").unwrap();
    static ref CORE_I: Regex = Regex::new(r"\bcore\s*i\s*([3579])\b").unwrap();
    static ref CORE_WITHOUT_I: Regex = Regex::new(r"\b(?:intel\s*)?core\s*(5|7|9)\b").unwrap();
    static ref INTEL_N_SERIES: Regex = Regex::new(r"\bintel\s*n[0-9]+\b").unwrap();
    static ref BARE_N_SERIES: Regex = Regex::new(r"^n[0-9]{2,4}$").unwrap();
    static ref CORE_M: Regex = Regex::new(r"\bcore m\b").unwrap();
    static ref RYZEN_AI_TIER: Regex = Regex::new(r"ryzen ai\s*(7|9)\b").unwrap();
    static ref RYZEN_TIER: Regex = Regex::new(r"\bryzen\s*(3|5|7|9)\b").unwrap();
    static ref AMD_A_SERIES: Regex = Regex::new(r"\bamd\s*a[0-9]+\b").unwrap();

    /// Checked in order: each earlier pattern would also match a later one.
    static ref LPDDR_VARIANTS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"lpddr\s*5x").unwrap(), "lpddr5x"),
        (Regex::new(r"lpddr\s*5").unwrap(), "lpddr5"),
        (Regex::new(r"lpddr\s*4x").unwrap(), "lpddr4x"),
        (Regex::new(r"lpddr\s*4").unwrap(), "lpddr4"),
        (Regex::new(r"lpddr\s*3").unwrap(), "lpddr3"),
    ];
    static ref DDR_GENERATION: Regex = Regex::new(r"ddr\s*([0-9]+)").unwrap();

    static ref RTX_MODEL: Regex = Regex::new(r"\brtx\s*([0-9]{3,4})\s*(ti)?\b").unwrap();
    static ref GTX_MODEL: Regex = Regex::new(r"\bgtx\s*([0-9]{3,4})\s*(ti)?\b").unwrap();
    static ref MX_MODEL: Regex = Regex::new(r"\bmx\s*([0-9]{3})\b").unwrap();

    static ref VRAM_TYPE: Regex = Regex::new(r"^(?:gddr(?:4|5|5x|6|6x|7)|ddr(?:3|4|5))$").unwrap();
    static ref RESOLUTION: Regex = Regex::new(r"([0-9]{3,5})\s*x\s*([0-9]{3,5})").unwrap();

    static ref QHD_WORD: Regex = Regex::new(r"\bqhd\b").unwrap();
    static ref FHD_WORD: Regex = Regex::new(r"\bfhd\b").unwrap();
    static ref HD_WORD: Regex = Regex::new(r"\bhd\b").unwrap();
}

fn first_capture(re: &Regex, s: &str) -> Option<String> {
    Some(re.captures(s)?.get(1)?.as_str().to_string())
}

fn core_ultra(s: &str) -> Option<String> {
    let tier = first_capture(&CORE_ULTRA, s).or_else(|| first_capture(&INTEL_ULTRA, s))?;
    Some(format!("intel core ultra {tier}"))
}

fn core_i(s: &str) -> Option<String> {
    let tier = first_capture(&CORE_I, s).or_else(|| first_capture(&CORE_WITHOUT_I, s))?;
    Some(format!("intel core i{tier}"))
}

fn intel_n_series(s: &str) -> Option<String> {
    (INTEL_N_SERIES.is_match(s) || BARE_N_SERIES.is_match(s)).then(|| "intel n-series".to_string())
}

fn intel_core_m(s: &str) -> Option<String> {
    CORE_M.is_match(s).then(|| "intel core m".to_string())
}

fn ryzen_ai(s: &str) -> Option<String> {
    if !s.contains("ryzen ai") {
        return None;
    }
    Some(match first_capture(&RYZEN_AI_TIER, s) {
        Some(tier) => format!("amd ryzen ai {tier}"),
        None => "amd ryzen ai".to_string(),
    })
}

fn ryzen(s: &str) -> Option<String> {
    first_capture(&RYZEN_TIER, s).map(|tier| format!("amd ryzen {tier}"))
}

fn amd_legacy(s: &str) -> Option<String> {
    let legacy = s.contains("athlon")
        || AMD_A_SERIES.is_match(s)
        || s == "amd e"
        || s.contains("e-series");
    legacy.then(|| "amd legacy".to_string())
}

pub static CPU_FAMILY_RULES: &[Rule] = &[
    Rule::Exact { values: &["ip", "xp"], label: "unknown" },
    Rule::Canonical(CPU_FAMILY_LABELS),
    Rule::Custom { name: "intel core ultra", resolve: core_ultra },
    Rule::Custom { name: "intel core i", resolve: core_i },
    Rule::AnyOf { keywords: &["celeron"], label: "intel celeron" },
    Rule::Custom { name: "intel n-series", resolve: intel_n_series },
    Rule::Custom { name: "intel core m", resolve: intel_core_m },
    Rule::Custom { name: "amd ryzen ai", resolve: ryzen_ai },
    Rule::Custom { name: "amd ryzen", resolve: ryzen },
    Rule::AnyOf { keywords: &["ryzen z2"], label: "amd ryzen" },
    Rule::AnyOf { keywords: &["snapdragon x"], label: "qualcomm snapdragon x" },
    Rule::Custom { name: "amd legacy", resolve: amd_legacy },
    Rule::AnyOf { keywords: &["mediatek"], label: "mediatek" },
    Rule::AnyOf { keywords: &["intel tabanlı", "intel tabanli"], label: "intel" },
];

/// Resolves vendor and tier naming drift ("ultra core 7", "intel ultra 7",
/// "core 7", ...) to one family label. Unmatched text is `unknown`.
pub fn parse_cpu_family(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?
        .replace("ultra core", "core ultra")
        .replace("intel alder lake n100", "intel n100");
    Some(first_match(CPU_FAMILY_RULES, &s).unwrap_or_else(|| "unknown".to_string()))
}

/// Memory technology. `lpddr` is checked before `ddr` so "LPDDR5X" is never
/// read as a plain DDR generation; generations other than 3-5 are rejected.
pub fn parse_ram_type(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?;
    if s.contains("birleşik bellek") || s.contains("birlesik bellek") || s.contains("unified") {
        return Some("unified".to_string());
    }

    let s = s.replace(['-', '_'], "");
    if s.contains("lpddr") {
        return LPDDR_VARIANTS
            .iter()
            .find(|(re, _)| re.is_match(&s))
            .map(|(_, label)| label.to_string());
    }

    let generation = first_capture(&DDR_GENERATION, &s)?;
    matches!(generation.as_str(), "3" | "4" | "5").then(|| format!("ddr{generation}"))
}

fn nvidia_tier(re: &Regex, tier: &str, s: &str) -> Option<String> {
    let caps = re.captures(s)?;
    let number = caps.get(1)?.as_str();
    let ti = if caps.get(2).is_some() { " ti" } else { "" };
    Some(format!("nvidia {tier} {number}{ti}"))
}

fn nvidia_rtx(s: &str) -> Option<String> {
    nvidia_tier(&RTX_MODEL, "rtx", &s.replace("geforce", ""))
}

fn nvidia_gtx(s: &str) -> Option<String> {
    nvidia_tier(&GTX_MODEL, "gtx", &s.replace("geforce", ""))
}

fn nvidia_mx(s: &str) -> Option<String> {
    first_capture(&MX_MODEL, s).map(|number| format!("nvidia mx {number}"))
}

pub static GPU_MODEL_RULES: &[Rule] = &[
    Rule::Canonical(GPU_MODEL_LABELS),
    Rule::AnyOf {
        keywords: &[
            "paylaşımlı",
            "paylaşimli",
            "paylasimli",
            "onboard",
            "dahili ekran kartı",
            "dahili ekran karti",
            "integrated",
        ],
        label: "integrated",
    },
    Rule::AnyOf { keywords: &["adreno"], label: "qualcomm adreno" },
    // workstation "RTX 2000 Ada" must not be read as a GeForce model number
    Rule::AllOf { keywords: &["ada", "rtx"], label: "nvidia rtx ada" },
    Rule::Custom { name: "nvidia rtx", resolve: nvidia_rtx },
    Rule::Custom { name: "nvidia gtx", resolve: nvidia_gtx },
    Rule::Custom { name: "nvidia mx", resolve: nvidia_mx },
    Rule::AnyOf { keywords: &["nvidia"], label: "nvidia (other)" },
    Rule::AnyOf { keywords: &["intel"], label: "intel integrated" },
    Rule::AnyOf { keywords: &["amd", "radeon"], label: "amd integrated" },
];

pub fn parse_gpu_model(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?;
    Some(first_match(GPU_MODEL_RULES, &s).unwrap_or_else(|| "unknown".to_string()))
}

pub static GPU_TYPE_RULES: &[Rule] = &[
    Rule::Canonical(GPU_TYPE_LABELS),
    Rule::AllOf { keywords: &["yüksek seviye", "harici"], label: "dedicated_high_end" },
    Rule::AnyOf { keywords: &["paylaşımlı"], label: "shared" },
    Rule::AnyOf { keywords: &["onboard", "dahili"], label: "integrated" },
    Rule::AnyOf { keywords: &["harici"], label: "dedicated" },
];

pub fn parse_gpu_type(value: &RawValue) -> Option<String> {
    let mut s = categorical_text(value)?.replace("yuksek", "yüksek");
    for spelling in &SHARED_MEMORY_SPELLINGS[1..] {
        s = s.replace(*spelling, SHARED_MEMORY_SPELLINGS[0]);
    }
    Some(first_match(GPU_TYPE_RULES, &s).unwrap_or_else(|| "unknown".to_string()))
}

/// Video memory technology. Unlike the GPU model there is no `unknown`
/// bucket: anything that is not a known memory type is missing.
pub fn parse_gpu_vram_type(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?;
    if mentions_shared_memory(&s)
        || ["onboard", "dahili", "shared"].iter().any(|k| s.contains(k))
    {
        return Some("shared".to_string());
    }

    let compact = s.replace(['-', '_', ' '], "");
    VRAM_TYPE.is_match(&compact).then_some(compact)
}

/// "1920 x 1080" -> "1920x1080"
pub fn parse_resolution(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?.replace('×', "x");
    let caps = RESOLUTION.captures(&s)?;
    let width = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let height = caps.get(2)?.as_str().parse::<u32>().ok()?;

    if RESOLUTION_WIDTH.contains(width as f64) && RESOLUTION_HEIGHT.contains(height as f64) {
        Some(format!("{width}x{height}"))
    } else {
        None
    }
}

fn qhd(s: &str) -> Option<String> {
    QHD_WORD.is_match(s).then(|| "qhd".to_string())
}

fn fhd(s: &str) -> Option<String> {
    (s.contains("full hd") || FHD_WORD.is_match(s)).then(|| "fhd".to_string())
}

fn hd(s: &str) -> Option<String> {
    (s.contains("hd ready") || HD_WORD.is_match(s)).then(|| "hd".to_string())
}

pub static DISPLAY_STANDARD_RULES: &[Rule] = &[
    Rule::Canonical(DISPLAY_STANDARD_LABELS),
    Rule::AnyOf { keywords: &["oled"], label: "oled" },
    Rule::AnyOf { keywords: &["uhd", "4k", "ultra hd"], label: "uhd_4k" },
    Rule::AnyOf { keywords: &["wqxga"], label: "wqxga" },
    Rule::AnyOf { keywords: &["wuxga"], label: "wuxga" },
    Rule::AnyOf { keywords: &["wqhd"], label: "wqhd" },
    Rule::AnyOf { keywords: &["qhd+", "qhd +"], label: "qhd_plus" },
    Rule::Custom { name: "qhd", resolve: qhd },
    Rule::Custom { name: "fhd", resolve: fhd },
    Rule::Custom { name: "hd", resolve: hd },
    Rule::AnyOf {
        keywords: &["dokunmatik", "touch", "2.5k", "3.2k", "ultra wide"],
        label: "other",
    },
];

/// Display marketing standard. Always resolves to a label once past the
/// missing check; anything unrecognised is `other`.
pub fn parse_display_standard(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?;
    Some(first_match(DISPLAY_STANDARD_RULES, &s).unwrap_or_else(|| "other".to_string()))
}

const NON_PANEL_TOKENS: &[&str] = &[
    "fhd",
    "full hd",
    "wuxga",
    "wqxga",
    "qhd",
    "4k",
    "uhd",
    "anti-glare",
    "antiglare",
    "mikro kenarlı",
    "mikro kenarli",
    "micro bezel",
    "dokunmatik",
    "touch",
];

const PANEL_TECHNOLOGIES: &[&str] =
    &["ips", "tn", "va", "wva", "sva", "oled", "lcd", "led", "tft", "ltps"];

/// Panel technology. Values that mention resolution or other marketing
/// terms are rejected even when they also name a panel.
pub fn parse_panel_type(value: &RawValue) -> Option<String> {
    let s = categorical_text(value)?;
    if NON_PANEL_TOKENS.iter().any(|t| s.contains(t)) {
        return None;
    }

    let s = s.replace('/', " ");
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.contains(&"mini") && parts.contains(&"led") {
        return Some("mini led".to_string());
    }

    parts
        .into_iter()
        .find(|part| PANEL_TECHNOLOGIES.contains(part))
        .map(str::to_string)
}
