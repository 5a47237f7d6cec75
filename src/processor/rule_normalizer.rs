use anyhow::{Context, Result};
use polars::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use super::categorical_parsers::{
    parse_brand, parse_color, parse_intended_use, parse_operating_system, parse_weight,
};
use super::field_classifier::{ColumnRole, FieldClassifier};
use super::hardware_parsers::{
    parse_cpu_family, parse_display_standard, parse_gpu_model, parse_gpu_type,
    parse_gpu_vram_type, parse_panel_type, parse_ram_type, parse_resolution,
};
use super::numeric_parsers::{
    parse_capacity_gb, parse_core_count, parse_cpu_generation, parse_gpu_memory,
    parse_max_cpu_frequency, parse_price, parse_ram_size, parse_refresh_rate, parse_screen_size,
};
use super::title_extractor::{TITLE_FALLBACK_FIELDS, TitleAttributes, extract_title_attributes};
use crate::config::NormalizerConfig;
use crate::models::{CanonicalRecord, CanonicalValue, Field, RawRecord, RawValue};

/// Turns scraped listings into canonical records.
pub struct RuleNormalizer {
    classifier: FieldClassifier,
    gpu_shared_memory_gb: f64,
    fill_from_title: bool,
}

impl RuleNormalizer {
    pub fn new() -> Self {
        Self::from_config(&NormalizerConfig::default())
    }

    pub fn from_config(config: &NormalizerConfig) -> Self {
        let mut classifier = FieldClassifier::new();
        for (alias, field) in &config.columns {
            classifier.add_field_mapping(alias, ColumnRole::Attribute(*field));
        }

        RuleNormalizer {
            classifier,
            gpu_shared_memory_gb: config.normalizer.gpu_shared_memory_gb,
            fill_from_title: config.normalizer.fill_from_title,
        }
    }

    pub fn classifier(&self) -> &FieldClassifier {
        &self.classifier
    }

    pub fn normalize_value(&self, field: Field, value: &RawValue) -> CanonicalValue {
        match field {
            Field::CpuGeneration => parse_cpu_generation(value).into(),
            Field::CoreCount => parse_core_count(value).into(),
            Field::MaxCpuFrequency => parse_max_cpu_frequency(value).into(),
            Field::RamSize => parse_ram_size(value).into(),
            Field::GpuMemory => parse_gpu_memory(value, self.gpu_shared_memory_gb).into(),
            Field::SsdCapacity | Field::HddCapacity => parse_capacity_gb(value).into(),
            Field::ScreenSize => parse_screen_size(value).into(),
            Field::RefreshRate => parse_refresh_rate(value).into(),
            Field::Price => parse_price(value).into(),
            Field::Brand => parse_brand(value).into(),
            Field::IntendedUse => parse_intended_use(value).into(),
            Field::Color => parse_color(value).into(),
            Field::Weight => parse_weight(value).into(),
            Field::CpuFamily => parse_cpu_family(value).into(),
            Field::RamType => parse_ram_type(value).into(),
            Field::GpuModel => parse_gpu_model(value).into(),
            Field::GpuType => parse_gpu_type(value).into(),
            Field::GpuVramType => parse_gpu_vram_type(value).into(),
            Field::Resolution => parse_resolution(value).into(),
            Field::DisplayStandard => parse_display_standard(value).into(),
            Field::PanelType => parse_panel_type(value).into(),
            Field::OperatingSystem => parse_operating_system(value).into(),
        }
    }

    pub fn normalize_record(&self, record: &RawRecord) -> CanonicalRecord {
        let mut canonical = CanonicalRecord::new();
        let mut field_columns: BTreeMap<Field, Vec<&str>> = BTreeMap::new();
        let mut titles: Vec<(&str, &str)> = Vec::new();

        for (column, value) in record.iter() {
            match self.classifier.classify_field(column) {
                Some(ColumnRole::Attribute(field)) => {
                    canonical.insert(column, self.normalize_value(field, value));
                    field_columns.entry(field).or_default().push(column.as_str());
                }
                Some(ColumnRole::Title) => {
                    if let Some(text) = value.as_text() {
                        titles.push((column.as_str(), text));
                    }
                }
                None => debug!("Dropping unrecognised column '{}'", column),
            }
        }

        if !self.fill_from_title {
            return canonical;
        }

        // Several title columns only happen with hand-merged exports; pick one deterministically
        titles.sort();
        let Some(title) = titles.iter().map(|(_, text)| *text).find(|t| !t.trim().is_empty())
        else {
            return canonical;
        };

        let mut attributes: Option<TitleAttributes> = None;
        for field in TITLE_FALLBACK_FIELDS {
            let mut columns = field_columns.get(&field).cloned().unwrap_or_default();
            columns.sort();
            if columns.iter().any(|column| !canonical.is_missing(column)) {
                continue;
            }

            let attrs = attributes.get_or_insert_with(|| extract_title_attributes(title));
            let Some(raw) = attrs.raw_value_for(field) else {
                continue;
            };
            let value = self.normalize_value(field, &raw);
            if value.is_missing() {
                continue;
            }

            let target = columns.first().copied().unwrap_or(field.name());
            debug!("Filled '{}' from title: {:?}", target, value);
            canonical.insert(target, value);
        }

        canonical
    }

    pub fn normalize_records(&self, records: &[RawRecord]) -> Vec<CanonicalRecord> {
        let normalized: Vec<CanonicalRecord> =
            records.iter().map(|record| self.normalize_record(record)).collect();

        let (resolved, missing) = normalized
            .iter()
            .flat_map(|record| record.iter())
            .fold((0usize, 0usize), |(resolved, missing), (_, value)| {
                if value.is_missing() {
                    (resolved, missing + 1)
                } else {
                    (resolved + 1, missing)
                }
            });

        info!(
            "Normalized {} records: {} values resolved, {} missing",
            normalized.len(),
            resolved,
            missing
        );

        normalized
    }

    /// Frame of already-normalized records, one column per canonical column
    /// seen in any record. Values are carried over as is, so the frame holds
    /// exactly what [`normalize_records`](Self::normalize_records) returned.
    pub fn canonical_dataframe(&self, normalized: &[CanonicalRecord]) -> Result<DataFrame> {
        if normalized.is_empty() {
            return Ok(DataFrame::empty());
        }

        let mut fields: BTreeMap<&str, Field> = BTreeMap::new();
        for (column, _) in normalized.iter().flat_map(|record| record.iter()) {
            match self.classifier.classify_field(column) {
                Some(ColumnRole::Attribute(field)) => {
                    fields.insert(column.as_str(), field);
                }
                _ => warn!("Canonical column '{}' has no field, leaving it out", column),
            }
        }

        let columns: Vec<Column> = fields
            .into_iter()
            .map(|(col_name, field)| {
                let values: Vec<CanonicalValue> = normalized
                    .iter()
                    .map(|record| record.get(col_name).cloned().unwrap_or(CanonicalValue::Missing))
                    .collect();
                canonical_series(col_name, field, &values).into()
            })
            .collect();

        DataFrame::new(columns).context("Failed to build canonical DataFrame")
    }

    /// Column-wise variant of [`normalize_record`](Self::normalize_record).
    /// Recognised columns are replaced in place; other columns are left alone.
    ///
    /// A `String` column is parsed as text throughout, so a bare number stored
    /// as text (`"14"` in a screen size column) needs its unit to resolve.
    /// Frames built from mixed JSON columns should go through
    /// [`canonical_dataframe`](Self::canonical_dataframe) instead.
    pub fn normalize_dataframe(&self, df: &mut DataFrame) -> Result<()> {
        let column_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut normalized: Vec<(String, Field, Vec<CanonicalValue>)> = Vec::new();
        let mut title_column: Option<String> = None;

        for col_name in column_names {
            match self.classifier.classify_field(&col_name) {
                Some(ColumnRole::Attribute(field)) => {
                    let raw = raw_column_values(df, &col_name)?;
                    let values = raw.iter().map(|v| self.normalize_value(field, v)).collect();
                    normalized.push((col_name, field, values));
                }
                Some(ColumnRole::Title) => {
                    if title_column.is_none() {
                        title_column = Some(col_name);
                    }
                }
                None => debug!("Leaving unrecognised column '{}' as is", col_name),
            }
        }

        if self.fill_from_title {
            match &title_column {
                Some(title) => self.fill_columns_from_title(df, title, &mut normalized)?,
                None => warn!("No title column found, skipping title fallback"),
            }
        }

        for (col_name, field, values) in &normalized {
            df.with_column(canonical_series(col_name, *field, values))?;
        }

        Ok(())
    }

    fn fill_columns_from_title(
        &self,
        df: &DataFrame,
        title_column: &str,
        normalized: &mut Vec<(String, Field, Vec<CanonicalValue>)>,
    ) -> Result<()> {
        let column = df.column(title_column)?;
        if column.dtype() != &DataType::String {
            warn!("Title column '{}' is not text, skipping title fallback", title_column);
            return Ok(());
        }
        let attributes: Vec<Option<TitleAttributes>> = column
            .str()
            .with_context(|| format!("Failed to read title column: {}", title_column))?
            .into_iter()
            .map(|title| title.map(extract_title_attributes))
            .collect();

        let height = df.height();
        let mut filled = 0usize;

        for field in TITLE_FALLBACK_FIELDS {
            let indices: Vec<usize> = normalized
                .iter()
                .enumerate()
                .filter(|(_, (_, f, _))| *f == field)
                .map(|(i, _)| i)
                .collect();

            let target = match indices.first() {
                Some(&i) => i,
                None => {
                    normalized.push((
                        field.name().to_string(),
                        field,
                        vec![CanonicalValue::Missing; height],
                    ));
                    normalized.len() - 1
                }
            };

            for (row, attrs) in attributes.iter().enumerate() {
                let Some(attrs) = attrs else { continue };
                let all_missing = indices
                    .iter()
                    .all(|&i| normalized[i].2[row].is_missing());
                if !all_missing || !normalized[target].2[row].is_missing() {
                    continue;
                }
                let Some(raw) = attrs.raw_value_for(field) else {
                    continue;
                };
                let value = self.normalize_value(field, &raw);
                if !value.is_missing() {
                    normalized[target].2[row] = value;
                    filled += 1;
                }
            }
        }

        info!("Filled {} cells from '{}'", filled, title_column);
        Ok(())
    }
}

impl Default for RuleNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn raw_column_values(df: &DataFrame, col_name: &str) -> Result<Vec<RawValue>> {
    let column = df.column(col_name)?;

    let values: Vec<RawValue> = match column.dtype() {
        DataType::String => column.str()?.into_iter().map(RawValue::from).collect(),
        DataType::Null | DataType::Boolean => vec![RawValue::Missing; column.len()],
        _ => {
            let numbers = column
                .cast(&DataType::Float64)
                .with_context(|| format!("Failed to read column as numbers: {}", col_name))?;
            numbers
                .f64()?
                .into_iter()
                .map(|n| n.map_or(RawValue::Missing, RawValue::Number))
                .collect()
        }
    };

    Ok(values)
}

fn canonical_series(col_name: &str, field: Field, values: &[CanonicalValue]) -> Series {
    if field.is_numeric() {
        let numbers: Vec<Option<f64>> = values.iter().map(CanonicalValue::as_number).collect();
        Series::new(col_name.into(), numbers)
    } else {
        let labels: Vec<Option<String>> = values
            .iter()
            .map(|v| v.as_category().map(str::to_string))
            .collect();
        Series::new(col_name.into(), labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerSection;
    use pretty_assertions::assert_eq;

    fn sample_record() -> RawRecord {
        RawRecord::new()
            .with("Başlık", "i5 512GB SSD 16GB RAM")
            .with("Ram (Sistem Belleği)", "Belirtilmemiş")
            .with("Fiyat (TRY)", "44.799,23 TL")
            .with("Renk", "Uzay Grisi")
            .with("Garanti Süresi", "2 Yıl")
    }

    #[test]
    fn test_normalize_value_dispatch() {
        let normalizer = RuleNormalizer::new();

        assert_eq!(
            normalizer.normalize_value(Field::Price, &RawValue::text("45.999")),
            CanonicalValue::Number(45999.0)
        );
        assert_eq!(
            normalizer.normalize_value(Field::SsdCapacity, &RawValue::text("1 TB")),
            CanonicalValue::Number(1024.0)
        );
        assert_eq!(
            normalizer.normalize_value(Field::RamType, &RawValue::text("DDR5 4800 MHz")),
            CanonicalValue::Category("ddr5".to_string())
        );
        assert_eq!(
            normalizer.normalize_value(Field::Color, &RawValue::Missing),
            CanonicalValue::Missing
        );
    }

    #[test]
    fn test_record_with_title_fallback() {
        let normalizer = RuleNormalizer::new();
        let canonical = normalizer.normalize_record(&sample_record());

        let mut expected = CanonicalRecord::new();
        expected.insert("Ram (Sistem Belleği)", CanonicalValue::Number(16.0));
        expected.insert("Fiyat (TRY)", CanonicalValue::Number(44799.23));
        expected.insert("Renk", CanonicalValue::Category("gray".to_string()));
        expected.insert("SSD capacity", CanonicalValue::Number(512.0));

        assert_eq!(canonical, expected);
    }

    #[test]
    fn test_title_never_overrides_structured_value() {
        let normalizer = RuleNormalizer::new();
        let record = RawRecord::new()
            .with("Başlık", "Lenovo 16GB 512GB SSD 144Hz")
            .with("RAM size", "8 GB")
            .with("Refresh rate", "60 Hz");

        let canonical = normalizer.normalize_record(&record);
        assert_eq!(canonical.number("RAM size"), Some(8.0));
        assert_eq!(canonical.number("Refresh rate"), Some(60.0));
        assert_eq!(canonical.number("SSD capacity"), Some(512.0));
    }

    #[test]
    fn test_fallback_can_be_disabled() {
        let config = NormalizerConfig {
            normalizer: NormalizerSection {
                fill_from_title: false,
                ..NormalizerSection::default()
            },
            ..NormalizerConfig::default()
        };
        let normalizer = RuleNormalizer::from_config(&config);
        let canonical = normalizer.normalize_record(&sample_record());

        assert!(canonical.is_missing("Ram (Sistem Belleği)"));
        assert!(canonical.get("SSD capacity").is_none());
    }

    #[test]
    fn test_config_aliases_and_shared_gpu_memory() {
        let mut config = NormalizerConfig::default();
        config.normalizer.gpu_shared_memory_gb = 0.5;
        config.columns.insert("Bellek".to_string(), Field::RamSize);
        let normalizer = RuleNormalizer::from_config(&config);

        let record = RawRecord::new()
            .with("Bellek", "32 GB")
            .with("Ekran Kartı Hafızası", "Paylaşımlı");
        let canonical = normalizer.normalize_record(&record);

        assert_eq!(canonical.number("Bellek"), Some(32.0));
        assert_eq!(canonical.number("Ekran Kartı Hafızası"), Some(0.5));
    }

    #[test]
    fn test_upper_case_shared_gpu_spelling() {
        let normalizer = RuleNormalizer::new();
        let shared = RawValue::text("PAYLAŞIMLI");

        assert_eq!(
            normalizer.normalize_value(Field::GpuMemory, &shared),
            CanonicalValue::Number(0.0)
        );
        assert_eq!(
            normalizer.normalize_value(Field::GpuType, &shared),
            CanonicalValue::Category("shared".to_string())
        );
        assert_eq!(
            normalizer.normalize_value(Field::GpuVramType, &shared),
            CanonicalValue::Category("shared".to_string())
        );
        assert_eq!(
            normalizer.normalize_value(Field::GpuModel, &shared),
            CanonicalValue::Category("integrated".to_string())
        );
    }

    #[test]
    fn test_normalize_records() {
        let normalizer = RuleNormalizer::new();
        let records = vec![sample_record(), RawRecord::new().with("Marka", "LENOVO")];

        let canonical = normalizer.normalize_records(&records);
        assert_eq!(canonical.len(), 2);
        assert_eq!(canonical[1].category("Marka"), Some("lenovo"));
    }

    #[test]
    fn test_canonical_dataframe_matches_records_on_mixed_columns() {
        use crate::processor::JsonFlattener;
        use serde_json::json;

        let normalizer = RuleNormalizer::new();
        let records = JsonFlattener::new().to_records(&[
            json!({
                "Ekran Boyutu": "15,6 inç",
                "SSD Kapasitesi": "512 GB",
                "Fiyat (TRY)": "44.799,23 TL",
                "Marka": "Asus"
            }),
            json!({
                "Ekran Boyutu": 14,
                "SSD Kapasitesi": 1024,
                "Fiyat (TRY)": 12345.678
            }),
        ]);
        let canonical = normalizer.normalize_records(&records);
        let df = normalizer.canonical_dataframe(&canonical).unwrap();

        for column in ["Ekran Boyutu", "SSD Kapasitesi", "Fiyat (TRY)"] {
            let from_frame: Vec<Option<f64>> =
                df.column(column).unwrap().f64().unwrap().into_iter().collect();
            let from_records: Vec<Option<f64>> =
                canonical.iter().map(|record| record.number(column)).collect();
            assert_eq!(from_frame, from_records, "{column}");
        }

        let screen: Vec<Option<f64>> =
            df.column("Ekran Boyutu").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(screen, vec![Some(15.6), Some(14.0)]);
        let ssd: Vec<Option<f64>> =
            df.column("SSD Kapasitesi").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(ssd, vec![Some(512.0), Some(1024.0)]);
        let price: Vec<Option<f64>> =
            df.column("Fiyat (TRY)").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(price, vec![Some(44799.23), Some(12345.678)]);

        let brand: Vec<Option<&str>> =
            df.column("Marka").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(brand, vec![Some("asus"), None]);
    }

    #[test]
    fn test_canonical_dataframe_empty() {
        let normalizer = RuleNormalizer::new();
        let df = normalizer.canonical_dataframe(&[]).unwrap();
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_normalize_dataframe() {
        let normalizer = RuleNormalizer::new();
        let mut df = DataFrame::new(vec![
            Series::new(
                "Başlık".into(),
                vec!["Asus 8GB 256GB SSD 144Hz", "HP 16GB 1TB SSD FHD"],
            )
            .into(),
            Series::new("Ram (Sistem Belleği)".into(), vec![Some("16 GB"), None]).into(),
            Series::new("Fiyat (TRY)".into(), vec![Some(25999.0), Some(f64::NAN)]).into(),
            Series::new("Stok".into(), vec![3i64, 0]).into(),
        ])
        .unwrap();

        normalizer.normalize_dataframe(&mut df).unwrap();

        let ram: Vec<Option<f64>> = df
            .column("Ram (Sistem Belleği)")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ram, vec![Some(16.0), Some(16.0)]);

        let price: Vec<Option<f64>> =
            df.column("Fiyat (TRY)").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(price, vec![Some(25999.0), None]);

        let ssd: Vec<Option<f64>> =
            df.column("SSD capacity").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(ssd, vec![Some(256.0), Some(1024.0)]);

        let refresh: Vec<Option<f64>> =
            df.column("Refresh rate").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(refresh, vec![Some(144.0), None]);

        let display: Vec<Option<&str>> =
            df.column("Display standard").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(display, vec![None, Some("fhd")]);

        // untouched
        assert_eq!(df.column("Stok").unwrap().dtype(), &DataType::Int64);
    }
}
