use anyhow::{Result, anyhow};
use polars::prelude::*;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{info, warn};

use crate::models::{RawRecord, RawValue};

/// Loads scraped listing exports (a JSON array of flat objects).
pub struct JsonFlattener;

impl JsonFlattener {
    pub fn new() -> Self {
        JsonFlattener
    }

    pub fn to_records(&self, json_data: &[Value]) -> Vec<RawRecord> {
        let mut records = Vec::with_capacity(json_data.len());
        let mut failed_count = 0;

        for (index, item) in json_data.iter().enumerate() {
            match RawRecord::from_json(item) {
                Some(record) => records.push(record),
                None => {
                    failed_count += 1;
                    warn!("Skipping listing at index {}: not a JSON object", index);
                }
            }
        }

        info!(
            "Record extraction summary: {} successful, {} failed out of {} total",
            records.len(),
            failed_count,
            json_data.len()
        );

        records
    }

    pub fn flatten_to_dataframe(&self, json_data: &[Value]) -> Result<DataFrame> {
        let records = self.to_records(json_data);
        self.records_to_dataframe(&records)
    }

    /// One column per key seen in any record. A column whose present values
    /// are all numbers becomes `Float64`; anything else is `String` with
    /// numbers written out. Stringified numbers lose their JSON type, so
    /// mixed columns no longer parse the way the records do.
    pub fn records_to_dataframe(&self, records: &[RawRecord]) -> Result<DataFrame> {
        if records.is_empty() {
            return Ok(DataFrame::empty());
        }

        let keys: BTreeSet<&str> = records
            .iter()
            .flat_map(|record| record.iter().map(|(key, _)| key.as_str()))
            .collect();

        let mut columns = Vec::with_capacity(keys.len());
        for key in keys {
            let values: Vec<&RawValue> = records
                .iter()
                .map(|record| record.get(key).unwrap_or(&RawValue::Missing))
                .collect();

            let all_numeric = values
                .iter()
                .all(|v| matches!(v, RawValue::Number(_) | RawValue::Missing));

            let series = if all_numeric {
                let numbers: Vec<Option<f64>> = values
                    .iter()
                    .map(|v| match v {
                        RawValue::Number(n) => Some(*n),
                        _ => None,
                    })
                    .collect();
                Series::new(key.into(), numbers)
            } else {
                let texts: Vec<Option<String>> = values
                    .iter()
                    .map(|v| match v {
                        RawValue::Text(s) => Some(s.clone()),
                        RawValue::Number(n) if !n.is_nan() => Some(n.to_string()),
                        _ => None,
                    })
                    .collect();
                Series::new(key.into(), texts)
            };
            columns.push(series.into());
        }

        DataFrame::new(columns).map_err(|e| anyhow!("Failed to create DataFrame: {}", e))
    }
}

impl Default for JsonFlattener {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_data() -> Vec<Value> {
        vec![
            json!({
                "Başlık": "Asus 8GB 256GB SSD",
                "Fiyat (TRY)": 25999.5,
                "Ekran Boyutu": "15.6 inç"
            }),
            json!("not a listing"),
            json!({
                "Başlık": "HP 16GB 1TB SSD",
                "Fiyat (TRY)": null,
                "Ekran Boyutu": 14
            }),
        ]
    }

    #[test]
    fn test_non_objects_are_skipped() {
        let flattener = JsonFlattener::new();
        let records = flattener.to_records(&sample_data());
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_column_types() {
        let flattener = JsonFlattener::new();
        let df = flattener.flatten_to_dataframe(&sample_data()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("Fiyat (TRY)").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Ekran Boyutu").unwrap().dtype(), &DataType::String);

        let screen: Vec<Option<&str>> =
            df.column("Ekran Boyutu").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(screen, vec![Some("15.6 inç"), Some("14")]);

        let price: Vec<Option<f64>> =
            df.column("Fiyat (TRY)").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(price, vec![Some(25999.5), None]);
    }

    #[test]
    fn test_empty_input() {
        let flattener = JsonFlattener::new();
        let df = flattener.flatten_to_dataframe(&[]).unwrap();
        assert_eq!(df.height(), 0);
    }
}
