use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// A single scraped attribute value before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Missing,
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn text(s: impl Into<String>) -> Self {
        RawValue::Text(s.into())
    }

    /// NaN literals count as absent, same as an empty cell.
    pub fn is_absent(&self) -> bool {
        match self {
            RawValue::Missing => true,
            RawValue::Number(n) => n.is_nan(),
            RawValue::Text(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&Value> for RawValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(RawValue::Missing, RawValue::Number),
            Value::String(s) => RawValue::Text(s.clone()),
            _ => RawValue::Missing,
        }
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<Option<&str>> for RawValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(RawValue::Missing, RawValue::from)
    }
}

/// Normalized value of one field. `Missing` serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Missing,
    Number(f64),
    Category(String),
}

impl CanonicalValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CanonicalValue::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CanonicalValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_category(&self) -> Option<&str> {
        match self {
            CanonicalValue::Category(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Option<f64>> for CanonicalValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CanonicalValue::Missing, CanonicalValue::Number)
    }
}

impl From<Option<String>> for CanonicalValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(CanonicalValue::Missing, CanonicalValue::Category)
    }
}

/// Column name -> raw value for one scraped listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    values: HashMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<RawValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: &str, value: impl Into<RawValue>) {
        self.values.insert(column.to_string(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.values.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds a record from a JSON object; anything else yields `None`.
    pub fn from_json(item: &Value) -> Option<Self> {
        let object = item.as_object()?;
        let values = object
            .iter()
            .map(|(key, value)| (key.clone(), RawValue::from(value)))
            .collect();
        Some(RawRecord { values })
    }
}

/// Normalized listing, keyed by the column names of the raw record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalRecord {
    values: BTreeMap<String, CanonicalValue>,
}

impl CanonicalRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: &str, value: CanonicalValue) {
        self.values.insert(column.to_string(), value);
    }

    pub fn get(&self, column: &str) -> Option<&CanonicalValue> {
        self.values.get(column)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CanonicalValue::as_number)
    }

    pub fn category(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(CanonicalValue::as_category)
    }

    /// True when the column is absent or holds the missing sentinel.
    pub fn is_missing(&self, column: &str) -> bool {
        self.get(column).is_none_or(CanonicalValue::is_missing)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CanonicalValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_record_from_json() {
        let item = json!({
            "Başlık": "Lenovo IdeaPad 16GB 512GB SSD",
            "Ekran Boyutu": 15.6,
            "Renk": null,
            "Stokta": true
        });

        let record = RawRecord::from_json(&item).unwrap();
        assert_eq!(record.len(), 4);
        assert_eq!(
            record.get("Başlık"),
            Some(&RawValue::text("Lenovo IdeaPad 16GB 512GB SSD"))
        );
        assert_eq!(record.get("Ekran Boyutu"), Some(&RawValue::Number(15.6)));
        assert_eq!(record.get("Renk"), Some(&RawValue::Missing));
        assert_eq!(record.get("Stokta"), Some(&RawValue::Missing));

        assert!(RawRecord::from_json(&json!(["not", "an", "object"])).is_none());
    }

    #[test]
    fn test_nan_is_absent() {
        assert!(RawValue::Number(f64::NAN).is_absent());
        assert!(RawValue::Missing.is_absent());
        assert!(!RawValue::Number(0.0).is_absent());
        assert!(!RawValue::text("").is_absent());
    }

    #[test]
    fn test_canonical_record_serializes_missing_as_null() {
        let mut record = CanonicalRecord::new();
        record.insert("Price", CanonicalValue::Number(44799.23));
        record.insert("Color", CanonicalValue::Category("gray".to_string()));
        record.insert("Weight", CanonicalValue::Missing);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            json!({ "Color": "gray", "Price": 44799.23, "Weight": null })
        );
        assert!(record.is_missing("Weight"));
        assert!(record.is_missing("Not a column"));
        assert!(!record.is_missing("Price"));
    }
}
