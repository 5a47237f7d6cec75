//! Attribute normalization for scraped laptop listings.
//!
//! Raw marketplace attributes (Turkish headers, free-form values) are mapped
//! to a fixed set of canonical fields. Numeric fields are range-checked,
//! categorical fields are collapsed onto a closed label set, and a few fields
//! can be recovered from the listing title when the attribute table left
//! them empty.

pub mod config;
pub mod models;
pub mod processor;

pub use config::NormalizerConfig;
pub use models::{CanonicalRecord, CanonicalValue, Field, RawRecord, RawValue};
pub use processor::{FieldClassifier, JsonFlattener, RuleNormalizer};
