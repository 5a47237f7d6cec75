pub mod cascade;
pub mod categorical_parsers;
pub mod field_classifier;
pub mod hardware_parsers;
pub mod json_flattener;
pub mod numeric_parsers;
pub mod rule_normalizer;
pub mod text;
pub mod title_extractor;

pub use field_classifier::*;
pub use json_flattener::*;
pub use rule_normalizer::*;
pub use title_extractor::*;
