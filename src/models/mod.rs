pub mod data_models;
pub mod field;

pub use data_models::*;
pub use field::*;
