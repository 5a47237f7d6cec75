pub mod normalizer_config;

pub use normalizer_config::*;
