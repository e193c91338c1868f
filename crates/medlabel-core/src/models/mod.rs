//! Data models and configuration.

pub mod config;
pub mod label;

pub use config::{ExpiryConfig, ExtractionConfig, MedlabelConfig};
pub use label::{ExpiryStatus, ExtractionResult, LabelDate, LabelField};
