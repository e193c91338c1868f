//! Core library for medicine package label text.
//!
//! This crate provides:
//! - Field extraction from OCR text of a medicine package: expiry date,
//!   manufacture date, batch number and a best guess at the medicine name
//! - Normalization of label dates to `YYYY-MM-DD`
//! - Expiry status of an extracted date
//! - Configuration shared by the CLI and WASM front ends

pub mod error;
pub mod label;
pub mod models;

pub use error::{MedlabelError, Result};
pub use label::{
    extract, normalize_date, LabelCandidates, LabelExtractor, LabelParser, ParsedLabel,
    RuleBasedParser,
};
pub use label::rules::expiry_status;
pub use models::config::MedlabelConfig;
pub use models::label::{ExpiryStatus, ExtractionResult, LabelDate, LabelField};
