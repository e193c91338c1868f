//! Medicine label field extraction module.

mod parser;
pub mod rules;

pub use parser::{LabelCandidates, LabelParser, ParsedLabel, RuleBasedParser};

use lazy_static::lazy_static;

use crate::models::label::{ExtractionResult, LabelDate};

/// Trait for label field extractors.
///
/// Extraction never fails; fields that cannot be found are `None`.
pub trait LabelExtractor {
    /// Extract the label fields from OCR text.
    fn extract(&self, text: &str) -> ExtractionResult;

    /// Every candidate each field's rules can find, for diagnostics.
    fn extract_candidates(&self, text: &str) -> LabelCandidates;
}

lazy_static! {
    static ref DEFAULT_PARSER: RuleBasedParser = RuleBasedParser::new();
}

/// Extract expiry date, manufacture date, batch number and medicine name
/// from OCR text using the default rules.
pub fn extract(text: &str) -> ExtractionResult {
    DEFAULT_PARSER.extract(text)
}

/// Normalize a `D/M/Y` date token to a [`LabelDate`].
///
/// See [`rules::normalize_date`].
pub fn normalize_date(token: &str) -> Option<LabelDate> {
    rules::normalize_date(token)
}
