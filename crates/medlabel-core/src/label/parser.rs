//! Rule-based label parser combining the per-field extractors.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::label::{ExtractionResult, LabelDate};

use super::rules::{
    BatchExtractor, DateExtractor, ExtractionMatch, FieldExtractor, NameExtractor,
};
use super::LabelExtractor;

/// Result of parsing one OCR transcript.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLabel {
    /// Extracted label fields.
    pub label: ExtractionResult,
    /// Raw OCR text.
    pub raw_text: String,
    /// One warning per field that could not be extracted.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Every pattern hit per field, best first.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCandidates {
    pub expiry_date: Vec<ExtractionMatch<LabelDate>>,
    pub manufacture_date: Vec<ExtractionMatch<LabelDate>>,
    pub batch_number: Vec<ExtractionMatch<String>>,
    pub medicine_name: Vec<ExtractionMatch<String>>,
}

/// Trait for label parsing.
pub trait LabelParser {
    /// Parse label fields from OCR text.
    fn parse(&self, text: &str) -> ParsedLabel;
}

/// Label parser built from the ordered pattern rules.
///
/// Holds no mutable state, so one parser can be shared across threads.
#[derive(Debug, Clone)]
pub struct RuleBasedParser {
    expiry: DateExtractor,
    manufacture: DateExtractor,
    batch: BatchExtractor,
    name: NameExtractor,
}

impl RuleBasedParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            expiry: DateExtractor::expiry().with_month_year(config.month_year_expiry),
            manufacture: DateExtractor::manufacture(),
            batch: BatchExtractor::new(),
            name: NameExtractor::from_config(config),
        }
    }

    /// Set whether `EXP: MM/YYYY` is accepted.
    pub fn with_month_year_expiry(mut self, enabled: bool) -> Self {
        self.expiry = self.expiry.with_month_year(enabled);
        self
    }

    /// Set the minimum medicine name line length.
    pub fn with_min_line_length(mut self, len: usize) -> Self {
        self.name = self.name.with_min_line_length(len);
        self
    }

    /// Set the exclusive maximum medicine name length.
    pub fn with_max_name_length(mut self, len: usize) -> Self {
        self.name = self.name.with_max_name_length(len);
        self
    }

    /// Replace the words that disqualify a line as the medicine name.
    pub fn with_stop_words(mut self, words: &[String]) -> Self {
        self.name = self.name.with_stop_words(words);
        self
    }
}

impl Default for RuleBasedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelExtractor for RuleBasedParser {
    fn extract(&self, text: &str) -> ExtractionResult {
        let result = ExtractionResult {
            expiry_date: self.expiry.extract(text).map(|m| m.value),
            manufacture_date: self.manufacture.extract(text).map(|m| m.value),
            batch_number: self.batch.extract(text).map(|m| m.value),
            medicine_name: self.name.extract(text).map(|m| m.value),
        };

        debug!(
            "Extracted expiry={:?} mfg={:?} batch={:?} name={:?}",
            result.expiry_date.map(|d| d.to_string()),
            result.manufacture_date.map(|d| d.to_string()),
            result.batch_number,
            result.medicine_name
        );

        result
    }

    fn extract_candidates(&self, text: &str) -> LabelCandidates {
        LabelCandidates {
            expiry_date: self.expiry.extract_all(text),
            manufacture_date: self.manufacture.extract_all(text),
            batch_number: self.batch.extract_all(text),
            medicine_name: self.name.extract_all(text),
        }
    }
}

impl LabelParser for RuleBasedParser {
    fn parse(&self, text: &str) -> ParsedLabel {
        let start = Instant::now();

        info!("Parsing label from {} characters of text", text.len());

        let label = self.extract(text);
        let warnings: Vec<String> = label
            .missing_fields()
            .into_iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();

        debug!(
            "Found {} of 4 label fields in {:?}",
            label.present_count(),
            start.elapsed()
        );

        ParsedLabel {
            label,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
