//! Batch / lot number extraction.

use crate::models::label::LabelField;

use super::patterns::patterns_for;
use super::{ExtractionMatch, FieldExtractor};

/// Batch number extractor ("batch no.", "lot no.", "b. no.").
#[derive(Debug, Clone)]
pub struct BatchExtractor;

impl BatchExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BatchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BatchExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        patterns_for(LabelField::BatchNumber).find_map(|pattern| {
            let caps = pattern.regex.captures(text)?;
            let full_match = caps.get(0)?;
            Some(
                ExtractionMatch::new(caps[1].trim().to_string(), pattern.label, full_match.as_str())
                    .with_position(full_match.start(), full_match.end()),
            )
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        patterns_for(LabelField::BatchNumber)
            .flat_map(|pattern| {
                pattern.regex.captures_iter(text).filter_map(move |caps| {
                    let full_match = caps.get(0)?;
                    Some(
                        ExtractionMatch::new(
                            caps[1].trim().to_string(),
                            pattern.label,
                            full_match.as_str(),
                        )
                        .with_position(full_match.start(), full_match.end()),
                    )
                })
            })
            .collect()
    }
}

/// Extract the batch number from label text.
pub fn extract_batch_number(text: &str) -> Option<String> {
    BatchExtractor::new().extract(text).map(|m| m.value)
}
