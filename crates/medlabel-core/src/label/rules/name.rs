//! Medicine name heuristic.
//!
//! Package photos usually show the product name on its own short line, with
//! dates and codes on lines of their own. The first short line that does not
//! look like a date or a batch/expiry line is taken as the name.

use super::patterns::DATE_SHAPE;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::config::ExtractionConfig;

const PATTERN_LABEL: &str = "first plain line";

/// Medicine name extractor.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    min_line_length: usize,
    max_name_length: usize,
    stop_words: Vec<String>,
}

impl NameExtractor {
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_line_length: config.min_line_length,
            max_name_length: config.max_name_length,
            stop_words: lowercase_all(&config.name_stop_words),
        }
    }

    pub fn with_min_line_length(mut self, len: usize) -> Self {
        self.min_line_length = len;
        self
    }

    pub fn with_max_name_length(mut self, len: usize) -> Self {
        self.max_name_length = len;
        self
    }

    pub fn with_stop_words(mut self, words: &[String]) -> Self {
        self.stop_words = lowercase_all(words);
        self
    }

    fn is_candidate(&self, line: &str) -> bool {
        let len = line.chars().count();
        if len < self.min_line_length || len >= self.max_name_length {
            return false;
        }

        if DATE_SHAPE.is_match(line) {
            return false;
        }

        let lower = line.to_lowercase();
        !self.stop_words.iter().any(|w| lower.contains(w.as_str()))
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        trimmed_lines(text)
            .filter(|(_, line)| self.is_candidate(line))
            .map(|(start, line)| {
                ExtractionMatch::new(line.to_string(), PATTERN_LABEL, line)
                    .with_position(start, start + line.len())
            })
            .collect()
    }
}

/// Extract the medicine name from label text using default settings.
pub fn extract_medicine_name(text: &str) -> Option<String> {
    NameExtractor::new().extract(text).map(|m| m.value)
}

/// Trimmed lines with the byte offset of each trimmed line in `text`.
fn trimmed_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split('\n').map(move |raw| {
        let start = offset + (raw.len() - raw.trim_start().len());
        offset += raw.len() + 1;
        (start, raw.trim())
    })
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}
