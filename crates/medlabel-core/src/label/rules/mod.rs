//! Rule-based field extractors for medicine package labels.

pub mod batch;
pub mod dates;
pub mod expiry;
pub mod name;
pub mod patterns;

pub use batch::{extract_batch_number, BatchExtractor};
pub use dates::{normalize_date, normalize_month_year, DateExtractor};
pub use expiry::expiry_status;
pub use name::{extract_medicine_name, NameExtractor};
pub use patterns::{patterns_for, CaptureShape, FieldPattern};

use serde::Serialize;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Every usable candidate for the field, best first.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Label of the pattern or heuristic that produced it.
    pub pattern: &'static str,
    /// Byte span in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, pattern: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            pattern,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
