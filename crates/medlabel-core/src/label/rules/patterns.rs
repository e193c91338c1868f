//! Ordered label patterns for medicine package text.
//!
//! Each field has a fixed priority list. Extractors walk the list in order
//! and stop at the first pattern whose regex matches, even if the captured
//! value later turns out to be unusable.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::label::LabelField;

/// `D{1,2}[sep]D{1,2}[sep]D{2,4}` with `sep` one of `/`, `-`, `.`.
const DATE_TOKEN: &str = r"(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4})";

/// `MM[sep]YYYY`, as printed on many expiry stamps.
const MONTH_YEAR_TOKEN: &str = r"(\d{1,2}[/\-.]\d{4})\b";

/// Batch and lot codes.
const BATCH_TOKEN: &str = r"([A-Z0-9]+)";

/// Optional colon or dash between a label and its value.
const SEPARATOR: &str = r"\s*[:\-]?\s*";

/// How a pattern's capture group is turned into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureShape {
    /// Three-part date token, read by the day/month/year normalizer.
    DayMonthYear,
    /// Two-part month/year token, read as the first day of the month.
    MonthYear,
    /// Alphanumeric token used as-is after trimming.
    Token,
}

/// One entry of the priority list.
#[derive(Debug)]
pub struct FieldPattern {
    /// Field this pattern fills.
    pub field: LabelField,
    /// Short name of the label text it looks for.
    pub label: &'static str,
    /// How capture group 1 is interpreted.
    pub shape: CaptureShape,
    /// Case-insensitive regex; capture group 1 is the value.
    pub regex: Regex,
}

impl FieldPattern {
    fn new(
        field: LabelField,
        label: &'static str,
        shape: CaptureShape,
        prefix: &str,
        token: &str,
    ) -> Self {
        let regex = Regex::new(&format!("(?i){}{}{}", prefix, SEPARATOR, token)).unwrap();
        Self {
            field,
            label,
            shape,
            regex,
        }
    }
}

lazy_static! {
    /// Every label pattern, grouped by field, in priority order.
    pub static ref FIELD_PATTERNS: Vec<FieldPattern> = {
        use CaptureShape::*;
        use LabelField::*;

        vec![
            // Expiry date
            FieldPattern::new(ExpiryDate, "exp", DayMonthYear, r"exp(?:iry)?\.?", DATE_TOKEN),
            FieldPattern::new(ExpiryDate, "expiry date", DayMonthYear, r"exp(?:iry)?\.?\s*date", DATE_TOKEN),
            FieldPattern::new(ExpiryDate, "use before", DayMonthYear, r"use\s+before", DATE_TOKEN),
            FieldPattern::new(ExpiryDate, "best before", DayMonthYear, r"best\s+before", DATE_TOKEN),
            FieldPattern::new(ExpiryDate, "exp month/year", MonthYear, r"exp(?:iry)?\.?(?:\s*date)?", MONTH_YEAR_TOKEN),

            // Manufacture date
            FieldPattern::new(ManufactureDate, "mfg", DayMonthYear, r"mfg\.?(?:\s*date)?", DATE_TOKEN),
            FieldPattern::new(ManufactureDate, "manufactured", DayMonthYear, r"manufactured?(?:\s*date)?", DATE_TOKEN),
            FieldPattern::new(ManufactureDate, "mfd", DayMonthYear, r"mfd\.?(?:\s*date)?", DATE_TOKEN),

            // Batch number
            FieldPattern::new(BatchNumber, "batch no", Token, r"batch\s*no\b\.?", BATCH_TOKEN),
            FieldPattern::new(BatchNumber, "lot no", Token, r"lot\s*no\b\.?", BATCH_TOKEN),
            FieldPattern::new(BatchNumber, "b. no", Token, r"\bb\.?\s*no\b\.?", BATCH_TOKEN),
        ]
    };

    /// Any date-shaped substring; such lines are never a medicine name.
    pub static ref DATE_SHAPE: Regex = Regex::new(
        r"\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4}"
    ).unwrap();
}

/// Patterns for one field, in priority order.
pub fn patterns_for(field: LabelField) -> impl Iterator<Item = &'static FieldPattern> {
    let patterns: &'static Vec<FieldPattern> = &FIELD_PATTERNS;
    patterns.iter().filter(move |p| p.field == field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(field: LabelField) -> Vec<&'static str> {
        patterns_for(field).map(|p| p.label).collect()
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(
            labels(LabelField::ExpiryDate),
            vec!["exp", "expiry date", "use before", "best before", "exp month/year"]
        );
        assert_eq!(
            labels(LabelField::ManufactureDate),
            vec!["mfg", "manufactured", "mfd"]
        );
        assert_eq!(
            labels(LabelField::BatchNumber),
            vec!["batch no", "lot no", "b. no"]
        );
        assert!(labels(LabelField::MedicineName).is_empty());
    }

    #[test]
    fn test_month_year_is_last_expiry_pattern() {
        let last = patterns_for(LabelField::ExpiryDate).last().unwrap();
        assert_eq!(last.shape, CaptureShape::MonthYear);
    }

    #[test]
    fn test_date_shape() {
        assert!(DATE_SHAPE.is_match("EXP 01.02.25"));
        assert!(DATE_SHAPE.is_match("1-2-2024"));
        assert!(!DATE_SHAPE.is_match("01/2025"));
        assert!(!DATE_SHAPE.is_match("PARACETAMOL 500MG"));
    }

    #[test]
    fn test_batch_patterns_tolerate_punctuation() {
        let batch = patterns_for(LabelField::BatchNumber).next().unwrap();
        for text in ["Batch No: AB12", "BATCH NO.AB12", "batch no - AB12", "BatchNo AB12"] {
            let caps = batch.regex.captures(text).unwrap();
            assert_eq!(&caps[1], "AB12", "{text}");
        }

        let short = patterns_for(LabelField::BatchNumber).nth(2).unwrap();
        assert_eq!(&short.regex.captures("B. No. X99").unwrap()[1], "X99");
        assert!(short.regex.captures("tab no X99").is_none());
        assert!(short.regex.captures("b nothing here").is_none());
        assert_eq!(&short.regex.captures("B.No.X1").unwrap()[1], "X1");
    }
}
