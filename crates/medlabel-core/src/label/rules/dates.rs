//! Date extraction and normalization for package labels.

use tracing::debug;

use crate::models::label::{LabelDate, LabelField};

use super::patterns::{patterns_for, CaptureShape, FieldPattern};
use super::{ExtractionMatch, FieldExtractor};

/// Extractor for one of the labelled date fields.
#[derive(Debug, Clone)]
pub struct DateExtractor {
    field: LabelField,
    month_year: bool,
}

impl DateExtractor {
    /// Expiry date extractor ("exp", "expiry date", "use before", "best before").
    pub fn expiry() -> Self {
        Self {
            field: LabelField::ExpiryDate,
            month_year: true,
        }
    }

    /// Manufacture date extractor ("mfg", "manufactured", "mfd").
    pub fn manufacture() -> Self {
        Self {
            field: LabelField::ManufactureDate,
            month_year: false,
        }
    }

    /// Enable or disable `MM/YYYY` stamps.
    pub fn with_month_year(mut self, enabled: bool) -> Self {
        self.month_year = enabled;
        self
    }

    fn active_patterns(&self) -> impl Iterator<Item = &'static FieldPattern> + '_ {
        patterns_for(self.field)
            .filter(move |p| self.month_year || p.shape != CaptureShape::MonthYear)
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<LabelDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        for pattern in self.active_patterns() {
            let Some(caps) = pattern.regex.captures(text) else {
                continue;
            };

            // First matching pattern decides, usable or not.
            let full_match = caps.get(0)?;
            let date = interpret(pattern.shape, &caps[1]);
            if date.is_none() {
                debug!(
                    "{} label \"{}\" matched {:?} but the date is not usable",
                    self.field,
                    pattern.label,
                    &caps[1]
                );
            }

            return date.map(|date| {
                ExtractionMatch::new(date, pattern.label, full_match.as_str())
                    .with_position(full_match.start(), full_match.end())
            });
        }

        None
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for pattern in self.active_patterns() {
            for caps in pattern.regex.captures_iter(text) {
                let (Some(full_match), Some(token)) = (caps.get(0), caps.get(1)) else {
                    continue;
                };

                if let Some(date) = interpret(pattern.shape, token.as_str()) {
                    results.push(
                        ExtractionMatch::new(date, pattern.label, full_match.as_str())
                            .with_position(full_match.start(), full_match.end()),
                    );
                }
            }
        }

        results
    }
}

fn interpret(shape: CaptureShape, token: &str) -> Option<LabelDate> {
    match shape {
        CaptureShape::DayMonthYear => normalize_date(token),
        CaptureShape::MonthYear => normalize_month_year(token),
        CaptureShape::Token => None,
    }
}

/// Normalize a `D/M/Y` style token to a [`LabelDate`].
///
/// The token is split on `/`, `-` or `.` and must have exactly three parts.
/// A two-character year is taken as `20YY`. Day and month are told apart as
/// follows: a first part above 12 is the day; otherwise a second part above
/// 12 is the day; otherwise the token is read day-first. The last rule is a
/// guess: OCR text carries no locale, so a US-style `03/04/2024` comes out
/// as 3 April.
pub fn normalize_date(token: &str) -> Option<LabelDate> {
    let parts: Vec<&str> = token.split(['/', '-', '.']).map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }

    let first = parse_number(parts[0])?;
    let second = parse_number(parts[1])?;
    let year = parse_year(parts[2])?;

    let (day, month) = if first > 12 {
        (first, second)
    } else if second > 12 {
        (second, first)
    } else {
        (first, second)
    };

    LabelDate::new(year, month, day)
}

/// Normalize a `MM/YYYY` expiry stamp to the first day of that month.
pub fn normalize_month_year(token: &str) -> Option<LabelDate> {
    let parts: Vec<&str> = token.split(['/', '-', '.']).map(str::trim).collect();
    if parts.len() != 2 {
        return None;
    }

    let month = parse_number(parts[0])?;
    let year = parse_year(parts[1])?;

    LabelDate::new(year, month, 1)
}

/// Plain ASCII digits only; `str::parse` would also take a leading `+`.
fn parse_number(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Two to four digits, so the result always prints as `YYYY`.
fn parse_year(s: &str) -> Option<i32> {
    if !(2..=4).contains(&s.len()) {
        return None;
    }
    let year = parse_number(s)? as i32;
    if s.len() == 2 {
        Some(2000 + year)
    } else {
        Some(year)
    }
}
