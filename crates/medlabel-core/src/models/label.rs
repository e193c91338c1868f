//! Label data models: the extraction result and its date type.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::MedlabelError;
use crate::label::rules::expiry::expiry_status;

/// A calendar date read off a package label.
///
/// Month is always in 1..=12 and day in 1..=31, but the day is not checked
/// against the length of the month, so `2024-02-31` is a valid `LabelDate`.
/// Use [`LabelDate::to_naive_date`] when a real calendar date is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelDate {
    year: i32,
    month: u32,
    day: u32,
}

impl LabelDate {
    /// Create a label date, rejecting out-of-range months and days.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }
        Some(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The real calendar date, if this one exists (no 31st of February).
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for LabelDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for LabelDate {
    type Err = MedlabelError;

    /// Parse the ISO `YYYY-MM-DD` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MedlabelError::InvalidDate(s.to_string());

        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(invalid());
        }

        let year: i32 = parts[0].parse().map_err(|_| invalid())?;
        let month: u32 = parts[1].parse().map_err(|_| invalid())?;
        let day: u32 = parts[2].parse().map_err(|_| invalid())?;

        Self::new(year, month, day).ok_or_else(invalid)
    }
}

impl TryFrom<String> for LabelDate {
    type Error = MedlabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LabelDate> for String {
    fn from(date: LabelDate) -> Self {
        date.to_string()
    }
}


/// The four fields read from a package label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelField {
    ExpiryDate,
    ManufactureDate,
    BatchNumber,
    MedicineName,
}

impl LabelField {
    /// All fields, in output order.
    pub const ALL: [LabelField; 4] = [
        LabelField::ExpiryDate,
        LabelField::ManufactureDate,
        LabelField::BatchNumber,
        LabelField::MedicineName,
    ];

    /// JSON key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            LabelField::ExpiryDate => "expiryDate",
            LabelField::ManufactureDate => "manufactureDate",
            LabelField::BatchNumber => "batchNumber",
            LabelField::MedicineName => "medicineName",
        }
    }
}

impl fmt::Display for LabelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LabelField::ExpiryDate => "expiry date",
            LabelField::ManufactureDate => "manufacture date",
            LabelField::BatchNumber => "batch number",
            LabelField::MedicineName => "medicine name",
        };
        f.write_str(name)
    }
}

/// Fields extracted from one OCR transcript.
///
/// Every field is optional. "Absent" covers both "no pattern matched" and
/// "the label does not carry this field"; callers should ask the user to
/// fill in or confirm whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Expiry date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<LabelDate>,

    /// Manufacture date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacture_date: Option<LabelDate>,

    /// Batch / lot number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,

    /// Best guess at the product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicine_name: Option<String>,
}

impl ExtractionResult {
    /// True when no field was found.
    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }

    /// Number of fields that were found.
    pub fn present_count(&self) -> usize {
        LabelField::ALL.len() - self.missing_fields().len()
    }

    /// Fields that were not found, in output order.
    pub fn missing_fields(&self) -> Vec<LabelField> {
        LabelField::ALL
            .into_iter()
            .filter(|field| !self.has(*field))
            .collect()
    }

    /// Whether the given field was found.
    pub fn has(&self, field: LabelField) -> bool {
        match field {
            LabelField::ExpiryDate => self.expiry_date.is_some(),
            LabelField::ManufactureDate => self.manufacture_date.is_some(),
            LabelField::BatchNumber => self.batch_number.is_some(),
            LabelField::MedicineName => self.medicine_name.is_some(),
        }
    }

    /// Classify the expiry date against `today`.
    ///
    /// `None` when there is no expiry date or it is not a real calendar date.
    pub fn expiry_status(&self, today: NaiveDate, warning_days: u32) -> Option<ExpiryStatus> {
        self.expiry_date
            .as_ref()
            .and_then(|date| expiry_status(date, today, warning_days))
    }
}

/// Where a medicine stands relative to its expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ExpiryStatus {
    /// Expiry date is in the past.
    Expired { days_ago: i64 },
    /// Expires today or within the warning window.
    ExpiringSoon { days_left: i64 },
    /// Expires after the warning window.
    Valid { days_left: i64 },
}

impl ExpiryStatus {
    pub fn is_expired(&self) -> bool {
        matches!(self, ExpiryStatus::Expired { .. })
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryStatus::Expired { days_ago } => write!(f, "expired {} day(s) ago", days_ago),
            ExpiryStatus::ExpiringSoon { days_left: 0 } => write!(f, "expires today"),
            ExpiryStatus::ExpiringSoon { days_left } => {
                write!(f, "expires in {} day(s)", days_left)
            }
            ExpiryStatus::Valid { days_left } => write!(f, "valid for {} day(s)", days_left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_label_date_display_pads() {
        let date = LabelDate::new(2024, 4, 3).unwrap();
        assert_eq!(date.to_string(), "2024-04-03");

        let short_year = LabelDate::new(202, 1, 1).unwrap();
        assert_eq!(short_year.to_string(), "0202-01-01");
    }

    #[test]
    fn test_label_date_rejects_out_of_range() {
        assert!(LabelDate::new(2024, 0, 1).is_none());
        assert!(LabelDate::new(2024, 13, 1).is_none());
        assert!(LabelDate::new(2024, 1, 0).is_none());
        assert!(LabelDate::new(2024, 1, 32).is_none());
    }

    #[test]
    fn test_label_date_allows_impossible_calendar_day() {
        let date = LabelDate::new(2024, 2, 31).unwrap();
        assert_eq!(date.to_string(), "2024-02-31");
        assert!(date.to_naive_date().is_none());
    }

    #[test]
    fn test_label_date_parse() {
        let date: LabelDate = "2025-01-09".parse().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 1, 9));

        assert!("2025-01".parse::<LabelDate>().is_err());
        assert!("2025-13-01".parse::<LabelDate>().is_err());
        assert!("not a date".parse::<LabelDate>().is_err());
    }

    #[test]
    fn test_result_json_omits_absent_fields() {
        let result = ExtractionResult {
            expiry_date: LabelDate::new(2025, 1, 1),
            manufacture_date: None,
            batch_number: Some("AB1234".to_string()),
            medicine_name: Some("PARACETAMOL 500MG".to_string()),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "expiryDate": "2025-01-01",
                "batchNumber": "AB1234",
                "medicineName": "PARACETAMOL 500MG"
            })
        );

        let back: ExtractionResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_missing_fields() {
        let result = ExtractionResult {
            batch_number: Some("L123".to_string()),
            ..Default::default()
        };

        assert_eq!(
            result.missing_fields(),
            vec![
                LabelField::ExpiryDate,
                LabelField::ManufactureDate,
                LabelField::MedicineName
            ]
        );
        assert_eq!(result.present_count(), 1);
        assert!(!result.is_empty());
        assert!(ExtractionResult::default().is_empty());
    }

    #[test]
    fn test_expiry_status_display() {
        assert_eq!(
            ExpiryStatus::Expired { days_ago: 3 }.to_string(),
            "expired 3 day(s) ago"
        );
        assert_eq!(
            ExpiryStatus::ExpiringSoon { days_left: 0 }.to_string(),
            "expires today"
        );
    }

    #[test]
    fn test_expiry_status_json_keys_are_camel_case() {
        assert_eq!(
            serde_json::to_value(ExpiryStatus::ExpiringSoon { days_left: 5 }).unwrap(),
            serde_json::json!({ "status": "expiring_soon", "daysLeft": 5 })
        );
        assert_eq!(
            serde_json::to_value(ExpiryStatus::Expired { days_ago: 2 }).unwrap(),
            serde_json::json!({ "status": "expired", "daysAgo": 2 })
        );
    }
}
