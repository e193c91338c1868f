//! Expiry status of an extracted date.

use chrono::NaiveDate;

use crate::models::label::{ExpiryStatus, LabelDate};

/// Classify `expiry` against `today`.
///
/// Returns `None` when the label date is not a real calendar day. A medicine
/// expiring today counts as expiring soon, not expired.
pub fn expiry_status(expiry: &LabelDate, today: NaiveDate, warning_days: u32) -> Option<ExpiryStatus> {
    let date = expiry.to_naive_date()?;
    let days_left = (date - today).num_days();

    let status = if days_left < 0 {
        ExpiryStatus::Expired {
            days_ago: -days_left,
        }
    } else if days_left <= i64::from(warning_days) {
        ExpiryStatus::ExpiringSoon { days_left }
    } else {
        ExpiryStatus::Valid { days_left }
    };

    Some(status)
}
