//! WASM bindings for medicine label OCR text extraction.
//!
//! This crate lets the browser run label extraction on text produced by a
//! client-side OCR engine, so the user can confirm fields before saving.

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use medlabel_core::models::config::ExtractionConfig;
use medlabel_core::{LabelDate, LabelExtractor as _, LabelParser as _, RuleBasedParser};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract label fields from OCR text.
///
/// Returns `{ expiryDate?, manufactureDate?, batchNumber?, medicineName? }`.
#[wasm_bindgen]
pub fn extract_label_from_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&medlabel_core::extract(text))
}

/// Normalize a label date token (e.g. "03/04/2024") to `YYYY-MM-DD`.
#[wasm_bindgen]
pub fn normalize_date(token: &str) -> Option<String> {
    medlabel_core::normalize_date(token).map(|d| d.to_string())
}

/// Expiry status of a `YYYY-MM-DD` date relative to `today` (`YYYY-MM-DD`).
///
/// Returns `undefined` when the date is not a real calendar day.
#[wasm_bindgen]
pub fn expiry_status(expiry_date: &str, today: &str, warning_days: u32) -> Result<JsValue, JsValue> {
    let expiry: LabelDate = expiry_date.parse().map_err(to_js_error)?;
    let today: NaiveDate = today.parse().map_err(to_js_error)?;

    match medlabel_core::expiry_status(&expiry, today, warning_days) {
        Some(status) => to_js(&status),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Label extractor class for browser use.
#[wasm_bindgen]
pub struct LabelExtractor {
    config: ExtractionConfig,
    parser: RuleBasedParser,
}

#[wasm_bindgen]
impl LabelExtractor {
    /// Create a new label extractor with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let config = ExtractionConfig::default();
        Self {
            parser: RuleBasedParser::from_config(&config),
            config,
        }
    }

    /// Set the exclusive maximum length of a medicine name line.
    #[wasm_bindgen]
    pub fn set_max_name_length(&mut self, len: usize) {
        self.config.max_name_length = len;
        self.rebuild();
    }

    /// Set the minimum length of a medicine name line.
    #[wasm_bindgen]
    pub fn set_min_line_length(&mut self, len: usize) {
        self.config.min_line_length = len;
        self.rebuild();
    }

    /// Accept or reject `EXP: MM/YYYY` stamps.
    #[wasm_bindgen]
    pub fn set_month_year_expiry(&mut self, enabled: bool) {
        self.config.month_year_expiry = enabled;
        self.rebuild();
    }

    /// Extract label fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.extract(text))
    }

    /// Extract label fields with warnings and timing.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(text))
    }

    /// Every pattern hit per field, for showing alternatives to the user.
    #[wasm_bindgen]
    pub fn candidates(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.extract_candidates(text))
    }

    /// Names of fields the user must fill in by hand.
    #[wasm_bindgen]
    pub fn missing_fields(&self, text: &str) -> Vec<String> {
        self.parser
            .extract(text)
            .missing_fields()
            .into_iter()
            .map(|f| f.key().to_string())
            .collect()
    }

    fn rebuild(&mut self) {
        self.parser = RuleBasedParser::from_config(&self.config);
    }
}

impl Default for LabelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
