//! Configuration structures for label extraction.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration for medlabel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedlabelConfig {
    /// Label field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Expiry warning configuration.
    pub expiry: ExpiryConfig,
}

/// Label field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines shorter than this (after trimming) are never taken as the
    /// medicine name.
    pub min_line_length: usize,

    /// Lines must be strictly shorter than this to be taken as the medicine
    /// name.
    pub max_name_length: usize,

    /// Lines containing any of these (case-insensitive) are never taken as
    /// the medicine name.
    pub name_stop_words: Vec<String>,

    /// Accept `EXP: MM/YYYY` as the first day of that month when no full
    /// expiry date is labelled.
    pub month_year_expiry: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_line_length: 3,
            max_name_length: 50,
            name_stop_words: ["batch", "lot", "mfg", "exp"]
                .into_iter()
                .map(String::from)
                .collect(),
            month_year_expiry: true,
        }
    }
}

/// Expiry warning configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpiryConfig {
    /// Days before expiry at which a medicine counts as expiring soon.
    pub warning_days: u32,
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self { warning_days: 30 }
    }
}

impl MedlabelConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
