use std::path::PathBuf;

use rx_check_ocr::OcrConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// rx-check runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Formulary JSON file; built-in table when unset
    pub formulary_path: Option<PathBuf>,
    /// Tesseract data directory
    pub tessdata_dir: Option<PathBuf>,
    /// OCR language(s)
    pub ocr_language: String,
    /// Log level used when RUST_LOG is unset
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            formulary_path: None,
            tessdata_dir: None,
            ocr_language: "eng".to_string(),
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            formulary_path: lookup("RX_CHECK_FORMULARY")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            tessdata_dir: lookup("RX_CHECK_TESSDATA")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            ocr_language: lookup("RX_CHECK_OCR_LANG").unwrap_or(defaults.ocr_language),
            log_level: lookup("RX_CHECK_LOG").unwrap_or(defaults.log_level),
            log_format: match lookup("RX_CHECK_LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        }
    }

    /// OCR engine settings.
    pub fn ocr_config(&self) -> OcrConfig {
        OcrConfig {
            tessdata_dir: self.tessdata_dir.clone(),
            language: self.ocr_language.clone(),
        }
    }
}
