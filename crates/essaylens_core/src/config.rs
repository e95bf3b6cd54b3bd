//! Parser thresholds.
//!
//! # Responsibility
//! - Hold the numeric limits used by heading detection and low-info checks.
//! - Load overrides from JSON for tooling that wants to experiment.
//!
//! # Invariants
//! - `ParseConfig::default()` reproduces the canonical extraction behavior.
//! - Every threshold is non-zero after `validate`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Body texts shorter than this (in chars) are low-information.
pub const DEFAULT_SHORT_TEXT_CHARS: usize = 40;
/// All-caps lines shorter than this (in chars) read as headings.
pub const DEFAULT_HEADING_MAX_CHARS: usize = 100;
/// Cleaned bodies with a colon and shorter than this are disguised headings.
pub const DEFAULT_DISGUISED_HEADING_MAX_CHARS: usize = 150;

/// Configuration error for threshold loading and validation.
#[derive(Debug)]
pub enum ConfigError {
    /// Threshold must be greater than zero.
    ZeroThreshold(&'static str),
    /// Input is not a valid config document.
    InvalidJson(serde_json::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroThreshold(field) => write!(f, "`{field}` must be greater than zero"),
            Self::InvalidJson(err) => write!(f, "invalid parse config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ZeroThreshold(_) => None,
            Self::InvalidJson(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidJson(value)
    }
}

/// Thresholds consumed by [`crate::parse::feedback::FeedbackExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    pub short_text_chars: usize,
    pub heading_max_chars: usize,
    pub disguised_heading_max_chars: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            short_text_chars: DEFAULT_SHORT_TEXT_CHARS,
            heading_max_chars: DEFAULT_HEADING_MAX_CHARS,
            disguised_heading_max_chars: DEFAULT_DISGUISED_HEADING_MAX_CHARS,
        }
    }
}

impl ParseConfig {
    /// Decodes a config from JSON; omitted fields keep their defaults.
    ///
    /// # Errors
    /// - Returns `InvalidJson` for malformed input.
    /// - Returns `ZeroThreshold` when any threshold is zero.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every threshold can actually admit text.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_text_chars == 0 {
            return Err(ConfigError::ZeroThreshold("short_text_chars"));
        }
        if self.heading_max_chars == 0 {
            return Err(ConfigError::ZeroThreshold("heading_max_chars"));
        }
        if self.disguised_heading_max_chars == 0 {
            return Err(ConfigError::ZeroThreshold("disguised_heading_max_chars"));
        }
        Ok(())
    }
}
