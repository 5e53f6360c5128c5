#![forbid(unsafe_code)]

//! Configuration for the chapter navigation bar.
//!
//! Every field has a default, so an empty JSON object (or no options at all)
//! yields the stock behavior: 200ms fades, a 4px gap between a hover
//! overlay and its anchor, and the `selected` / `read` / `disabled` classes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Options were not valid JSON for this schema.
    Parse(String),
    /// A field had a value outside its allowed range.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid options: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// CSS class names used to render entry markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassNames {
    pub selected: String,
    pub read: String,
    pub disabled: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            selected: "selected".to_string(),
            read: "read".to_string(),
            disabled: "disabled".to_string(),
        }
    }
}

/// Element selectors the web host uses to find the bar's parts.
///
/// `entries` is relative to the container, `anchor`, `description` and
/// `overlay` are relative to an entry, `current_page` is document-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub entries: String,
    pub anchor: String,
    pub description: String,
    pub overlay: String,
    pub current_page: String,
    /// Attribute on the anchor carrying the article identifier.
    pub article_attribute: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            entries: "ul li".to_string(),
            anchor: "a".to_string(),
            description: ".over div.description".to_string(),
            overlay: "a.over".to_string(),
            current_page: "#pages section.current".to_string(),
            article_attribute: "data-article".to_string(),
        }
    }
}

/// Chapter navigation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChapterNavConfig {
    /// Duration of hover description fades, in milliseconds. Zero is instant.
    pub fade_duration_ms: u64,
    /// Gap between the bottom of a hover overlay and the top of its anchor.
    pub description_gap_px: f64,
    /// Force touch/non-touch behavior. `None` lets the host detect it.
    pub touch_device: Option<bool>,
    pub class_names: ClassNames,
    pub selectors: Selectors,
}

impl Default for ChapterNavConfig {
    fn default() -> Self {
        Self {
            fade_duration_ms: 200,
            description_gap_px: 4.0,
            touch_device: None,
            class_names: ClassNames::default(),
            selectors: Selectors::default(),
        }
    }
}

impl ChapterNavConfig {
    /// Parse and validate options from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.description_gap_px.is_finite() || self.description_gap_px < 0.0 {
            return Err(ConfigError::Invalid {
                field: "description_gap_px",
                reason: "must be a finite, non-negative number",
            });
        }
        let classes = [
            ("class_names.selected", &self.class_names.selected),
            ("class_names.read", &self.class_names.read),
            ("class_names.disabled", &self.class_names.disabled),
        ];
        for (field, class) in classes {
            if class.trim().is_empty() || class.contains(char::is_whitespace) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a single non-empty class name",
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}
