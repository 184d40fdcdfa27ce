//! Bulletin layout configuration.
//!
//! A [`BulletinLayout`] describes the handful of fixed facts the extractor
//! relies on: the shape of the registration code, the text that marks a
//! national production, and how numbers are punctuated. The ANCINE layout
//! is embedded at compile time from `layouts/ancine.toml`; other layouts can
//! be loaded from TOML at runtime.

use std::path::Path;

use serde::{Deserialize, Serialize};

const ANCINE_TOML: &str = include_str!("../layouts/ancine.toml");

/// Errors that can occur while loading a layout.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the layout file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The layout is not valid TOML for [`BulletinLayout`].
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The layout parsed but is unusable.
    #[error("Invalid layout '{id}': {message}")]
    Invalid {
        /// Layout identifier.
        id: String,
        /// Description of what went wrong.
        message: String,
    },
}

/// Shape of the registration code that separates title from metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnchorFormat {
    /// Single-letter prefixes the code may start with.
    pub prefixes: Vec<char>,
    /// Number of digits following the prefix.
    pub digits: usize,
}

impl AnchorFormat {
    /// Total width of the code in bytes.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.digits + 1
    }
}

/// Regional number punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Currency symbol stripped before parsing amounts (e.g. `"R$"`).
    #[serde(default)]
    pub currency_marker: String,
    /// Digit-grouping character (e.g. `'.'`).
    pub thousands_separator: char,
    /// Decimal separator (e.g. `','`).
    pub decimal_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            currency_marker: "R$".to_owned(),
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

/// Everything the extractor needs to know about one bulletin format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BulletinLayout {
    /// Unique identifier (e.g. `"ancine"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Text whose presence in the metadata zone marks a national film.
    pub national_marker: String,
    /// Text marking a foreign film. When set, rows carrying neither marker
    /// are classified as unknown instead of foreign.
    #[serde(default)]
    pub foreign_marker: Option<String>,
    /// Registration code shape.
    pub anchor: AnchorFormat,
    /// Number punctuation.
    #[serde(default)]
    pub numbers: NumberFormat,
}

impl BulletinLayout {
    /// Returns the embedded ANCINE layout.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed (it is fixed at compile
    /// time and covered by tests).
    #[must_use]
    pub fn ancine() -> Self {
        Self::from_toml_str(ANCINE_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded ANCINE layout: {e}"))
    }

    /// Parses and validates a layout from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the TOML is malformed or the layout fails
    /// validation.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let layout: Self = toml::de::from_str(toml_str)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Reads a layout from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let toml_str = std::fs::read_to_string(path)?;
        let layout = Self::from_toml_str(&toml_str)?;
        log::info!("Loaded layout '{}' from {}", layout.id, path.display());
        Ok(layout)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::Invalid {
            id: self.id.clone(),
            message: message.to_owned(),
        };

        if self.anchor.prefixes.is_empty() {
            return Err(invalid("anchor.prefixes must not be empty"));
        }
        if !self.anchor.prefixes.iter().all(char::is_ascii_alphabetic) {
            return Err(invalid("anchor.prefixes must be ASCII letters"));
        }
        if self.anchor.digits == 0 {
            return Err(invalid("anchor.digits must be positive"));
        }
        if self.national_marker.trim().is_empty() {
            return Err(invalid("national_marker must not be empty"));
        }
        if self.numbers.thousands_separator == self.numbers.decimal_separator {
            return Err(invalid(
                "numbers.thousands_separator and numbers.decimal_separator must differ",
            ));
        }

        Ok(())
    }
}

impl Default for BulletinLayout {
    fn default() -> Self {
        Self::ancine()
    }
}
