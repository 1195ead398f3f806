//! Page settings

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::SettingsError;

/// Settings shared by all pages of a workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Base of the user manual; help links are `<docs_base>/<fragment>`
    pub docs_base: String,

    /// Prefix titles with the page number
    pub show_page_numbers: bool,

    /// How many error messages a page keeps
    pub max_messages: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            docs_base: "docs/user-manual".to_string(),
            show_page_numbers: true,
            max_messages: 8,
        }
    }
}

impl PageSettings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load settings from `path`, falling back to defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Using default page settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings() {
        let settings = PageSettings::from_json_str(r#"{ "docs_base": "https://example.org/docs" }"#).unwrap();
        assert_eq!(settings.docs_base, "https://example.org/docs");
        assert!(settings.show_page_numbers);
        assert_eq!(settings.max_messages, 8);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            PageSettings::from_json_str("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = PageSettings::load_or_default("/nonexistent/dv-pages.json");
        assert_eq!(settings, PageSettings::default());
    }
}
