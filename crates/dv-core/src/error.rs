//! Error types shared by the page crates

use thiserror::Error;

use crate::PageId;

/// Conditions a page reports to the user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// A link or combine source refers to a page that was closed
    #[error("Page {0} no longer exists")]
    StalePage(PageId),

    #[error("Unknown view kind: {0}")]
    UnknownViewKind(String),

    #[error("Privacy parameters can only be changed on a private dataset")]
    NotPrivate,
}

/// Why a payload string could not be read as a drag payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid drag payload: {0:?}")]
pub struct InvalidPayload(pub String);

/// Errors raised while loading page settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_page_message() {
        let err = PageError::StalePage(PageId::new(3));
        assert_eq!(err.to_string(), "Page 3 no longer exists");
    }

    #[test]
    fn test_invalid_payload_message() {
        let err = InvalidPayload("Title".to_string());
        assert_eq!(err.to_string(), "invalid drag payload: \"Title\"");
    }
}
