//! Page identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a page inside its dataset.
///
/// Ids are handed out in increasing order by the owning dataset and double as
/// the page number shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(u32);

impl PageId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw numeric value
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The id following this one, if it does not overflow
    pub fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(Self)
    }
}

impl From<u32> for PageId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_display_and_parse() {
        let id = PageId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<PageId>().ok(), Some(id));
        assert!("-1".parse::<PageId>().is_err());
        assert!("4x".parse::<PageId>().is_err());
    }

    #[test]
    fn test_page_id_next() {
        assert_eq!(PageId::new(1).checked_next(), Some(PageId::new(2)));
        assert_eq!(PageId::new(u32::MAX).checked_next(), None);
    }
}
