use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upstream identifier for a trivia category.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(u32);

impl CategoryId {
    /// Creates a new `CategoryId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CategoryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_plain_number() {
        let id: CategoryId = " 9 ".parse().unwrap();
        assert_eq!(id.value(), 9);
        assert_eq!(id.to_string(), "9");
        assert_eq!(format!("{id:?}"), "CategoryId(9)");
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("general".parse::<CategoryId>().is_err());
    }
}
