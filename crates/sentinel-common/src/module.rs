use serde::{Deserialize, Serialize};
use std::fmt;

/// A third-party package identifier extracted from the call stack at the
/// interception point. Scoped identifiers (`@scope/name`) are preserved
/// verbatim; this type performs no parsing, only equality and display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this identifier carries an npm-style scope segment
    /// (`@scope/name`).
    pub fn is_scoped(&self) -> bool {
        self.0.starts_with('@') && self.0.contains('/')
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ModuleId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_detection() {
        assert!(ModuleId::new("@scope/name").is_scoped());
        assert!(!ModuleId::new("lodash").is_scoped());
        assert!(!ModuleId::new("@not-a-path").is_scoped());
    }

    #[test]
    fn display_round_trips_raw_string() {
        let m = ModuleId::new("left-pad");
        assert_eq!(m.to_string(), "left-pad");
        assert_eq!(m.as_str(), "left-pad");
    }
}
