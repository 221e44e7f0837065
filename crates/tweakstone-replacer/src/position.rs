//! Script source positions for diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of the script statement that configured a replacer.
///
/// Recorded by the scripting front-end so that warnings and errors can
/// point back at the user's script. Purely informational.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptPosition {
    /// Script file name
    pub file: String,
    /// One-based line number
    pub line: u32,
}

impl ScriptPosition {
    /// Creates a position.
    #[must_use]
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for ScriptPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Formats an optional position as a log prefix.
#[must_use]
pub fn position_prefix(position: Option<&ScriptPosition>) -> String {
    position.map_or_else(String::new, |p| format!("{p}: "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        let pos = ScriptPosition::new("replacements.zs", 12);
        assert_eq!(position_prefix(Some(&pos)), "replacements.zs:12: ");
        assert_eq!(position_prefix(None), "");
    }
}
