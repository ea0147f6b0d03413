//! Error types for config.txt parsing.

use std::fmt;

use thiserror::Error;

use crate::model::FieldError;

/// One offending key found while parsing, with full key name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Full key name (e.g. `VAS3KeySlot`), or the raw line when the
    /// line itself was unclassifiable.
    pub key: String,
    /// Human-readable reason, key context included.
    pub reason: String,
}

impl ParseIssue {
    /// Creates an issue from a field error, prepending the group/slot
    /// prefix for repeated sections (`""` for singletons).
    #[must_use]
    pub(crate) fn from_field_error(prefix: &str, error: &FieldError) -> Self {
        let error = error.with_prefix(prefix);
        Self {
            key: error.field().to_string(),
            reason: error.to_string(),
        }
    }

    pub(crate) fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

/// Error type for parsing a config.txt file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first non-blank line is not the literal `!VTAPconfig`
    /// header. Fatal: nothing past it is read.
    #[error("config must start with '!VTAPconfig', found '{found}'")]
    Header {
        /// The offending first line (empty for empty input)
        found: String,
    },

    /// One or more values failed validation. Every offending key in
    /// the file is listed; one bad entry does not mask others.
    #[error("invalid config ({} problem(s)): {}", issues.len(), list(issues))]
    Invalid {
        /// Every problem found, in file order per section
        issues: Vec<ParseIssue>,
    },
}

fn list(issues: &[ParseIssue]) -> String {
    let parts: Vec<String> = issues.iter().map(ToString::to_string).collect();
    parts.join("; ")
}
