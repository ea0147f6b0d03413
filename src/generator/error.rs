//! Error types for config.txt generation.

use thiserror::Error;

use crate::model::FieldError;

/// Error type for rendering a configuration to config.txt text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The configuration fails field-level validation. Generation
    /// re-checks every rule so hand-edited structs cannot produce a
    /// file a reader would reject.
    #[error("config failed validation ({} problem(s)): {}", errors.len(), list(errors))]
    Invalid {
        /// Every violated constraint, with full key names
        errors: Vec<FieldError>,
    },
}

fn list(errors: &[FieldError]) -> String {
    let parts: Vec<String> = errors.iter().map(ToString::to_string).collect();
    parts.join("; ")
}
