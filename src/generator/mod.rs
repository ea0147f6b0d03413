//! config.txt generation.
//!
//! Renders a [`VtapConfig`] back to file text: the `!VTAPconfig`
//! header, an optional leading comment, `; @editor:` metadata, then
//! each configured section under a banner comment in canonical order,
//! with unrecognized keys re-emitted verbatim at the end.
//!
//! Values equal to the device default are suppressed, symmetric with
//! the defaults the parser restores, so parse-generate-parse is
//! stable. Generation re-validates the whole config first: a struct
//! edited into an invalid state is refused, never written out.
//!
//! Template mode ([`Generator::render_template`]) swaps the pass
//! sections for a caller-supplied placeholder line, for tooling that
//! merges per-site pass credentials into a shared base file.

mod error;

#[cfg(test)]
mod generator_tests;

use std::collections::BTreeMap;

use crate::model::VtapConfig;
use crate::parser::HEADER;

pub use error::GenerateError;

/// Renders a configuration to config.txt text with no extras.
///
/// Shorthand for [`Generator::new`] plus [`Generator::render`].
///
/// # Errors
///
/// Returns [`GenerateError::Invalid`] when the config fails
/// validation.
pub fn generate(config: &VtapConfig) -> Result<String, GenerateError> {
    Generator::new(config).render()
}

/// Renders a template with `placeholder` standing in for the pass
/// sections.
///
/// # Errors
///
/// Returns [`GenerateError::Invalid`] when the config fails
/// validation.
pub fn generate_template(
    config: &VtapConfig,
    placeholder: &str,
) -> Result<String, GenerateError> {
    Generator::new(config).render_template(placeholder)
}

/// Builder for rendering one configuration, carrying the comment
/// side data a parse produced (or that a caller wants written).
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    config: &'a VtapConfig,
    comment: Option<String>,
    metadata: BTreeMap<String, String>,
}

impl<'a> Generator<'a> {
    /// Creates a generator for `config` with no leading comment or
    /// metadata.
    #[must_use]
    pub fn new(config: &'a VtapConfig) -> Self {
        Self {
            config,
            comment: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Sets a leading comment, written right after the header. Each
    /// line of `text` becomes one `;` comment line.
    #[must_use]
    pub fn with_comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }

    /// Adds one `; @editor:<key>=<value>` metadata comment. Metadata
    /// is written sorted by key, after the leading comment.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Replaces the whole metadata map.
    #[must_use]
    pub fn with_metadata_map(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Renders the configuration to config.txt text.
    ///
    /// The output always ends with a newline.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Invalid`] when the config fails
    /// validation; nothing is written for an invalid config.
    pub fn render(&self) -> Result<String, GenerateError> {
        self.render_inner(None)
    }

    /// Renders a template: the Apple VAS and Google Smart Tap pass
    /// sections (entries and default-pass filters) are replaced by
    /// `placeholder`, written verbatim as one block. Every other
    /// section renders as in [`render`](Self::render).
    ///
    /// Pass entries still present on the config are validated but not
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Invalid`] when the config fails
    /// validation.
    pub fn render_template(&self, placeholder: &str) -> Result<String, GenerateError> {
        self.render_inner(Some(placeholder))
    }

    fn render_inner(&self, placeholder: Option<&str>) -> Result<String, GenerateError> {
        self.config
            .validate()
            .map_err(|errors| GenerateError::Invalid { errors })?;

        let mut out = vec![HEADER.to_string()];

        if let Some(ref comment) = self.comment {
            for line in comment.split('\n') {
                out.push(format!("; {line}"));
            }
        }
        for (key, value) in &self.metadata {
            out.push(format!("; @editor:{key}={value}"));
        }

        if let Some(placeholder) = placeholder {
            Self::section(&mut out, None, vec![placeholder.to_string()]);
        } else {
            Self::section(
                &mut out,
                Some("; Apple VAS Configuration"),
                self.vas_lines(),
            );
            Self::section(
                &mut out,
                Some("; Google Smart Tap Configuration"),
                self.smarttap_lines(),
            );
        }

        let config = self.config;
        Self::section(
            &mut out,
            Some("; Keyboard Emulation"),
            config.keyboard.as_ref().map_or_else(Vec::new, |s| s.to_lines()),
        );
        Self::section(
            &mut out,
            Some("; NFC Tag Settings"),
            config.nfc.as_ref().map_or_else(Vec::new, |s| s.to_lines()),
        );
        Self::section(
            &mut out,
            Some("; MIFARE DESFire Settings"),
            config.desfire.as_ref().map_or_else(Vec::new, |s| s.to_lines()),
        );
        Self::section(
            &mut out,
            Some("; LED/Beep Settings"),
            config.feedback.as_ref().map_or_else(Vec::new, |s| s.to_lines()),
        );

        let extra: Vec<String> = config
            .extra
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        Self::section(&mut out, None, extra);

        tracing::debug!(lines = out.len(), template = placeholder.is_some(), "rendered config");

        let mut text = out.join("\n");
        text.push('\n');
        Ok(text)
    }

    fn vas_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (slot, entry) in self.config.vas.iter() {
            lines.extend(entry.to_lines(slot));
        }
        if let Some(ref filter) = self.config.vas_default_passes {
            lines.push(filter.to_line("VASDefaultPassesEnabled"));
        }
        lines
    }

    fn smarttap_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (slot, entry) in self.config.smarttap.iter() {
            lines.extend(entry.to_lines(slot));
        }
        if let Some(ref filter) = self.config.smarttap_default_passes {
            lines.push(filter.to_line("STDefaultPassesEnabled"));
        }
        lines
    }

    /// Appends a section: a blank separator line, the banner comment
    /// (when there is one) and the body. Empty sections emit nothing.
    fn section(out: &mut Vec<String>, banner: Option<&str>, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        out.push(String::new());
        if let Some(banner) = banner {
            out.push(banner.to_string());
        }
        out.extend(lines);
    }
}
