//! Keyboard emulation configuration (`KB*` keys).
//!
//! When enabled, the reader types pass data into the host as
//! keystrokes. Singleton section: one `KB*` key family per file.

use serde::{Deserialize, Serialize};

use crate::codec::{EscapedString, KbSource};

use super::defaults;
use super::error::FieldError;
use super::raw;

/// Keyboard emulation settings.
///
/// Values equal to their documented default are omitted from output;
/// parsing restores them, so a round trip preserves the full state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardSection {
    /// Send read data as keystrokes (`KBLogMode`). Always written.
    pub log_mode: bool,
    /// USB keyboard device function (`KBEnable`), default on.
    pub enable: bool,
    /// Data sources that trigger keyboard output (`KBSource`).
    pub source: KbSource,
    /// Optional prefix typed before the data (`KBPrefix`).
    pub prefix: Option<EscapedString>,
    /// Suffix typed after the data (`KBPostfix`), default newline.
    pub postfix: EscapedString,
    /// Inter-keystroke delay in ms (`KBDelayMS`), 5-255, default 5.
    pub delay_ms: u8,
    /// Extract a payload section instead of the full pass (`KBPassMode`).
    pub pass_mode: bool,
    /// Which separated section to extract (`KBPassSection`).
    pub pass_section: u16,
    /// Section separator character (`KBPassSeparator`), default `|`.
    pub pass_separator: char,
    /// Start position within the section (`KBPassStart`).
    pub pass_start: u16,
    /// Extraction length, 0 = to the end (`KBPassLength`).
    pub pass_length: u16,
}

impl Default for KeyboardSection {
    fn default() -> Self {
        Self {
            log_mode: false,
            enable: true,
            source: defaults::kb_source(),
            prefix: None,
            postfix: defaults::kb_postfix(),
            delay_ms: defaults::KB_DELAY_MS,
            pass_mode: false,
            pass_section: 0,
            pass_separator: defaults::KB_PASS_SEPARATOR,
            pass_start: 0,
            pass_length: 0,
        }
    }
}

impl KeyboardSection {
    /// Checks every local constraint, failing on the first violation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), FieldError> {
        match self.errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub(crate) fn errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.delay_ms < defaults::KB_DELAY_MS {
            errors.push(FieldError::range("KBDelayMS", self.delay_ms, "5-255"));
        }
        errors
    }

    /// Renders the `Key=Value` lines for this section.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("KBLogMode={}", u8::from(self.log_mode))];

        if !self.enable {
            lines.push("KBEnable=0".to_string());
        }
        if self.source != defaults::kb_source() || self.log_mode {
            lines.push(format!("KBSource={}", self.source));
        }
        if let Some(ref prefix) = self.prefix {
            lines.push(format!("KBPrefix={prefix}"));
        }
        if self.postfix != defaults::kb_postfix() {
            lines.push(format!("KBPostfix={}", self.postfix));
        }
        if self.delay_ms != defaults::KB_DELAY_MS {
            lines.push(format!("KBDelayMS={}", self.delay_ms));
        }
        if self.pass_mode {
            lines.push("KBPassMode=1".to_string());
        }
        if self.pass_section != 0 {
            lines.push(format!("KBPassSection={}", self.pass_section));
        }
        if self.pass_separator != defaults::KB_PASS_SEPARATOR {
            lines.push(format!("KBPassSeparator={}", self.pass_separator));
        }
        if self.pass_start != 0 {
            lines.push(format!("KBPassStart={}", self.pass_start));
        }
        if self.pass_length != 0 {
            lines.push(format!("KBPassLength={}", self.pass_length));
        }

        lines
    }

    /// Builds the section from raw `(key, value)` fields, accumulating
    /// every violated constraint.
    ///
    /// # Errors
    ///
    /// Returns every decode and validation error found.
    pub fn from_lines(fields: &[(String, String)]) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut section = Self::default();

        for (key, value) in fields {
            let result = section.apply(key, value);
            if let Err(e) = result {
                errors.push(e);
            }
        }

        errors.extend(section.errors());
        if errors.is_empty() {
            Ok(section)
        } else {
            Err(errors)
        }
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        match key {
            "KBLogMode" => self.log_mode = raw::bool_flag(key, value)?,
            "KBEnable" => self.enable = raw::bool_flag(key, value)?,
            "KBSource" => self.source = raw::codec(key, value)?,
            "KBPrefix" => self.prefix = Some(raw::codec(key, value)?),
            "KBPostfix" => self.postfix = raw::codec(key, value)?,
            "KBDelayMS" => self.delay_ms = raw::number(key, value, "5-255")?,
            "KBPassMode" => self.pass_mode = raw::bool_flag(key, value)?,
            "KBPassSection" => self.pass_section = raw::number(key, value, "0-65535")?,
            "KBPassSeparator" => self.pass_separator = raw::single_char(key, value)?,
            "KBPassStart" => self.pass_start = raw::number(key, value, "0-65535")?,
            "KBPassLength" => self.pass_length = raw::number(key, value, "0-65535")?,
            _ => {}
        }
        Ok(())
    }
}
