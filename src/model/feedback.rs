//! LED and beep feedback configuration (`LED*`, `*LED`, `*Beep` keys).

use serde::{Deserialize, Serialize};

use crate::codec::{BeepSequence, LedSequence, RgbColor};

use super::error::FieldError;
use super::raw;

/// LED operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedMode {
    /// LEDs off (wire value 0).
    Off,
    /// LEDs on (wire value 1).
    On,
    /// Status indicator (wire value 2).
    Status,
    /// Custom sequences (wire value 3).
    Custom,
}

impl LedMode {
    #[must_use]
    pub(crate) const fn code(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
            Self::Status => 2,
            Self::Custom => 3,
        }
    }

    fn decode(field: &str, value: &str) -> Result<Self, FieldError> {
        match value {
            "0" => Ok(Self::Off),
            "1" => Ok(Self::On),
            "2" => Ok(Self::Status),
            "3" => Ok(Self::Custom),
            _ => Err(FieldError::range(field, value, "0-3")),
        }
    }
}

/// LED hardware selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LedSelect {
    /// External RGB LED, common cathode (wire value 0).
    External,
    /// On-board LED, compact case (wire value 1). The default.
    #[default]
    OnboardCompact,
    /// On-board LED, square case (wire value 2).
    OnboardSquare,
    /// Serial LEDs (wire value 3).
    Serial,
}

impl LedSelect {
    #[must_use]
    pub(crate) const fn code(self) -> u8 {
        match self {
            Self::External => 0,
            Self::OnboardCompact => 1,
            Self::OnboardSquare => 2,
            Self::Serial => 3,
        }
    }

    fn decode(field: &str, value: &str) -> Result<Self, FieldError> {
        match value {
            "0" => Ok(Self::External),
            "1" => Ok(Self::OnboardCompact),
            "2" => Ok(Self::OnboardSquare),
            "3" => Ok(Self::Serial),
            _ => Err(FieldError::range(field, value, "0-3")),
        }
    }
}

/// LED feedback settings.
///
/// `select` is always written, so a file carrying any LED settings
/// states its hardware explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedSection {
    /// LED operating mode (`LEDMode`).
    pub mode: Option<LedMode>,
    /// LED hardware (`LEDSelect`), default onboard-compact.
    pub select: LedSelect,
    /// Default color when no sequence runs (`LEDDefaultRGB`).
    pub default_rgb: Option<RgbColor>,
    /// Sequence on a successful pass read (`PassLED`).
    pub pass_led: Option<LedSequence>,
    /// Sequence on a tag read (`TagLED`).
    pub tag_led: Option<LedSequence>,
    /// Sequence on a pass error (`PassErrorLED`).
    pub pass_error_led: Option<LedSequence>,
    /// Sequence at startup (`StartLED`).
    pub start_led: Option<LedSequence>,
}

impl LedSection {
    fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(mode) = self.mode {
            lines.push(format!("LEDMode={}", mode.code()));
        }
        lines.push(format!("LEDSelect={}", self.select.code()));
        if let Some(rgb) = self.default_rgb {
            lines.push(format!("LEDDefaultRGB={rgb}"));
        }
        if let Some(seq) = self.pass_led {
            lines.push(format!("PassLED={seq}"));
        }
        if let Some(seq) = self.tag_led {
            lines.push(format!("TagLED={seq}"));
        }
        if let Some(seq) = self.pass_error_led {
            lines.push(format!("PassErrorLED={seq}"));
        }
        if let Some(seq) = self.start_led {
            lines.push(format!("StartLED={seq}"));
        }

        lines
    }
}

/// Beep feedback settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BeepSection {
    /// Sequence on a successful pass read (`PassBeep`).
    pub pass_beep: Option<BeepSequence>,
    /// Sequence on a tag read (`TagBeep`).
    pub tag_beep: Option<BeepSequence>,
    /// Sequence on a pass error (`PassErrorBeep`).
    pub pass_error_beep: Option<BeepSequence>,
    /// Sequence at startup (`StartBeep`).
    pub start_beep: Option<BeepSequence>,
}

impl BeepSection {
    fn to_lines(self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(seq) = self.pass_beep {
            lines.push(format!("PassBeep={seq}"));
        }
        if let Some(seq) = self.tag_beep {
            lines.push(format!("TagBeep={seq}"));
        }
        if let Some(seq) = self.pass_error_beep {
            lines.push(format!("PassErrorBeep={seq}"));
        }
        if let Some(seq) = self.start_beep {
            lines.push(format!("StartBeep={seq}"));
        }

        lines
    }

    fn is_default(self) -> bool {
        self == Self::default()
    }
}

/// Combined LED and beep feedback. Singleton section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedbackSection {
    /// LED settings.
    pub led: Option<LedSection>,
    /// Beep settings.
    pub beep: Option<BeepSection>,
}

impl FeedbackSection {
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

    // Sequence domains are checked when the codec values are built,
    // so there is nothing left to re-check here.
    pub(crate) fn errors(&self) -> Vec<FieldError> {
        Vec::new()
    }

    /// Renders the `Key=Value` lines for this section.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(ref led) = self.led {
            lines.extend(led.to_lines());
        }
        if let Some(beep) = self.beep {
            lines.extend(beep.to_lines());
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
        let mut led = LedSection::default();
        let mut saw_led = false;
        let mut beep = BeepSection::default();

        for (key, value) in fields {
            let result = Self::apply(&mut led, &mut saw_led, &mut beep, key, value);
            if let Err(e) = result {
                errors.push(e);
            }
        }

        let section = Self {
            led: saw_led.then_some(led),
            beep: (!beep.is_default()).then_some(beep),
        };

        errors.extend(section.errors());
        if errors.is_empty() {
            Ok(section)
        } else {
            Err(errors)
        }
    }

    fn apply(
        led: &mut LedSection,
        saw_led: &mut bool,
        beep: &mut BeepSection,
        key: &str,
        value: &str,
    ) -> Result<(), FieldError> {
        match key {
            "LEDMode" => {
                led.mode = Some(LedMode::decode(key, value)?);
                *saw_led = true;
            }
            "LEDSelect" => {
                led.select = LedSelect::decode(key, value)?;
                *saw_led = true;
            }
            "LEDDefaultRGB" => {
                led.default_rgb = Some(raw::codec(key, value)?);
                *saw_led = true;
            }
            "PassLED" => {
                led.pass_led = Some(raw::codec(key, value)?);
                *saw_led = true;
            }
            "TagLED" => {
                led.tag_led = Some(raw::codec(key, value)?);
                *saw_led = true;
            }
            "PassErrorLED" => {
                led.pass_error_led = Some(raw::codec(key, value)?);
                *saw_led = true;
            }
            "StartLED" => {
                led.start_led = Some(raw::codec(key, value)?);
                *saw_led = true;
            }
            "PassBeep" => beep.pass_beep = Some(raw::codec(key, value)?),
            "TagBeep" => beep.tag_beep = Some(raw::codec(key, value)?),
            "PassErrorBeep" => beep.pass_error_beep = Some(raw::codec(key, value)?),
            "StartBeep" => beep.start_beep = Some(raw::codec(key, value)?),
            _ => {}
        }
        Ok(())
    }
}
