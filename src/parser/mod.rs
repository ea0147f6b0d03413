//! config.txt parser.
//!
//! A line-oriented state machine: `AwaitHeader` rejects any input
//! whose first non-blank line is not exactly `!VTAPconfig`, then
//! `ReadingBody` classifies each line (blank, comment, metadata
//! comment, `Key=Value`) and routes keys to their section by exact
//! name or numbered prefix. Collected key groups are handed to the
//! section models at the end, and validation failures across the
//! whole file are returned together as one aggregate error.
//!
//! Duplicate keys follow last-wins semantics; only the final retained
//! occurrence of a key is validated. Unrecognized keys are retained
//! verbatim rather than rejected, so files written by newer firmware
//! survive a round trip.

mod error;


use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{
    AppleVasEntry, DesfireEntry, DesfireSection, EnabledPasses, FeedbackSection, FieldError,
    KeyboardSection, NfcSection, SmartTapEntry, VtapConfig,
};

pub use error::{ParseError, ParseIssue};

/// The literal header token every config file must start with.
pub const HEADER: &str = "!VTAPconfig";

/// Result of a successful parse: the typed config plus side data
/// carried in comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// The typed configuration.
    pub config: VtapConfig,
    /// `; @editor:<key>=<value>` metadata comments, keys unique.
    /// Opaque pass-through data: no semantics are attached here.
    pub metadata: BTreeMap<String, String>,
    /// Ordinary comment lines, verbatim and in file order.
    pub comments: Vec<String>,
}

/// Parses config.txt content into a typed configuration.
///
/// A leading UTF-8 byte-order mark is stripped; a trailing `\r` per
/// line is tolerated as line-ending handling. No other whitespace is
/// trimmed: spaces in keys and values are significant.
///
/// # Errors
///
/// [`ParseError::Header`] if the first non-blank line is not the
/// literal header (fatal, nothing else is read), otherwise
/// [`ParseError::Invalid`] listing every offending key in the file.
pub fn parse(text: &str) -> Result<Parsed, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut saw_header = false;
    let mut collector = Collector::default();

    for raw_line in text.split('\n') {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        if saw_header {
            collector.line(line);
        } else {
            if line.trim().is_empty() {
                continue;
            }
            if line != HEADER {
                return Err(ParseError::Header {
                    found: line.to_string(),
                });
            }
            saw_header = true;
        }
    }

    if !saw_header {
        return Err(ParseError::Header {
            found: String::new(),
        });
    }

    collector.finish()
}

static VAS_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^VAS(\d+)(MerchantID|KeySlot|MerchantURL)$").expect("valid VAS key pattern")
});

static ST_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ST(\d+)(CollectorID|KeySlot|KeyVersion)$").expect("valid ST key pattern")
});

static DESFIRE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^DESFire(\d+)(AppID|FileID|KeyNum|KeySlot|Crypto|Format|ReadLength|ReadOffset|Diversification|PrivacyKeyNum|PrivacyKeySlot|SysIDKeySlot|SysIDLength)$",
    )
    .expect("valid DESFire key pattern")
});

const KEYBOARD_KEYS: &[&str] = &[
    "KBLogMode",
    "KBEnable",
    "KBSource",
    "KBPrefix",
    "KBPostfix",
    "KBDelayMS",
    "KBPassMode",
    "KBPassSection",
    "KBPassSeparator",
    "KBPassStart",
    "KBPassLength",
];

const NFC_KEYS: &[&str] = &[
    "NFCType2",
    "NFCType4",
    "NFCType5",
    "NFCReportReadError",
    "IgnoreRandomUID",
    "TagByteOrder",
    "TagReadBlockNum",
    "TagReadKeySlot",
    "TagReadKeyType",
    "TagReadOffset",
    "TagReadLength",
    "TagReadFormat",
    "TagReadMinDigits",
];

const FEEDBACK_KEYS: &[&str] = &[
    "LEDMode",
    "LEDSelect",
    "LEDDefaultRGB",
    "PassLED",
    "TagLED",
    "PassErrorLED",
    "StartLED",
    "PassBeep",
    "TagBeep",
    "PassErrorBeep",
    "StartBeep",
];

const METADATA_PREFIX: &str = "; @editor:";

/// Raw key groups collected during `ReadingBody`.
#[derive(Default)]
struct Collector {
    vas: BTreeMap<u8, Vec<(String, String)>>,
    smarttap: BTreeMap<u8, Vec<(String, String)>>,
    desfire: BTreeMap<u8, Vec<(String, String)>>,
    desfire_separator: Option<String>,
    keyboard: Vec<(String, String)>,
    nfc: Vec<(String, String)>,
    feedback: Vec<(String, String)>,
    vas_default: Option<String>,
    smarttap_default: Option<String>,
    extra: Vec<(String, String)>,
    metadata: BTreeMap<String, String>,
    comments: Vec<String>,
    issues: Vec<ParseIssue>,
}

impl Collector {
    fn line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        if line.starts_with(';') {
            self.comment(line);
            return;
        }

        // Split once on the first '='; spaces stay significant.
        let Some((key, value)) = line.split_once('=') else {
            self.issues
                .push(ParseIssue::new(line, "line is not Key=Value"));
            return;
        };

        self.route(key, value);
    }

    fn comment(&mut self, line: &str) {
        if let Some(rest) = line.strip_prefix(METADATA_PREFIX) {
            if let Some((key, value)) = rest.split_once('=') {
                if !key.is_empty() {
                    self.metadata.insert(key.to_string(), value.to_string());
                    return;
                }
            }
        }
        self.comments.push(line.to_string());
    }

    fn route(&mut self, key: &str, value: &str) {
        if let Some(caps) = VAS_KEY.captures(key) {
            Self::slotted(&mut self.vas, &mut self.issues, "VAS", 6, &caps, key, value);
        } else if let Some(caps) = ST_KEY.captures(key) {
            Self::slotted(
                &mut self.smarttap,
                &mut self.issues,
                "ST",
                6,
                &caps,
                key,
                value,
            );
        } else if let Some(caps) = DESFIRE_KEY.captures(key) {
            Self::slotted(
                &mut self.desfire,
                &mut self.issues,
                "DESFire",
                9,
                &caps,
                key,
                value,
            );
        } else {
            self.exact(key, value);
        }
    }

    fn exact(&mut self, key: &str, value: &str) {
        match key {
            "VASDefaultPassesEnabled" => self.vas_default = Some(value.to_string()),
            "STDefaultPassesEnabled" => self.smarttap_default = Some(value.to_string()),
            "DESFireSeparator" => self.desfire_separator = Some(value.to_string()),
            k if KEYBOARD_KEYS.contains(&k) => put(&mut self.keyboard, k, value),
            k if NFC_KEYS.contains(&k) => put(&mut self.nfc, k, value),
            k if FEEDBACK_KEYS.contains(&k) => put(&mut self.feedback, k, value),
            _ => {
                tracing::warn!(key, "unknown key retained verbatim");
                put(&mut self.extra, key, value);
            }
        }
    }

    fn slotted(
        groups: &mut BTreeMap<u8, Vec<(String, String)>>,
        issues: &mut Vec<ParseIssue>,
        group: &str,
        max: u8,
        caps: &regex::Captures<'_>,
        key: &str,
        value: &str,
    ) {
        let slot = caps[1].parse::<u8>().ok().filter(|s| (1..=max).contains(s));
        let Some(slot) = slot else {
            issues.push(ParseIssue::new(
                key,
                format!("{group} slot {} out of range (1-{max})", &caps[1]),
            ));
            return;
        };

        put(groups.entry(slot).or_default(), &caps[2], value);
    }

    fn finish(mut self) -> Result<Parsed, ParseError> {
        let mut config = VtapConfig::new();

        let vas = std::mem::take(&mut self.vas);
        for (slot, fields) in &vas {
            match AppleVasEntry::from_lines(fields) {
                Ok(entry) => self.insert_vas(&mut config, *slot, entry),
                Err(errors) => self.collect(&format!("VAS{slot}"), &errors),
            }
        }

        let smarttap = std::mem::take(&mut self.smarttap);
        for (slot, fields) in &smarttap {
            match SmartTapEntry::from_lines(fields) {
                Ok(entry) => self.insert_smarttap(&mut config, *slot, entry),
                Err(errors) => self.collect(&format!("ST{slot}"), &errors),
            }
        }

        self.finish_desfire(&mut config);
        self.finish_singletons(&mut config);
        self.finish_pass_filters(&mut config);

        config.extra = std::mem::take(&mut self.extra);

        if self.issues.is_empty() {
            tracing::debug!(
                vas = config.vas.len(),
                smarttap = config.smarttap.len(),
                extra = config.extra.len(),
                "parsed config"
            );
            Ok(Parsed {
                config,
                metadata: self.metadata,
                comments: self.comments,
            })
        } else {
            Err(ParseError::Invalid {
                issues: self.issues,
            })
        }
    }

    fn insert_vas(&mut self, config: &mut VtapConfig, slot: u8, entry: AppleVasEntry) {
        if let Err(e) = config.vas.insert(slot, entry) {
            self.issues
                .push(ParseIssue::new(format!("VAS{slot}"), e.to_string()));
        }
    }

    fn insert_smarttap(&mut self, config: &mut VtapConfig, slot: u8, entry: SmartTapEntry) {
        if let Err(e) = config.smarttap.insert(slot, entry) {
            self.issues
                .push(ParseIssue::new(format!("ST{slot}"), e.to_string()));
        }
    }

    fn finish_desfire(&mut self, config: &mut VtapConfig) {
        let apps = std::mem::take(&mut self.desfire);
        let separator = self.desfire_separator.take();

        if apps.is_empty() && separator.is_none() {
            return;
        }

        let mut section = DesfireSection::default();

        for (slot, fields) in &apps {
            match DesfireEntry::from_lines(fields) {
                Ok(entry) => {
                    if let Err(e) = section.apps.insert(*slot, entry) {
                        self.issues
                            .push(ParseIssue::new(format!("DESFire{slot}"), e.to_string()));
                    }
                }
                Err(errors) => self.collect(&format!("DESFire{slot}"), &errors),
            }
        }

        if let Some(raw) = separator {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => section.separator = c,
                _ => self.issues.push(ParseIssue::new(
                    "DESFireSeparator",
                    "malformed DESFireSeparator: expected a single character",
                )),
            }
        }

        config.desfire = Some(section);
    }

    fn finish_singletons(&mut self, config: &mut VtapConfig) {
        let keyboard = std::mem::take(&mut self.keyboard);
        if !keyboard.is_empty() {
            match KeyboardSection::from_lines(&keyboard) {
                Ok(section) => config.keyboard = Some(section),
                Err(errors) => self.collect("", &errors),
            }
        }

        let nfc = std::mem::take(&mut self.nfc);
        if !nfc.is_empty() {
            match NfcSection::from_lines(&nfc) {
                Ok(section) => config.nfc = Some(section),
                Err(errors) => self.collect("", &errors),
            }
        }

        let feedback = std::mem::take(&mut self.feedback);
        if !feedback.is_empty() {
            match FeedbackSection::from_lines(&feedback) {
                Ok(section) => config.feedback = Some(section),
                Err(errors) => self.collect("", &errors),
            }
        }
    }

    fn finish_pass_filters(&mut self, config: &mut VtapConfig) {
        if let Some(raw) = self.vas_default.take() {
            match EnabledPasses::from_value("VASDefaultPassesEnabled", &raw) {
                Ok(filter) => config.vas_default_passes = Some(filter),
                Err(errors) => self.collect("", &errors),
            }
        }
        if let Some(raw) = self.smarttap_default.take() {
            match EnabledPasses::from_value("STDefaultPassesEnabled", &raw) {
                Ok(filter) => config.smarttap_default_passes = Some(filter),
                Err(errors) => self.collect("", &errors),
            }
        }
    }

    fn collect(&mut self, prefix: &str, errors: &[FieldError]) {
        for e in errors {
            self.issues.push(ParseIssue::from_field_error(prefix, e));
        }
    }
}

/// Inserts with last-wins semantics, keeping the first position.
fn put(fields: &mut Vec<(String, String)>, key: &str, value: &str) {
    if let Some(existing) = fields.iter_mut().find(|(k, _)| k == key) {
        existing.1 = value.to_string();
    } else {
        fields.push((key.to_string(), value.to_string()));
    }
}
