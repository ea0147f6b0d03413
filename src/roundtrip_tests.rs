//! Whole-file round-trip coverage: parse, generate, parse again.

use crate::generator::{Generator, generate};
use crate::model::{
    AppleVasEntry, DesfireEntry, EnabledPasses, KeyboardSection, NfcSection, NfcTagMode,
    SmartTapEntry, VtapConfig,
};
use crate::parser::parse;

const FULL_FILE: &str = "\
!VTAPconfig
; Site 42 reader

; Apple VAS Configuration
VAS1MerchantID=pass.com.example.app
VAS1KeySlot=1
VAS1MerchantURL=https://example.com/scan
VAS3MerchantID=pass.com.example.loyalty
VAS3KeySlot=0
VASDefaultPassesEnabled=1,3

; Google Smart Tap Configuration
ST1CollectorID=20180608
ST1KeySlot=1

; Keyboard Emulation
KBLogMode=1
KBSource=A5
KBPostfix=%0A
KBDelayMS=20

; NFC Tag Settings
NFCType2=U
NFCType4=D
IgnoreRandomUID=1

; MIFARE DESFire Settings
DESFire1AppID=A1B2C3
DESFire1FileID=1
DESFire1KeySlot=2
DESFire1Crypto=3

; LED/Beep Settings
LEDSelect=1
PassLED=00FF00,500,0,1
PassBeep=100,100,2

VendorFutureKey=7
";

fn build_sample() -> VtapConfig {
    let mut config = VtapConfig::new();
    config
        .add_vas(
            AppleVasEntry::new("pass.com.example.app", 1)
                .unwrap()
                .with_merchant_url("https://example.com/scan")
                .unwrap(),
        )
        .unwrap();
    config
        .add_smarttap(SmartTapEntry::new("20180608", 1, 0).unwrap())
        .unwrap();
    config
        .add_desfire(DesfireEntry::new("A1B2C3").unwrap())
        .unwrap();
    config
}

#[test]
fn parse_generate_parse_is_identity() {
    let first = parse(FULL_FILE).unwrap();
    let text = generate(&first.config).unwrap();
    let second = parse(&text).unwrap();
    assert_eq!(second.config, first.config);
}

#[test]
fn generated_text_is_stable() {
    let first = parse(FULL_FILE).unwrap();
    let text = generate(&first.config).unwrap();
    let again = generate(&parse(&text).unwrap().config).unwrap();
    assert_eq!(again, text);
}

#[test]
fn programmatic_config_round_trips() {
    let config = build_sample();
    let text = generate(&config).unwrap();
    assert_eq!(parse(&text).unwrap().config, config);
}

#[test]
fn full_file_fields_survive() {
    let parsed = parse(FULL_FILE).unwrap();
    let config = &parsed.config;

    assert_eq!(config.vas.len(), 2);
    assert!(config.vas.get(3).is_some());
    assert_eq!(config.vas_default_passes.as_ref().unwrap().slots(), &[1, 3]);
    assert_eq!(config.smarttap.get(1).unwrap().collector_id, "20180608");
    assert_eq!(config.keyboard.as_ref().unwrap().delay_ms, 20);
    assert_eq!(
        config.nfc.as_ref().unwrap().type4,
        Some(NfcTagMode::SecureData)
    );
    assert_eq!(config.desfire.as_ref().unwrap().apps.len(), 1);
    assert!(config.feedback.as_ref().unwrap().beep.is_some());
    assert_eq!(config.extra, vec![("VendorFutureKey".to_string(), "7".to_string())]);
}

#[test]
fn minimal_pass_and_keyboard_file() {
    let source = "!VTAPconfig\n\
                  VAS1MerchantID=pass.com.example.app\n\
                  VAS1KeySlot=1\n\
                  KBLogMode=1\n\
                  KBSource=81\n";
    let parsed = parse(source).unwrap();
    let config = &parsed.config;

    assert_eq!(config.vas.len(), 1);
    let entry = config.vas.get(1).unwrap();
    assert_eq!(entry.merchant_id, "pass.com.example.app");
    assert_eq!(entry.key_slot, 1);

    let kb = config.keyboard.as_ref().unwrap();
    assert!(kb.log_mode);
    assert_eq!(kb.source.bits(), 0x81);

    let text = generate(config).unwrap();
    assert_eq!(generate(&parse(&text).unwrap().config).unwrap(), text);
}

#[test]
fn comments_do_not_reach_the_model() {
    let parsed = parse(FULL_FILE).unwrap();
    let text = generate(&parsed.config).unwrap();
    assert!(!text.contains("Site 42"));
    assert!(parsed.comments.contains(&"; Site 42 reader".to_string()));
}

#[test]
fn metadata_round_trips_through_generator() {
    let source = "!VTAPconfig\n; @editor:version=2.1\nKBLogMode=1\n";
    let parsed = parse(source).unwrap();
    let text = Generator::new(&parsed.config)
        .with_metadata_map(parsed.metadata.clone())
        .render()
        .unwrap();
    assert_eq!(parse(&text).unwrap().metadata, parsed.metadata);
}

#[test]
fn default_pass_filters_round_trip() {
    let mut config = build_sample();
    config.smarttap_default_passes =
        Some(EnabledPasses::new("STDefaultPassesEnabled", vec![1]).unwrap());
    let text = generate(&config).unwrap();
    assert!(text.contains("STDefaultPassesEnabled=1\n"));
    assert_eq!(parse(&text).unwrap().config, config);
}

#[test]
fn all_default_sections_normalize_to_absent() {
    // A section carrying only default values emits nothing, so the
    // reparse sees it as absent. Stable from the second pass on.
    let mut config = VtapConfig::new();
    config.nfc = Some(NfcSection::default());
    let text = generate(&config).unwrap();
    assert_eq!(parse(&text).unwrap().config.nfc, None);
}

#[test]
fn keyboard_section_always_survives() {
    // KBLogMode is written unconditionally, so even a default
    // keyboard section reparses as present.
    let mut config = VtapConfig::new();
    config.keyboard = Some(KeyboardSection::default());
    let text = generate(&config).unwrap();
    assert_eq!(
        parse(&text).unwrap().config.keyboard,
        Some(KeyboardSection::default())
    );
}
