use super::{GenerateError, Generator, generate, generate_template};
use crate::model::{
    AppleVasEntry, KeyboardSection, LedSection, SmartTapEntry, VtapConfig,
};

fn sample() -> VtapConfig {
    let mut config = VtapConfig::new();
    config
        .add_vas(AppleVasEntry::new("pass.com.example.app", 1).unwrap())
        .unwrap();
    config
        .add_smarttap(SmartTapEntry::new("123456", 0, 0).unwrap())
        .unwrap();
    config
}

mod layout {
    use super::*;

    #[test]
    fn header_first_trailing_newline() {
        let text = generate(&sample()).unwrap();
        assert!(text.starts_with("!VTAPconfig\n"));
        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn empty_config_is_header_only() {
        let text = generate(&VtapConfig::new()).unwrap();
        assert_eq!(text, "!VTAPconfig\n");
    }

    #[test]
    fn sections_carry_banner_comments() {
        let text = generate(&sample()).unwrap();
        assert!(text.contains("; Apple VAS Configuration"));
        assert!(text.contains("; Google Smart Tap Configuration"));
    }

    #[test]
    fn absent_sections_emit_nothing() {
        let text = generate(&sample()).unwrap();
        assert!(!text.contains("; Keyboard Emulation"));
        assert!(!text.contains("; NFC Tag Settings"));
    }

    #[test]
    fn vas_entry_lines() {
        let text = generate(&sample()).unwrap();
        assert!(text.contains("VAS1MerchantID=pass.com.example.app\nVAS1KeySlot=1\n"));
    }

    #[test]
    fn extra_keys_reemitted_last() {
        let mut config = sample();
        config.set_extra("FutureFirmwareKey", "7");
        let text = generate(&config).unwrap();
        assert!(text.ends_with("\nFutureFirmwareKey=7\n"));
    }

    #[test]
    fn led_select_always_written() {
        let mut config = VtapConfig::new();
        let feedback = config.feedback.get_or_insert_with(Default::default);
        feedback.led = Some(LedSection::default());
        let text = generate(&config).unwrap();
        assert!(text.contains("LEDSelect=1"));
    }

    #[test]
    fn default_keyboard_emits_log_mode_only() {
        let mut config = VtapConfig::new();
        config.keyboard = Some(KeyboardSection::default());
        let text = generate(&config).unwrap();
        assert!(text.contains("; Keyboard Emulation\nKBLogMode=0\n"));
        assert!(!text.contains("KBSource="));
    }
}

mod side_data {
    use super::*;

    #[test]
    fn leading_comment_after_header() {
        let text = Generator::new(&VtapConfig::new())
            .with_comment("deployed by tooling")
            .render()
            .unwrap();
        assert_eq!(text, "!VTAPconfig\n; deployed by tooling\n");
    }

    #[test]
    fn multiline_comment_each_line_prefixed() {
        let text = Generator::new(&VtapConfig::new())
            .with_comment("one\ntwo")
            .render()
            .unwrap();
        assert!(text.contains("; one\n; two\n"));
    }

    #[test]
    fn metadata_sorted_by_key() {
        let text = Generator::new(&VtapConfig::new())
            .with_metadata("version", "2.1")
            .with_metadata("author", "ops")
            .render()
            .unwrap();
        assert_eq!(
            text,
            "!VTAPconfig\n; @editor:author=ops\n; @editor:version=2.1\n"
        );
    }
}

mod validation {
    use super::*;

    #[test]
    fn invalid_config_refused() {
        let mut config = sample();
        // Edit a validated entry into an invalid state behind the
        // constructor's back.
        config.smarttap.get_mut(1).unwrap().collector_id = "not-a-number".to_string();
        let err = generate(&config).unwrap_err();
        let GenerateError::Invalid { errors } = err;
        assert_eq!(errors[0].field(), "ST1CollectorID");
    }

    #[test]
    fn nothing_rendered_for_invalid_config() {
        let mut config = sample();
        config.smarttap.get_mut(1).unwrap().collector_id = String::new();
        assert!(generate(&config).is_err());
    }
}

mod template {
    use super::*;

    #[test]
    fn placeholder_replaces_pass_sections() {
        let text = generate_template(&sample(), "{{PASSES}}").unwrap();
        assert!(text.contains("\n{{PASSES}}\n"));
        assert!(!text.contains("VAS1MerchantID"));
        assert!(!text.contains("ST1CollectorID"));
    }

    #[test]
    fn placeholder_replaces_default_pass_filters() {
        let mut config = sample();
        config.vas_default_passes =
            Some(crate::model::EnabledPasses::new("VASDefaultPassesEnabled", vec![1]).unwrap());
        let text = generate_template(&config, "#PASSES#").unwrap();
        assert!(!text.contains("VASDefaultPassesEnabled"));
        assert!(text.contains("#PASSES#"));
    }

    #[test]
    fn other_sections_unaffected() {
        let mut config = sample();
        config.keyboard = Some(KeyboardSection::default());
        let text = generate_template(&config, "{{PASSES}}").unwrap();
        assert!(text.contains("KBLogMode=0"));
    }
}
