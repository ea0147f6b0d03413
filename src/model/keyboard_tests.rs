use super::KeyboardSection;
use super::error::FieldError;
use crate::codec::{EscapedString, KbSource};

fn owned(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

mod defaults {
    use super::*;

    #[test]
    fn device_defaults() {
        let kb = KeyboardSection::default();
        assert!(!kb.log_mode);
        assert!(kb.enable);
        assert_eq!(kb.source, KbSource::READER_DEFAULT);
        assert_eq!(kb.postfix, EscapedString::newline());
        assert_eq!(kb.delay_ms, 5);
        assert_eq!(kb.pass_separator, '|');
    }

    #[test]
    fn delay_below_minimum_rejected() {
        let kb = KeyboardSection {
            delay_ms: 2,
            ..KeyboardSection::default()
        };
        assert!(matches!(
            kb.validate().unwrap_err(),
            FieldError::Range { .. }
        ));
    }
}

mod lines {
    use super::*;

    #[test]
    fn default_section_emits_log_mode_only() {
        assert_eq!(KeyboardSection::default().to_lines(), vec!["KBLogMode=0"]);
    }

    #[test]
    fn source_written_when_logging() {
        let kb = KeyboardSection {
            log_mode: true,
            ..KeyboardSection::default()
        };
        assert_eq!(kb.to_lines(), vec!["KBLogMode=1", "KBSource=A5"]);
    }

    #[test]
    fn disabled_keyboard_written() {
        let kb = KeyboardSection {
            enable: false,
            ..KeyboardSection::default()
        };
        assert!(kb.to_lines().contains(&"KBEnable=0".to_string()));
    }

    #[test]
    fn non_default_values_written() {
        let kb = KeyboardSection {
            delay_ms: 20,
            pass_mode: true,
            pass_section: 2,
            ..KeyboardSection::default()
        };
        let lines = kb.to_lines();
        assert!(lines.contains(&"KBDelayMS=20".to_string()));
        assert!(lines.contains(&"KBPassMode=1".to_string()));
        assert!(lines.contains(&"KBPassSection=2".to_string()));
    }
}

mod from_lines {
    use super::*;

    #[test]
    fn omitted_keys_restore_defaults() {
        let kb = KeyboardSection::from_lines(&owned(&[("KBLogMode", "1")])).unwrap();
        assert!(kb.log_mode);
        assert_eq!(
            KeyboardSection {
                log_mode: false,
                ..kb
            },
            KeyboardSection::default()
        );
    }

    #[test]
    fn escaped_prefix_decoded() {
        let kb =
            KeyboardSection::from_lines(&owned(&[("KBLogMode", "0"), ("KBPrefix", "ID:%09")]))
                .unwrap();
        let prefix = kb.prefix.unwrap();
        assert_eq!(prefix.to_string(), "ID:%09");
    }

    #[test]
    fn bad_flag_and_bad_delay_both_reported() {
        let fields = owned(&[("KBEnable", "yes"), ("KBDelayMS", "1")]);
        let errors = KeyboardSection::from_lines(&fields).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn bad_source_mask_reported() {
        let errors =
            KeyboardSection::from_lines(&owned(&[("KBSource", "XYZ")])).unwrap_err();
        assert!(matches!(errors[0], FieldError::Format { .. }));
    }

    #[test]
    fn round_trips() {
        let kb = KeyboardSection {
            log_mode: true,
            delay_ms: 10,
            pass_mode: true,
            pass_separator: ';',
            ..KeyboardSection::default()
        };
        let fields: Vec<(String, String)> = kb
            .to_lines()
            .iter()
            .map(|line| {
                let (k, v) = line.split_once('=').unwrap();
                (k.to_string(), v.to_string())
            })
            .collect();
        assert_eq!(KeyboardSection::from_lines(&fields).unwrap(), kb);
    }
}
