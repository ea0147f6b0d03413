use super::error::FieldError;
use super::nfc::{MinDigits, NfcSection, NfcTagMode, TagReadFormat, TagReadSection};

fn owned(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

mod validation {
    use super::*;

    #[test]
    fn secure_data_only_on_type4() {
        let section = NfcSection {
            type4: Some(NfcTagMode::SecureData),
            ..NfcSection::default()
        };
        assert!(section.validate().is_ok());

        let section = NfcSection {
            type2: Some(NfcTagMode::SecureData),
            ..NfcSection::default()
        };
        assert!(section.validate().is_err());

        let section = NfcSection {
            type5: Some(NfcTagMode::SecureData),
            ..NfcSection::default()
        };
        assert!(section.validate().is_err());
    }

    #[test]
    fn tag_read_ranges_checked() {
        let section = NfcSection {
            tag_read: Some(TagReadSection {
                key_slot: Some(10),
                offset: 16,
                length: Some(0),
                ..TagReadSection::default()
            }),
            ..NfcSection::default()
        };
        assert_eq!(section.errors().len(), 3);
    }

    #[test]
    fn fixed_min_digits_bounded() {
        let section = NfcSection {
            tag_read: Some(TagReadSection {
                min_digits: Some(MinDigits::Fixed(21)),
                ..TagReadSection::default()
            }),
            ..NfcSection::default()
        };
        assert!(matches!(
            section.validate().unwrap_err(),
            FieldError::Range { .. }
        ));
    }
}

mod lines {
    use super::*;

    #[test]
    fn modes_written_with_wire_codes() {
        let section = NfcSection {
            type2: Some(NfcTagMode::Uid),
            type4: Some(NfcTagMode::Ndef),
            type5: Some(NfcTagMode::Disabled),
            ..NfcSection::default()
        };
        assert_eq!(
            section.to_lines(),
            vec!["NFCType2=U", "NFCType4=N", "NFCType5=0"]
        );
    }

    #[test]
    fn false_flags_suppressed() {
        let section = NfcSection {
            ignore_random_uid: true,
            ..NfcSection::default()
        };
        assert_eq!(section.to_lines(), vec!["IgnoreRandomUID=1"]);
    }

    #[test]
    fn block_read_settings_written() {
        let section = NfcSection {
            type2: Some(NfcTagMode::Block),
            tag_read: Some(TagReadSection {
                block_num: Some(4),
                length: Some(8),
                format: Some(TagReadFormat::Hex),
                ..TagReadSection::default()
            }),
            ..NfcSection::default()
        };
        assert_eq!(
            section.to_lines(),
            vec![
                "NFCType2=B",
                "TagReadBlockNum=4",
                "TagReadLength=8",
                "TagReadFormat=h"
            ]
        );
    }
}

mod from_lines {
    use super::*;

    #[test]
    fn modes_decoded() {
        let section = NfcSection::from_lines(&owned(&[("NFCType4", "D")])).unwrap();
        assert_eq!(section.type4, Some(NfcTagMode::SecureData));
        assert_eq!(section.type2, None);
    }

    #[test]
    fn auto_min_digits_decoded() {
        let section =
            NfcSection::from_lines(&owned(&[("TagReadMinDigits", "A")])).unwrap();
        assert_eq!(
            section.tag_read.unwrap().min_digits,
            Some(MinDigits::Auto)
        );
    }

    #[test]
    fn default_tag_read_normalizes_to_absent() {
        let section = NfcSection::from_lines(&owned(&[("NFCType2", "U")])).unwrap();
        assert_eq!(section.tag_read, None);
    }

    #[test]
    fn unknown_mode_letter_reported() {
        let errors = NfcSection::from_lines(&owned(&[("NFCType2", "X")])).unwrap_err();
        assert!(matches!(errors[0], FieldError::Format { .. }));
    }

    #[test]
    fn secure_data_on_type5_reported() {
        let errors = NfcSection::from_lines(&owned(&[("NFCType5", "D")])).unwrap_err();
        assert_eq!(errors[0].field(), "NFCType5");
    }
}
