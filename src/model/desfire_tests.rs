use super::desfire::{DesfireCrypto, DesfireEntry, DesfireFormat, DesfireSection};
use super::error::FieldError;

fn owned(fields: &[(&str, &str)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

mod entry {
    use super::*;

    #[test]
    fn app_id_uppercased() {
        let entry = DesfireEntry::new("a1b2c3").unwrap();
        assert_eq!(entry.app_id, "A1B2C3");
    }

    #[test]
    fn app_id_must_be_six_hex_digits() {
        assert!(DesfireEntry::new("A1B2").is_err());
        assert!(DesfireEntry::new("A1B2C3D4").is_err());
        assert!(DesfireEntry::new("A1B2GX").is_err());
    }

    #[test]
    fn read_length_defaults_to_three() {
        assert_eq!(DesfireEntry::new("A1B2C3").unwrap().read_length, 3);
    }

    #[test]
    fn zero_file_id_rejected() {
        let entry = DesfireEntry {
            file_id: Some(0),
            ..DesfireEntry::new("A1B2C3").unwrap()
        };
        assert!(matches!(
            entry.validate().unwrap_err(),
            FieldError::Range { .. }
        ));
    }

    #[test]
    fn key_slot_bounded() {
        let entry = DesfireEntry {
            key_slot: Some(10),
            ..DesfireEntry::new("A1B2C3").unwrap()
        };
        assert!(entry.validate().is_err());
    }

    #[test]
    fn sysid_length_bounded() {
        let entry = DesfireEntry {
            sysid_length: Some(17),
            ..DesfireEntry::new("A1B2C3").unwrap()
        };
        assert!(entry.validate().is_err());
    }
}

mod lines {
    use super::*;

    #[test]
    fn minimal_entry_emits_app_id_only() {
        let entry = DesfireEntry::new("A1B2C3").unwrap();
        assert_eq!(entry.to_lines(1), vec!["DESFire1AppID=A1B2C3"]);
    }

    #[test]
    fn configured_fields_written_under_slot_prefix() {
        let entry = DesfireEntry {
            file_id: Some(1),
            key_slot: Some(2),
            crypto: Some(DesfireCrypto::Aes),
            format: Some(DesfireFormat::KeyIdV1),
            read_length: 16,
            ..DesfireEntry::new("A1B2C3").unwrap()
        };
        assert_eq!(
            entry.to_lines(5),
            vec![
                "DESFire5AppID=A1B2C3",
                "DESFire5FileID=1",
                "DESFire5KeySlot=2",
                "DESFire5Crypto=3",
                "DESFire5Format=1",
                "DESFire5ReadLength=16"
            ]
        );
    }

    #[test]
    fn non_default_separator_written_without_apps() {
        let section = DesfireSection {
            separator: ';',
            ..DesfireSection::default()
        };
        assert_eq!(section.to_lines(), vec!["DESFireSeparator=;"]);
    }

    #[test]
    fn default_separator_suppressed() {
        let mut section = DesfireSection::default();
        section.apps.push(DesfireEntry::new("A1B2C3").unwrap()).unwrap();
        assert_eq!(section.to_lines(), vec!["DESFire1AppID=A1B2C3"]);
    }
}

mod from_lines {
    use super::*;

    #[test]
    fn defaults_restored() {
        let entry = DesfireEntry::from_lines(&owned(&[("AppID", "a1b2c3")])).unwrap();
        assert_eq!(entry.app_id, "A1B2C3");
        assert_eq!(entry.read_length, 3);
        assert!(!entry.diversification);
    }

    #[test]
    fn crypto_wire_value_two_rejected() {
        let fields = owned(&[("AppID", "A1B2C3"), ("Crypto", "2")]);
        let errors = DesfireEntry::from_lines(&fields).unwrap_err();
        assert_eq!(errors[0].field(), "Crypto");
    }

    #[test]
    fn missing_app_id_reported() {
        let errors = DesfireEntry::from_lines(&owned(&[("FileID", "1")])).unwrap_err();
        assert!(matches!(errors[0], FieldError::Required { .. }));
    }
}
