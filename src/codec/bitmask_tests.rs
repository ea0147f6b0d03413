//! Tests for the `KBSource` bitmask codec.

use super::bitmask::KbSource;
use super::error::FormatError;

mod builder {
    use super::*;

    #[test]
    fn reader_default_is_a5() {
        let source = KbSource::empty()
            .mobile_pass()
            .card_emulation()
            .scanners()
            .card_tag_uid();

        assert_eq!(source.to_string(), "A5");
        assert_eq!(source, KbSource::READER_DEFAULT);
    }

    #[test]
    fn single_bits_encode_as_hex() {
        assert_eq!(KbSource::empty().mobile_pass().to_string(), "80");
        assert_eq!(KbSource::empty().stuid().to_string(), "40");
        assert_eq!(KbSource::empty().card_emulation().to_string(), "20");
        assert_eq!(KbSource::empty().scanners().to_string(), "04");
        assert_eq!(KbSource::empty().command_interface().to_string(), "02");
        assert_eq!(KbSource::empty().card_tag_uid().to_string(), "01");
    }

    #[test]
    fn contains_checks_all_bits_of_mask() {
        let source = KbSource::empty().mobile_pass().card_tag_uid();

        assert!(source.contains(KbSource::MOBILE_PASS));
        assert!(source.contains(KbSource::MOBILE_PASS | KbSource::CARD_TAG_UID));
        assert!(!source.contains(KbSource::SCANNERS));
    }
}

mod decoding {
    use super::*;

    #[test]
    fn decodes_two_digit_hex() {
        let source: KbSource = "81".parse().unwrap();
        assert!(source.contains(KbSource::MOBILE_PASS));
        assert!(source.contains(KbSource::CARD_TAG_UID));
        assert_eq!(source.bits(), 0x81);
    }

    #[test]
    fn decodes_single_digit_hex() {
        let source: KbSource = "5".parse().unwrap();
        assert_eq!(source.bits(), 0x05);
    }

    #[test]
    fn rejects_non_hex() {
        let err = "G1".parse::<KbSource>().unwrap_err();
        assert!(matches!(err, FormatError::InvalidHex { .. }));
    }

    #[test]
    fn rejects_more_than_two_digits() {
        let err = "1A5".parse::<KbSource>().unwrap_err();
        assert!(matches!(err, FormatError::InvalidHex { .. }));
    }

    #[test]
    fn rejects_empty_value() {
        assert!("".parse::<KbSource>().is_err());
    }
}

mod round_trip {
    use super::*;

    #[test]
    fn every_byte_value_survives() {
        // Reserved bits (0x10, 0x08) included: the codec must not
        // drop bits it does not know.
        for bits in 0..=u8::MAX {
            let source = KbSource::from_bits(bits);
            let decoded: KbSource = source.to_string().parse().unwrap();
            assert_eq!(decoded, source, "bits {bits:#04x}");
        }
    }

    #[test]
    fn single_digit_input_reencodes_padded() {
        let source: KbSource = "5".parse().unwrap();
        assert_eq!(source.to_string(), "05");
    }
}
