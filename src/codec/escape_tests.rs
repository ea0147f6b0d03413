//! Tests for the escaped-string codec.

use super::error::FormatError;
use super::escape::{EscapeToken, EscapedString};

mod decoding {
    use super::*;

    #[test]
    fn plain_text_is_literal() {
        let value: EscapedString = "TAG:".parse().unwrap();
        assert_eq!(
            value.tokens(),
            &[
                EscapeToken::Literal('T'),
                EscapeToken::Literal('A'),
                EscapeToken::Literal('G'),
                EscapeToken::Literal(':'),
            ]
        );
    }

    #[test]
    fn percent_escape_decodes_to_byte() {
        let value: EscapedString = "%0A".parse().unwrap();
        assert_eq!(value.tokens(), &[EscapeToken::Byte(0x0A)]);
    }

    #[test]
    fn dollar_t_is_the_variable_token() {
        let value: EscapedString = "$t:".parse().unwrap();
        assert_eq!(
            value.tokens(),
            &[EscapeToken::Timestamp, EscapeToken::Literal(':')]
        );
    }

    #[test]
    fn lone_dollar_is_literal() {
        let value: EscapedString = "$x".parse().unwrap();
        assert_eq!(
            value.tokens(),
            &[EscapeToken::Literal('$'), EscapeToken::Literal('x')]
        );
    }

    #[test]
    fn truncated_escape_is_rejected() {
        let err = "abc%0".parse::<EscapedString>().unwrap_err();
        assert_eq!(err, FormatError::BadEscape { pos: 3 });
    }

    #[test]
    fn non_hex_escape_is_rejected() {
        assert!("%zz".parse::<EscapedString>().is_err());
    }
}

mod encoding {
    use super::*;

    #[test]
    fn is_exact_inverse_of_decoding() {
        for text in ["$t", "%0A", "ID=", "$t %09data%0D%0A"] {
            let value: EscapedString = text.parse().unwrap();
            assert_eq!(value.to_string(), text, "input {text:?}");
        }
    }

    #[test]
    fn reescapes_literal_percent_and_dollar() {
        let value = EscapedString::literal("100%$");
        assert_eq!(value.to_string(), "100%25%24");

        let reparsed: EscapedString = value.to_string().parse().unwrap();
        assert_eq!(reparsed, value);
    }

    #[test]
    fn newline_helper_encodes_as_0a() {
        assert_eq!(EscapedString::newline().to_string(), "%0A");
    }
}

mod serde_support {
    use super::*;

    #[test]
    fn serializes_as_encoded_string() {
        let value: EscapedString = "$t%09".parse().unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#""$t%09""#);

        let back: EscapedString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
