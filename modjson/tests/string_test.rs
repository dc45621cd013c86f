// SPDX-License-Identifier: Apache-2.0

//! String escape behavior: encode, decode, and the pipeline around them.

use modjson::{parse, DecodeError, JsonString};

#[test]
fn encode_escapes_controls_and_quotes() {
    let s = JsonString::from("a\"b\\c\nd\te\x01f");
    assert_eq!(s.encode().as_bytes(), br#"a\"b\\c\nd\te\u0001f"#);
}

#[test]
fn decode_handles_every_simple_escape() {
    let s = JsonString::from_bytes(br#"\"\/\b\f\n\r\t\\"#);
    assert_eq!(s.decode().unwrap().as_bytes(), b"\"/\x08\x0c\n\r\t\\");
}

#[test]
fn decode_unicode_escapes_to_utf8() {
    let cases: [(&str, &[u8]); 4] = [
        ("\\u0041", b"A"),
        ("\\u00e9", "é".as_bytes()),
        ("\\u20ac", "€".as_bytes()),
        ("\\u0000", b"\x00"),
    ];
    for (escaped, raw) in cases {
        let s = JsonString::from(escaped);
        assert_eq!(s.decode().unwrap().as_bytes(), raw, "{escaped}");
    }
}

/// Escapes in the surrogate range decode unit by unit, with no pairing, so a
/// supplementary-plane escape pair comes out as six bytes of invalid UTF-8
/// rather than one code point.
#[test]
fn surrogate_escapes_are_not_paired() {
    let s = JsonString::from("\\ud83d\\ude00");
    let decoded = s.decode().unwrap();
    assert_eq!(decoded.len(), 6);
    assert!(decoded.as_str().is_none());
}

#[test]
fn decode_rejects_malformed_escapes() {
    assert_eq!(
        JsonString::from("\\q").decode().unwrap_err(),
        DecodeError::InvalidEscape(b'q')
    );
    assert_eq!(
        JsonString::from("\\u12z4").decode().unwrap_err(),
        DecodeError::InvalidHexDigit(b'z')
    );
    assert_eq!(
        JsonString::from("end\\").decode().unwrap_err(),
        DecodeError::Truncated
    );
    assert_eq!(
        JsonString::from("\\u00").decode().unwrap_err(),
        DecodeError::Truncated
    );
}

#[test]
fn encode_then_decode_is_identity() {
    let original = JsonString::from("mixed:\ttabs, \"quotes\", backslash \\ and é");
    assert_eq!(original.encode().decode().unwrap(), original);
}

/// The tokenizer validates escapes but does not interpret them; decode is a
/// separate, explicit step on the stored span.
#[test]
fn parsed_strings_decode_on_demand() {
    let text = String::from(r#"["tab\there "#) + "\\u0021\"]";
    let value = parse(text).unwrap();
    let arr = value.as_array().unwrap();
    let span = arr[0].as_string().unwrap();
    assert_eq!(span.as_bytes(), b"tab\\there \\u0021");
    assert_eq!(span.decode().unwrap().as_bytes(), b"tab\there !");
}

#[test]
fn byte_strings_are_not_forced_to_utf8() {
    let s = JsonString::from_bytes(&[0xff, 0xfe]);
    assert_eq!(s.len(), 2);
    assert!(s.as_str().is_none());
    assert_eq!(s.to_string(), "\u{fffd}\u{fffd}");
}
