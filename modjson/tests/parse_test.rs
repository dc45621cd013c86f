// SPDX-License-Identifier: Apache-2.0

//! End-to-end parsing: documents in, trees and errors out.

use modjson::{dump, parse, parse_with, ErrorKind, JsonType, JsonValue, TokenOptions};

#[test_log::test]
fn mixed_document() {
    let value = parse(r#"{"a":1,"b":[true,false,null],"c":"text","d":-2.5}"#).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 4);
    assert_eq!(obj.get("a"), Some(&JsonValue::from(1)));
    let b = obj.get("b").unwrap().as_array().unwrap();
    assert_eq!(b.len(), 3);
    assert_eq!(b[0], JsonValue::from(true));
    assert_eq!(b[2], JsonValue::Null);
    assert_eq!(
        obj.get("c").unwrap().as_string().unwrap().as_bytes(),
        b"text"
    );
    assert_eq!(obj.get("d"), Some(&JsonValue::from(-2.5)));
}

#[test]
fn array_root() {
    let value = parse("[1, [2, [3]], {}]").unwrap();
    let arr = value.as_array().unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[1].as_array().unwrap()[1].as_array().unwrap()[0], JsonValue::from(3));
    assert!(arr[2].as_object().unwrap().is_empty());
}

#[test]
fn empty_input_reports_empty() {
    assert_eq!(parse("").unwrap_err().kind(), ErrorKind::Empty);
    assert_eq!(parse(" \t\r\n").unwrap_err().kind(), ErrorKind::Empty);
}

#[test]
fn scalar_roots_are_rejected() {
    for text in ["1", "\"s\"", "true", "null"] {
        assert_eq!(parse(text).unwrap_err().kind(), ErrorKind::Start, "{text}");
    }
}

#[test]
fn unquoted_key_is_a_quote_error_by_default() {
    let err = parse("{a:1}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Quote);
    assert_eq!(err.byte(), Some(b'a'));
    assert_eq!(err.position(), 1);
}

#[test]
fn relaxed_options_accept_config_style_input() {
    let options = TokenOptions::new()
        .comments(true)
        .single_quotes(true)
        .simple_keys(true);
    let text = "
        { // settings
          host: 'example.com',
          port: 8080, /* tcp */
          retry: true
        }";
    let value = parse_with(options, text).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("host"), Some(&JsonValue::from("example.com")));
    assert_eq!(obj.get("port"), Some(&JsonValue::from(8080)));
    assert_eq!(obj.get("retry"), Some(&JsonValue::from(true)));
}

#[test]
fn duplicate_keys_last_write_wins() {
    let value = parse(r#"{"k":1,"k":{"x":2},"k":3}"#).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert_eq!(obj.get("k"), Some(&JsonValue::from(3)));
}

#[test]
fn integer_boundaries() {
    let value = parse("[9223372036854775807,-9223372036854775808,18446744073709551616]").unwrap();
    let arr = value.as_array().unwrap();
    assert_eq!(arr[0], JsonValue::from(i64::MAX));
    assert_eq!(arr[1], JsonValue::from(i64::MIN));
    assert_eq!(arr[2].json_type(), JsonType::Float);
}

#[test]
fn malformed_numbers_are_value_errors() {
    for text in ["[01.]", "[1.e5]", "[-]", "[1e]", "[1e+309]"] {
        let err = parse(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value, "{text}");
    }
}

#[test]
fn truncation_points() {
    for text in ["{", "[", r#"{"a""#, r#"{"a":"#, "[1,", r#"{"a":1,"#, "[[1]"] {
        assert_eq!(parse(text).unwrap_err().kind(), ErrorKind::Trunc, "{text}");
    }
}

#[test]
fn depth_ceiling_is_configurable() {
    let options = TokenOptions::new().array_depth(2);
    assert!(parse_with(options, "[[1]]").is_ok());
    let err = parse_with(options, "[[[1]]]").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Depth);
}

#[test]
fn error_positions_point_at_the_offending_byte() {
    let err = parse(r#"{"a": @}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
    assert_eq!(err.byte(), Some(b'@'));
    assert_eq!(err.position(), 6);
}

#[test]
fn parse_then_dump_reproduces_escaped_strings() {
    let text = r#"{"tab\there":"aéb"}"#;
    let value = parse(text).unwrap();
    assert_eq!(dump(&value).as_bytes(), text.as_bytes());
}
