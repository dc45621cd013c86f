// SPDX-License-Identifier: Apache-2.0

//! Builds a [`JsonValue`] tree from tokenizer events.

use std::rc::Rc;

use crate::array::JsonArray;
use crate::json_string::JsonString;
use crate::object::JsonObject;
use crate::tokenizer::{Error, ErrorKind, Event, EventSink, TokenOptions, Tokenizer};
use crate::value::JsonValue;

enum Container {
    Object(JsonObject),
    Array(JsonArray),
}

struct Frame {
    /// The key this container goes under in its parent, if the parent is an
    /// object.
    key: Option<JsonString>,
    container: Container,
}

/// An [`EventSink`] that materializes the document.
///
/// Containers are built bottom-up: each begin event opens a frame, members
/// accumulate into it, and the end event attaches the finished container to
/// its parent. Keys and strings are stored as emitted, still escaped, so a
/// later dump reproduces the input spans byte for byte. Duplicate object keys
/// keep the last value.
#[derive(Default)]
pub struct Parser {
    frames: Vec<Frame>,
    key: Option<JsonString>,
    root: Option<JsonValue>,
    empty: Rc<JsonString>,
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    /// Parses one document with `tokenizer`.
    pub fn parse(tokenizer: &mut Tokenizer, text: impl AsRef<[u8]>) -> Result<JsonValue, Error> {
        let mut parser = Parser::new();
        tokenizer.parse(text, &mut parser)?;
        parser
            .root
            .ok_or_else(|| Error::new(ErrorKind::State, None, 0))
    }

    fn attach(&mut self, value: JsonValue) {
        match self.frames.last_mut() {
            Some(frame) => match &mut frame.container {
                Container::Object(obj) => {
                    let key = self.key.take().unwrap_or_default();
                    obj.assign(key, value);
                }
                Container::Array(arr) => arr.push(value),
            },
            None => self.root = Some(value),
        }
    }

    fn begin(&mut self, container: Container) {
        self.frames.push(Frame {
            key: self.key.take(),
            container,
        });
    }

    fn end(&mut self) {
        if let Some(frame) = self.frames.pop() {
            let value = match frame.container {
                Container::Object(obj) => JsonValue::from(obj),
                Container::Array(arr) => JsonValue::from(arr),
            };
            self.key = frame.key;
            self.attach(value);
        }
    }
}

impl EventSink for Parser {
    fn event(&mut self, _depth: usize, event: Event<'_>) -> bool {
        match event {
            Event::ObjectBegin => self.begin(Container::Object(JsonObject::new())),
            Event::ArrayBegin => self.begin(Container::Array(JsonArray::new())),
            Event::ObjectEnd | Event::ArrayEnd => self.end(),
            Event::Field(key) => self.key = Some(JsonString::from_bytes(key)),
            Event::Null => self.attach(JsonValue::Null),
            Event::Boolean(b) => self.attach(JsonValue::Boolean(b)),
            Event::Integer(n) => self.attach(JsonValue::Integer(n)),
            Event::Float(f) => self.attach(JsonValue::Float(f)),
            Event::String(s) => {
                let value = if s.is_empty() {
                    // empty strings share one allocation
                    JsonValue::String(Rc::clone(&self.empty))
                } else {
                    JsonValue::String(Rc::new(JsonString::from_bytes(s)))
                };
                self.attach(value);
            }
        }
        true
    }
}

/// Parses one strict-syntax document.
pub fn parse(text: impl AsRef<[u8]>) -> Result<JsonValue, Error> {
    parse_with(TokenOptions::default(), text)
}

/// Parses one document with the given options.
pub fn parse_with(options: TokenOptions, text: impl AsRef<[u8]>) -> Result<JsonValue, Error> {
    let mut tokenizer = Tokenizer::new(options);
    Parser::parse(&mut tokenizer, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_document() {
        let value = parse(r#"{"a": 1, "b": [true, null]}"#).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&JsonValue::from(1)));
        let arr = obj.get("b").unwrap().as_array().unwrap();
        assert_eq!(arr[0], JsonValue::from(true));
        assert_eq!(arr[1], JsonValue::Null);
    }

    #[test]
    fn duplicate_keys_keep_the_last_value() {
        let value = parse(r#"{"k": 1, "k": 2}"#).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("k"), Some(&JsonValue::from(2)));
    }

    #[test]
    fn strings_keep_their_escaped_spans() {
        let text = String::from(r#"{"a\tb": ""#) + "\\u0041" + r#""}"#;
        let value = parse(text).unwrap();
        let obj = value.as_object().unwrap();
        let s = obj.get(&b"a\\tb"[..]).unwrap().as_string().unwrap();
        assert_eq!(s.as_bytes(), b"\\u0041");
        assert_eq!(s.decode().unwrap().as_bytes(), b"A");
    }

    #[test]
    fn empty_string_values_share_storage() {
        let value = parse(r#"["", ""]"#).unwrap();
        let arr = value.as_array().unwrap();
        match (&arr[0], &arr[1]) {
            (JsonValue::String(a), JsonValue::String(b)) => assert!(Rc::ptr_eq(a, b)),
            _ => panic!("expected strings"),
        }
    }

    #[test]
    fn empty_input_is_its_own_error() {
        assert_eq!(parse("").unwrap_err().kind(), ErrorKind::Empty);
    }

    #[test]
    fn deep_nesting_builds_the_right_tree() {
        let value = parse(r#"{"a": {"b": {"c": [1, [2]]}}}"#).unwrap();
        let c = value
            .as_object()
            .and_then(|o| o.get("a"))
            .and_then(|v| v.as_object())
            .and_then(|o| o.get("b"))
            .and_then(|v| v.as_object())
            .and_then(|o| o.get("c"))
            .and_then(|v| v.as_array())
            .unwrap();
        assert_eq!(c[0], JsonValue::from(1));
        assert_eq!(c[1].as_array().unwrap()[0], JsonValue::from(2));
    }

    #[test]
    fn integer_limits() {
        let value = parse("[9223372036854775807, -9223372036854775808]").unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr[0], JsonValue::from(i64::MAX));
        assert_eq!(arr[1], JsonValue::from(i64::MIN));
    }

    #[test]
    fn oversized_integer_becomes_a_float() {
        // The integer range runs to 2^64-1 (wrapping into i64); only past
        // that does the value demote.
        let value = parse("[9223372036854775809, 18446744073709551616]").unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr[0].json_type(), crate::JsonType::Integer);
        assert_eq!(arr[1].json_type(), crate::JsonType::Float);
    }

    #[test]
    fn relaxed_syntax_through_options() {
        let options = TokenOptions::new()
            .comments(true)
            .single_quotes(true)
            .simple_keys(true);
        let value = parse_with(options, "{key: 'v', /* n */ other: 2}").unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("key"), Some(&JsonValue::from("v")));
        assert_eq!(obj.get("other"), Some(&JsonValue::from(2)));
    }
}
