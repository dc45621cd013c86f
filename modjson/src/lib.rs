// SPDX-License-Identifier: Apache-2.0

//! A reference-counted JSON value model with an event-driven, depth-bounded
//! tokenizer and an exact round-trip serializer.
//!
//! The crate has three layers:
//!
//! - [`Tokenizer`] walks input bytes through a state machine and reports
//!   every construct to an [`EventSink`], without building a document. Depth
//!   is bounded up front, with separate object and array ceilings, and
//!   [`TokenOptions`] opts into relaxed syntax: comments, single quotes,
//!   unquoted keys, raw string scans.
//! - [`JsonValue`] is the document model: a tagged union whose strings and
//!   containers sit behind `Rc`, so clones share storage and mutation detaches
//!   a private copy first. [`parse`] drives the tokenizer into a tree.
//! - [`dump`] serializes a tree back to compact text. String spans pass
//!   through the whole pipeline still escaped, so parse-then-dump reproduces
//!   them byte for byte; [`JsonString::decode`] interprets the escapes when
//!   the raw text is needed.
//!
//! ```
//! use modjson::{dump, parse, JsonValue};
//!
//! let value = parse(r#"{"a":1,"b":[true,null]}"#)?;
//! assert_eq!(value.as_object().unwrap().get("a"), Some(&JsonValue::from(1)));
//! assert_eq!(dump(&value).as_bytes(), br#"{"a":1,"b":[true,null]}"#);
//! # Ok::<(), modjson::Error>(())
//! ```

mod array;
mod buffer;
mod dumper;
mod escape;
mod json_string;
mod number;
mod object;
mod parser;
mod tokenizer;
mod value;

pub use array::JsonArray;
pub use buffer::StringBuffer;
pub use dumper::dump;
pub use escape::DecodeError;
pub use json_string::JsonString;
pub use object::{JsonObject, Pair};
pub use parser::{parse, parse_with, Parser};
pub use tokenizer::{
    Error, ErrorKind, Event, EventSink, TokenOptions, Tokenizer, DEFAULT_DEPTH,
};
pub use value::{JsonType, JsonValue};
