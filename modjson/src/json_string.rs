// SPDX-License-Identifier: Apache-2.0

//! Byte-string value type.

use crate::buffer::StringBuffer;
use crate::escape::{self, DecodeError};

/// An owned byte string backed by a [`StringBuffer`].
///
/// Content is arbitrary bytes. Text that came out of the tokenizer is still in
/// its escaped, as-written form; [`JsonString::decode`] interprets the escapes
/// and [`JsonString::encode`] re-applies them. Decoded text is not guaranteed
/// to be valid UTF-8 (a lone `\uD800`-range escape produces an invalid
/// sequence), so the accessors are byte-oriented.
#[derive(Debug, Clone, Default)]
pub struct JsonString {
    buf: StringBuffer,
}

impl JsonString {
    /// Creates an empty string with the default backing capacity.
    pub fn new() -> Self {
        JsonString {
            buf: StringBuffer::with_capacity(0),
        }
    }

    /// Creates a string holding a copy of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = StringBuffer::with_capacity(bytes.len() + 1);
        buf.append(bytes);
        JsonString { buf }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_slice()
    }

    /// The content as UTF-8 text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Backing capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Ensures room for a content length of at least `n` bytes.
    pub fn reserve(&mut self, n: usize) {
        self.buf.reserve(n + 1);
    }

    /// Drops the content, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Appends raw bytes.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.append(bytes);
    }

    /// Appends another string's content.
    pub fn add(&mut self, other: &JsonString) {
        self.append(other.as_bytes());
    }

    /// Ordinal comparison: by length first, then bytewise.
    pub fn compare(&self, other: &JsonString) -> core::cmp::Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.as_bytes().cmp(other.as_bytes()))
    }

    /// Escapes the content into JSON string-literal form.
    pub fn encode(&self) -> JsonString {
        let mut dst = JsonString::from_capacity(self.len() + 1);
        escape::flatten(self.as_bytes(), &mut dst);
        dst
    }

    /// Interprets escape sequences, producing the raw text.
    pub fn decode(&self) -> Result<JsonString, DecodeError> {
        let raw = escape::unflatten(self.as_bytes())?;
        Ok(JsonString::from_bytes(&raw))
    }

    fn from_capacity(n: usize) -> JsonString {
        JsonString {
            buf: StringBuffer::with_capacity(n),
        }
    }

    /// Numeric coercion: parses a leading integer, `0` when absent.
    ///
    /// Accepts an optional sign and a `0x` hex prefix after ASCII whitespace,
    /// then consumes digits until the first non-digit. Out-of-range values
    /// wrap, matching unsigned accumulation followed by a signed cast.
    pub fn to_integer(&self) -> i64 {
        let s = self.as_bytes();
        let mut at = 0;
        while at < s.len() && s[at].is_ascii_whitespace() {
            at += 1;
        }
        let minus = match s.get(at) {
            Some(b'-') => {
                at += 1;
                true
            }
            Some(b'+') => {
                at += 1;
                false
            }
            _ => false,
        };
        let mut num = 0u64;
        if s[at..].starts_with(b"0x") || s[at..].starts_with(b"0X") {
            at += 2;
            while let Some(dig) = s.get(at).copied().and_then(escape::char2hex) {
                num = num.wrapping_mul(16).wrapping_add(dig as u64);
                at += 1;
            }
        } else {
            while let Some(c @ b'0'..=b'9') = s.get(at) {
                num = num.wrapping_mul(10).wrapping_add((c - b'0') as u64);
                at += 1;
            }
        }
        let num = num as i64;
        if minus {
            num.wrapping_neg()
        } else {
            num
        }
    }

    /// Numeric coercion: parses a leading float, `0.0` when absent.
    pub fn to_float(&self) -> f64 {
        let s = self.as_bytes();
        let mut at = 0;
        while at < s.len() && s[at].is_ascii_whitespace() {
            at += 1;
        }
        let start = at;
        if matches!(s.get(at), Some(b'+' | b'-')) {
            at += 1;
        }
        while matches!(s.get(at), Some(b'0'..=b'9')) {
            at += 1;
        }
        if matches!(s.get(at), Some(b'.')) {
            at += 1;
            while matches!(s.get(at), Some(b'0'..=b'9')) {
                at += 1;
            }
        }
        if matches!(s.get(at), Some(b'e' | b'E')) {
            let mark = at;
            at += 1;
            if matches!(s.get(at), Some(b'+' | b'-')) {
                at += 1;
            }
            if matches!(s.get(at), Some(b'0'..=b'9')) {
                while matches!(s.get(at), Some(b'0'..=b'9')) {
                    at += 1;
                }
            } else {
                at = mark;
            }
        }
        core::str::from_utf8(&s[start..at])
            .ok()
            .and_then(|text| text.parse().ok())
            .unwrap_or(0.0)
    }
}

impl PartialEq for JsonString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for JsonString {}

impl core::hash::Hash for JsonString {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl From<&str> for JsonString {
    fn from(s: &str) -> Self {
        JsonString::from_bytes(s.as_bytes())
    }
}

impl From<&[u8]> for JsonString {
    fn from(bytes: &[u8]) -> Self {
        JsonString::from_bytes(bytes)
    }
}

impl From<String> for JsonString {
    fn from(s: String) -> Self {
        JsonString::from_bytes(s.as_bytes())
    }
}

impl core::fmt::Display for JsonString {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}
