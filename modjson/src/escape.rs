// SPDX-License-Identifier: Apache-2.0

//! Escape and unescape machinery for JSON string literals.
//!
//! `flatten` turns raw text into JSON string-literal form; `unflatten` is the
//! inverse. Both operate on bytes. `\uXXXX` escapes are decoded one code unit
//! at a time with no UTF-16 surrogate pairing: code points above U+FFFF cannot
//! be produced, and a lone surrogate escape yields the corresponding (invalid
//! UTF-8) three-byte sequence. That behavior is intentional and covered by
//! tests.

use crate::json_string::JsonString;

/// Escaped spellings for the 32 control characters.
static FLAT_TABLE: [&[u8]; 32] = [
    b"\\u0000", b"\\u0001", b"\\u0002", b"\\u0003", //
    b"\\u0004", b"\\u0005", b"\\u0006", b"\\u0007", //
    b"\\b", b"\\t", b"\\n", b"\\u000b", //
    b"\\f", b"\\r", b"\\u000e", b"\\u000f", //
    b"\\u0010", b"\\u0011", b"\\u0012", b"\\u0013", //
    b"\\u0014", b"\\u0015", b"\\u0016", b"\\u0017", //
    b"\\u0018", b"\\u0019", b"\\u001a", b"\\u001b", //
    b"\\u001c", b"\\u001d", b"\\u001e", b"\\u001f",
];

/// An error from [`unflatten`], i.e. from [`JsonString::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A backslash was followed by a character with no escape meaning.
    InvalidEscape(u8),
    /// A `\uXXXX` escape contained a non-hex digit.
    InvalidHexDigit(u8),
    /// Input ended in the middle of an escape sequence.
    Truncated,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecodeError::InvalidEscape(c) => {
                write!(f, "invalid escape character {:?}", *c as char)
            }
            DecodeError::InvalidHexDigit(c) => {
                write!(f, "invalid hex digit {:?} in unicode escape", *c as char)
            }
            DecodeError::Truncated => write!(f, "input ended inside an escape sequence"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Numeric value of an ASCII hex digit.
#[inline]
pub(crate) fn char2hex(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Writes one UTF-16 code unit (split into high/low bytes) as UTF-8.
///
/// Surrogate-unaware: the unit is mapped directly to a 1..=3 byte sequence.
pub(crate) fn unit_to_utf8(high: u8, low: u8, out: &mut Vec<u8>) {
    if high >= 0x8 {
        // 0800 - FFFF | 1110xxxx 10xxxxxx 10xxxxxx
        out.push(0xE0 | (high >> 4));
        out.push(0x80 | ((high & 0xF) << 2) | (low >> 6));
        out.push(0x80 | (low & 0x3F));
    } else if high > 0 || low >= 0x80 {
        // 0080 - 07FF | 110xxxxx 10xxxxxx
        out.push(0xC0 | (high << 2) | (low >> 6));
        out.push(0x80 | (low & 0x3F));
    } else {
        // 0000 - 007F | 0xxxxxxx
        out.push(low);
    }
}

/// Escapes `src` into `dst`: control characters through the flat table,
/// `"` and `\` with a backslash, everything else copied verbatim in runs.
pub(crate) fn flatten(src: &[u8], dst: &mut JsonString) {
    let mut run = 0;
    for (at, &c) in src.iter().enumerate() {
        if c <= 0x1f {
            dst.append(&src[run..at]);
            dst.append(FLAT_TABLE[c as usize]);
            run = at + 1;
        } else if c == b'"' || c == b'\\' {
            dst.append(&src[run..at]);
            dst.push(b'\\');
            run = at;
        }
    }
    dst.append(&src[run..]);
}

enum Unflat {
    Normal,
    RevSlash,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
}

/// Interprets escape sequences in `src`, producing the raw text.
///
/// The inverse of [`flatten`]. Fails on a malformed escape, a bad or missing
/// hex digit, or input that ends mid-sequence.
pub(crate) fn unflatten(src: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(src.len());
    let mut state = Unflat::Normal;
    let mut high = 0u8;
    let mut low = 0u8;

    for &c in src {
        match state {
            Unflat::Normal => {
                if c != b'\\' {
                    out.push(c);
                } else {
                    state = Unflat::RevSlash;
                }
            }
            Unflat::RevSlash => {
                state = Unflat::Normal;
                match c {
                    b'"' => out.push(b'"'),
                    b'/' => out.push(b'/'),
                    b'b' => out.push(0x08),
                    b'f' => out.push(0x0C),
                    b'\\' => out.push(b'\\'),
                    b'n' => out.push(b'\n'),
                    b'r' => out.push(b'\r'),
                    b't' => out.push(b'\t'),
                    b'u' => state = Unflat::Digit1,
                    _ => return Err(DecodeError::InvalidEscape(c)),
                }
            }
            Unflat::Digit1 => {
                high = char2hex(c).ok_or(DecodeError::InvalidHexDigit(c))? << 4;
                state = Unflat::Digit2;
            }
            Unflat::Digit2 => {
                high |= char2hex(c).ok_or(DecodeError::InvalidHexDigit(c))?;
                state = Unflat::Digit3;
            }
            Unflat::Digit3 => {
                low = char2hex(c).ok_or(DecodeError::InvalidHexDigit(c))? << 4;
                state = Unflat::Digit4;
            }
            Unflat::Digit4 => {
                low |= char2hex(c).ok_or(DecodeError::InvalidHexDigit(c))?;
                unit_to_utf8(high, low, &mut out);
                state = Unflat::Normal;
            }
        }
    }

    match state {
        Unflat::Normal => Ok(out),
        _ => Err(DecodeError::Truncated),
    }
}
