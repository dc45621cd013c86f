// SPDX-License-Identifier: Apache-2.0

//! Compact serializer.

use crate::json_string::JsonString;
use crate::value::JsonValue;

/// Serializes `value` into compact JSON text.
///
/// No whitespace is emitted. String content is written back verbatim, so a
/// value built by the parser reproduces its input spans byte for byte. Object
/// members come out in insertion order. Floats print with six significant
/// digits in the shortest of fixed or scientific notation.
pub fn dump(value: &JsonValue) -> JsonString {
    let mut out = JsonString::new();
    dump_value(value, &mut out);
    out
}

fn dump_value(value: &JsonValue, out: &mut JsonString) {
    match value {
        JsonValue::Null => out.append(b"null"),
        JsonValue::Boolean(true) => out.append(b"true"),
        JsonValue::Boolean(false) => out.append(b"false"),
        JsonValue::Integer(n) => {
            let mut buf = itoa::Buffer::new();
            out.append(buf.format(*n).as_bytes());
        }
        JsonValue::Float(f) => format_float(*f, out),
        JsonValue::String(s) => {
            out.push(b'"');
            out.append(s.as_bytes());
            out.push(b'"');
        }
        JsonValue::Array(arr) => {
            out.push(b'[');
            for (at, item) in arr.iter().enumerate() {
                if at > 0 {
                    out.push(b',');
                }
                dump_value(item, out);
            }
            out.push(b']');
        }
        JsonValue::Object(obj) => {
            out.push(b'{');
            for (at, pair) in obj.iter().enumerate() {
                if at > 0 {
                    out.push(b',');
                }
                out.push(b'"');
                out.append(pair.key().as_bytes());
                out.append(b"\":");
                dump_value(pair.value(), out);
            }
            out.push(b'}');
        }
    }
}

/// Six significant digits; scientific notation outside `[1e-4, 1e6)` with a
/// sign and at least two exponent digits; trailing zeros dropped.
fn format_float(f: f64, out: &mut JsonString) {
    if f.is_nan() {
        out.append(b"nan");
        return;
    }
    if f.is_infinite() {
        out.append(if f < 0.0 { b"-inf" as &[u8] } else { b"inf" });
        return;
    }
    if f == 0.0 {
        if f.is_sign_negative() {
            out.push(b'-');
        }
        out.push(b'0');
        return;
    }

    // Round to six significant digits first; the rounded exponent picks the
    // notation.
    let sci = format!("{:.5e}", f);
    let Some((mantissa, exp_str)) = sci.split_once('e') else {
        out.append(sci.as_bytes());
        return;
    };
    let exp: i32 = exp_str.parse().unwrap_or(0);

    if exp < -4 || exp >= 6 {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        out.append(mantissa.as_bytes());
        out.push(b'e');
        out.push(if exp < 0 { b'-' } else { b'+' });
        let e = exp.unsigned_abs();
        if e < 10 {
            out.push(b'0');
        }
        let mut buf = itoa::Buffer::new();
        out.append(buf.format(e).as_bytes());
    } else {
        let fixed = format!("{:.*}", (5 - exp) as usize, f);
        let fixed = if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.')
        } else {
            fixed.as_str()
        };
        out.append(fixed.as_bytes());
    }
}
