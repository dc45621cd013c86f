// SPDX-License-Identifier: Apache-2.0

//! The JSON value type and its coercions.

use std::rc::Rc;

use crate::array::JsonArray;
use crate::json_string::JsonString;
use crate::object::JsonObject;

/// The type tag of a [`JsonValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

/// A JSON value.
///
/// Strings and containers are held behind [`Rc`], so cloning a value is
/// cheap and the clone shares storage with the original. Mutation goes
/// through [`Rc::make_mut`]: writing to a shared container first detaches a
/// private copy, so no clone ever observes another clone's edits.
#[derive(Debug, Clone)]
pub enum JsonValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(Rc<JsonString>),
    Array(Rc<JsonArray>),
    Object(Rc<JsonObject>),
}

impl Default for JsonValue {
    fn default() -> Self {
        JsonValue::Null
    }
}

impl JsonValue {
    /// The value's type tag.
    pub fn json_type(&self) -> JsonType {
        match self {
            JsonValue::Null => JsonType::Null,
            JsonValue::Boolean(_) => JsonType::Boolean,
            JsonValue::Integer(_) => JsonType::Integer,
            JsonValue::Float(_) => JsonType::Float,
            JsonValue::String(_) => JsonType::String,
            JsonValue::Array(_) => JsonType::Array,
            JsonValue::Object(_) => JsonType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            JsonValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            JsonValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&JsonString> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutable access to an array value, detaching from sharing first.
    pub fn array_mut(&mut self) -> Option<&mut JsonArray> {
        match self {
            JsonValue::Array(a) => Some(Rc::make_mut(a)),
            _ => None,
        }
    }

    /// Mutable access to an object value, detaching from sharing first.
    pub fn object_mut(&mut self) -> Option<&mut JsonObject> {
        match self {
            JsonValue::Object(o) => Some(Rc::make_mut(o)),
            _ => None,
        }
    }

    /// Mutable access to a string value, detaching from sharing first.
    pub fn string_mut(&mut self) -> Option<&mut JsonString> {
        match self {
            JsonValue::String(s) => Some(Rc::make_mut(s)),
            _ => None,
        }
    }

    /// Boolean coercion.
    ///
    /// Null is false; numbers are true when nonzero; strings are true when
    /// nonempty; containers are true when they have members.
    pub fn to_boolean(&self) -> bool {
        match self {
            JsonValue::Null => false,
            JsonValue::Boolean(b) => *b,
            JsonValue::Integer(n) => *n != 0,
            JsonValue::Float(f) => *f != 0.0,
            JsonValue::String(s) => !s.is_empty(),
            JsonValue::Array(a) => !a.is_empty(),
            JsonValue::Object(o) => !o.is_empty(),
        }
    }

    /// Integer coercion.
    ///
    /// Floats truncate toward zero; strings parse a leading integer;
    /// containers and null coerce to 0.
    pub fn to_integer(&self) -> i64 {
        match self {
            JsonValue::Null => 0,
            JsonValue::Boolean(b) => *b as i64,
            JsonValue::Integer(n) => *n,
            JsonValue::Float(f) => *f as i64,
            JsonValue::String(s) => s.to_integer(),
            JsonValue::Array(_) | JsonValue::Object(_) => 0,
        }
    }

    /// Float coercion.
    pub fn to_float(&self) -> f64 {
        match self {
            JsonValue::Null => 0.0,
            JsonValue::Boolean(b) => *b as i64 as f64,
            JsonValue::Integer(n) => *n as f64,
            JsonValue::Float(f) => *f,
            JsonValue::String(s) => s.to_float(),
            JsonValue::Array(_) | JsonValue::Object(_) => 0.0,
        }
    }

    /// Merges `src` into `self`.
    ///
    /// Matching container types merge recursively (objects key-wise, arrays
    /// index-wise). Any other combination replaces `self` with a shared clone
    /// of `src`. Merging a value into itself is a no-op.
    pub fn merge(&mut self, src: &JsonValue) {
        match (self, src) {
            (JsonValue::Object(dst), JsonValue::Object(src)) => {
                if !Rc::ptr_eq(dst, src) {
                    Rc::make_mut(dst).merge(src);
                }
            }
            (JsonValue::Array(dst), JsonValue::Array(src)) => {
                if !Rc::ptr_eq(dst, src) {
                    Rc::make_mut(dst).merge(src);
                }
            }
            (dst, src) => *dst = src.clone(),
        }
    }
}

/// Structural equality.
///
/// Floats compare within [`f64::EPSILON`]; objects compare key-wise ignoring
/// order; arrays compare element-wise in order. Values of different types are
/// never equal, even when numerically close (`1` is not `1.0`).
impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Boolean(a), JsonValue::Boolean(b)) => a == b,
            (JsonValue::Integer(a), JsonValue::Integer(b)) => a == b,
            (JsonValue::Float(a), JsonValue::Float(b)) => (a - b).abs() < f64::EPSILON,
            (JsonValue::String(a), JsonValue::String(b)) => Rc::ptr_eq(a, b) || a == b,
            (JsonValue::Array(a), JsonValue::Array(b)) => Rc::ptr_eq(a, b) || a == b,
            (JsonValue::Object(a), JsonValue::Object(b)) => Rc::ptr_eq(a, b) || a == b,
            _ => false,
        }
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Boolean(b)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Integer(n)
    }
}

impl From<i32> for JsonValue {
    fn from(n: i32) -> Self {
        JsonValue::Integer(n as i64)
    }
}

impl From<f64> for JsonValue {
    fn from(f: f64) -> Self {
        JsonValue::Float(f)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(Rc::new(JsonString::from(s)))
    }
}

impl From<JsonString> for JsonValue {
    fn from(s: JsonString) -> Self {
        JsonValue::String(Rc::new(s))
    }
}

impl From<JsonArray> for JsonValue {
    fn from(a: JsonArray) -> Self {
        JsonValue::Array(Rc::new(a))
    }
}

impl From<JsonObject> for JsonValue {
    fn from(o: JsonObject) -> Self {
        JsonValue::Object(Rc::new(o))
    }
}
