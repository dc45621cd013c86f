// SPDX-License-Identifier: Apache-2.0

//! Insertion-ordered string-to-value map.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::rc::Rc;

use crate::json_string::JsonString;
use crate::value::JsonValue;

/// One member of a [`JsonObject`].
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    key: Rc<JsonString>,
    value: JsonValue,
}

impl Pair {
    pub fn key(&self) -> &JsonString {
        &self.key
    }

    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut JsonValue {
        &mut self.value
    }
}

/// Hash-index key: shares the pair's key allocation and hashes by content.
#[derive(Debug, Clone)]
struct IndexKey(Rc<JsonString>);

impl Borrow<[u8]> for IndexKey {
    fn borrow(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl PartialEq for IndexKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes() == other.0.as_bytes()
    }
}

impl Eq for IndexKey {}

impl core::hash::Hash for IndexKey {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.0.as_bytes().hash(state);
    }
}

/// A string-keyed map that remembers insertion order.
///
/// Members live in a vector in the order they were first inserted; a hash
/// index maps key bytes to the member's slot for constant-time lookup.
/// Iteration and serialization follow insertion order.
#[derive(Debug, Clone, Default)]
pub struct JsonObject {
    pairs: Vec<Pair>,
    index: HashMap<IndexKey, usize, ahash::RandomState>,
}

impl JsonObject {
    /// Creates an empty object.
    pub fn new() -> Self {
        JsonObject::default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// The value under `key`, if present.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&JsonValue> {
        let at = *self.index.get(key.as_ref())?;
        Some(&self.pairs[at].value)
    }

    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut JsonValue> {
        let at = *self.index.get(key.as_ref())?;
        Some(&mut self.pairs[at].value)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.index.contains_key(key.as_ref())
    }

    /// The whole member under `key`, if present.
    pub fn find(&self, key: impl AsRef<[u8]>) -> Option<&Pair> {
        let at = *self.index.get(key.as_ref())?;
        Some(&self.pairs[at])
    }

    /// Inserts `key` with `value` only if `key` is absent.
    ///
    /// Returns `false` without touching the object when the key already
    /// exists.
    pub fn insert(&mut self, key: impl Into<JsonString>, value: JsonValue) -> bool {
        let key = key.into();
        if self.index.contains_key(key.as_bytes()) {
            return false;
        }
        self.push_pair(Rc::new(key), value);
        true
    }

    /// Inserts `key` with `value`, overwriting any existing member.
    ///
    /// An overwritten member keeps its position in insertion order.
    pub fn assign(&mut self, key: impl Into<JsonString>, value: JsonValue) {
        let key = key.into();
        match self.index.get(key.as_bytes()) {
            Some(&at) => self.pairs[at].value = value,
            None => {
                self.push_pair(Rc::new(key), value);
            }
        }
    }

    /// The value under `key`, inserting a null member first when absent.
    pub fn touch(&mut self, key: impl Into<JsonString>) -> &mut JsonValue {
        let key = key.into();
        let at = match self.index.get(key.as_bytes()) {
            Some(&at) => at,
            None => self.push_pair(Rc::new(key), JsonValue::Null),
        };
        &mut self.pairs[at].value
    }

    fn push_pair(&mut self, key: Rc<JsonString>, value: JsonValue) -> usize {
        let at = self.pairs.len();
        self.index.insert(IndexKey(Rc::clone(&key)), at);
        self.pairs.push(Pair { key, value });
        at
    }

    /// Removes the member under `key`. Returns whether one existed.
    ///
    /// Later members shift down one slot, so removal is linear in the number
    /// of members after `key`.
    pub fn erase(&mut self, key: impl AsRef<[u8]>) -> bool {
        let Some(at) = self.index.remove(key.as_ref()) else {
            return false;
        };
        self.pairs.remove(at);
        for pair in &self.pairs[at..] {
            if let Some(slot) = self.index.get_mut(pair.key.as_bytes()) {
                *slot -= 1;
            }
        }
        true
    }

    /// Drops all members.
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.index.clear();
    }

    /// Merges `src` into `self` key-wise.
    ///
    /// Keys present in both are merged recursively; keys only in `src` are
    /// appended as shared clones. Shared containers inside `self` are cloned
    /// before being written to.
    pub fn merge(&mut self, src: &JsonObject) {
        for pair in src.iter() {
            match self.index.get(pair.key.as_bytes()) {
                Some(&at) => self.pairs[at].value.merge(&pair.value),
                None => {
                    self.push_pair(Rc::clone(&pair.key), pair.value.clone());
                }
            }
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Pair> {
        self.pairs.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Pair> {
        self.pairs.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &JsonString> {
        self.pairs.iter().map(Pair::key)
    }

    pub fn values(&self) -> impl Iterator<Item = &JsonValue> {
        self.pairs.iter().map(Pair::value)
    }
}

/// Key-wise equality, ignoring insertion order.
impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.pairs
            .iter()
            .all(|pair| other.get(pair.key.as_bytes()) == Some(&pair.value))
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = &'a Pair;
    type IntoIter = core::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_rejects_duplicates() {
        let mut obj = JsonObject::new();
        assert!(obj.insert("a", JsonValue::from(1)));
        assert!(!obj.insert("a", JsonValue::from(2)));
        assert_eq!(obj.get("a"), Some(&JsonValue::from(1)));
    }

    #[test]
    fn assign_overwrites_in_place() {
        let mut obj = JsonObject::new();
        obj.assign("a", JsonValue::from(1));
        obj.assign("b", JsonValue::from(2));
        obj.assign("a", JsonValue::from(3));
        assert_eq!(obj.len(), 2);
        let keys: Vec<_> = obj.keys().map(|k| k.as_bytes().to_vec()).collect();
        assert_eq!(keys, [b"a".to_vec(), b"b".to_vec()]);
        assert_eq!(obj.get("a"), Some(&JsonValue::from(3)));
    }

    #[test]
    fn find_exposes_the_whole_member() {
        let mut obj = JsonObject::new();
        obj.assign("a", JsonValue::from(1));
        let pair = obj.find("a").unwrap();
        assert_eq!(pair.key().as_bytes(), b"a");
        assert_eq!(pair.value(), &JsonValue::from(1));
        assert!(obj.find("b").is_none());
    }

    #[test]
    fn touch_creates_null_member() {
        let mut obj = JsonObject::new();
        assert_eq!(*obj.touch("x"), JsonValue::Null);
        *obj.touch("x") = JsonValue::from(7);
        assert_eq!(obj.get("x"), Some(&JsonValue::from(7)));
        assert_eq!(obj.len(), 1);
    }

    #[test]
    fn erase_keeps_lookup_consistent() {
        let mut obj = JsonObject::new();
        obj.assign("a", JsonValue::from(1));
        obj.assign("b", JsonValue::from(2));
        obj.assign("c", JsonValue::from(3));
        assert!(obj.erase("b"));
        assert!(!obj.erase("b"));
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get("a"), Some(&JsonValue::from(1)));
        assert_eq!(obj.get("c"), Some(&JsonValue::from(3)));
        let keys: Vec<_> = obj.keys().map(|k| k.as_bytes().to_vec()).collect();
        assert_eq!(keys, [b"a".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn equality_ignores_order() {
        let mut a = JsonObject::new();
        a.assign("x", JsonValue::from(1));
        a.assign("y", JsonValue::from(2));
        let mut b = JsonObject::new();
        b.assign("y", JsonValue::from(2));
        b.assign("x", JsonValue::from(1));
        assert_eq!(a, b);
        b.assign("x", JsonValue::from(9));
        assert_ne!(a, b);
    }
}
