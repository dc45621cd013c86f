// SPDX-License-Identifier: Apache-2.0

//! Ordered sequence of JSON values.

use crate::buffer::clp2;
use crate::value::JsonValue;

/// A growable, ordered sequence of [`JsonValue`]s.
///
/// Capacity grows in powers of two with a floor of
/// [`JsonArray::DEFAULT_CAPACITY`] slots and never shrinks. Cloning an array
/// clones its values, which share any underlying containers; deep copies only
/// happen when a shared container is mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArray {
    items: Vec<JsonValue>,
}

impl JsonArray {
    /// Smallest slot capacity ever allocated.
    pub const DEFAULT_CAPACITY: usize = 32;

    /// Creates an empty array with the default capacity.
    pub fn new() -> Self {
        JsonArray {
            items: Vec::with_capacity(Self::DEFAULT_CAPACITY),
        }
    }

    /// Creates an empty array able to hold at least `n` values.
    pub fn with_capacity(n: usize) -> Self {
        JsonArray {
            items: Vec::with_capacity(clp2(n).max(Self::DEFAULT_CAPACITY)),
        }
    }

    /// Ensures capacity for at least `n` values in total.
    pub fn reserve(&mut self, n: usize) {
        if self.items.capacity() < n {
            let size = clp2(n).max(Self::DEFAULT_CAPACITY);
            self.items.reserve_exact(size - self.items.len());
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current slot capacity.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Appends a value at the end.
    pub fn push(&mut self, value: JsonValue) {
        self.reserve(self.items.len() + 1);
        self.items.push(value);
    }

    /// Removes and drops the last value, if any.
    pub fn pop(&mut self) {
        self.items.pop();
    }

    pub fn get(&self, at: usize) -> Option<&JsonValue> {
        self.items.get(at)
    }

    pub fn get_mut(&mut self, at: usize) -> Option<&mut JsonValue> {
        self.items.get_mut(at)
    }

    pub fn first(&self) -> Option<&JsonValue> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&JsonValue> {
        self.items.last()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, JsonValue> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, JsonValue> {
        self.items.iter_mut()
    }

    /// Drops all values. Capacity is retained.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Grows or shrinks to exactly `n` values.
    ///
    /// New slots all hold clones of `value`, so they alias the same underlying
    /// container if `value` is one. Shrinking releases the removed tail.
    pub fn resize(&mut self, n: usize, value: &JsonValue) {
        if n > self.items.len() {
            self.reserve(n);
            while self.items.len() < n {
                self.items.push(value.clone());
            }
        } else {
            self.items.truncate(n);
        }
    }

    /// Merges `src` into `self` element-wise by index.
    ///
    /// Common indices are merged recursively; extra `src` elements are
    /// appended as shared clones. Shared containers inside `self` are cloned
    /// before being written to.
    pub fn merge(&mut self, src: &JsonArray) {
        for (at, item) in src.iter().enumerate() {
            match self.items.get_mut(at) {
                Some(slot) => slot.merge(item),
                None => self.push(item.clone()),
            }
        }
    }
}

impl core::ops::Index<usize> for JsonArray {
    type Output = JsonValue;

    fn index(&self, at: usize) -> &JsonValue {
        &self.items[at]
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a JsonValue;
    type IntoIter = core::slice::Iter<'a, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<JsonValue> for JsonArray {
    fn from_iter<T: IntoIterator<Item = JsonValue>>(iter: T) -> Self {
        let mut arr = JsonArray::new();
        for value in iter {
            arr.push(value);
        }
        arr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_index() {
        let mut arr = JsonArray::new();
        arr.push(JsonValue::from(1));
        arr.push(JsonValue::from(true));
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0], JsonValue::from(1));
        assert_eq!(arr[1], JsonValue::from(true));
    }

    #[test]
    fn capacity_growth() {
        let mut arr = JsonArray::new();
        assert_eq!(arr.capacity(), JsonArray::DEFAULT_CAPACITY);
        for n in 0..40 {
            arr.push(JsonValue::from(n));
        }
        assert_eq!(arr.capacity(), 64);
    }

    #[test]
    fn resize_fills_with_aliases() {
        use std::rc::Rc;

        let shared = JsonValue::from(JsonArray::new());
        let mut arr = JsonArray::new();
        arr.resize(3, &shared);
        assert_eq!(arr.len(), 3);
        let (a, b) = (arr.get(0).unwrap(), arr.get(2).unwrap());
        match (a, b) {
            (JsonValue::Array(x), JsonValue::Array(y)) => assert!(Rc::ptr_eq(x, y)),
            _ => panic!("expected array values"),
        }
        arr.resize(1, &JsonValue::Null);
        assert_eq!(arr.len(), 1);
    }
}
