// SPDX-License-Identifier: Apache-2.0

//! Growable byte buffer with power-of-two capacity growth.

/// A growable byte buffer whose capacity is always a power of two.
///
/// Capacity never shrinks, and never drops below [`StringBuffer::DEFAULT_CAPACITY`]
/// once storage has been allocated. This is the backing store for
/// [`JsonString`](crate::JsonString) and the serializer.
#[derive(Debug, Clone, Default)]
pub struct StringBuffer {
    buf: Vec<u8>,
}

/// Round `n` up to the next power of two.
#[inline]
pub(crate) fn clp2(n: usize) -> usize {
    n.next_power_of_two()
}

impl StringBuffer {
    /// Smallest capacity ever allocated.
    pub const DEFAULT_CAPACITY: usize = 32;

    /// Creates an empty buffer without allocating.
    pub fn new() -> Self {
        StringBuffer { buf: Vec::new() }
    }

    /// Creates an empty buffer able to hold at least `n` bytes.
    pub fn with_capacity(n: usize) -> Self {
        let mut buf = StringBuffer::new();
        buf.grow(n);
        buf
    }

    /// Ensures capacity for at least `n` bytes in total.
    ///
    /// Grows to the next power of two at or above `n`, never below
    /// `DEFAULT_CAPACITY`. A buffer that is already large enough is untouched.
    pub fn reserve(&mut self, n: usize) {
        if self.buf.capacity() < n {
            self.grow(n);
        }
    }

    fn grow(&mut self, n: usize) {
        let size = clp2(n).max(Self::DEFAULT_CAPACITY);
        if size > self.buf.capacity() {
            self.buf.reserve_exact(size - self.buf.len());
        }
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) {
        self.reserve(self.buf.len() + 1);
        self.buf.push(byte);
    }

    /// Appends a run of bytes.
    pub fn append(&mut self, bytes: &[u8]) {
        if !bytes.is_empty() {
            self.reserve(self.buf.len() + bytes.len());
            self.buf.extend_from_slice(bytes);
        }
    }

    /// Drops the content, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the buffer, yielding the bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

impl From<&[u8]> for StringBuffer {
    fn from(bytes: &[u8]) -> Self {
        let mut buf = StringBuffer::with_capacity(bytes.len() + 1);
        buf.append(bytes);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_up() {
        assert_eq!(clp2(1), 1);
        assert_eq!(clp2(31), 32);
        assert_eq!(clp2(32), 32);
        assert_eq!(clp2(33), 64);
        assert_eq!(clp2(1000), 1024);
    }

    #[test]
    fn growth_is_power_of_two() {
        let mut buf = StringBuffer::new();
        assert_eq!(buf.capacity(), 0);
        buf.push(b'x');
        assert_eq!(buf.capacity(), StringBuffer::DEFAULT_CAPACITY);
        buf.append(&[0u8; 100]);
        assert_eq!(buf.capacity(), 128);
        assert_eq!(buf.len(), 101);
    }

    #[test]
    fn reserve_never_shrinks() {
        let mut buf = StringBuffer::with_capacity(100);
        assert_eq!(buf.capacity(), 128);
        buf.reserve(10);
        assert_eq!(buf.capacity(), 128);
    }

    #[test]
    fn clear_keeps_allocation() {
        let mut buf = StringBuffer::from(&b"hello"[..]);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), StringBuffer::DEFAULT_CAPACITY);
    }
}
