//! MSB-first bit stream.
//!
//! Bits are appended most-significant first and read back in the same order,
//! so bit offset 0 is the top bit of the first byte. Both the table header and
//! the coded payload rely on this layout being byte-addressable.

use huffer_core::{Error, Result};

use crate::buffer::ByteBuffer;

/// Widest field accepted by [`BitStream::append_bits`] and [`BitStream::read_bits`].
pub const MAX_FIELD_BITS: u32 = 32;

/// Appendable, randomly readable sequence of bits.
///
/// Completed bytes live in a [`ByteBuffer`]; the in-progress byte holds
/// 0-7 pending bits right-aligned until it fills and is flushed.
#[derive(Debug, Clone, Default)]
pub struct BitStream {
    bytes: ByteBuffer,
    pending: u8,
    pending_bits: u32,
}

impl BitStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `width` bits of `value`, most significant first.
    #[inline]
    pub fn append_bits(&mut self, value: u32, width: u32) {
        debug_assert!(
            (1..=MAX_FIELD_BITS).contains(&width),
            "field width {} outside 1..=32",
            width
        );
        for shift in (0..width).rev() {
            self.append_bit(((value >> shift) & 1) as u8);
        }
    }

    /// Append bits in written order from a string of `'0'` and `'1'`.
    ///
    /// Any character other than `'1'` is taken as a zero bit.
    pub fn append_bit_str(&mut self, bits: &str) {
        for c in bits.bytes() {
            self.append_bit(u8::from(c == b'1'));
        }
    }

    /// Append a single bit. Only the lowest bit of `bit` is used.
    #[inline]
    pub fn append_bit(&mut self, bit: u8) {
        self.pending = (self.pending << 1) | (bit & 1);
        self.pending_bits += 1;

        if self.pending_bits == 8 {
            self.bytes.push(self.pending);
            self.pending = 0;
            self.pending_bits = 0;
        }
    }

    /// Read `width` bits starting at absolute bit `offset`, right-aligned.
    pub fn read_bits(&self, offset: usize, width: u32) -> Result<u32> {
        debug_assert!(
            (1..=MAX_FIELD_BITS).contains(&width),
            "field width {} outside 1..=32",
            width
        );
        let mut value = 0u32;
        for i in 0..width as usize {
            value = (value << 1) | self.read_bit(offset + i)? as u32;
        }
        Ok(value)
    }

    /// Read the bit at absolute index `index`.
    #[inline]
    pub fn read_bit(&self, index: usize) -> Result<u8> {
        let byte_index = index / 8;
        let bit_index = (index % 8) as u32;

        if byte_index < self.bytes.len() {
            let byte = self.bytes.get(byte_index)?;
            return Ok((byte >> (7 - bit_index)) & 1);
        }

        if byte_index == self.bytes.len() && bit_index < self.pending_bits {
            return Ok((self.pending >> (self.pending_bits - 1 - bit_index)) & 1);
        }

        Err(Error::out_of_range(index, self.bit_count()))
    }

    /// Total number of bits appended.
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bytes.len() * 8 + self.pending_bits as usize
    }

    /// Number of bytes, counting a partial trailing byte as a whole one.
    pub fn byte_count(&self) -> usize {
        self.bytes.len() + usize::from(self.pending_bits > 0)
    }

    /// Check if no bits have been appended.
    pub fn is_empty(&self) -> bool {
        self.bit_count() == 0
    }

    /// Materialize the stream, zero-filling unused trailing bits.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_count());
        out.extend_from_slice(self.bytes.as_slice());
        if self.pending_bits > 0 {
            out.push(self.pending << (8 - self.pending_bits));
        }
        out
    }
}

impl From<Vec<u8>> for BitStream {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: ByteBuffer::from(bytes),
            pending: 0,
            pending_bits: 0,
        }
    }
}

impl From<&[u8]> for BitStream {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: ByteBuffer::from(bytes),
            pending: 0,
            pending_bits: 0,
        }
    }
}
