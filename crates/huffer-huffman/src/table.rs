//! Frequency table and its bit-packed serialized form.
//!
//! ## Format
//!
//! Fields are packed MSB-first with no alignment between them:
//!
//! | field                 | bits                 |
//! |-----------------------|----------------------|
//! | element count         | 9                    |
//! | bits per frequency    | 5                    |
//! | padding (zero)        | 2                    |
//! | per element: symbol   | 8                    |
//! | per element: frequency| bits per frequency   |
//!
//! Elements are written in table order, which is ascending frequency for any
//! table produced by the analyser. The decoder keeps that order so both sides
//! build the same tree.

use huffer_core::{Error, Result};
use tracing::trace;

use crate::bitstream::BitStream;

/// Width of the element count field.
pub const HEADER_COUNT_BITS: u32 = 9;

/// Width of the bits-per-frequency field.
pub const HEADER_FREQ_BITS: u32 = 5;

/// Width of the reserved padding field.
pub const HEADER_PAD_BITS: u32 = 2;

/// Total header width.
pub const HEADER_BITS: usize = (HEADER_COUNT_BITS + HEADER_FREQ_BITS + HEADER_PAD_BITS) as usize;

/// Width of each element's symbol field.
pub const ELEMENT_SYMBOL_BITS: u32 = 8;

/// Largest frequency width the 5-bit field may announce.
pub const MAX_FREQUENCY_BITS: u32 = 31;

/// Largest element count the 9-bit field can hold.
pub const MAX_ELEMENTS: usize = (1 << HEADER_COUNT_BITS) - 1;

/// Number of distinct byte values.
pub const ALPHABET_SIZE: usize = 256;

/// A byte value and how often it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// The byte value.
    pub value: u8,
    /// Occurrence count.
    pub frequency: u64,
}

impl Symbol {
    pub fn new(value: u8, frequency: u64) -> Self {
        Self { value, frequency }
    }

    /// Printable form of the value; control characters become a space.
    pub fn display_char(&self) -> char {
        if self.value < 32 {
            ' '
        } else {
            char::from(self.value)
        }
    }
}

/// Symbols ordered by ascending frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    symbols: Vec<Symbol>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with room for `capacity` symbols.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity),
        }
    }

    /// Append a symbol. Call [`sort`](Self::sort) once all are added.
    pub fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub fn get(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Stable sort by ascending frequency.
    pub fn sort(&mut self) {
        self.symbols.sort_by_key(|s| s.frequency);
    }

    /// Check that frequencies are non-decreasing.
    pub fn is_sorted(&self) -> bool {
        self.symbols
            .windows(2)
            .all(|pair| pair[0].frequency <= pair[1].frequency)
    }

    /// Frequency of the last entry, which is the largest once sorted.
    pub fn highest_frequency(&self) -> u64 {
        self.symbols.last().map_or(0, |s| s.frequency)
    }

    /// Sum of all frequencies: the number of symbols in the coded data.
    pub fn total_frequency(&self) -> u64 {
        self.symbols.iter().map(|s| s.frequency).sum()
    }

    /// Smallest field width, at least 1, that holds the highest frequency.
    pub fn bits_per_frequency(&self) -> u32 {
        let highest = self.highest_frequency();
        (u64::BITS - highest.leading_zeros()).max(1)
    }

    /// Serialize the table.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let count = self.symbols.len();
        if count > MAX_ELEMENTS {
            return Err(Error::TooManySymbols { count });
        }

        let freq_bits = self.bits_per_frequency();
        if freq_bits > MAX_FREQUENCY_BITS {
            return Err(Error::FrequencyOverflow {
                frequency: self.highest_frequency(),
            });
        }

        trace!(count, freq_bits, "encoding frequency table header");

        let mut bs = BitStream::new();
        bs.append_bits(count as u32, HEADER_COUNT_BITS);
        bs.append_bits(freq_bits, HEADER_FREQ_BITS);
        bs.append_bits(0, HEADER_PAD_BITS);

        for symbol in &self.symbols {
            // Unsorted tables may hold a larger value before the last entry.
            if symbol.frequency >> freq_bits != 0 {
                return Err(Error::FrequencyOverflow {
                    frequency: symbol.frequency,
                });
            }
            bs.append_bits(symbol.value as u32, ELEMENT_SYMBOL_BITS);
            bs.append_bits(symbol.frequency as u32, freq_bits);
        }

        Ok(bs.to_bytes())
    }

    /// Rebuild a table from its serialized form.
    ///
    /// Returns the table and the byte offset just past it, which is where
    /// the coded payload begins.
    pub fn decode(raw: &[u8]) -> Result<(Self, usize)> {
        if raw.len() < 2 {
            return Err(Error::malformed(format!("bad size: {}", raw.len())));
        }

        let bs = BitStream::from(raw);

        let count = bs.read_bits(0, HEADER_COUNT_BITS)? as usize;
        let freq_bits = bs.read_bits(HEADER_COUNT_BITS as usize, HEADER_FREQ_BITS)?;

        trace!(count, freq_bits, "decoded frequency table header");

        if freq_bits == 0 || freq_bits > MAX_FREQUENCY_BITS {
            return Err(Error::malformed_at(
                format!("bad freq bits: {}", freq_bits),
                HEADER_COUNT_BITS as usize,
            ));
        }
        if count > ALPHABET_SIZE {
            return Err(Error::malformed(format!("bad element count: {}", count)));
        }

        let element_bits = (ELEMENT_SYMBOL_BITS + freq_bits) as usize;
        let total_bits = HEADER_BITS + count * element_bits;
        if total_bits > bs.bit_count() {
            return Err(Error::malformed(format!(
                "table needs {} bits, input has {}",
                total_bits,
                bs.bit_count()
            )));
        }

        let mut seen = [false; ALPHABET_SIZE];
        let mut table = Self::with_capacity(count);

        for i in 0..count {
            let symbol_offset = HEADER_BITS + element_bits * i;
            let freq_offset = symbol_offset + ELEMENT_SYMBOL_BITS as usize;

            let value = bs.read_bits(symbol_offset, ELEMENT_SYMBOL_BITS)? as u8;
            let frequency = bs.read_bits(freq_offset, freq_bits)? as u64;

            if frequency == 0 {
                return Err(Error::malformed_at(
                    format!("zero frequency for symbol {}", value),
                    freq_offset,
                ));
            }
            if std::mem::replace(&mut seen[value as usize], true) {
                return Err(Error::malformed_at(
                    format!("duplicate symbol {}", value),
                    symbol_offset,
                ));
            }

            table.push(Symbol::new(value, frequency));
        }

        Ok((table, total_bits.div_ceil(8)))
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl FromIterator<Symbol> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}
