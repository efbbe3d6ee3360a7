//! Byte frequency analysis.

use crate::table::{FrequencyTable, Symbol, ALPHABET_SIZE};

/// Count every byte value in `data`.
pub fn count_frequencies(data: &[u8]) -> [u64; ALPHABET_SIZE] {
    let mut counts = [0u64; ALPHABET_SIZE];
    for &byte in data {
        counts[byte as usize] += 1;
    }
    counts
}

/// Build a frequency table for `data`, sorted by ascending frequency.
///
/// Only values that occur at least once are included. Equal frequencies keep
/// ascending byte order.
pub fn analyse(data: &[u8]) -> FrequencyTable {
    let counts = count_frequencies(data);

    let mut table: FrequencyTable = counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(value, &count)| Symbol::new(value as u8, count))
        .collect();

    table.sort();
    table
}
