//! Diagnostics for encode runs.
//!
//! The codec never prints on its own. Callers that want the frequency table,
//! the code table or size figures pass a [`Reporter`] to
//! [`encode_with_reporter`](crate::codec::encode_with_reporter).

use std::io::{self, Write};

use huffer_core::CompressionStats;
use tracing::debug;

use crate::table::FrequencyTable;
use crate::tree::HuffmanTree;

/// Widest frequency bar drawn by [`TextReporter`].
pub const BAR_WIDTH: u64 = 72;

/// Sink for encode diagnostics. Every method defaults to doing nothing.
pub trait Reporter {
    /// Called with the sorted frequency table.
    fn frequencies(&mut self, _table: &FrequencyTable) -> io::Result<()> {
        Ok(())
    }

    /// Called once the tree and its codes exist.
    fn codes(&mut self, _tree: &HuffmanTree) -> io::Result<()> {
        Ok(())
    }

    /// Called with the final sizes.
    fn sizes(&mut self, _stats: &CompressionStats) -> io::Result<()> {
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}

/// Emits one `debug` event per entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn frequencies(&mut self, table: &FrequencyTable) -> io::Result<()> {
        for symbol in table {
            debug!(symbol = symbol.value, frequency = symbol.frequency, "frequency");
        }
        Ok(())
    }

    fn codes(&mut self, tree: &HuffmanTree) -> io::Result<()> {
        for (symbol, code) in tree.codes_by_length() {
            debug!(symbol = symbol.value, code = %code, "code");
        }
        Ok(())
    }

    fn sizes(&mut self, stats: &CompressionStats) -> io::Result<()> {
        debug!(
            original = stats.original_size,
            coded = stats.payload_size,
            table = stats.table_size,
            total = stats.compressed_size(),
            size_factor = stats.ratio().size_factor_percent(),
            "sizes"
        );
        Ok(())
    }
}

/// Human-readable report written to any [`Write`].
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn frequencies(&mut self, table: &FrequencyTable) -> io::Result<()> {
        let highest = table.iter().map(|s| s.frequency).max().unwrap_or(0);
        let divider = (highest / BAR_WIDTH).max(1);

        writeln!(self.out, "Frequencies:")?;
        for symbol in table {
            let bar = "|".repeat((symbol.frequency / divider) as usize);
            writeln!(
                self.out,
                "{:>3} ({}): {:>10} {}",
                symbol.value,
                symbol.display_char(),
                symbol.frequency,
                bar
            )?;
        }
        writeln!(self.out)
    }

    fn codes(&mut self, tree: &HuffmanTree) -> io::Result<()> {
        writeln!(self.out, "Codes:")?;
        for (symbol, code) in tree.codes_by_length() {
            writeln!(
                self.out,
                "{:>3} ({}): {}",
                symbol.value,
                symbol.display_char(),
                code
            )?;
        }
        writeln!(self.out)
    }

    fn sizes(&mut self, stats: &CompressionStats) -> io::Result<()> {
        writeln!(self.out, "Data sizes (bytes):")?;
        writeln!(self.out, "Original:    {}", stats.original_size)?;
        writeln!(self.out, "Coded:       {}", stats.payload_size)?;
        writeln!(self.out, "Table:       {}", stats.table_size)?;
        writeln!(self.out, "Total:       {}", stats.compressed_size())?;
        writeln!(
            self.out,
            "Size factor: {}%",
            stats.ratio().size_factor_percent()
        )
    }
}

/// Outcome of comparing original bytes against decoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verification {
    /// Positions, within the shorter length, where the bytes differ.
    pub mismatches: usize,
    /// First differing position, including a length difference.
    pub first_mismatch: Option<usize>,
    /// The two inputs have different lengths.
    pub length_mismatch: bool,
}

impl Verification {
    pub fn is_match(&self) -> bool {
        self.first_mismatch.is_none()
    }
}

/// Compare `original` with `decoded` byte for byte.
pub fn verify(original: &[u8], decoded: &[u8]) -> Verification {
    let mut result = Verification::default();

    for (i, (a, b)) in original.iter().zip(decoded).enumerate() {
        if a != b {
            result.mismatches += 1;
            result.first_mismatch.get_or_insert(i);
        }
    }

    if original.len() != decoded.len() {
        result.length_mismatch = true;
        result
            .first_mismatch
            .get_or_insert(original.len().min(decoded.len()));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::analyse;

    #[test]
    fn test_text_report() {
        let table = analyse(b"AAAB");
        let tree = HuffmanTree::new(&table).unwrap();
        let stats = CompressionStats {
            original_size: 4,
            table_size: 5,
            payload_size: 1,
            distinct_symbols: 2,
            time_us: 0,
        };

        let mut reporter = TextReporter::new(Vec::new());
        reporter.frequencies(&table).unwrap();
        reporter.codes(&tree).unwrap();
        reporter.sizes(&stats).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(text.contains(" 66 (B):          1 |\n"));
        assert!(text.contains(" 65 (A):          3 |||\n"));
        assert!(text.contains(" 66 (B): 0\n"));
        assert!(text.contains(" 65 (A): 1\n"));
        assert!(text.contains("Total:       6\n"));
        assert!(text.contains("Size factor: 150%"));
    }

    #[test]
    fn test_bars_are_scaled() {
        let data: Vec<u8> = std::iter::repeat(b'x').take(720).chain([b'y']).collect();
        let table = analyse(&data);

        let mut reporter = TextReporter::new(Vec::new());
        reporter.frequencies(&table).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        let longest = text.lines().map(|l| l.matches('|').count()).max().unwrap();
        assert_eq!(longest, 72);
    }

    #[test]
    fn test_verify_match() {
        let v = verify(b"same", b"same");
        assert!(v.is_match());
        assert_eq!(v.mismatches, 0);
        assert!(verify(b"", b"").is_match());
    }

    #[test]
    fn test_verify_byte_mismatch() {
        let v = verify(b"abcdef", b"abXdeY");
        assert!(!v.is_match());
        assert_eq!(v.mismatches, 2);
        assert_eq!(v.first_mismatch, Some(2));
        assert!(!v.length_mismatch);
    }

    #[test]
    fn test_verify_length_mismatch() {
        let v = verify(b"abc", b"ab");
        assert!(v.length_mismatch);
        assert_eq!(v.mismatches, 0);
        assert_eq!(v.first_mismatch, Some(2));
    }
}
