//! Core type definitions for compression results.

/// Compression ratio metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionRatio {
    /// Original uncompressed size in bytes.
    pub original_size: usize,
    /// Compressed size in bytes, table included.
    pub compressed_size: usize,
}

impl CompressionRatio {
    /// Create new ratio from sizes.
    pub fn new(original: usize, compressed: usize) -> Self {
        CompressionRatio {
            original_size: original,
            compressed_size: compressed,
        }
    }

    /// Calculate ratio (original / compressed).
    /// Higher is better (more compression).
    pub fn ratio(&self) -> f64 {
        if self.compressed_size == 0 {
            return 0.0;
        }
        self.original_size as f64 / self.compressed_size as f64
    }

    /// Calculate space savings as percentage (0-100).
    pub fn savings_percent(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - (self.compressed_size as f64 / self.original_size as f64)) * 100.0
    }

    /// Compressed size as a rounded percentage of the original size.
    ///
    /// 100 means no change, values above 100 mean the output grew.
    pub fn size_factor_percent(&self) -> u64 {
        if self.original_size == 0 {
            return 0;
        }
        (self.compressed_size as f64 / self.original_size as f64 * 100.0).round() as u64
    }

    /// Calculate bytes saved.
    pub fn bytes_saved(&self) -> isize {
        self.original_size as isize - self.compressed_size as isize
    }

    /// Check if compression was effective (saved space).
    pub fn is_effective(&self) -> bool {
        self.compressed_size < self.original_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let ratio = CompressionRatio::new(1000, 250);
        assert_eq!(ratio.ratio(), 4.0);
        assert_eq!(ratio.savings_percent(), 75.0);
        assert_eq!(ratio.size_factor_percent(), 25);
        assert_eq!(ratio.bytes_saved(), 750);
        assert!(ratio.is_effective());
    }

    #[test]
    fn test_expansion() {
        let ratio = CompressionRatio::new(4, 5);
        assert_eq!(ratio.size_factor_percent(), 125);
        assert_eq!(ratio.bytes_saved(), -1);
        assert!(!ratio.is_effective());
    }

    #[test]
    fn test_empty_sizes() {
        let ratio = CompressionRatio::new(0, 0);
        assert_eq!(ratio.ratio(), 0.0);
        assert_eq!(ratio.savings_percent(), 0.0);
        assert_eq!(ratio.size_factor_percent(), 0);
    }
}
