//! Statistics and metrics for codec operations.

use crate::types::CompressionRatio;

/// Statistics from a single encode operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Original (uncompressed) size in bytes.
    pub original_size: usize,

    /// Size of the serialized frequency table in bytes.
    pub table_size: usize,

    /// Size of the Huffman-coded payload in bytes.
    pub payload_size: usize,

    /// Number of distinct byte values in the input.
    pub distinct_symbols: usize,

    /// Time taken in microseconds.
    pub time_us: u64,
}

impl CompressionStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total output size: table plus payload.
    pub fn compressed_size(&self) -> usize {
        self.table_size + self.payload_size
    }

    /// Get compression ratio.
    pub fn ratio(&self) -> CompressionRatio {
        CompressionRatio::new(self.original_size, self.compressed_size())
    }

    /// Get throughput in bytes per second.
    pub fn throughput_bps(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.original_size as f64 * 1_000_000.0 / self.time_us as f64
    }

    /// Get throughput in MB/s.
    pub fn throughput_mbs(&self) -> f64 {
        self.throughput_bps() / 1_000_000.0
    }
}

/// Metrics collector for aggregate statistics.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    /// Total operations performed.
    pub total_operations: u64,

    /// Total bytes fed to the encoder.
    pub total_bytes_in: u64,

    /// Total bytes produced.
    pub total_bytes_out: u64,

    /// Total time spent in microseconds.
    pub total_time_us: u64,

    /// Number of errors encountered.
    pub error_count: u64,
}

impl Metrics {
    /// Create new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed operation.
    pub fn record(&mut self, stats: &CompressionStats) {
        self.total_operations += 1;
        self.total_bytes_in += stats.original_size as u64;
        self.total_bytes_out += stats.compressed_size() as u64;
        self.total_time_us += stats.time_us;
    }

    /// Record an error.
    pub fn record_error(&mut self) {
        self.total_operations += 1;
        self.error_count += 1;
    }

    /// Get average compression ratio.
    pub fn average_ratio(&self) -> f64 {
        if self.total_bytes_out == 0 {
            return 1.0;
        }
        self.total_bytes_in as f64 / self.total_bytes_out as f64
    }

    /// Get average throughput in MB/s.
    pub fn average_throughput_mbs(&self) -> f64 {
        if self.total_time_us == 0 {
            return 0.0;
        }
        self.total_bytes_in as f64 / self.total_time_us as f64
    }

    /// Get error rate (0.0 to 1.0).
    pub fn error_rate(&self) -> f64 {
        if self.total_operations == 0 {
            return 0.0;
        }
        self.error_count as f64 / self.total_operations as f64
    }

    /// Get metrics summary as string.
    pub fn summary(&self) -> String {
        format!(
            "Operations: {}, Bytes: {} -> {} (ratio: {:.2}x), Throughput: {:.1} MB/s, Errors: {}",
            self.total_operations,
            self.total_bytes_in,
            self.total_bytes_out,
            self.average_ratio(),
            self.average_throughput_mbs(),
            self.error_count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompressionStats {
        CompressionStats {
            original_size: 1000,
            table_size: 20,
            payload_size: 480,
            distinct_symbols: 12,
            time_us: 10,
        }
    }

    #[test]
    fn test_compressed_size_includes_table() {
        let stats = sample();
        assert_eq!(stats.compressed_size(), 500);
        assert_eq!(stats.ratio().ratio(), 2.0);
    }

    #[test]
    fn test_throughput() {
        let stats = sample();
        assert_eq!(stats.throughput_bps(), 100_000_000.0);
        assert_eq!(stats.throughput_mbs(), 100.0);
        assert_eq!(CompressionStats::new().throughput_bps(), 0.0);
    }

    #[test]
    fn test_metrics_aggregate() {
        let mut metrics = Metrics::new();
        metrics.record(&sample());
        metrics.record(&sample());
        metrics.record_error();

        assert_eq!(metrics.total_operations, 3);
        assert_eq!(metrics.total_bytes_in, 2000);
        assert_eq!(metrics.total_bytes_out, 1000);
        assert_eq!(metrics.average_ratio(), 2.0);
        assert!((metrics.error_rate() - 1.0 / 3.0).abs() < 1e-9);
        assert!(metrics.summary().contains("Errors: 1"));
    }
}
