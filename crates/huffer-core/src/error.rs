//! Error types for Huffman coding operations.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Codec error types.
#[derive(Debug, Error)]
pub enum Error {
    /// Serialized frequency table is too short or carries invalid fields.
    #[error("malformed table: {message}")]
    MalformedTable { message: String },

    /// Buffer or bit stream addressed past its end.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Tree construction left the tree in an inconsistent state.
    #[error("tree build failed: {message}")]
    TreeBuild { message: String },

    /// Payload ended before every symbol was recovered.
    #[error("truncated payload: decoded {decoded} of {expected} symbols")]
    TruncatedPayload { decoded: u64, expected: u64 },

    /// Payload bits lead to a child the tree does not have.
    #[error("no code matches the bits at offset {bit_offset}")]
    InvalidCode { bit_offset: usize },

    /// Byte has no code in the tree it was encoded against.
    #[error("symbol 0x{symbol:02x} is not in the frequency table")]
    SymbolNotInTable { symbol: u8 },

    /// Frequency too large for the 5-bit width field.
    #[error("frequency {frequency} does not fit in 31 bits")]
    FrequencyOverflow { frequency: u64 },

    /// Table holds more entries than the 9-bit count field can express.
    #[error("table holds {count} symbols, at most 511 can be serialized")]
    TooManySymbols { count: usize },

    /// I/O error from the storage layer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a malformed table error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedTable {
            message: message.into(),
        }
    }

    /// Create a malformed table error with bit offset context.
    pub fn malformed_at(message: impl Into<String>, bit_offset: usize) -> Self {
        Error::MalformedTable {
            message: format!("{} at bit {}", message.into(), bit_offset),
        }
    }

    /// Create an index out of range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    /// Create a tree build error.
    pub fn tree_build(message: impl Into<String>) -> Self {
        Error::TreeBuild {
            message: message.into(),
        }
    }

    /// Create a truncated payload error.
    pub fn truncated(decoded: u64, expected: u64) -> Self {
        Error::TruncatedPayload { decoded, expected }
    }

    /// Check if error is recoverable.
    ///
    /// The codec is a pure transform, so only storage failures qualify.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Get error category for metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::MalformedTable { .. } => "malformed_table",
            Error::IndexOutOfRange { .. } => "index_out_of_range",
            Error::TreeBuild { .. } => "tree_build",
            Error::TruncatedPayload { .. } => "truncated_payload",
            Error::InvalidCode { .. } => "invalid_code",
            Error::SymbolNotInTable { .. } => "symbol_not_in_table",
            Error::FrequencyOverflow { .. } => "frequency_overflow",
            Error::TooManySymbols { .. } => "too_many_symbols",
            Error::Io(_) => "io_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::malformed("bad size: 1");
        assert_eq!(err.to_string(), "malformed table: bad size: 1");

        let err = Error::malformed_at("bad freq bits: 0", 9);
        assert_eq!(err.to_string(), "malformed table: bad freq bits: 0 at bit 9");

        let err = Error::SymbolNotInTable { symbol: 0x41 };
        assert_eq!(err.to_string(), "symbol 0x41 is not in the frequency table");
    }

    #[test]
    fn test_categories() {
        assert_eq!(Error::malformed("x").category(), "malformed_table");
        assert_eq!(Error::out_of_range(3, 2).category(), "index_out_of_range");
        assert_eq!(Error::tree_build("x").category(), "tree_build");
        assert_eq!(Error::truncated(1, 2).category(), "truncated_payload");
    }

    #[test]
    fn test_only_io_is_recoverable() {
        assert!(!Error::malformed("x").is_recoverable());
        assert!(!Error::tree_build("x").is_recoverable());
        assert!(Error::Io(std::io::Error::other("disk")).is_recoverable());
    }
}
