//! # Huffer Huffman
//!
//! Static Huffman coding over single bytes with a self-describing header.
//!
//! The encoder counts byte frequencies, builds a Huffman tree with the
//! classic two-smallest merge, and writes a compact bit-packed frequency
//! table followed by the coded payload. The decoder reads the table back,
//! rebuilds the identical tree and walks it bit by bit until the total
//! symbol count recorded in the table has been produced.
//!
//! ## Pipeline
//!
//! ```text
//! encode: bytes -> analyse -> FrequencyTable -> HuffmanTree -> table bytes ++ payload
//! decode: bytes -> FrequencyTable::decode -> HuffmanTree -> tree walk -> bytes
//! ```
//!
//! ## Example
//!
//! ```
//! use huffer_huffman::{decode, encode};
//!
//! let data = b"AAAB";
//! let encoded = encode(data)?;
//! assert_eq!(decode(&encoded)?, data);
//! # Ok::<(), huffer_core::Error>(())
//! ```
//!
//! Whole inputs are processed in memory; there is no streaming mode.

pub mod bitstream;
pub mod buffer;
pub mod codec;
pub mod frequency;
pub mod report;
pub mod table;
pub mod tree;

// Re-export main types
pub use bitstream::BitStream;
pub use buffer::ByteBuffer;
pub use codec::{decode, encode, encode_with_reporter, encode_with_stats, HuffmanCodec};
pub use frequency::analyse;
pub use report::{verify, NoopReporter, Reporter, TextReporter, TracingReporter, Verification};
pub use table::{FrequencyTable, Symbol};
pub use tree::{Code, HuffmanTree, Node, NodeId};
