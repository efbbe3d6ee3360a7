//! Huffman codec: serialized table followed by the coded payload.
//!
//! ```text
//! +-----------------------+---------------------------+
//! | frequency table bytes | Huffman-coded payload     |
//! +-----------------------+---------------------------+
//! ```
//!
//! The payload starts at the first byte after the table. Empty input encodes
//! to empty output and decodes back to empty output.

use std::time::Instant;

use huffer_core::{Codec, CompressionStats, Compressor, Decompressor, Error, Result};
use tracing::debug;

use crate::frequency::analyse;
use crate::report::{NoopReporter, Reporter};
use crate::table::FrequencyTable;
use crate::tree::HuffmanTree;

/// Encode `data` into table bytes followed by payload bytes.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    encode_with_reporter(data, &mut NoopReporter)
}

/// Encode `data`, passing the table, codes and sizes to `reporter`.
pub fn encode_with_reporter(data: &[u8], reporter: &mut dyn Reporter) -> Result<Vec<u8>> {
    encode_with_stats(data, reporter).map(|(encoded, _)| encoded)
}

/// Encode `data` and return statistics for the run.
pub fn encode_with_stats(
    data: &[u8],
    reporter: &mut dyn Reporter,
) -> Result<(Vec<u8>, CompressionStats)> {
    if data.is_empty() {
        return Ok((Vec::new(), CompressionStats::new()));
    }

    let start = Instant::now();

    let table = analyse(data);
    let tree = HuffmanTree::new(&table)?;

    let table_bytes = table.encode()?;
    let payload = tree.encode(data)?;

    let stats = CompressionStats {
        original_size: data.len(),
        table_size: table_bytes.len(),
        payload_size: payload.len(),
        distinct_symbols: table.len(),
        time_us: start.elapsed().as_micros() as u64,
    };

    debug!(
        input = data.len(),
        symbols = table.len(),
        table = table_bytes.len(),
        payload = payload.len(),
        "encoded"
    );

    reporter.frequencies(&table)?;
    reporter.codes(&tree)?;
    reporter.sizes(&stats)?;

    let mut output = table_bytes;
    output.extend_from_slice(&payload);
    Ok((output, stats))
}

/// Decode bytes produced by [`encode`].
pub fn decode(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let (table, payload_offset) = FrequencyTable::decode(data)?;
    if table.is_empty() {
        return Err(Error::malformed("table has no symbols"));
    }

    let tree = HuffmanTree::new(&table)?;
    let decoded = tree.decode(data, payload_offset)?;

    debug!(
        input = data.len(),
        symbols = table.len(),
        payload_offset,
        output = decoded.len(),
        "decoded"
    );

    Ok(decoded)
}

/// Huffman codec implementing the core codec traits.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for HuffmanCodec {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        encode(input)
    }

    fn compress_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        encode_with_stats(input, &mut NoopReporter)
    }
}

impl Decompressor for HuffmanCodec {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        decode(input)
    }
}

impl Codec for HuffmanCodec {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TextReporter;

    #[test]
    fn test_roundtrip_empty() {
        assert!(encode(b"").unwrap().is_empty());
        assert!(decode(b"").unwrap().is_empty());
    }

    #[test]
    fn test_aaab_layout() {
        let encoded = encode(b"AAAB").unwrap();

        // Five table bytes, then four payload bits in one byte.
        assert_eq!(encoded.len(), 6);
        assert_eq!(encoded[5], 0b11100000);
        assert_eq!(decode(&encoded).unwrap(), b"AAAB");
    }

    #[test]
    fn test_roundtrip_small() {
        let input = b"Hello, Huffman!";
        assert_eq!(decode(&encode(input).unwrap()).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_single_symbol() {
        let input = vec![0x7Fu8; 1000];
        let encoded = encode(&input).unwrap();

        assert!(encoded.len() < input.len());
        assert_eq!(decode(&encoded).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_single_byte() {
        assert_eq!(decode(&encode(&[0]).unwrap()).unwrap(), vec![0]);
    }

    #[test]
    fn test_roundtrip_full_alphabet() {
        let input: Vec<u8> = (0..=255u8).rev().cycle().take(10_000).collect();
        assert_eq!(decode(&encode(&input).unwrap()).unwrap(), input);
    }

    #[test]
    fn test_roundtrip_large_text() {
        let pattern = b"The quick brown fox jumps over the lazy dog. ";
        let input: Vec<u8> = pattern.iter().cycle().take(100_000).copied().collect();

        let encoded = encode(&input).unwrap();
        assert!(encoded.len() < input.len());
        assert_eq!(decode(&encoded).unwrap(), input);
    }

    #[test]
    fn test_decode_one_byte_is_malformed() {
        assert!(matches!(decode(&[0x00]), Err(Error::MalformedTable { .. })));
    }

    #[test]
    fn test_decode_zero_width_is_malformed() {
        assert!(matches!(
            decode(&[0x00, 0x80, 0x41]),
            Err(Error::MalformedTable { .. })
        ));
    }

    #[test]
    fn test_decode_empty_table_is_malformed() {
        assert!(matches!(
            decode(&[0x00, 0x08, 0xFF]),
            Err(Error::MalformedTable { .. })
        ));
    }

    #[test]
    fn test_decode_truncated_payload() {
        let encoded = encode(b"mississippi river").unwrap();
        let err = decode(&encoded[..encoded.len() - 2]).unwrap_err();
        assert!(matches!(err, Error::TruncatedPayload { .. }));
    }

    #[test]
    fn test_encode_with_stats() {
        let input = b"abracadabra";
        let (encoded, stats) = encode_with_stats(input, &mut NoopReporter).unwrap();

        assert_eq!(stats.original_size, 11);
        assert_eq!(stats.distinct_symbols, 5);
        assert_eq!(stats.compressed_size(), encoded.len());
    }

    #[test]
    fn test_reporter_receives_all_sections() {
        let mut reporter = TextReporter::new(Vec::new());
        let encoded = encode_with_reporter(b"banana", &mut reporter).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(text.contains("Frequencies:"));
        assert!(text.contains("Codes:"));
        assert!(text.contains(&format!("Total:       {}", encoded.len())));
    }

    #[test]
    fn test_codec_traits() {
        let codec = HuffmanCodec::new();
        let input = b"Test data for roundtrip verification!";

        assert!(codec.verify_roundtrip(input).unwrap());

        let compressed = codec.compress(input).unwrap();
        assert_eq!(codec.decompress(&compressed).unwrap(), input);

        let (_, stats) = codec.compress_with_stats(input).unwrap();
        assert_eq!(stats.compressed_size(), compressed.len());
    }
}
