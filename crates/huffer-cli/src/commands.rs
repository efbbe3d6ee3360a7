//! Subcommand implementations.

use std::io;
use std::path::Path;

use huffer_core::{CompressionStats, Metrics, Result};
use huffer_huffman::{decode, encode_with_stats, verify, TextReporter, TracingReporter, Verification};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::storage;

/// Result of encoding then decoding one input.
#[derive(Debug, Clone)]
pub struct RoundtripOutcome {
    pub stats: CompressionStats,
    pub verification: Verification,
}

/// Encode `input` into `output`. With `report` the frequency table, codes
/// and sizes are printed to stdout.
pub fn encode_file(input: &Path, output: &Path, report: bool) -> Result<CompressionStats> {
    let data = storage::read(input)?;

    let (encoded, stats) = if report {
        let mut reporter = TextReporter::new(io::stdout().lock());
        encode_with_stats(&data, &mut reporter)?
    } else {
        encode_with_stats(&data, &mut TracingReporter)?
    };

    storage::write(output, &encoded, false)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        original = stats.original_size,
        compressed = stats.compressed_size(),
        "encoded"
    );
    Ok(stats)
}

/// Decode `input` into `output`, returning the decoded length.
pub fn decode_file(input: &Path, output: &Path) -> Result<usize> {
    let encoded = storage::read(input)?;
    let decoded = decode(&encoded)?;

    storage::write(output, &decoded, false)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        decoded = decoded.len(),
        "decoded"
    );
    Ok(decoded.len())
}

/// Encode and decode `input` in memory and compare with the original.
/// With `keep` both intermediate results are written next to the input.
pub fn roundtrip_file(input: &Path, config: &CliConfig, keep: bool) -> Result<RoundtripOutcome> {
    let data = storage::read(input)?;

    let (encoded, stats) = if config.report {
        let mut reporter = TextReporter::new(io::stdout().lock());
        encode_with_stats(&data, &mut reporter)?
    } else {
        encode_with_stats(&data, &mut TracingReporter)?
    };
    let decoded = decode(&encoded)?;

    if keep {
        storage::write(&config.encoded_path(input), &encoded, false)?;
        storage::write(&config.decoded_path(input), &decoded, false)?;
    }

    let verification = verify(&data, &decoded);
    if verification.is_match() {
        info!(
            input = %input.display(),
            size_factor = stats.ratio().size_factor_percent(),
            "roundtrip ok"
        );
    } else {
        warn!(
            input = %input.display(),
            mismatches = verification.mismatches,
            first = ?verification.first_mismatch,
            length_mismatch = verification.length_mismatch,
            "roundtrip mismatch"
        );
    }

    Ok(RoundtripOutcome {
        stats,
        verification,
    })
}

/// Round-trip every input, returning the aggregated metrics and the number
/// of inputs that did not reproduce.
pub fn roundtrip_all<P: AsRef<Path>>(
    inputs: &[P],
    config: &CliConfig,
    keep: bool,
) -> (Metrics, usize) {
    let mut metrics = Metrics::new();
    let mut failures = 0;

    for input in inputs {
        let input = input.as_ref();
        match roundtrip_file(input, config, keep) {
            Ok(outcome) if outcome.verification.is_match() => metrics.record(&outcome.stats),
            Ok(_) => {
                metrics.record_error();
                failures += 1;
            }
            Err(e) => {
                warn!(input = %input.display(), error = %e, "roundtrip failed");
                metrics.record_error();
                failures += 1;
            }
        }
    }

    info!("{}", metrics.summary());
    (metrics, failures)
}
