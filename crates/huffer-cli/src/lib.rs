//! Command-line driver for the huffer Huffman codec.
//!
//! The binary is a thin clap front end; file handling, configuration and the
//! subcommand bodies live here so they can be tested without a process.

pub mod commands;
pub mod config;
pub mod storage;

pub use commands::{decode_file, encode_file, roundtrip_all, roundtrip_file, RoundtripOutcome};
pub use config::{CliConfig, ConfigError};
