//! Huffer: static Huffman coding of whole files.
//!
//! ## Usage
//!
//! ```bash
//! # Encode, writing data.txt.huff
//! huffer encode data.txt
//!
//! # Encode with frequency table, codes and sizes on stdout
//! huffer encode data.txt -o data.huff --report
//!
//! # Decode
//! huffer decode data.huff -o data.txt
//!
//! # Check that several files survive a round trip, keeping the outputs
//! huffer roundtrip a.txt b.bin --keep
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use huffer_cli::{commands, CliConfig};

#[derive(Parser, Debug)]
#[command(name = "huffer")]
#[command(version)]
#[command(about = "Static Huffman encoder and decoder", long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Configuration file path (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a file
    Encode {
        input: PathBuf,

        /// Output path, defaults to <INPUT>.huff
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print frequency table, codes and sizes
        #[arg(long)]
        report: bool,
    },

    /// Decode a file produced by `encode`
    Decode {
        input: PathBuf,

        /// Output path, defaults to <INPUT>.decoded
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encode and decode files in memory and compare with the originals
    Roundtrip {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write <INPUT>.huff and <INPUT>.decoded
        #[arg(long)]
        keep: bool,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    let report = matches!(args.command, Command::Encode { report: true, .. });
    config.merge_args(args.log_level.as_deref(), report);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level()?)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Encode { input, output, .. } => {
            let output = output.unwrap_or_else(|| config.encoded_path(&input));
            commands::encode_file(&input, &output, config.report)?;
        }
        Command::Decode { input, output } => {
            let output = output.unwrap_or_else(|| config.decoded_path(&input));
            commands::decode_file(&input, &output)?;
        }
        Command::Roundtrip { inputs, keep } => {
            let (_, failures) = commands::roundtrip_all(&inputs, &config, keep);
            if failures > 0 {
                error!(failures, total = inputs.len(), "roundtrip failed");
                return Ok(ExitCode::FAILURE);
            }
            info!(total = inputs.len(), "all inputs reproduced");
        }
    }

    Ok(ExitCode::SUCCESS)
}
