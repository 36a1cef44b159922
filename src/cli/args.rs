//! CLI argument definitions using clap
//!
//! Commands:
//! - blobcheck verify [--key <key>] [--value <text>] [--fail-on-mismatch]
//! - blobcheck inspect --key <key>
//! - blobcheck encode --value <text>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::backend::BackendKind;

/// Value written when none is given
pub const DEFAULT_VALUE: &str = "Ms. Foo Bar";

/// blobcheck - verify that a table stores text and binary columns unchanged
#[derive(Parser, Debug)]
#[command(name = "blobcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Backend and configuration options shared by commands that touch storage
#[derive(Args, Debug, Clone, Default)]
pub struct StorageArgs {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend to verify against
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Data directory for the file backend
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Table name (subdirectory of the data directory)
    #[arg(long)]
    pub table: Option<String>,

    /// Cap stored binary values at this many bytes
    #[arg(long)]
    pub max_blob_bytes: Option<usize>,

    /// Minimum log severity: trace, info, warn, error, fatal
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a value as text and as bytes, read it back, and compare
    Verify {
        /// Record key (a random UUID when omitted)
        #[arg(long)]
        key: Option<String>,

        /// Text value to write
        #[arg(long, default_value = DEFAULT_VALUE)]
        value: String,

        /// Exit with an error when the read-back differs
        #[arg(long)]
        fail_on_mismatch: bool,

        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Read one record and show both columns
    Inspect {
        /// Record key
        #[arg(long)]
        key: String,

        #[command(flatten)]
        storage: StorageArgs,
    },

    /// Show the byte encoding of a value without touching storage
    Encode {
        /// Text value to encode
        #[arg(long)]
        value: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
