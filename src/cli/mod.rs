//! CLI module for blobcheck
//!
//! Provides command-line interface for:
//! - verify: One round-trip verification against the configured backend
//! - inspect: Show a stored record's text and binary columns
//! - encode: Show a value's byte encoding

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, StorageArgs, DEFAULT_VALUE};
pub use commands::{
    encode, inspect, inspection_report, open_backend, run, run_command, verification_report,
    verify,
};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
