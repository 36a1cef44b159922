//! CLI command implementations
//!
//! Each command resolves its configuration, opens the configured backend,
//! does its work, and writes one JSON response to stdout.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::backend::faults::TruncatingBackend;
use crate::backend::{BackendKind, FileBackend, MemoryBackend, Record, StorageBackend};
use crate::codec::{to_hex, Codec, Utf8Codec};
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::verify::{RoundTripVerifier, VerificationResult};

use super::args::{Command, StorageArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Parse args and run
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Verify {
            key,
            value,
            fail_on_mismatch,
            storage,
        } => verify(&storage, key, &value, fail_on_mismatch),
        Command::Inspect { key, storage } => inspect(&storage, &key),
        Command::Encode { value } => encode(&value),
    }
}

/// Resolve config, apply its log level, and log what was loaded
fn prepare(args: &StorageArgs) -> CliResult<Config> {
    let config = Config::resolve(args)?;
    Logger::set_min_severity(config.severity()?);

    let data_dir = config.data_dir.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("backend", config.backend.as_str()),
            ("data_dir", data_dir.as_str()),
            ("table", config.table.as_str()),
        ],
    );
    Ok(config)
}

/// Open the backend named by the configuration
pub fn open_backend(config: &Config) -> CliResult<Box<dyn StorageBackend>> {
    let backend: Box<dyn StorageBackend> = match config.backend {
        BackendKind::Memory => {
            log_event_with_fields(Event::BackendOpened, &[("backend", "memory")]);
            Box::new(MemoryBackend::new())
        }
        BackendKind::File => Box::new(FileBackend::open(&config.data_dir, &config.table)?),
    };

    if let Some(limit) = config.max_blob_bytes {
        return Ok(Box::new(TruncatingBackend::new(backend, limit)));
    }
    Ok(backend)
}

/// Write, read back, compare, and report
pub fn verify(
    args: &StorageArgs,
    key: Option<String>,
    value: &str,
    fail_on_mismatch: bool,
) -> CliResult<()> {
    let config = prepare(args)?;
    let backend = open_backend(&config)?;

    let key = key.unwrap_or_else(|| Uuid::new_v4().to_string());
    let verifier = RoundTripVerifier::new(Utf8Codec);
    let result = verifier.verify(&key, value, backend.as_ref())?;

    write_response(verification_report(
        &key,
        backend.name(),
        verifier.codec(),
        &result,
        Utc::now(),
    ))?;

    if fail_on_mismatch && !result.is_match() {
        return Err(CliError::mismatch(&key));
    }
    Ok(())
}

/// Read one record and show both columns.
///
/// A failed read writes an error envelope and is still returned as an error.
pub fn inspect(args: &StorageArgs, key: &str) -> CliResult<()> {
    let config = prepare(args)?;
    let backend = open_backend(&config)?;

    match backend.get(key) {
        Ok(record) => write_response(inspection_report(&record, &Utf8Codec)),
        Err(e) => {
            write_error(e.code(), &e.to_string())?;
            Err(e.into())
        }
    }
}

/// Show the encoding of a value
pub fn encode(value: &str) -> CliResult<()> {
    let codec = Utf8Codec;
    let bytes = codec.encode(value);
    write_response(json!({
        "codec": codec.name(),
        "length": bytes.len(),
        "hex": to_hex(&bytes),
    }))
}

/// JSON report for one verification.
///
/// `actual_text` holds the decoded binary column; when the backend returned
/// bytes the codec rejects, `actual_decode_error` is set instead.
pub fn verification_report(
    key: &str,
    backend: &str,
    codec: &dyn Codec,
    result: &VerificationResult,
    verified_at: DateTime<Utc>,
) -> Value {
    let mut report = json!({
        "key": key,
        "backend": backend,
        "codec": codec.name(),
        "match": result.is_match(),
        "text_match": result.text_match(),
        "binary_match": result.binary_match(),
        "expected_hex": result.expected_hex(),
        "actual_hex": result.actual_hex(),
        "expected_length": result.expected_bytes().len(),
        "actual_length": result.actual_bytes().len(),
        "verified_at": verified_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    });

    match result.decode_actual(codec) {
        Ok(text) => report["actual_text"] = json!(text),
        Err(e) => report["actual_decode_error"] = json!(e.to_string()),
    }
    report
}

/// JSON report for one stored record
pub fn inspection_report(record: &Record, codec: &dyn Codec) -> Value {
    let mut report = json!({
        "key": record.key,
        "text": record.text_value,
        "hex": to_hex(&record.binary_value),
        "length": record.binary_value.len(),
        "blob_matches_text": codec.encode(&record.text_value) == record.binary_value,
    });

    match codec.decode(&record.binary_value) {
        Ok(text) => report["blob_text"] = json!(text),
        Err(e) => report["blob_decode_error"] = json!(e.to_string()),
    }
    report
}
