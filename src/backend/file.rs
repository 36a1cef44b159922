//! # File Backend
//!
//! Stores each record as its own file under `<data_dir>/<table>/`. The file
//! name is the URL-safe base64 form of the key, so any key maps to a valid
//! file name. Keys whose encoded form would exceed [`MAX_ENCODED_NAME`] are
//! named by the base64 SHA-256 of the key instead, with a separate extension
//! so the two naming schemes never collide. The key stored inside the record
//! is checked on every read.
//!
//! Record format:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, includes this field and the checksum)
//! +------------------+
//! | Key              | (length-prefixed bytes)
//! +------------------+
//! | Text Column      | (length-prefixed bytes, UTF-8)
//! +------------------+
//! | Binary Column    | (length-prefixed bytes)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself. Writes go to a
//! temporary file that is synced and renamed over the record, so a reader
//! sees either the old record or the new one.

use std::fs::{self, File};
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::checksum::compute_checksum;
use super::errors::{BackendError, BackendResult};
use super::record::Record;
use super::StorageBackend;
use crate::observability::{log_event_with_fields, Event};

const RECORD_EXTENSION: &str = "rec";
const HASHED_RECORD_EXTENSION: &str = "hrec";

/// Longest base64 key used directly as a file name
pub const MAX_ENCODED_NAME: usize = 200;

/// len + key len + text len + blob len + checksum
const MIN_RECORD_SIZE: usize = 4 + 4 + 4 + 4 + 4;

/// Checksummed file-per-key storage backend
#[derive(Debug)]
pub struct FileBackend {
    table_dir: PathBuf,
}

impl FileBackend {
    /// Open the table directory, creating it if it does not exist.
    pub fn open(data_dir: &Path, table: &str) -> BackendResult<Self> {
        let table_dir = data_dir.join(table);
        fs::create_dir_all(&table_dir).map_err(|e| {
            BackendError::Io(format!(
                "Failed to create table directory {}: {}",
                table_dir.display(),
                e
            ))
        })?;

        let dir = table_dir.display().to_string();
        log_event_with_fields(
            Event::BackendOpened,
            &[("backend", "file"), ("path", dir.as_str())],
        );

        Ok(Self { table_dir })
    }

    /// Directory holding this table's records
    pub fn table_dir(&self) -> &Path {
        &self.table_dir
    }

    /// Path of the record file for `key`
    pub fn record_path(&self, key: &str) -> PathBuf {
        let name = URL_SAFE_NO_PAD.encode(key.as_bytes());
        if name.len() <= MAX_ENCODED_NAME {
            return self.table_dir.join(format!("{}.{}", name, RECORD_EXTENSION));
        }

        let digest = URL_SAFE_NO_PAD.encode(Sha256::digest(key.as_bytes()));
        self.table_dir
            .join(format!("{}.{}", digest, HASHED_RECORD_EXTENSION))
    }

    fn write_atomically(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let tmp_path = self
            .table_dir
            .join(format!(".{}.tmp", Uuid::new_v4().simple()));

        let result = (|| {
            let mut file = File::create(&tmp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
            fs::rename(&tmp_path, path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }
}

impl StorageBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn put(&self, key: &str, text_value: &str, binary_value: &[u8]) -> BackendResult<()> {
        let data = encode_record(key, text_value.as_bytes(), binary_value)?;
        self.write_atomically(&self.record_path(key), &data)
            .map_err(|e| BackendError::Io(format!("Failed to write record {}: {}", key, e)))
    }

    fn get(&self, key: &str) -> BackendResult<Record> {
        let data = fs::read(self.record_path(key)).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                BackendError::NotFound(key.to_string())
            } else {
                BackendError::Io(format!("Failed to read record {}: {}", key, e))
            }
        })?;

        decode_record(key, &data)
    }
}

/// Length as stored on disk; lengths that do not fit a u32 are rejected.
fn length_prefix(what: &str, len: usize) -> BackendResult<u32> {
    u32::try_from(len).map_err(|_| {
        BackendError::Io(format!(
            "{} of {} bytes exceeds the record format limit of {} bytes",
            what,
            len,
            u32::MAX
        ))
    })
}

fn put_field(buf: &mut Vec<u8>, what: &str, field: &[u8]) -> BackendResult<()> {
    buf.extend_from_slice(&length_prefix(what, field.len())?.to_le_bytes());
    buf.extend_from_slice(field);
    Ok(())
}

/// Serialize one record including length prefix and checksum.
pub(crate) fn encode_record(key: &str, text: &[u8], blob: &[u8]) -> BackendResult<Vec<u8>> {
    let total = [key.len(), text.len(), blob.len()]
        .iter()
        .try_fold(MIN_RECORD_SIZE, |acc, len| acc.checked_add(*len))
        .unwrap_or(usize::MAX);
    let record_length = length_prefix("record", total)?;

    let mut buf = Vec::with_capacity(total);
    buf.extend_from_slice(&record_length.to_le_bytes());
    put_field(&mut buf, "key", key.as_bytes())?;
    put_field(&mut buf, "text column", text)?;
    put_field(&mut buf, "binary column", blob)?;

    let checksum = compute_checksum(&buf);
    buf.extend_from_slice(&checksum.to_le_bytes());
    Ok(buf)
}

fn read_field(cursor: &mut Cursor<&[u8]>) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    cursor.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as u64;

    let remaining = cursor.get_ref().len() as u64 - cursor.position();
    if len > remaining {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("field length {} exceeds remaining {} bytes", len, remaining),
        ));
    }

    let mut buf = vec![0u8; len as usize];
    cursor.read_exact(&mut buf)?;
    Ok(buf)
}

fn read_body(body: &[u8]) -> io::Result<(Vec<u8>, Vec<u8>, Vec<u8>)> {
    let mut cursor = Cursor::new(body);
    let key = read_field(&mut cursor)?;
    let text = read_field(&mut cursor)?;
    let blob = read_field(&mut cursor)?;

    if cursor.position() != body.len() as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "trailing bytes after binary column",
        ));
    }
    Ok((key, text, blob))
}

/// Parse and verify a record read from disk for `key`.
pub(crate) fn decode_record(key: &str, data: &[u8]) -> BackendResult<Record> {
    if data.len() < MIN_RECORD_SIZE {
        return Err(BackendError::corruption(
            key,
            format!("record too short: {} bytes", data.len()),
        ));
    }

    let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if record_length < MIN_RECORD_SIZE || record_length != data.len() {
        return Err(BackendError::corruption(
            key,
            format!(
                "record length {} does not match file size {}",
                record_length,
                data.len()
            ),
        ));
    }

    let checksum_offset = record_length - 4;
    let stored = u32::from_le_bytes([
        data[checksum_offset],
        data[checksum_offset + 1],
        data[checksum_offset + 2],
        data[checksum_offset + 3],
    ]);
    let computed = compute_checksum(&data[..checksum_offset]);
    if stored != computed {
        return Err(BackendError::corruption(
            key,
            format!(
                "checksum mismatch: computed {:08x}, stored {:08x}",
                computed, stored
            ),
        ));
    }

    let (stored_key, text, blob) = read_body(&data[4..checksum_offset])
        .map_err(|e| BackendError::corruption(key, format!("malformed body: {}", e)))?;

    if stored_key != key.as_bytes() {
        return Err(BackendError::corruption(key, "stored key does not match"));
    }

    let text = String::from_utf8(text)
        .map_err(|e| BackendError::corruption(key, format!("text column is not UTF-8: {}", e)))?;

    Ok(Record::new(key, text, blob))
}
