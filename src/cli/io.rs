//! JSON output for CLI
//!
//! - Output: one JSON object per command on stdout
//! - Logs go to stderr and never mix with responses

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_value(&mut io::stdout(), &ok_envelope(data))
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    write_value(&mut io::stdout(), &error_envelope(code, message))
}

fn ok_envelope(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

fn error_envelope(code: &str, message: &str) -> Value {
    serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    })
}

fn write_value<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_single_line() {
        let mut buf = Vec::new();
        write_value(&mut buf, &ok_envelope(serde_json::json!({"binary_match": true}))).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"]["binary_match"], true);
    }

    #[test]
    fn test_error_envelope() {
        let value = error_envelope("BLOBCHECK_NOT_FOUND", "Record not found: u1");
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "BLOBCHECK_NOT_FOUND");
    }
}
