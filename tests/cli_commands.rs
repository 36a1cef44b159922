//! CLI Command Tests
//!
//! Runs commands through `run_command` against the memory backend.

use blobcheck::backend::BackendKind;
use blobcheck::cli::{run_command, CliErrorCode, Command, StorageArgs, DEFAULT_VALUE};

fn memory_args(max_blob_bytes: Option<usize>) -> StorageArgs {
    StorageArgs {
        backend: Some(BackendKind::Memory),
        max_blob_bytes,
        log_level: Some("error".to_string()),
        ..Default::default()
    }
}

#[test]
fn test_verify_faithful_backend_succeeds() {
    let cmd = Command::Verify {
        key: Some("u1".to_string()),
        value: DEFAULT_VALUE.to_string(),
        fail_on_mismatch: true,
        storage: memory_args(None),
    };
    run_command(cmd).unwrap();
}

#[test]
fn test_mismatch_fails_only_when_asked() {
    let lenient = Command::Verify {
        key: Some("u1".to_string()),
        value: DEFAULT_VALUE.to_string(),
        fail_on_mismatch: false,
        storage: memory_args(Some(10)),
    };
    run_command(lenient).unwrap();

    let strict = Command::Verify {
        key: Some("u1".to_string()),
        value: DEFAULT_VALUE.to_string(),
        fail_on_mismatch: true,
        storage: memory_args(Some(10)),
    };
    let err = run_command(strict).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::Mismatch);
}

#[test]
fn test_invalid_log_level_is_config_error() {
    let cmd = Command::Verify {
        key: None,
        value: "x".to_string(),
        fail_on_mismatch: false,
        storage: StorageArgs {
            log_level: Some("chatty".to_string()),
            ..memory_args(None)
        },
    };
    let err = run_command(cmd).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::ConfigError);
}

#[test]
fn test_encode_command() {
    run_command(Command::Encode {
        value: "Ms. Foo Bar".to_string(),
    })
    .unwrap();
}

#[test]
fn test_inspect_missing_key_is_error() {
    let cmd = Command::Inspect {
        key: "nobody".to_string(),
        storage: memory_args(None),
    };
    let err = run_command(cmd).unwrap_err();
    assert_eq!(err.code(), &CliErrorCode::BackendError);
    assert!(err.to_string().contains("BLOBCHECK_NOT_FOUND"));
}

#[test]
fn test_inspect_after_verify_on_file_backend() {
    let temp = tempfile::TempDir::new().unwrap();
    let storage = StorageArgs {
        backend: Some(BackendKind::File),
        data_dir: Some(temp.path().to_path_buf()),
        log_level: Some("error".to_string()),
        ..Default::default()
    };

    run_command(Command::Verify {
        key: Some("u1".to_string()),
        value: DEFAULT_VALUE.to_string(),
        fail_on_mismatch: true,
        storage: storage.clone(),
    })
    .unwrap();

    run_command(Command::Inspect {
        key: "u1".to_string(),
        storage,
    })
    .unwrap();
}
