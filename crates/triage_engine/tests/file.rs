use std::fs;

use triage_core::{validate_candidate, ValidationError, MAX_FILE_BYTES};
use triage_engine::{load_candidate, LoadError};

#[test]
fn small_file_is_read_with_its_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Mail.TXT");
    fs::write(&path, "Dear team, the server is down.").unwrap();

    let handle = load_candidate(&path).unwrap();
    assert_eq!(handle.name(), "Mail.TXT");
    assert_eq!(handle.contents(), b"Dear team, the server is down.");
    assert_eq!(handle.size(), 30);
    assert!(validate_candidate(&handle).is_ok());
}

#[test]
fn oversized_file_is_not_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.pdf");
    let file = fs::File::create(&path).unwrap();
    file.set_len(MAX_FILE_BYTES + 1).unwrap();

    let handle = load_candidate(&path).unwrap();
    assert_eq!(handle.size(), MAX_FILE_BYTES + 1);
    assert!(handle.contents().is_empty());
    assert!(matches!(
        validate_candidate(&handle),
        Err(ValidationError::FileTooLarge { .. })
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_candidate(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("nope.txt"));
}

#[test]
fn directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_candidate(dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::NotAFile(_)));
}
