use std::fs;

use crawldash_engine::{ensure_state_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_state_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("state");
    assert!(!new_dir.exists());
    ensure_state_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let first = writer.write("state.ron", "(server_url: \"a\")").unwrap();
    assert_eq!(first.file_name().unwrap(), "state.ron");

    let second = writer.write("state.ron", "(server_url: \"b\")").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "(server_url: \"b\")");
}

#[test]
fn file_in_place_of_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("state.ron", "data").is_err());
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "x");
}
