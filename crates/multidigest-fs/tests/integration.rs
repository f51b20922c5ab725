use multidigest_fs::{AtomicWriteOptions, Error, atomic_read, atomic_write, read_to_string, write};
use tempfile::tempdir;

#[test]
fn test_atomic_write_basic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("metadata.xml.md5");

    atomic_write(&path, b"120ea8a25e5d487bf68b5f7096440019", AtomicWriteOptions::new()).unwrap();

    assert!(path.exists());
    assert_eq!(atomic_read(&path).unwrap(), b"120ea8a25e5d487bf68b5f7096440019");
}

#[test]
fn test_atomic_write_replaces_existing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("existing.sha1");

    std::fs::write(&path, "original").unwrap();

    atomic_write(&path, b"new content", AtomicWriteOptions::new()).unwrap();

    assert_eq!(read_to_string(&path).unwrap(), "new content");
}

#[test]
fn test_direct_write_and_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plain.md5");

    write(&path, b"abc").unwrap();
    write(&path, b"def").unwrap();

    assert_eq!(read_to_string(&path).unwrap(), "def");
}

#[test]
fn test_direct_write_into_missing_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope").join("plain.md5");

    match write(&path, b"abc") {
        Err(Error::Write { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected write error, got {other:?}"),
    }
}
