//! Opening file sources through the registry

use mtkeepmgr_core::connector::AcquireState;
use mtkeepmgr_core::ErrorKind;
use mtkeepmgr_source::open_source;
use std::io::Write;

#[test]
fn bare_path_opens_file_source() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(&[0x20, 0x76, 0x00, 0x01, 0xaa, 0xbb]).unwrap();

    let mut handle = open_source(f.path().to_str().unwrap()).unwrap();
    assert_eq!(handle.name(), "File");
    let image = handle.acquire().unwrap();
    assert_eq!(handle.state(), AcquireState::Acquired);
    assert_eq!(image.len(), 6);
    assert_eq!(image.chip_id(), 0x7620);
}

#[test]
fn prefixed_path_opens_file_source() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(&[0x01, 0x76]).unwrap();

    let source = format!("file:{}", f.path().display());
    let image = open_source(&source).unwrap().acquire().unwrap();
    assert_eq!(image.chip_id(), 0x7601);
}

#[test]
fn missing_file_fails_at_acquire() {
    let dir = tempfile::tempdir().unwrap();
    let source = format!("file:{}", dir.path().join("nope.bin").display());

    let mut handle = open_source(&source).unwrap();
    let err = handle.acquire().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(handle.state(), AcquireState::Failed);
}
