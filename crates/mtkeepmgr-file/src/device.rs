//! Dump file connector implementation

use crate::error::{FileError, Result};
use log::{debug, warn};
use mtkeepmgr_core::connector::{AcquireState, Connector};
use mtkeepmgr_core::image::{fit_length, EepromImage};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for a dump file source
#[derive(Debug, Clone)]
pub struct FileConfig {
    /// Path of the raw EEPROM dump
    pub path: PathBuf,
}

impl FileConfig {
    /// Create a configuration for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Raw EEPROM dump file
///
/// The file is opened on [`Connector::acquire`] and held until
/// [`Connector::release`]. Empty files are rejected. Files larger than the
/// image buffer are truncated and odd-sized files lose their last byte; both
/// only produce a warning.
pub struct FileConnector {
    path: PathBuf,
    file: Option<File>,
    state: AcquireState,
}

impl FileConnector {
    /// Create a connector for the file named in `config`
    pub fn new(config: &FileConfig) -> Self {
        Self {
            path: config.path.clone(),
            file: None,
            state: AcquireState::Unacquired,
        }
    }

    /// Path of the dump file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True while the file handle is held
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&mut self, image: &mut EepromImage) -> Result<()> {
        let mut file = File::open(&self.path).map_err(|source| FileError::Open {
            path: self.display_path(),
            source,
        })?;

        let size = file
            .metadata()
            .map_err(|source| FileError::Stat {
                path: self.display_path(),
                source,
            })?
            .len();
        if size == 0 {
            return Err(FileError::Empty {
                path: self.display_path(),
            });
        }

        let (len, adjustment) = fit_length(size);
        if let Some(adjustment) = adjustment {
            warn!("{}", adjustment);
        }
        debug!("Reading {} of {} bytes from '{}'", len, size, self.path.display());

        let read = file.read_exact(&mut image.buffer_mut()[..len]);
        // Keep the handle so release() has something to close
        self.file = Some(file);
        read.map_err(|source| FileError::Read {
            path: self.display_path(),
            source,
        })?;

        image.set_len(len);
        Ok(())
    }
}

impl Connector for FileConnector {
    fn name(&self) -> &'static str {
        "File"
    }

    fn acquire(&mut self, image: &mut EepromImage) -> mtkeepmgr_core::Result<()> {
        self.state = AcquireState::Acquiring;
        match self.load(image) {
            Ok(()) => {
                self.state = AcquireState::Acquired;
                Ok(())
            }
            Err(e) => {
                self.state = AcquireState::Failed;
                Err(e.into())
            }
        }
    }

    fn release(&mut self) {
        if self.file.take().is_some() {
            debug!("Closed '{}'", self.path.display());
        }
    }

    fn state(&self) -> AcquireState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtkeepmgr_core::ErrorKind;
    use std::io::Write;

    fn dump(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(bytes).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn test_acquire_whole_file() {
        let f = dump(&[0x10, 0x76, 0x02, 0x01]);
        let mut conn = FileConnector::new(&FileConfig::new(f.path()));
        let mut image = EepromImage::new();

        conn.acquire(&mut image).unwrap();
        assert_eq!(conn.state(), AcquireState::Acquired);
        assert!(conn.is_open());
        assert_eq!(image.len(), 4);
        assert_eq!(image.chip_id(), 0x7610);

        conn.release();
        assert!(!conn.is_open());
        conn.release();
    }

    #[test]
    fn test_odd_size_drops_last_byte() {
        let f = dump(&[1, 2, 3, 4, 5]);
        let mut conn = FileConnector::new(&FileConfig::new(f.path()));
        let mut image = EepromImage::new();
        conn.acquire(&mut image).unwrap();
        assert_eq!(image.len(), 4);
        assert_eq!(image.read_word(4), 0xffff);
    }

    #[test]
    fn test_oversized_file_truncated() {
        let f = dump(&vec![0x5a; 0x1800]);
        let mut conn = FileConnector::new(&FileConfig::new(f.path()));
        let mut image = EepromImage::new();
        conn.acquire(&mut image).unwrap();
        assert_eq!(image.len(), image.capacity());
    }

    #[test]
    fn test_empty_file() {
        let f = dump(&[]);
        let mut conn = FileConnector::new(&FileConfig::new(f.path()));
        let mut image = EepromImage::new();

        let err = conn.acquire(&mut image).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("input file is empty"));
        assert_eq!(conn.state(), AcquireState::Failed);
        assert!(!conn.is_open());
        assert!(image.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");
        let mut conn = FileConnector::new(&FileConfig::new(&path));
        let mut image = EepromImage::new();

        let err = conn.acquire(&mut image).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("unable to open dump file"));
        assert_eq!(conn.state(), AcquireState::Failed);
        assert!(!conn.is_open());
        conn.release();
    }
}
