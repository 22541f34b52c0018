//! File-backed progress storage.
//!
//! One JSON document in a well-known file stands in for the browser's
//! single local-storage key. `ProgressBook` in the core crate handles the
//! read-modify-write cycle; this backend only moves bytes.

use std::fs;
use std::io;
use std::path::PathBuf;

use mastery_core::ProgressStorage;

/// Progress payload persisted to a single file.
pub struct FileProgress {
    path: PathBuf,
}

impl FileProgress {
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ProgressStorage for FileProgress {
    type Error = io::Error;

    fn read(&self) -> Result<Option<String>, Self::Error> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&self, payload: &str) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mastery_core::ProgressBook;

    #[test]
    fn file_round_trip_preserves_sibling_seasons() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let book = ProgressBook::new(FileProgress::new(path.clone()));
        book.set_xp("DFT", 21_000).unwrap();
        book.set_xp("TDM", 4_000).unwrap();

        let reloaded = ProgressBook::new(FileProgress::new(path));
        assert_eq!(reloaded.xp_for("DFT").unwrap(), 21_000);
        assert_eq!(reloaded.xp_for("TDM").unwrap(), 4_000);
        assert_eq!(reloaded.xp_for("EOE").unwrap(), 0);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let book = ProgressBook::new(FileProgress::new(dir.path().join("absent.json")));
        assert!(book.load().unwrap().is_empty());
    }
}
