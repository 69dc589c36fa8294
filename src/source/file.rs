//! Read-once file source.

use crate::model::SourceError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// File source that loads all lines at construction and delivers them on
/// the first drain.
///
/// Files are treated as a complete recording of the stream: no tailing, no
/// liveness. Replaying at original arrival rates is out of scope.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    pending: Vec<String>,
}

impl FileSource {
    /// Open and read the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::FileNotFound` if the file does not exist and
    /// `SourceError::Io` for other read failures.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SourceError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let reader = BufReader::new(File::open(path)?);
        let pending = reader.lines().collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            pending,
        })
    }

    /// Path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take all pending lines. Returns everything on the first call and an
    /// empty vector afterwards.
    pub fn drain_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }
}
