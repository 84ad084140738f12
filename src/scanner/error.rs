// Wed Feb 04 2026 - Alex

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures the scanner absorbs. None of these abort a scan: the affected item
/// simply contributes no results and the error is logged.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),
    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl ScanError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        ScanError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn from_metadata(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            ScanError::PathNotFound(path.to_path_buf())
        } else {
            ScanError::io(path, source)
        }
    }
}
