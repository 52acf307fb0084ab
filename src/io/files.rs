// File probes shared by the line store and line sink

use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FileError {
    #[error("File not found")]
    NotFound,
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Invalid path")]
    InvalidPath,
    #[error("Is a directory")]
    IsADirectory,
    #[error("I/O error")]
    IoError,
}

impl From<io::Error> for FileError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FileError::NotFound,
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied,
            io::ErrorKind::InvalidInput => FileError::InvalidPath,
            _ => FileError::IoError,
        }
    }
}

/// Open `path` for reading, rejecting directories.
///
/// A directory opens fine on most platforms but fails on the first read,
/// so it is refused up front.
pub fn open_for_read(path: &Path) -> Result<fs::File, FileError> {
    let file = fs::File::open(path)?;
    if file.metadata()?.is_dir() {
        return Err(FileError::IsADirectory);
    }
    Ok(file)
}

/// Probe whether `path` can be opened for reading right now.
///
/// The handle is dropped before returning.
pub fn is_readable(path: &Path) -> bool {
    open_for_read(path).is_ok()
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}
