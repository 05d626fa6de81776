use std::io;
use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// Errors returned by [`Archiver`](crate::Archiver) operations.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// A source file or directory is missing, or is not the expected kind.
    #[error("Source not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Two inputs map to the same archive-relative name.
    #[error("Duplicate entry name: {0}")]
    DuplicateEntry(String),

    /// The archiver already ran an operation; each instance writes one archive.
    #[error("Archiver has already been used")]
    AlreadyArchived,

    #[error("Invalid entry name: {0:?}")]
    InvalidEntryName(String),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The ZIP writer rejected an entry for a reason other than I/O.
    #[error("ZIP error: {0}")]
    Zip(ZipError),
}

impl From<ZipError> for ArchiveError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(e) => ArchiveError::Io(e),
            other => ArchiveError::Zip(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
