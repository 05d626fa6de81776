//! # zip-archiver
//!
//! Reproducible ZIP archives from in-memory content, single files,
//! directories, or batches of named blobs.
//!
//! Identical input always produces an identical byte stream: entries are
//! written in name order with a fixed timestamp, fixed permission bits and a
//! fixed compression level. A checksum of the archive is therefore a valid
//! regression oracle.
//!
//! ## Features
//!
//! - Archive a byte buffer, a file, a directory tree, or a name→bytes mapping
//! - STORED or DEFLATE entries, with configurable level, timestamp and mode
//! - Exclude patterns for directory archives
//! - Partial output is removed when an operation fails
//! - SHA-256/base64 archive checksums
//!
//! The container format itself is written by the [`zip`] crate.
//!
//! ## Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use zip_archiver::{Archiver, archive_checksum};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut blobs = HashMap::new();
//!     blobs.insert("file1.txt", b"This is file 1".to_vec());
//!     blobs.insert("file2.txt", b"This is file 2".to_vec());
//!
//!     let mut archiver = Archiver::new("bundle.zip");
//!     archiver.archive_multiple(blobs)?;
//!
//!     let archive = zip::ZipArchive::new(std::fs::File::open(archiver.path())?)?;
//!     for name in archive.file_names() {
//!         println!("{name}");
//!     }
//!
//!     println!("{}", archive_checksum(archiver.path())?);
//!     Ok(())
//! }
//! ```

pub mod archiver;
pub mod checksum;
pub mod error;

pub use archiver::{ArchiveOptions, Archiver, ArchiverState};
pub use checksum::{archive_checksum, checksum_bytes};
pub use error::{ArchiveError, Result};
pub use zip::{CompressionMethod, DateTime};
