//! Reproducible ZIP archives from in-memory content, files, or directories.
//!
//! An [`Archiver`] writes exactly one archive. Each of its four operations
//! opens the output path, writes every entry in name order, finalizes the
//! central directory, and closes the file. After that the archiver is spent:
//! a second call fails with [`ArchiveError::AlreadyArchived`] instead of
//! merging into or silently replacing the first archive.
//!
//! If an operation fails after the output file was created, the partial file
//! is removed before the error is returned.

mod options;
mod sources;

pub use options::ArchiveOptions;

use log::{debug, trace, warn};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;

use crate::error::{ArchiveError, Result};
use sources::Entry;

/// Lifecycle of an [`Archiver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiverState {
    /// Constructed, nothing written yet
    Unopened,
    /// Output file is open and entries are being written
    Open,
    /// An operation ran (successfully or not); terminal
    Closed,
}

/// Writes one ZIP archive to a fixed output path.
///
/// Not internally synchronized: operations take `&mut self`.
///
/// ## Example
///
/// ```no_run
/// use zip_archiver::Archiver;
///
/// let mut archiver = Archiver::new("bundle.zip");
/// archiver.archive_content(b"This is some content", "content.txt")?;
/// # Ok::<(), zip_archiver::ArchiveError>(())
/// ```
#[derive(Debug)]
pub struct Archiver {
    path: PathBuf,
    options: ArchiveOptions,
    state: ArchiverState,
}

impl Archiver {
    /// Archiver with the default (reproducible) options.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, ArchiveOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: ArchiveOptions) -> Self {
        Self {
            path: path.into(),
            options,
            state: ArchiverState::Unopened,
        }
    }

    /// Output path of the archive.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    pub fn state(&self) -> ArchiverState {
        self.state
    }

    /// Archive `content` as a single entry called `name`.
    pub fn archive_content(&mut self, content: &[u8], name: &str) -> Result<()> {
        self.ensure_unopened()?;
        let result = self.write_archive(vec![Entry::borrowed(name, content)]);
        self.close(result)
    }

    /// Archive one file under its base name.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::NotFound`] if `path` is missing or not a regular file.
    pub fn archive_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.ensure_unopened()?;
        let result =
            sources::file_entry(path.as_ref()).and_then(|entry| self.write_archive(vec![entry]));
        self.close(result)
    }

    /// Archive every regular file below `dir`, named by its relative path.
    ///
    /// Entries are ordered by name. Directories produce no entries of their
    /// own, and neither do files matching [`ArchiveOptions::excludes`] or the
    /// output archive itself.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::NotFound`] if `dir` is missing or not a directory.
    pub fn archive_dir(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        self.ensure_unopened()?;
        let result = sources::dir_entries(dir.as_ref(), &self.options.excludes, Some(&self.path))
            .and_then(|entries| self.write_archive(entries));
        self.close(result)
    }

    /// Archive a batch of named blobs, one entry per pair, ordered by name.
    ///
    /// Any iterable of pairs works (`HashMap`, `BTreeMap`, `Vec`, ...). Input
    /// order never affects the output.
    ///
    /// # Errors
    ///
    /// [`ArchiveError::DuplicateEntry`] if a name appears twice.
    pub fn archive_multiple<I, K, V>(&mut self, content: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<[u8]>,
    {
        self.ensure_unopened()?;
        let pairs: Vec<(String, V)> = content.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let entries = pairs
            .iter()
            .map(|(name, data)| Entry::borrowed(name.as_str(), data.as_ref()))
            .collect();
        let result = self.write_archive(entries);
        self.close(result)
    }

    fn ensure_unopened(&self) -> Result<()> {
        match self.state {
            ArchiverState::Unopened => Ok(()),
            ArchiverState::Open | ArchiverState::Closed => Err(ArchiveError::AlreadyArchived),
        }
    }

    fn close(&mut self, result: Result<()>) -> Result<()> {
        self.state = ArchiverState::Closed;
        result
    }

    fn write_archive(&mut self, mut entries: Vec<Entry<'_>>) -> Result<()> {
        sources::order_entries(&mut entries)?;

        debug!(
            "writing {} entries to {}",
            entries.len(),
            self.path.display()
        );

        let file = File::create(&self.path)?;
        self.state = ArchiverState::Open;
        let partial = PartialOutput::new(&self.path);

        let mut writer = ZipWriter::new(BufWriter::new(file));
        for entry in &entries {
            // Name lengths are 16-bit fields in every header.
            if entry.name.len() > usize::from(u16::MAX) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("entry name is {} bytes long", entry.name.len()),
                )
                .into());
            }
            trace!("adding {} ({} bytes)", entry.name, entry.content.len());
            let options = self.options.entry_options(entry.content.len());
            writer.start_file(entry.name.as_str(), options)?;
            writer.write_all(&entry.content)?;
        }

        let file = writer.finish()?.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        let size = file.metadata()?.len();
        drop(file);

        partial.commit();
        debug!(
            "wrote {} ({} entries, {} bytes)",
            self.path.display(),
            entries.len(),
            size
        );
        Ok(())
    }
}

/// Removes the output file on drop unless the archive was committed.
struct PartialOutput {
    path: PathBuf,
    committed: bool,
}

impl PartialOutput {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(
                "failed to remove partial archive {}: {}",
                self.path.display(),
                e
            );
        }
    }
}
