use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime};

/// Settings shared by every entry an [`Archiver`](super::Archiver) writes.
///
/// The defaults are fixed values, never taken from the clock or the source
/// files, so two archivers with default options produce identical bytes for
/// identical input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Compression method for every entry (default: DEFLATE)
    pub compression: CompressionMethod,
    /// DEFLATE level, 1..=9 (default: 6). Ignored for STORED entries.
    pub compression_level: u32,
    /// Modification time stamped on every entry (default: 1981-01-01 00:00:00)
    pub modified: DateTime,
    /// Unix permission bits stamped on every entry (default: 0o644)
    pub file_mode: u32,
    /// Patterns excluded from directory archives.
    ///
    /// Matched against the `/`-separated relative name. `*` matches any run of
    /// characters (including `/`), `?` a single character. A pattern without
    /// wildcards also excludes everything below a directory of that name.
    pub excludes: Vec<String>,
}

/// 1981-01-01 00:00:00
fn default_modified() -> DateTime {
    DateTime::from_date_and_time(1981, 1, 1, 0, 0, 0).unwrap_or_default()
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
            compression_level: 6,
            modified: default_modified(),
            file_mode: 0o644,
            excludes: Vec::new(),
        }
    }
}

impl ArchiveOptions {
    pub fn with_compression(mut self, compression: CompressionMethod) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.clamp(1, 9);
        self
    }

    /// Stamp entries with `modified`.
    ///
    /// [`DateTime`] only holds values the DOS format can represent
    /// (1980..=2107), so an out-of-range time is rejected where it is built.
    pub fn with_modified(mut self, modified: DateTime) -> Self {
        self.modified = modified;
        self
    }

    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode & 0o777;
        self
    }

    pub fn with_excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Per-entry options for the ZIP writer.
    ///
    /// ZIP64 is enabled only for entries past the 4 GiB limit.
    pub(crate) fn entry_options(&self, size: usize) -> SimpleFileOptions {
        let level = match self.compression {
            CompressionMethod::Stored => None,
            _ => Some(i64::from(self.compression_level.clamp(1, 9))),
        };
        SimpleFileOptions::default()
            .compression_method(self.compression)
            .compression_level(level)
            .last_modified_time(self.modified)
            .unix_permissions(self.file_mode & 0o777)
            .large_file(size as u64 >= u64::from(u32::MAX))
    }
}
