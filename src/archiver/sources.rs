//! Turning caller input into an ordered list of archive entries.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Component, Path};
use walkdir::WalkDir;

use crate::error::{ArchiveError, Result};

/// One named unit of content bound for the archive.
#[derive(Debug)]
pub(crate) struct Entry<'a> {
    pub name: String,
    pub content: Cow<'a, [u8]>,
}

impl<'a> Entry<'a> {
    pub fn borrowed(name: impl Into<String>, content: &'a [u8]) -> Self {
        Self {
            name: name.into(),
            content: Cow::Borrowed(content),
        }
    }

    pub fn owned(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content: Cow::Owned(content),
        }
    }
}

/// Sort entries by name and reject invalid or repeated names.
pub(crate) fn order_entries(entries: &mut [Entry<'_>]) -> Result<()> {
    if let Some(entry) = entries.iter().find(|e| !is_valid_name(&e.name)) {
        return Err(ArchiveError::InvalidEntryName(entry.name.clone()));
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    if let Some(pair) = entries.windows(2).find(|w| w[0].name == w[1].name) {
        return Err(ArchiveError::DuplicateEntry(pair[0].name.clone()));
    }
    Ok(())
}

/// A relative `/`-separated file name: not empty, not rooted, no
/// backslashes, no `.`/`..` or empty segments, no trailing `/`.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('/')
        && !name.contains('\\')
        && name.split('/').all(|part| !matches!(part, "" | "." | ".."))
}

/// Read a single regular file into an entry named by its base name.
pub(crate) fn file_entry(path: &Path) -> Result<Entry<'static>> {
    let meta = fs::metadata(path).map_err(|e| not_found_or_io(e, path))?;
    if !meta.is_file() {
        return Err(ArchiveError::NotFound(path.to_path_buf()));
    }

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| ArchiveError::InvalidEntryName(path.display().to_string()))?;

    let content = fs::read(path).map_err(|e| not_found_or_io(e, path))?;
    Ok(Entry::owned(name, content))
}

/// Collect every regular file below `root`, named by its `/`-separated path
/// relative to `root` and sorted by that name.
///
/// Files matching `excludes` are skipped, as is `skip` (the archive being
/// written, when it lives inside `root`).
pub(crate) fn dir_entries(
    root: &Path,
    excludes: &[String],
    skip: Option<&Path>,
) -> Result<Vec<Entry<'static>>> {
    let meta = fs::metadata(root).map_err(|e| not_found_or_io(e, root))?;
    if !meta.is_dir() {
        return Err(ArchiveError::NotFound(root.to_path_buf()));
    }

    let skip = skip.and_then(|p| fs::canonicalize(p).ok());

    let mut files = Vec::new();
    for item in WalkDir::new(root).min_depth(1) {
        let item = item?;
        if !item.file_type().is_file() {
            continue;
        }

        let Ok(relative) = item.path().strip_prefix(root) else {
            continue;
        };
        let name = entry_name(relative);
        if is_excluded(&name, excludes) {
            continue;
        }
        if let Some(skip) = &skip {
            if fs::canonicalize(item.path()).is_ok_and(|p| p == *skip) {
                continue;
            }
        }

        files.push((name, item.into_path()));
    }

    // Directory listing order is unspecified; names decide.
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let mut entries = Vec::with_capacity(files.len());
    for (name, path) in files {
        let content = fs::read(&path)?;
        entries.push(Entry::owned(name, content));
    }
    Ok(entries)
}

/// Join the normal components of a relative path with `/`.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|pattern| {
        if has_glob_chars(pattern) {
            glob_match(pattern, name)
        } else {
            let pattern = pattern.trim_end_matches('/');
            name == pattern
                || name
                    .strip_prefix(pattern)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
    })
}

fn not_found_or_io(err: io::Error, path: &Path) -> ArchiveError {
    if err.kind() == io::ErrorKind::NotFound {
        ArchiveError::NotFound(path.to_path_buf())
    } else {
        ArchiveError::Io(err)
    }
}

/// Check if a pattern contains glob wildcard characters.
fn has_glob_chars(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Simple glob pattern matching supporting `*` and `?` wildcards.
///
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let text_chars: Vec<char> = text.chars().collect();

    fn do_match(pattern: &[char], text: &[char]) -> bool {
        match (pattern.first(), text.first()) {
            (None, None) => true,
            // Star: skip it, or let it swallow one more character
            (Some('*'), _) => {
                do_match(&pattern[1..], text) || (!text.is_empty() && do_match(pattern, &text[1..]))
            }
            (Some('?'), Some(_)) => do_match(&pattern[1..], &text[1..]),
            (Some(p), Some(t)) if *p == *t => do_match(&pattern[1..], &text[1..]),
            _ => false,
        }
    }

    do_match(&pattern_chars, &text_chars)
}
