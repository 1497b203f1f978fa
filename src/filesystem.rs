//! File enumeration and document loading
//!
//! The parser never touches `std::fs` directly. It reads documents and
//! expands filter wildcards through the [`FileSystem`] trait, which has a
//! disk-backed implementation ([`DiskFS`]) for the binary and an in-memory
//! one ([`MemoryFS`]) for tests and embedding.
//!
//! ## Wildcards
//!
//! A filter pattern is split into a directory part and a file-name part:
//! `sub/*.cpp` searches `root/sub` for names matching `*.cpp`. Only the
//! file-name part may contain wildcards. Name matching ignores ASCII case,
//! mirroring the Windows tooling the generated projects target. A search
//! directory that does not exist is reported as [`std::io::ErrorKind::NotFound`].

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::error::Result;
use crate::path;

/// Source of documents and file listings
pub trait FileSystem: Sync {
    /// Read a whole document as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Files under `root` matching `pattern`, sorted by path.
    ///
    /// With `recursive` set, subdirectories of the search directory are
    /// searched as well.
    fn find_files(&self, root: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>>;
}

const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Split a filter pattern into its search directory and file-name matcher.
fn split_pattern(root: &Path, pattern: &str) -> Result<(PathBuf, Pattern)> {
    let pattern = path::from_document(pattern);
    let name = pattern
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "*".to_string());
    let dir = match pattern.parent() {
        Some(parent) => path::normalize(&root.join(parent)),
        None => path::normalize(root),
    };
    Ok((dir, wildcard(&name)?))
}

/// Only `*` and `?` are wildcards in a filter file name; brackets are literal.
fn wildcard(name: &str) -> Result<Pattern> {
    let mut text = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '[' | ']' => text.push_str(&Pattern::escape(&c.to_string())),
            other => text.push(other),
        }
    }
    Ok(Pattern::new(&text)?)
}

fn not_found(dir: &Path) -> crate::error::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("directory not found: {}", dir.display()),
    )
    .into()
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFS;

impl FileSystem for DiskFS {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn find_files(&self, root: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
        let (dir, matcher) = split_pattern(root, pattern)?;
        if !dir.is_dir() {
            return Err(not_found(&dir));
        }

        let walker = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(if recursive { usize::MAX } else { 1 })
            .sort_by_file_name();

        let mut matches = Vec::new();
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if matcher.matches_with(&name, NAME_MATCH) {
                matches.push(path::normalize(entry.path()));
            }
        }
        matches.sort();
        Ok(matches)
    }
}

/// In-memory filesystem holding text files keyed by absolute path
#[derive(Debug, Clone, Default)]
pub struct MemoryFS {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFS {
    /// Create a new empty filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, content: &str) {
        self.files
            .insert(path::normalize(path.as_ref()), content.to_string());
    }

    /// Builder form of [`add_file`](Self::add_file)
    pub fn with_file<P: AsRef<Path>>(mut self, path: P, content: &str) -> Self {
        self.add_file(path, content);
        self
    }

    /// Check if a file exists
    pub fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        self.files.contains_key(path.as_ref())
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if filesystem is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn has_directory(&self, dir: &Path) -> bool {
        self.files.keys().any(|p| p.starts_with(dir) && p != dir)
    }
}

impl FileSystem for MemoryFS {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .get(&path::normalize(path))
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("file not found: {}", path.display()),
                )
            })
    }

    fn find_files(&self, root: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>> {
        let (dir, matcher) = split_pattern(root, pattern)?;
        if !self.has_directory(&dir) {
            return Err(not_found(&dir));
        }

        let mut matches = Vec::new();
        for file in self.files.keys() {
            let Ok(rest) = file.strip_prefix(&dir) else {
                continue;
            };
            if !recursive && rest.components().count() != 1 {
                continue;
            }
            let Some(name) = file.file_name() else {
                continue;
            };
            if matcher.matches_with(&name.to_string_lossy(), NAME_MATCH) {
                matches.push(file.clone());
            }
        }
        Ok(matches)
    }
}
