//! Data structures representing matched files with their sizes.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::path::PathBuf;

/// A regular file that passed the size threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path as produced by pattern expansion (may be relative)
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
}

impl FileRecord {
    /// Create a new FileRecord
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// The record's name, the path rendered as a string
    pub fn name(&self) -> Cow<'_, str> {
        self.path.to_string_lossy()
    }

    /// Final path component, falling back to the whole name
    pub fn file_name(&self) -> Cow<'_, str> {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => self.name(),
        }
    }
}

/// Collection of records with scan statistics
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Records at or above the threshold
    pub records: Vec<FileRecord>,
    /// Regular files produced by the pattern
    pub matched: u64,
    /// Regular files below the threshold
    pub skipped: u64,
    /// Directories the enumerator could not read
    pub unreadable: u64,
}

impl ScanResult {
    /// Create a new empty ScanResult
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing passed the threshold
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sort records in place. The sort is stable, so a comparator that
    /// returns `Equal` leaves discovery order untouched.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: Fn(&FileRecord, &FileRecord) -> Ordering,
    {
        self.records.sort_by(compare);
    }
}
