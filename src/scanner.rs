//! File discovery and threshold filtering.

use crate::error::DirstatError;
use crate::node::{FileRecord, ScanResult};
use crate::resolver::match_options;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::time::Duration;

/// Scanner configuration
#[derive(Default)]
pub struct Scanner {
    /// Minimum size in bytes for a file to be kept
    pub threshold: f64,
    /// Spinner label shown while scanning
    pub progress_message: String,
    /// Whether to draw the spinner at all
    pub show_progress: bool,
}

impl Scanner {
    /// Create a new Scanner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Show a spinner labelled `message` during the scan
    pub fn with_progress(mut self, message: impl Into<String>) -> Self {
        self.progress_message = message.into();
        self.show_progress = true;
        self
    }

    /// Expand `pattern` and keep the regular files at or above the threshold.
    ///
    /// Any file that cannot be stat'ed aborts the scan.
    pub fn scan(&self, pattern: &str) -> Result<ScanResult, DirstatError> {
        let pb = if self.show_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(self.progress_message.clone());

        let outcome = self.collect(pattern, &pb);

        // The spinner must be gone before anything is printed
        pb.finish_and_clear();
        outcome
    }

    fn collect(&self, pattern: &str, pb: &ProgressBar) -> Result<ScanResult, DirstatError> {
        let paths = glob::glob_with(pattern, match_options()).map_err(|err| {
            log::debug!("invalid pattern '{pattern}': {err}");
            DirstatError::BadPath(pattern.to_string())
        })?;

        let mut result = ScanResult::new();

        for entry in paths {
            let path = match entry {
                Ok(path) => path,
                Err(err) => {
                    log::warn!("skipping unreadable {}: {}", err.path().display(), err.error());
                    result.unreadable += 1;
                    continue;
                }
            };

            let metadata = fs::metadata(&path).map_err(|source| DirstatError::StatFailure {
                path: path.clone(),
                source,
            })?;
            if !metadata.is_file() {
                continue;
            }

            result.matched += 1;
            if result.matched % 256 == 0 {
                pb.set_message(format!("{} ({})", self.progress_message, result.matched));
            }

            let size = metadata.len();
            if (size as f64) < self.threshold {
                result.skipped += 1;
                continue;
            }
            result.records.push(FileRecord::new(path, size));
        }

        log::debug!(
            "pattern '{}': {} files, {} below threshold, {} unreadable",
            pattern,
            result.matched,
            result.skipped,
            result.unreadable
        );
        Ok(result)
    }
}
