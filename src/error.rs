//! Conditions that end a run early.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a run can stop before printing its report.
///
/// Usage conditions carry the offending value so it can be logged; the
/// user-facing text comes from the message catalog via [`message_key`].
///
/// [`message_key`]: DirstatError::message_key
#[derive(Error, Debug)]
pub enum DirstatError {
    /// The path expression matched nothing, or no value was given
    #[error("no entries match path expression '{0}'")]
    BadPath(String),

    /// Unknown sort key
    #[error("unrecognized sort key '{0}'")]
    BadSort(String),

    /// Threshold is not a non-negative number
    #[error("threshold '{0}' is not a non-negative number")]
    BadThreshold(String),

    /// Locale tag failed validation
    #[error("invalid locale '{0}'")]
    BadLocale(String),

    /// Help was requested explicitly
    #[error("help requested")]
    Help,

    /// Arguments the parser does not know
    #[error("unrecognized arguments: {0}")]
    Unrecognized(String),

    /// A matched path could not be stat'ed or resolved
    #[error("cannot read '{path}': {source}")]
    StatFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the report failed
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl DirstatError {
    /// Catalog key of the localized message, or `None` when the raw error
    /// text is shown instead.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            DirstatError::BadPath(_) => Some("BAD_PATH"),
            DirstatError::BadSort(_) => Some("BAD_SORT"),
            DirstatError::BadThreshold(_) => Some("BAD_THRESHOLD"),
            DirstatError::BadLocale(_) => Some("BAD_LOCALE"),
            DirstatError::Help | DirstatError::Unrecognized(_) => Some("H"),
            DirstatError::StatFailure { .. } | DirstatError::Output(_) => None,
        }
    }

    /// Process exit code: 0 for explicit help, 1 for I/O, 2 for usage.
    pub fn exit_code(&self) -> u8 {
        match self {
            DirstatError::Help => 0,
            DirstatError::StatFailure { .. } | DirstatError::Output(_) => 1,
            _ => 2,
        }
    }
}

impl From<clap::Error> for DirstatError {
    fn from(err: clap::Error) -> Self {
        DirstatError::Unrecognized(format!("{:?}", err.kind()))
    }
}
