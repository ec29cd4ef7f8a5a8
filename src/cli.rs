//! Command-line argument parsing and validation into a [`Config`].
//!
//! clap only recognizes the flags. Every value is optional at that level, so
//! a flag given without its value reaches [`Config::from_args`] and is
//! reported with that flag's own condition instead of a generic clap error.
//! Flag names are matched case-insensitively (`-P`, `--PATH`), except `-V`,
//! which stays clap's version flag.

use crate::compare::SortKey;
use crate::error::DirstatError;
use crate::format::NumberLocale;
use crate::i18n::{LocaleTag, Localization};
use crate::resolver::{self, DEFAULT_PATTERN};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::ffi::OsString;

/// Canonical spellings of every flag name
const FLAG_SPELLINGS: &[&str] = &[
    "-p",
    "--path",
    "-s",
    "--sort",
    "-m",
    "--metric",
    "-t",
    "--threshold",
    "-l",
    "--localization",
    "-h",
    "--help",
    "--version",
];

/// List the files above a size threshold.
///
/// Searches a path or glob pattern and prints each matching file with its
/// size, optionally sorted.
#[derive(Parser, Debug, Default)]
#[command(name = "dirstat")]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true, allow_negative_numbers = true, args_override_self = true)]
pub struct Args {
    /// Path or glob pattern to search (a single directory is searched recursively)
    #[arg(short, long, value_name = "EXPR", num_args = 0..=1)]
    pub path: Option<Option<String>>,

    /// Sort order: alpha, exten or size
    #[arg(short, long, value_name = "KEY", num_args = 0..=1)]
    pub sort: Option<Option<String>>,

    /// Show sizes in binary units (KiB, MiB, GiB)
    #[arg(short, long)]
    pub metric: bool,

    /// Minimum file size in bytes
    #[arg(short, long, value_name = "BYTES", num_args = 0..=1)]
    pub threshold: Option<Option<String>>,

    /// Language and number format, as lang-REGION
    #[arg(short, long, value_name = "LANG-REGION", num_args = 0..=1)]
    pub localization: Option<Option<String>>,

    /// Show the localized help
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub help: bool,
}

impl Args {
    /// Parse an argument vector; unknown arguments become
    /// [`DirstatError::Unrecognized`]. `--version` prints and exits here.
    pub fn try_parse_args<I, T>(argv: I) -> Result<Self, DirstatError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv = argv.into_iter().map(Into::into).map(normalize_flag);
        Self::try_parse_from(argv).map_err(|err| {
            if err.kind() == ErrorKind::DisplayVersion {
                err.exit();
            }
            log::debug!("argument error: {:?}", err.kind());
            DirstatError::from(err)
        })
    }
}

/// Validated run configuration, read-only once built
#[derive(Debug, Clone)]
pub struct Config {
    /// Pattern handed to discovery
    pub pattern: String,
    /// Report order
    pub sort: SortKey,
    /// Binary-unit size rendering
    pub metric: bool,
    /// Minimum size in bytes
    pub threshold: f64,
    /// Locale of the message catalog
    pub locale: LocaleTag,
    /// Number formatting conventions
    pub number_locale: NumberLocale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            sort: SortKey::None,
            metric: false,
            threshold: 0.0,
            locale: LocaleTag::default(),
            number_locale: NumberLocale::default(),
        }
    }
}

impl Config {
    /// Validate parsed arguments.
    ///
    /// The locale is applied first so later conditions are reported in the
    /// requested language; `l10n` keeps its previous state if it is invalid.
    pub fn from_args(args: Args, l10n: &mut Localization) -> Result<Self, DirstatError> {
        if let Some(raw) = args.localization {
            let raw = raw.ok_or_else(|| DirstatError::BadLocale(String::new()))?;
            l10n.adopt(&raw)?;
        }

        if args.help {
            return Err(DirstatError::Help);
        }

        let pattern = match args.path {
            None => DEFAULT_PATTERN.to_string(),
            Some(expr) => {
                let expr = expr.ok_or_else(|| DirstatError::BadPath(String::new()))?;
                resolver::resolve(&expr)?
            }
        };

        let sort = match args.sort {
            None => SortKey::None,
            Some(key) => key.unwrap_or_default().parse()?,
        };

        let threshold = match args.threshold {
            None => 0.0,
            Some(raw) => parse_threshold(&raw.unwrap_or_default())?,
        };

        Ok(Self {
            pattern,
            sort,
            metric: args.metric,
            threshold,
            locale: l10n.catalog.locale().clone(),
            number_locale: l10n.numbers.clone(),
        })
    }
}

/// Lowercase `arg` when it is a differently cased flag name, keeping any
/// `=value` suffix as written. Values and unknown tokens pass through.
fn normalize_flag(arg: OsString) -> OsString {
    let Some(text) = arg.to_str() else {
        return arg;
    };
    if !text.starts_with('-') || text == "-V" {
        return arg;
    }

    let (name, value) = match text.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (text, None),
    };
    let lowered = name.to_ascii_lowercase();
    if lowered == name || !FLAG_SPELLINGS.contains(&lowered.as_str()) {
        return arg;
    }

    match value {
        Some(value) => format!("{lowered}={value}").into(),
        None => lowered.into(),
    }
}

/// A finite, non-negative number of bytes
fn parse_threshold(raw: &str) -> Result<f64, DirstatError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(DirstatError::BadThreshold(raw.to_string())),
    }
}
