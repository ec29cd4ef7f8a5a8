//! dirstat: list the files above a size threshold.
//!
//! Resolves a path expression, finds every regular file it covers, drops
//! those below the threshold and prints the rest with their sizes, sorted
//! and formatted according to the command line.

mod cli;
mod compare;
mod display;
mod error;
mod format;
mod i18n;
mod node;
mod resolver;
mod scanner;

use cli::{Args, Config};
use display::Display;
use error::DirstatError;
use i18n::{LOCALE_DIR_ENV, Localization};
use scanner::Scanner;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let catalog_dir = std::env::var_os(LOCALE_DIR_ENV).map(PathBuf::from);
    let mut l10n = Localization::seeded(catalog_dir, i18n::env_locale().as_deref());

    match run(&mut l10n) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, &l10n);
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(l10n: &mut Localization) -> Result<(), DirstatError> {
    let args = Args::try_parse_args(std::env::args_os())?;
    let config = Config::from_args(args, l10n)?;
    log::debug!(
        "pattern '{}', messages {}, numbers {}",
        config.pattern,
        config.locale,
        config.number_locale.tag()
    );

    let mut scanner = Scanner::new().with_threshold(config.threshold);
    if std::io::stderr().is_terminal() {
        scanner = scanner.with_progress(l10n.message("SCANNING"));
    }

    let mut result = scanner.scan(&config.pattern)?;

    if result.is_empty() {
        println!("{}", l10n.message("TOO_BIG_THRESHOLD"));
        return Ok(());
    }

    Display::new(&config).print_results(&mut result)
}

/// Print the condition's message followed by the usage text
fn report(err: &DirstatError, l10n: &Localization) {
    log::debug!("{err}");

    let message = match err.message_key() {
        Some(key) => l10n.message(key).to_string(),
        None => err.to_string(),
    };

    if matches!(err, DirstatError::Help) {
        println!("{message}");
        println!("{}", l10n.usage());
    } else {
        eprintln!("{message}");
        eprintln!("{}", l10n.usage());
    }
}
