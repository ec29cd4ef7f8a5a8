//! Turns a user path expression into the pattern discovery expands.
//!
//! The expression is probed once, non-recursively, to learn how many entries
//! it names. A lone directory (or `.`) means "everything under it", which
//! the enumerator can only express as a recursive pattern; anything else is
//! an explicit file list or glob and is kept as written.
//!
//! Wildcards never match a leading `.`, so hidden files and directories are
//! only reached when the expression names them literally.

use crate::error::DirstatError;
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{MAIN_SEPARATOR, PathBuf};

/// Shorthand for the working directory
pub const CURRENT_DIR: &str = ".";

/// Pattern used when no path is given
pub const DEFAULT_PATTERN: &str = "./**/*";

/// Matching rules shared by resolution and discovery
pub fn match_options() -> MatchOptions {
    MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    }
}

/// Resolve `expr` into the pattern to enumerate
pub fn resolve(expr: &str) -> Result<String, DirstatError> {
    let matches = probe(expr)?;
    log::debug!("path '{expr}' matches {} entries", matches.len());

    if matches.is_empty() {
        return Err(DirstatError::BadPath(expr.to_string()));
    }

    if expr == CURRENT_DIR {
        return Ok(recursive(expr));
    }

    if let [only] = matches.as_slice() {
        let metadata =
            fs::metadata(only).map_err(|_| DirstatError::BadPath(expr.to_string()))?;
        if metadata.is_dir() {
            return Ok(recursive(&Pattern::escape(&only.to_string_lossy())));
        }
    }

    Ok(expr.to_string())
}

/// Non-recursive expansion of `expr`. Unreadable entries are dropped.
fn probe(expr: &str) -> Result<Vec<PathBuf>, DirstatError> {
    let paths = glob::glob_with(expr, match_options()).map_err(|err| {
        log::debug!("invalid path pattern '{expr}': {err}");
        DirstatError::BadPath(expr.to_string())
    })?;

    Ok(paths.filter_map(Result::ok).collect())
}

/// Pattern matching every descendant of `base`
pub fn recursive(base: &str) -> String {
    if base.ends_with('/') || base.ends_with(MAIN_SEPARATOR) {
        format!("{base}**/*")
    } else {
        format!("{base}/**/*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn pattern_for(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_current_dir_is_always_recursive() {
        assert_eq!(resolve(".").unwrap(), "./**/*");
    }

    #[test]
    fn test_single_directory_becomes_recursive() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let resolved = resolve(&pattern_for(&sub)).unwrap();
        assert_eq!(resolved, format!("{}/**/*", Pattern::escape(&pattern_for(&sub))));
    }

    #[test]
    fn test_single_directory_via_glob() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("only_dir")).unwrap();

        let expr = format!("{}/only_*", Pattern::escape(&pattern_for(dir.path())));
        let resolved = resolve(&expr).unwrap();
        assert!(resolved.ends_with("only_dir/**/*"), "{resolved}");
    }

    #[test]
    fn test_directory_with_glob_characters_is_escaped() {
        let dir = tempdir().unwrap();
        let odd = dir.path().join("data[1]");
        fs::create_dir(&odd).unwrap();

        let expr = Pattern::escape(&pattern_for(&odd));
        let resolved = resolve(&expr).unwrap();
        assert_eq!(resolved, format!("{expr}/**/*"));

        fs::write(odd.join("inner.txt"), "x").unwrap();
        let found: Vec<_> = glob::glob(&resolved).unwrap().filter_map(Result::ok).collect();
        assert_eq!(found, vec![odd.join("inner.txt")]);
    }

    #[test]
    fn test_single_file_is_kept() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("big.bin");
        fs::write(&file, "data").unwrap();

        let expr = pattern_for(&file);
        assert_eq!(resolve(&expr).unwrap(), expr);
    }

    #[test]
    fn test_multiple_matches_are_kept() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.log"), "a").unwrap();
        fs::write(dir.path().join("b.log"), "b").unwrap();

        let expr = format!("{}/*.log", Pattern::escape(&pattern_for(dir.path())));
        assert_eq!(resolve(&expr).unwrap(), expr);
    }

    #[test]
    fn test_no_match_is_bad_path() {
        let dir = tempdir().unwrap();
        let expr = pattern_for(&dir.path().join("missing"));
        assert!(matches!(resolve(&expr), Err(DirstatError::BadPath(p)) if p == expr));
    }

    #[test]
    fn test_invalid_pattern_is_bad_path() {
        assert!(matches!(resolve("[unclosed"), Err(DirstatError::BadPath(_))));
    }

    #[test]
    fn test_recursive_handles_trailing_separator() {
        assert_eq!(recursive("dir"), "dir/**/*");
        assert_eq!(recursive("dir/"), "dir/**/*");
        assert_eq!(recursive("/"), "/**/*");
    }

    #[test]
    fn test_wildcards_skip_hidden_entries() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".env"), "SECRET=1").unwrap();

        let expr = format!("{}/*", Pattern::escape(&pattern_for(dir.path())));
        assert!(matches!(resolve(&expr), Err(DirstatError::BadPath(_))));

        let literal = pattern_for(&dir.path().join(".env"));
        assert_eq!(resolve(&literal).unwrap(), literal);
    }
}
