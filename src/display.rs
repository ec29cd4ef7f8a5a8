//! Report output.

use crate::cli::Config;
use crate::error::DirstatError;
use crate::format::format_size;
use crate::node::{FileRecord, ScanResult};
use owo_colors::{OwoColorize, Stream};
use std::io::Write;
use std::path;

/// Renders report lines for one configuration
pub struct Display<'a> {
    config: &'a Config,
}

impl<'a> Display<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Sort the records with the configured comparator and print them to stdout
    pub fn print_results(&self, result: &mut ScanResult) -> Result<(), DirstatError> {
        result.sort_by(self.config.sort.comparator());

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for record in &result.records {
            let line = self.format_line(record)?;
            writeln!(out, "{}", line.if_supports_color(Stream::Stdout, |text| text.blue()))?;
        }
        out.flush()?;
        Ok(())
    }

    /// `"<absolute path>  <size>"` for one record
    pub fn format_line(&self, record: &FileRecord) -> Result<String, DirstatError> {
        let absolute = path::absolute(&record.path).map_err(|source| DirstatError::StatFailure {
            path: record.path.clone(),
            source,
        })?;
        let size = format_size(record.size, self.config.metric, &self.config.number_locale);
        Ok(format!("{}  {}", absolute.display(), size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::NumberLocale;
    use std::path::PathBuf;

    #[test]
    fn test_format_line_raw() {
        let config = Config::default();
        let display = Display::new(&config);
        let record = FileRecord::new("/var/log/syslog", 5_000_000);
        assert_eq!(display.format_line(&record).unwrap(), "/var/log/syslog  5,000,000");
    }

    #[test]
    fn test_format_line_metric() {
        let config = Config {
            metric: true,
            ..Default::default()
        };
        let display = Display::new(&config);
        let record = FileRecord::new("/data/blob", 2048);
        assert_eq!(display.format_line(&record).unwrap(), "/data/blob  2 KiB");
    }

    #[test]
    fn test_format_line_localized() {
        let config = Config {
            number_locale: NumberLocale::try_new("de-DE").unwrap(),
            ..Default::default()
        };
        let display = Display::new(&config);
        let record = FileRecord::new("/data/blob", 1234567);
        assert_eq!(display.format_line(&record).unwrap(), "/data/blob  1.234.567");
    }

    #[test]
    fn test_relative_paths_become_absolute() {
        let config = Config::default();
        let display = Display::new(&config);
        let record = FileRecord::new("./notes/todo.txt", 1);

        let line = display.format_line(&record).unwrap();
        let expected = std::env::current_dir().unwrap().join("notes/todo.txt");
        assert_eq!(line, format!("{}  1", expected.display()));
        assert!(PathBuf::from(line.split("  ").next().unwrap()).is_absolute());
    }
}
