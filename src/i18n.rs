//! Locale tags and the localized message catalogs.
//!
//! A catalog is a `msgs-<locale>.json` key/string map plus a
//! `help-<locale>.txt` usage text. Both are looked up first in the directory
//! named by `DIRSTAT_LOCALE_DIR`, then among the catalogs compiled into the
//! binary. Either file falls back to `en-US` independently when missing, so
//! loading never fails.

use crate::error::DirstatError;
use crate::format::NumberLocale;
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an extra catalog directory
pub const LOCALE_DIR_ENV: &str = "DIRSTAT_LOCALE_DIR";

/// Environment variables consulted for the initial locale, in order
const LOCALE_ENV_VARS: [&str; 2] = ["LC_ALL", "LANG"];

const EMBEDDED: &[(&str, &str)] = &[
    ("msgs-en-US.json", include_str!("../locales/msgs-en-US.json")),
    ("help-en-US.txt", include_str!("../locales/help-en-US.txt")),
    ("msgs-es-ES.json", include_str!("../locales/msgs-es-ES.json")),
    ("help-es-ES.txt", include_str!("../locales/help-es-ES.txt")),
    ("msgs-de-DE.json", include_str!("../locales/msgs-de-DE.json")),
    ("help-de-DE.txt", include_str!("../locales/help-de-DE.txt")),
];

/// A normalized `lang-REGION` tag such as `en-US`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag {
    language: String,
    region: String,
}

/// `en-US`, used when nothing else is requested or available
impl Default for LocaleTag {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            region: "US".to_string(),
        }
    }
}

impl LocaleTag {
    /// Parse and normalize a tag: language lowercased, region uppercased.
    ///
    /// The language must be 2 or 3 ASCII letters and the region exactly 2.
    pub fn parse(raw: &str) -> Result<Self, DirstatError> {
        let bad = || DirstatError::BadLocale(raw.to_string());
        let (language, region) = raw.trim().split_once('-').ok_or_else(bad)?;

        let language_ok =
            (2..=3).contains(&language.len()) && language.chars().all(|c| c.is_ascii_alphabetic());
        let region_ok = region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic());
        if !language_ok || !region_ok {
            return Err(bad());
        }

        Ok(Self {
            language: language.to_ascii_lowercase(),
            region: region.to_ascii_uppercase(),
        })
    }

    /// Parse a POSIX-style value such as `de_DE.UTF-8` or `fr_FR@euro`
    pub fn from_env_value(raw: &str) -> Result<Self, DirstatError> {
        let base = raw.split(['.', '@']).next().unwrap_or_default();
        Self::parse(&base.replace('_', "-"))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.language, self.region)
    }
}

/// Messages and usage text for one locale
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: LocaleTag,
    messages: HashMap<String, String>,
    usage: String,
}

impl Catalog {
    /// Load the catalog for `locale`, falling back to `en-US`
    pub fn load(locale: &LocaleTag, dir: Option<&Path>) -> Self {
        let default = LocaleTag::default();

        let (effective, messages) = match read_messages(locale, dir) {
            Ok(messages) => (locale.clone(), messages),
            Err(err) => {
                log::debug!("{err:#}; using {default} messages");
                let messages = read_messages(&default, dir).unwrap_or_else(|err| {
                    log::warn!("{err:#}");
                    HashMap::new()
                });
                (default.clone(), messages)
            }
        };

        let usage = read_resource(&format!("help-{locale}.txt"), dir)
            .or_else(|err| {
                log::debug!("{err:#}; using {default} usage text");
                read_resource(&format!("help-{default}.txt"), dir)
            })
            .map(Cow::into_owned)
            .unwrap_or_default();

        Self {
            locale: effective,
            messages,
            usage,
        }
    }

    /// Locale the messages were actually loaded for
    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    /// Localized message for `key`; the key itself when it is missing
    pub fn message<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Full usage text
    pub fn usage(&self) -> &str {
        &self.usage
    }
}

fn read_messages(locale: &LocaleTag, dir: Option<&Path>) -> Result<HashMap<String, String>> {
    let file_name = format!("msgs-{locale}.json");
    let text = read_resource(&file_name, dir)?;
    serde_json::from_str(&text).with_context(|| format!("malformed message catalog {file_name}"))
}

fn read_resource(file_name: &str, dir: Option<&Path>) -> Result<Cow<'static, str>> {
    if let Some(dir) = dir {
        let path = dir.join(file_name);
        if path.is_file() {
            return fs::read_to_string(&path)
                .map(Cow::Owned)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }

    EMBEDDED
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, text)| Cow::Borrowed(*text))
        .with_context(|| format!("no catalog file {file_name}"))
}

/// First non-empty locale value from the environment
pub fn env_locale() -> Option<String> {
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}

/// The active locale state: message catalog plus number conventions
#[derive(Debug, Clone)]
pub struct Localization {
    pub catalog: Catalog,
    pub numbers: NumberLocale,
    dir: Option<PathBuf>,
}

impl Localization {
    /// Default-locale state with an optional catalog directory
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            catalog: Catalog::load(&LocaleTag::default(), dir.as_deref()),
            numbers: NumberLocale::default(),
            dir,
        }
    }

    /// Default state, then `env_value` adopted if it is a valid locale
    pub fn seeded(dir: Option<PathBuf>, env_value: Option<&str>) -> Self {
        let mut localization = Self::new(dir);
        if let Some(raw) = env_value {
            match LocaleTag::from_env_value(raw) {
                Ok(tag) => localization.adopt_tag(tag),
                Err(err) => log::debug!("ignoring environment locale: {err}"),
            }
        }
        localization
    }

    /// Switch to `raw`. On error nothing changes.
    pub fn adopt(&mut self, raw: &str) -> Result<(), DirstatError> {
        let numbers = NumberLocale::try_new(raw)?;
        self.catalog = Catalog::load(numbers.tag(), self.dir.as_deref());
        self.numbers = numbers;
        log::debug!(
            "locale {} (messages {})",
            self.numbers.tag(),
            self.catalog.locale()
        );
        Ok(())
    }

    fn adopt_tag(&mut self, tag: LocaleTag) {
        self.catalog = Catalog::load(&tag, self.dir.as_deref());
        self.numbers = NumberLocale::new(tag);
    }

    pub fn message<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalog.message(key)
    }

    pub fn usage(&self) -> &str {
        self.catalog.usage()
    }
}
