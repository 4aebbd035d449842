//! Translation tables loaded from YAML.
//!
//! Each locale is a directory holding one flat `key: "text"` file per group
//! (`resources/lang/en_US/firefly.yaml`). Keys are addressed as
//! `group.key`.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::LocalizationConfig;
use crate::observability::record_translation_miss;

/// Strings of one group, keyed by item.
pub type TranslationGroup = BTreeMap<String, String>;

/// All groups of one locale.
pub type LocaleTable = BTreeMap<String, TranslationGroup>;

/// Errors raised while loading or serving translations.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// A locale directory or table could not be read.
    #[error("Failed to read translations at '{path}': {source}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A table is not a flat map of strings.
    #[error("Failed to parse translation table '{path}': {source}")]
    Parse {
        /// Path of the table.
        path: String,
        /// Underlying error.
        source: serde_yaml_bw::Error,
    },

    /// The locale is not served.
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}

/// Looks up translated strings with fallback to a second locale.
#[derive(Debug, Clone)]
pub struct Translator {
    tables: HashMap<String, LocaleTable>,
    default_locale: String,
    fallback_locale: String,
}

impl Translator {
    /// Create a translator from tables already in memory.
    #[must_use]
    pub fn new(
        tables: HashMap<String, LocaleTable>,
        default_locale: impl Into<String>,
        fallback_locale: impl Into<String>,
    ) -> Self {
        Self {
            tables,
            default_locale: default_locale.into(),
            fallback_locale: fallback_locale.into(),
        }
    }

    /// Load every configured locale from `config.lang_path`.
    ///
    /// A configured locale without a directory is served empty, so all its
    /// strings come from the fallback locale. The fallback locale itself must
    /// exist.
    pub fn load(config: &LocalizationConfig) -> Result<Self, TranslationError> {
        let root = Path::new(&config.lang_path);
        let mut tables = HashMap::new();

        for locale in &config.locales {
            let dir = root.join(locale);
            if !dir.is_dir() && *locale != config.fallback_locale {
                tracing::warn!(locale = %locale, path = %dir.display(), "No translations for locale");
                tables.insert(locale.clone(), LocaleTable::new());
                continue;
            }
            let table = load_locale(&dir)?;
            tracing::debug!(locale = %locale, groups = table.len(), "Loaded translations");
            tables.insert(locale.clone(), table);
        }

        Ok(Self::new(
            tables,
            config.default_locale.clone(),
            config.fallback_locale.clone(),
        ))
    }

    /// Locale used when a request names none.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Whether the locale is served.
    #[must_use]
    pub fn supports(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Served locales, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Translate `group.key` and fill in `:placeholder` replacements.
    ///
    /// Missing keys fall back to the fallback locale and then to the key
    /// itself.
    #[must_use]
    pub fn translate(&self, locale: &str, key: &str, replacements: &[(&str, &str)]) -> String {
        let line = self
            .lookup(locale, key)
            .or_else(|| {
                record_translation_miss(locale);
                self.lookup(&self.fallback_locale, key)
            })
            .map_or_else(|| key.to_string(), str::to_string);
        replace_placeholders(&line, replacements)
    }

    /// Every group of a locale as nested JSON, merged over the fallback
    /// locale.
    pub fn all_groups(&self, locale: &str) -> Result<Value, TranslationError> {
        let table = self
            .tables
            .get(locale)
            .ok_or_else(|| TranslationError::UnknownLocale(locale.to_string()))?;

        let mut merged = self
            .tables
            .get(&self.fallback_locale)
            .cloned()
            .unwrap_or_default();
        for (group, lines) in table {
            merged
                .entry(group.clone())
                .or_default()
                .extend(lines.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let groups: Map<String, Value> = merged
            .into_iter()
            .map(|(group, lines)| {
                let lines: Map<String, Value> = lines
                    .into_iter()
                    .map(|(k, v)| (k, Value::String(v)))
                    .collect();
                (group, Value::Object(lines))
            })
            .collect();
        Ok(Value::Object(groups))
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&str> {
        let (group, item) = key.split_once('.')?;
        self.tables
            .get(locale)?
            .get(group)?
            .get(item)
            .map(String::as_str)
    }
}

fn load_locale(dir: &Path) -> Result<LocaleTable, TranslationError> {
    let entries = std::fs::read_dir(dir).map_err(|source| TranslationError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml"))
        .collect();
    paths.sort();

    let mut table = LocaleTable::new();
    for path in paths {
        let Some(group) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = std::fs::read_to_string(&path).map_err(|source| TranslationError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let lines: TranslationGroup =
            serde_yaml_bw::from_str(&content).map_err(|source| TranslationError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        table.insert(group.to_string(), lines);
    }
    Ok(table)
}

/// Replace `:name`, `:Name` and `:NAME` with the value in matching case.
///
/// The line is scanned once from left to right, so text coming from a value
/// is never substituted again. Longer names are tried first so `:amount_left`
/// is not eaten by `:amount`.
fn replace_placeholders(line: &str, replacements: &[(&str, &str)]) -> String {
    if replacements.is_empty() || !line.contains(':') {
        return line.to_string();
    }

    let mut ordered = replacements.to_vec();
    ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(colon) = rest.find(':') {
        out.push_str(&rest[..colon]);
        let after = &rest[colon + 1..];
        match ordered
            .iter()
            .find_map(|(name, value)| match_placeholder(after, name, value))
        {
            Some((consumed, replacement)) => {
                out.push_str(&replacement);
                rest = &after[consumed..];
            }
            None => {
                out.push(':');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length of the placeholder `text` starts with, and its cased value.
fn match_placeholder(text: &str, name: &str, value: &str) -> Option<(usize, String)> {
    if text.starts_with(name) {
        return Some((name.len(), value.to_string()));
    }
    let first_upper = upper_first(name);
    if text.starts_with(&first_upper) {
        return Some((first_upper.len(), upper_first(value)));
    }
    let upper = name.to_uppercase();
    text.starts_with(&upper)
        .then(|| (upper.len(), value.to_uppercase()))
}

fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
