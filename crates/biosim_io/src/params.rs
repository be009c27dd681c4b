//! `key value` parameter files.
//!
//! One parameter per line, the key is the first word and the value the rest
//! of the line. Lines starting with `#` are comments. Keys may repeat; list
//! parameters use every occurrence, plain ones the last.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{IoError, Result};

/// Lines that are neither blank nor comments, with 1-based line numbers.
pub(crate) fn significant_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Whitespace-separated tokens with their line numbers.
pub(crate) fn tokens(content: &str) -> Vec<(usize, &str)> {
    significant_lines(content)
        .flat_map(|(n, line)| line.split_whitespace().map(move |t| (n, t)))
        .collect()
}

pub(crate) fn source_name(path: &Path) -> String {
    path.display().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamEntry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ParamFile {
    source: String,
    entries: Vec<ParamEntry>,
}

impl ParamFile {
    pub fn parse(content: &str, source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let mut entries = Vec::new();
        for (line, text) in significant_lines(content) {
            let mut parts = text.splitn(2, char::is_whitespace);
            let key = parts.next().unwrap_or_default();
            let value = parts.next().map(str::trim).unwrap_or_default();
            if value.is_empty() {
                return Err(IoError::parse(
                    &source,
                    line,
                    format!("parameter {key} has no value"),
                ));
            }
            entries.push(ParamEntry {
                key: key.to_string(),
                value: value.to_string(),
                line,
            });
        }
        Ok(Self { source, entries })
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| IoError::from(e).with_context(format!("reading {}", path.display())))?;
        Self::parse(&content, source_name(path))
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn entries(&self) -> &[ParamEntry] {
        &self.entries
    }

    /// Last occurrence of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamEntry> {
        self.entries.iter().rev().find(|e| e.key == key)
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ParamEntry> + 'a {
        self.entries.iter().filter(move |e| e.key == key)
    }

    /// Parses the last occurrence of `key`, if present.
    pub fn value<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(entry) => entry.value.parse().map(Some).map_err(|_| {
                IoError::parse(
                    &self.source,
                    entry.line,
                    format!("invalid value for {key}: {}", entry.value),
                )
            }),
        }
    }

    pub fn require<T: FromStr>(&self, key: &str) -> Result<T> {
        self.value(key)?.ok_or_else(|| {
            IoError::validation(format!("{}: missing parameter {key}", self.source))
        })
    }

    /// The parameters as a TOML table, ready for serde deserialization.
    /// Keys listed in `text_keys` stay strings, other numeric values become
    /// floats.
    #[must_use]
    pub fn to_toml_table(&self, text_keys: &[&str]) -> toml::Table {
        let mut table = toml::Table::new();
        for entry in &self.entries {
            let number = if text_keys.contains(&entry.key.as_str()) {
                None
            } else {
                entry.value.parse::<f64>().ok()
            };
            let value = match number {
                Some(v) => toml::Value::Float(v),
                None => toml::Value::String(entry.value.clone()),
            };
            table.insert(entry.key.clone(), value);
        }
        table
    }
}
