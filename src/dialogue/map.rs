// Dialogue lookup table built from a line store

use std::collections::HashMap;
use std::path::Path;

use super::parser::{KeyValueParser, ParseError};
use crate::io::{LineSink, LineStore, SinkError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line_number}: {source}")]
pub struct LineError {
    /// 1-based line number in the source
    pub line_number: usize,
    #[source]
    pub source: ParseError,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogueError {
    #[error("Malformed dialogue in {path:?}, {error}")]
    Malformed { path: String, error: LineError },
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The entry would not parse back as a single `KEY<delim>VALUE` pair
    #[error("Cannot save dialogue key {key:?}: {reason}")]
    InvalidEntry { key: String, reason: &'static str },
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Maps dialogue keys to lines of text. The last entry for a key wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogueMap {
    entries: HashMap<String, String>,
}

impl DialogueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from every line of `store`.
    ///
    /// Stops at the first malformed line and reports it.
    pub fn load(store: &LineStore, parser: &KeyValueParser) -> Result<Self, DialogueError> {
        let mut map = Self::new();
        for (i, raw) in store.lines().enumerate() {
            let (key, value) = parser.parse(raw).map_err(|source| DialogueError::Malformed {
                path: store.source().display().to_string(),
                error: LineError {
                    line_number: i + 1,
                    source,
                },
            })?;
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Build a map from `store`, skipping malformed lines.
    ///
    /// Skipped lines are logged and returned alongside the map.
    pub fn load_lenient(store: &LineStore, parser: &KeyValueParser) -> (Self, Vec<LineError>) {
        let mut map = Self::new();
        let mut skipped = Vec::new();
        for (i, raw) in store.lines().enumerate() {
            match parser.parse(raw) {
                Ok((key, value)) => map.insert(key, value),
                Err(source) => {
                    let error = LineError {
                        line_number: i + 1,
                        source,
                    };
                    log::warn!("Skipping dialogue in {:?}: {}", store.source(), error);
                    skipped.push(error);
                }
            }
        }
        (map, skipped)
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Write the map to `path` as `KEY<delim>VALUE` lines sorted by key.
    ///
    /// Every entry is checked before anything is written. Empty keys or
    /// values, and any that contain `delimiter`, are rejected and leave
    /// `path` untouched.
    pub fn save<P: AsRef<Path>>(&self, path: P, delimiter: char) -> Result<usize, SaveError> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        for &(key, value) in &entries {
            let reason = if key.is_empty() {
                Some("empty key")
            } else if value.is_empty() {
                Some("empty value")
            } else if key.contains(delimiter) {
                Some("key contains the delimiter")
            } else if value.contains(delimiter) {
                Some("value contains the delimiter")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(SaveError::InvalidEntry {
                    key: key.to_string(),
                    reason,
                });
            }
        }

        let mut sink = LineSink::new(path);
        for (key, value) in entries {
            sink.append(format!("{}{}{}", key, delimiter, value));
        }
        Ok(sink.flush()?)
    }
}
