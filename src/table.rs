#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

use crate::value::{Key, Value};
use crate::Span;
use std::fmt;

/// Tables with at least this many entries get a hash index for key lookup.
pub(crate) const INDEXED_TABLE_THRESHOLD: usize = 6;

pub(crate) type KeyIndex = foldhash::HashMap<String, usize>;

/// A TOML table: key-value pairs in first-insertion order.
///
/// Tables are produced complete by the parser and are immutable. Equality
/// compares entries and ignores spans.
#[derive(Clone, Default)]
pub struct Table {
    span: Span,
    entries: Vec<(Key, Value)>,
    index: Option<KeyIndex>,
}

impl Table {
    pub(crate) fn from_entries(span: Span, entries: Vec<(Key, Value)>) -> Table {
        let index = (entries.len() >= INDEXED_TABLE_THRESHOLD).then(|| index_entries(&entries));
        Table {
            span,
            entries,
            index,
        }
    }

    /// Takes over an index already built for `entries`.
    pub(crate) fn from_indexed_entries(
        span: Span,
        entries: Vec<(Key, Value)>,
        index: Option<KeyIndex>,
    ) -> Table {
        match index {
            Some(index) => Table {
                span,
                entries,
                index: Some(index),
            },
            None => Table::from_entries(span, entries),
        }
    }

    /// Returns the codepoint span of this table in the source document.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns both key and value for `name`.
    pub fn get_key_value(&self, name: &str) -> Option<(&Key, &Value)> {
        let (key, value) = match &self.index {
            Some(index) => self.entries.get(*index.get(name)?)?,
            None => self.entries.iter().find(|(key, _)| key.name == name)?,
        };
        Some((key, value))
    }

    /// Returns a reference to the value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.get_key_value(name).map(|(_, value)| value)
    }

    /// Returns `true` if the table contains the key.
    pub fn contains_key(&self, name: &str) -> bool {
        self.get_key_value(name).is_some()
    }

    /// Returns a slice of all entries.
    pub fn entries(&self) -> &[(Key, Value)] {
        &self.entries
    }

    /// Iterates over entries in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, (Key, Value)> {
        self.entries.iter()
    }

    /// Iterates over key names in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a (Key, Value);
    type IntoIter = std::slice::Iter<'a, (Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Table {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

fn index_entries(entries: &[(Key, Value)]) -> KeyIndex {
    entries
        .iter()
        .enumerate()
        .map(|(i, (key, _))| (key.name.clone(), i))
        .collect()
}
