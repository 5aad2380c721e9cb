//! Accumulator types used as board configuration fields.
//!
//! Both types can be extended repeatedly, so a derived board can call into
//! the same field its base already populated and keep adding to it.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::ops::Deref;

use serde::Serialize;

use crate::naming::{export, is_config_name, Attr, Attributes};
use crate::{BoardError, Result};

/// Key-value bag, typically preprocessor defines.
///
/// ```
/// use waf_boards_core::KeyValue;
///
/// let mut kv = KeyValue::from_iter([("FOO", "foo"), ("BAR", "bar")]);
/// kv.add([("BAZ", "baz")]); // BAZ was added
/// kv.add([("BAR", "overwrite")]); // BAR has been overwritten
/// kv.add([("lower", "dropped")]); // not a config name, ignored
///
/// assert_eq!(kv.compile(), ["BAR=overwrite", "BAZ=baz", "FOO=foo"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValue {
    entries: BTreeMap<String, String>,
}

impl KeyValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite entries. Names that are not config names are dropped.
    pub fn add<I, K, V>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        for (key, value) in entries {
            let key = key.as_ref();
            if is_config_name(key) {
                self.entries.insert(key.to_owned(), value.to_string());
            } else {
                tracing::debug!(key, "ignoring non-config key");
            }
        }
        self
    }

    /// Like [`KeyValue::add`], but rejects the whole batch if any name is not
    /// a config name. Nothing is applied on error.
    pub fn try_add<I, K, V>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        if let Some((key, _)) = entries.iter().find(|(k, _)| !is_config_name(k.as_ref())) {
            return Err(BoardError::InvalidName(key.as_ref().to_owned()));
        }
        Ok(self.add(entries))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Entries ordered by key
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a list of `KEY=VALUE` strings, ordered by key
    pub fn compile(&self) -> Vec<String> {
        export(self)
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect()
    }
}

impl Attributes for KeyValue {
    fn attributes(&self) -> Vec<(&str, Attr<'_>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), Attr::Str(v.as_str())))
            .collect()
    }
}

impl<K: AsRef<str>, V: Display> FromIterator<(K, V)> for KeyValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut kv = Self::new();
        kv.add(iter);
        kv
    }
}

/// Ordered, append-only list of strings. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct List(Vec<String>);

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append values in the order given
    pub fn add<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(items.into_iter().map(Into::into));
        self
    }
}

impl Deref for List {
    type Target = Vec<String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for List {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
