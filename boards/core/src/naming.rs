//! Naming convention and attribute export.
//!
//! Configuration attributes are told apart from implementation attributes by
//! their name alone: only names made of upper-case ASCII letters and
//! underscores (`DEFINES`, `CXXFLAGS`) are exported. Everything else on the
//! same object (`name`, helpers) stays private to the board.

use std::collections::BTreeMap;
use std::fmt;

use crate::accumulators::{KeyValue, List};

/// Returns true if `name` is made only of `A-Z` and `_`.
///
/// The empty string never matches.
pub fn is_config_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_uppercase() || b == b'_')
}

/// A borrowed view of one attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr<'a> {
    Str(&'a str),
    KeyValue(&'a KeyValue),
    List(&'a List),
}

impl fmt::Display for Attr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Str(s) => f.write_str(s),
            Attr::KeyValue(kv) => f.write_str(&kv.compile().join(" ")),
            Attr::List(list) => f.write_str(&list.join(" ")),
        }
    }
}

/// Anything that can list its attributes for export.
///
/// Implementors list every attribute they carry, whether or not it follows
/// the naming convention; [`export`] does the filtering.
pub trait Attributes {
    fn attributes(&self) -> Vec<(&str, Attr<'_>)>;
}

/// Collect the convention-named attributes of `obj`, ordered by name.
///
/// Values are read at call time, nothing is cached.
pub fn export<T: Attributes + ?Sized>(obj: &T) -> BTreeMap<&str, Attr<'_>> {
    obj.attributes()
        .into_iter()
        .filter(|(name, _)| is_config_name(name))
        .collect()
}
