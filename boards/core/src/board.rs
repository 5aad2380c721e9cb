//! Board definition and the compiled configuration handed to the build.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::accumulators::{KeyValue, List};
use crate::naming::{export, Attr, Attributes};

/// Compiled board configuration, keyed by config name
pub type ConfigDict = BTreeMap<String, ConfigValue>;

/// One value of a compiled board configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Directly assigned scalar attribute
    Scalar(String),
    /// Define-style (`KEY=VALUE`) or plain list
    List(Vec<String>),
}

impl ConfigValue {
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ConfigValue::List(items) => Some(items),
            ConfigValue::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ConfigValue::Scalar(s) => Some(s),
            ConfigValue::List(_) => None,
        }
    }
}

/// A board definition for the waf build.
///
/// Fields are populated while the board is being constructed (see
/// [`BoardClass`](crate::BoardClass)) and only read afterwards. The exported
/// key of each field is its upper-case name, e.g. `defines` is `DEFINES`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardDef {
    pub name: String,
    /// Preprocessor defines
    pub defines: KeyValue,
    /// Libraries to link against
    pub lib: List,
    /// Internal libraries built for this board
    pub ap_libraries: List,
    pub cxxflags: List,
    pub cflags: List,
    pub linkflags: List,
    /// Cross toolchain prefix, exported only when set
    pub toolchain: Option<String>,
}

impl BoardDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Generate the configuration dictionary for the build environment.
    ///
    /// Key-value fields are rendered to `KEY=VALUE` lists, lists and scalars
    /// pass through unchanged.
    pub fn compile(&self) -> ConfigDict {
        export(self)
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    Attr::KeyValue(kv) => ConfigValue::List(kv.compile()),
                    Attr::List(list) => ConfigValue::List(list.to_vec()),
                    Attr::Str(s) => ConfigValue::Scalar(s.to_owned()),
                };
                (key.to_owned(), value)
            })
            .collect()
    }
}

impl Attributes for BoardDef {
    fn attributes(&self) -> Vec<(&str, Attr<'_>)> {
        let mut attrs = vec![
            ("name", Attr::Str(&self.name)),
            ("DEFINES", Attr::KeyValue(&self.defines)),
            ("LIB", Attr::List(&self.lib)),
            ("AP_LIBRARIES", Attr::List(&self.ap_libraries)),
            ("CXXFLAGS", Attr::List(&self.cxxflags)),
            ("CFLAGS", Attr::List(&self.cflags)),
            ("LINKFLAGS", Attr::List(&self.linkflags)),
        ];
        if let Some(toolchain) = &self.toolchain {
            attrs.push(("TOOLCHAIN", Attr::Str(toolchain)));
        }
        attrs
    }
}
