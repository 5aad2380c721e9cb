//! Configuration file handling
//!
//! The configuration file can declare extra boards on top of the built-in
//! ones, each optionally deriving from an already registered board.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use waf_boards_core::{inherit, BoardClass, BoardError, BoardRegistry, KeyValue};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("board {board}: unknown base board {base}")]
    UnknownBase { board: String, base: String },

    #[error("board {board}: {source}")]
    Board {
        board: String,
        #[source]
        source: BoardError,
    },

    #[error("no board given and no general.default_board configured")]
    NoDefaultBoard,

    #[error("could not determine config directory")]
    NoConfigDir,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    /// Extra boards, declared in file order after the built-in ones
    #[serde(rename = "board", skip_serializing_if = "Vec::is_empty")]
    pub boards: Vec<BoardConfig>,
}

impl Config {
    /// Get the default config file path for this platform
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "waf-boards").map(|dirs| dirs.config_dir().join("boards.toml"))
    }

    /// Load config from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the default config.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config: Config = contents.parse()?;
        tracing::debug!(path = %path.display(), boards = config.boards.len(), "loaded config");
        Ok(config)
    }

    /// Save config with header comments for new files
    pub fn save_with_header(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_owned(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let header = r#"# waf-boards configuration file
#
# Extra boards can be declared with [[board]] tables, e.g.
#
# [[board]]
# name = "navio-custom"
# base = "navio"
# defines = { HAL_CUSTOM = 1 }
# lib = ["pthread"]
# cxxflags = ["-g"]

"#;
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, format!("{header}{contents}")).map_err(io_err)
    }

    /// Declare every configured board into `registry`, in file order
    pub fn declare(&self, registry: &mut BoardRegistry) -> Result<(), ConfigError> {
        for board in &self.boards {
            board.declare(registry, self.general.strict)?;
        }
        Ok(())
    }

    /// Resolve the board to operate on, falling back to `general.default_board`
    pub fn board_name(&self, board: Option<String>) -> Result<String, ConfigError> {
        board
            .or_else(|| self.general.default_board.clone())
            .ok_or(ConfigError::NoDefaultBoard)
    }
}

impl FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Reject malformed define names instead of dropping them
    pub strict: bool,
    /// Board used when none is given on the command line
    pub default_board: Option<String>,
}

/// A board declared in the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardConfig {
    pub name: String,
    /// Registered board to derive from. Derives from the root board if unset.
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub defines: BTreeMap<String, toml::Value>,
    #[serde(default)]
    pub lib: Vec<String>,
    #[serde(default)]
    pub ap_libraries: Vec<String>,
    #[serde(default)]
    pub cxxflags: Vec<String>,
    #[serde(default)]
    pub cflags: Vec<String>,
    #[serde(default)]
    pub linkflags: Vec<String>,
    #[serde(default)]
    pub toolchain: Option<String>,
}

/// Render a define value the way it should appear after `KEY=`
fn define_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl BoardConfig {
    /// Declare this board, deriving from its base if one is set.
    ///
    /// In strict mode a define name that does not follow the naming convention
    /// is an error. Otherwise it is dropped like any other non-config name.
    pub fn declare(
        &self,
        registry: &mut BoardRegistry,
        strict: bool,
    ) -> Result<BoardClass, ConfigError> {
        let base = match &self.base {
            Some(base) => Some(
                registry
                    .class(base)
                    .map_err(|_| ConfigError::UnknownBase {
                        board: self.name.clone(),
                        base: base.clone(),
                    })?
                    .clone(),
            ),
            None => None,
        };

        let entries = self.defines.iter().map(|(k, v)| (k, define_value(v)));
        let defines = if strict {
            let mut defines = KeyValue::new();
            defines
                .try_add(entries)
                .map_err(|source| ConfigError::Board {
                    board: self.name.clone(),
                    source,
                })?;
            defines
        } else {
            KeyValue::from_iter(entries)
        };

        let entry = self.clone();
        let class = inherit(base.as_ref()).declare(registry, &self.name, move |board| {
            board.defines.add(defines.iter());
            board.lib.add(entry.lib.iter().cloned());
            board.ap_libraries.add(entry.ap_libraries.iter().cloned());
            board.cxxflags.add(entry.cxxflags.iter().cloned());
            board.cflags.add(entry.cflags.iter().cloned());
            board.linkflags.add(entry.linkflags.iter().cloned());
            if let Some(toolchain) = &entry.toolchain {
                board.toolchain = Some(toolchain.clone());
            }
        });
        Ok(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[general]
default_board = "custom"

[[board]]
name = "base"
defines = { A = "1", COUNT = 3 }
lib = ["m"]

[[board]]
name = "custom"
base = "base"
defines = { A = "2", lower = "dropped" }
cxxflags = ["-g"]
toolchain = "arm-linux-gnueabihf"
"#;

    #[test]
    fn parse_sample() {
        let config: Config = SAMPLE.parse().unwrap();
        assert!(!config.general.strict);
        assert_eq!(config.general.default_board.as_deref(), Some("custom"));
        assert_eq!(config.boards.len(), 2);
        assert_eq!(config.boards[1].base.as_deref(), Some("base"));
        assert!(config.boards[0].cflags.is_empty());
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = "".parse().unwrap();
        assert_eq!(config, Config::default());
        assert!(matches!(config.board_name(None), Err(ConfigError::NoDefaultBoard)));
        assert_eq!(config.board_name(Some("sitl".into())).unwrap(), "sitl");
    }

    #[test]
    fn unknown_board_fields_rejected() {
        let err = "[[board]]\nname = \"x\"\ndefine = { A = \"1\" }\n"
            .parse::<Config>()
            .unwrap_err();
        assert!(err.to_string().contains("define"));
    }

    #[test]
    fn declares_in_file_order() {
        let config: Config = SAMPLE.parse().unwrap();
        let mut registry = BoardRegistry::new();
        config.declare(&mut registry).unwrap();
        assert_eq!(registry.names(), ["base", "custom"]);

        let base = registry.get("base").unwrap();
        assert_eq!(base.defines.compile(), ["A=1", "COUNT=3"]);

        let custom = registry.get("custom").unwrap();
        assert_eq!(custom.name, "custom");
        assert_eq!(custom.defines.compile(), ["A=2", "COUNT=3"]);
        assert_eq!(*custom.lib, ["m"]);
        assert_eq!(*custom.cxxflags, ["-g"]);
        assert_eq!(custom.toolchain.as_deref(), Some("arm-linux-gnueabihf"));
    }

    #[test]
    fn unknown_base_fails() {
        let config: Config = "[[board]]\nname = \"x\"\nbase = \"missing\"\n".parse().unwrap();
        let mut registry = BoardRegistry::new();
        let err = config.declare(&mut registry).unwrap_err();
        assert!(
            matches!(err, ConfigError::UnknownBase { ref board, ref base } if board == "x" && base == "missing")
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn strict_rejects_bad_define_names() {
        let mut config: Config = SAMPLE.parse().unwrap();
        config.general.strict = true;

        let mut registry = BoardRegistry::new();
        let err = config.declare(&mut registry).unwrap_err();
        match err {
            ConfigError::Board { board, source } => {
                assert_eq!(board, "custom");
                assert_eq!(source, BoardError::InvalidName("lower".into()));
            },
            other => panic!("unexpected error: {other}"),
        }
        // boards before the failing one are already declared
        assert_eq!(registry.names(), ["base"]);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("waf-boards-test-{}", std::process::id()));
        let path = dir.join("boards.toml");

        let mut config = Config::default();
        config.general.default_board = Some("sitl".into());
        config.save_with_header(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_explicit_path_fails() {
        let path = Path::new("/nonexistent/waf-boards/boards.toml");
        assert!(matches!(Config::load(Some(path)), Err(ConfigError::Io { .. })));
    }
}
