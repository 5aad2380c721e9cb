//! Board catalog assembly: built-in declarations plus configured boards.

use waf_boards_core::BoardRegistry;

use crate::config::{Config, ConfigError};

/// Registry holding every built-in board
pub fn builtin() -> BoardRegistry {
    let mut registry = BoardRegistry::new();
    waf_boards_sitl::register(&mut registry);
    waf_boards_linux::register(&mut registry);
    registry
}

/// Built-in boards, then the boards declared in `config`. A configured board
/// with the name of a built-in one replaces it.
pub fn load(config: &Config) -> Result<BoardRegistry, ConfigError> {
    let mut registry = builtin();
    config.declare(&mut registry)?;
    tracing::debug!(boards = registry.len(), "board catalog ready");
    Ok(registry)
}
