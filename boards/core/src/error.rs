//! Error types for board registration and lookup

/// Errors that can occur while declaring or looking up boards
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// No board is registered under this name
    #[error("board {0} not found")]
    NotFound(String),

    /// Name does not follow the upper-case configuration naming convention
    #[error("invalid configuration name: {0:?}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
