//! Core types for declaring build boards and compiling their configuration.
//!
//! This crate provides:
//! - Accumulator types (`KeyValue`, `List`) that board declarations extend
//!   incrementally
//! - `BoardDef`, one buildable target, and its compiled `ConfigDict`
//! - `BoardClass` and `inherit`/`board!` for declaring boards derived from
//!   other boards
//! - `BoardRegistry`, the name to class map the build driver queries

mod accumulators;
mod board;
mod class;
mod error;
pub mod naming;
mod registry;

pub use accumulators::{KeyValue, List};
pub use board::{BoardDef, ConfigDict, ConfigValue};
pub use class::{inherit, BoardClass, Inherit, ROOT_CLASS};
pub use error::{BoardError, Result};
pub use registry::BoardRegistry;
