//! Named board registry.
//!
//! The registry is created once by the build driver and handed by reference
//! to every declaration unit and lookup site. Registering a name that already
//! exists replaces the previous class; the last registration wins.

use std::collections::HashMap;

use crate::board::{BoardDef, ConfigDict};
use crate::class::BoardClass;
use crate::{BoardError, Result};

#[derive(Debug, Clone, Default)]
pub struct BoardRegistry {
    classes: HashMap<String, BoardClass>,
}

impl BoardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a board class with a name
    pub fn register(&mut self, name: impl Into<String>, class: BoardClass) {
        let name = name.into();
        let class_name = class.name().to_owned();
        match self.classes.insert(name.clone(), class) {
            Some(_) => tracing::debug!(board = %name, class = %class_name, "replaced board"),
            None => tracing::debug!(board = %name, class = %class_name, "registered board"),
        }
    }

    /// Look up the class registered under `name`
    pub fn class(&self, name: &str) -> Result<&BoardClass> {
        self.classes
            .get(name)
            .ok_or_else(|| BoardError::NotFound(name.to_owned()))
    }

    /// Instantiate a registered board. Every call builds a new instance.
    pub fn get(&self, name: &str) -> Result<BoardDef> {
        let class = self.class(name)?;
        tracing::trace!(board = name, "instantiating board");
        Ok(class.instantiate())
    }

    /// Sorted list of the registered board names
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Instantiate and compile a board in one step
    pub fn get_board(&self, name: &str) -> Result<ConfigDict> {
        Ok(self.get(name)?.compile())
    }

    /// Owned, sorted board names for driver help output
    pub fn list_board_names(&self) -> Vec<String> {
        self.names().into_iter().map(str::to_owned).collect()
    }
}
