//! Board classes and the `inherit` declaration helper.
//!
//! A [`BoardClass`] is a named constructor for [`BoardDef`]s: the name plus an
//! ordered chain of configuration steps. Deriving a class appends one step to
//! a copy of the base's chain, so constructing a derived board runs every
//! base step first and its own step last, letting it extend or overwrite
//! whatever the bases populated.

use std::fmt;
use std::sync::Arc;

use crate::board::BoardDef;
use crate::registry::BoardRegistry;

type Step = Arc<dyn Fn(&mut BoardDef) + Send + Sync>;

/// Name of the root class every board derives from
pub const ROOT_CLASS: &str = "board";

#[derive(Clone)]
pub struct BoardClass {
    name: String,
    steps: Vec<Step>,
    lineage: Vec<String>,
}

impl BoardClass {
    /// The root class. Builds boards with every field empty.
    pub fn root() -> Self {
        Self {
            name: ROOT_CLASS.to_owned(),
            steps: Vec::new(),
            lineage: Vec::new(),
        }
    }

    /// Create a class deriving from `self`, running `configure` after all
    /// of the base's steps.
    pub fn derive<F>(&self, name: impl Into<String>, configure: F) -> Self
    where
        F: Fn(&mut BoardDef) + Send + Sync + 'static,
    {
        let name = name.into();
        let mut steps = self.steps.clone();
        steps.push(Arc::new(configure));
        let mut lineage = self.lineage.clone();
        lineage.push(name.clone());
        Self {
            name,
            steps,
            lineage,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the closest declared base, `None` for direct children of the root
    pub fn base(&self) -> Option<&str> {
        let len = self.lineage.len();
        (len >= 2).then(|| self.lineage[len - 2].as_str())
    }

    /// Declared class names from the outermost base down to this class
    pub fn lineage(&self) -> &[String] {
        &self.lineage
    }

    /// Construct a fresh board. The board is named after this class, not
    /// after any of its bases.
    pub fn instantiate(&self) -> BoardDef {
        let mut board = BoardDef::new(self.name.as_str());
        for step in &self.steps {
            step(&mut board);
        }
        board
    }
}

impl Default for BoardClass {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for BoardClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardClass")
            .field("name", &self.name)
            .field("lineage", &self.lineage)
            .field("steps", &self.steps.len())
            .finish()
    }
}

/// Declarator returned by [`inherit`]
#[derive(Debug, Clone, Default)]
pub struct Inherit {
    base: BoardClass,
}

/// Start declaring a board derived from `base`, or from the root class when
/// `base` is `None`.
///
/// The following:
///
/// ```
/// use waf_boards_core::{BoardClass, BoardRegistry};
///
/// let mut registry = BoardRegistry::new();
/// let class = BoardClass::root().derive("my_board", |board| {
///     board.defines.add([("DEBUG", "1")]);
/// });
/// registry.register("my_board", class);
/// ```
///
/// is equivalent to:
///
/// ```
/// use waf_boards_core::{inherit, BoardRegistry};
///
/// let mut registry = BoardRegistry::new();
/// inherit(None).declare(&mut registry, "my_board", |board| {
///     board.defines.add([("DEBUG", "1")]);
/// });
/// # assert_eq!(registry.names(), ["my_board"]);
/// ```
pub fn inherit(base: Option<&BoardClass>) -> Inherit {
    Inherit {
        base: base.cloned().unwrap_or_default(),
    }
}

impl Inherit {
    /// Derive the new class, register it under `name` and return it so it can
    /// serve as a base itself.
    pub fn declare<F>(self, registry: &mut BoardRegistry, name: &str, configure: F) -> BoardClass
    where
        F: Fn(&mut BoardDef) + Send + Sync + 'static,
    {
        let class = self.base.derive(name, configure);
        registry.register(name, class.clone());
        class
    }
}

/// Declare and register a board named after the configuration function.
///
/// ```
/// use waf_boards_core::{board, BoardRegistry};
///
/// let mut registry = BoardRegistry::new();
/// let linux = board!(&mut registry, fn linux(board) {
///     board.lib.add(["rt"]);
/// });
/// board!(&mut registry, Some(&linux), fn navio(board) {
///     board.ap_libraries.add(["AP_HAL_Linux"]);
/// });
///
/// let navio = registry.get("navio").unwrap();
/// assert_eq!(navio.name, "navio");
/// assert_eq!(*navio.lib, ["rt"]);
/// ```
#[macro_export]
macro_rules! board {
    ($registry:expr, fn $name:ident($board:ident) $body:block) => {
        $crate::board!($registry, None, fn $name($board) $body)
    };
    ($registry:expr, $base:expr, fn $name:ident($board:ident) $body:block) => {{
        fn $name($board: &mut $crate::BoardDef) $body
        $crate::inherit($base).declare($registry, stringify!($name), $name)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_builds_empty_board() {
        let root = BoardClass::root();
        assert_eq!(root.name(), ROOT_CLASS);
        assert_eq!(root.base(), None);
        assert_eq!(root.instantiate(), BoardDef::new(ROOT_CLASS));
    }

    #[test]
    fn steps_run_base_first() {
        let a = BoardClass::root().derive("a", |b| {
            b.cxxflags.add(["-a"]);
            b.defines.add([("LEVEL", "a")]);
        });
        let b = a.derive("b", |b| {
            b.cxxflags.add(["-b"]);
            b.defines.add([("LEVEL", "b")]);
        });
        let c = b.derive("c", |b| {
            b.cxxflags.add(["-c"]);
        });

        let board = c.instantiate();
        assert_eq!(board.name, "c");
        assert_eq!(*board.cxxflags, ["-a", "-b", "-c"]);
        assert_eq!(board.defines.get("LEVEL"), Some("b"));

        assert_eq!(c.lineage(), ["a", "b", "c"]);
        assert_eq!(c.base(), Some("b"));
        assert_eq!(a.base(), None);
    }

    #[test]
    fn deriving_leaves_base_untouched() {
        let base = BoardClass::root().derive("base", |b| {
            b.lib.add(["m"]);
        });
        let _child = base.derive("child", |b| {
            b.lib.add(["rt"]);
        });

        let board = base.instantiate();
        assert_eq!(board.name, "base");
        assert_eq!(*board.lib, ["m"]);
    }

    #[test]
    fn declare_registers_and_returns_class() {
        let mut registry = BoardRegistry::new();
        let base = inherit(None).declare(&mut registry, "base", |b| {
            b.defines.add([("A", "1")]);
        });
        let child = inherit(Some(&base)).declare(&mut registry, "child", |b| {
            b.defines.add([("B", "2")]);
        });

        assert_eq!(child.name(), "child");
        assert_eq!(registry.names(), ["base", "child"]);

        let defines = registry.get_board("child").unwrap()["DEFINES"].clone();
        assert_eq!(defines, crate::ConfigValue::List(vec!["A=1".into(), "B=2".into()]));
    }

    #[test]
    fn macro_captures_function_name() {
        let mut registry = BoardRegistry::new();
        let base = board!(&mut registry, fn base(board) {
            board.defines.add([("A", "1")]);
        });
        let child = board!(&mut registry, Some(&base), fn child(board) {
            board.defines.add([("A", "2")]);
        });

        assert_eq!(base.name(), "base");
        assert_eq!(child.base(), Some("base"));

        let dict = registry.get_board("child").unwrap();
        assert_eq!(dict["DEFINES"].as_list(), Some(&["A=2".to_string()][..]));
    }
}
