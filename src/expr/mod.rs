//! Compiled predicate/action expressions
//!
//! An expression is an ordered chain of nodes. Each node is either a test
//! (a predicate over a path) or an action (a side effect that always reports
//! success), plus the join operator that was in effect when the node was
//! compiled.
//!
//! ```text
//!   -name '*.rs'   -print   -o   -exec wc -l {} ;
//!   ┌───────────┐  ┌───────┐     ┌───────────────┐
//!   │ Name *.rs │─▶│ Print │────▶│ Exec wc -l {} │
//!   │    AND    │  │  AND  │     │      OR       │
//!   └───────────┘  └───────┘     └───────────────┘
//! ```
//!
//! The join operator is not a two-operand boolean combinator. It decides,
//! from the node's own result, whether evaluation stops after that node:
//! a false result under AND stops with false, a true result under OR stops
//! with true. See [`Expression::evaluate`].

pub mod action;
pub mod compile;
pub mod eval;

pub use action::{substitute, ExecTemplate, PLACEHOLDER};
pub use compile::compile;
pub use eval::basename;

use crate::error::{ConfigError, ConfigResult};
use globset::{Glob, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Operator attached to a node, deciding whether evaluation continues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinOp {
    /// Stop with false when this node is false
    #[default]
    And,
    /// Stop with true when this node is true
    Or,
}

/// Predicate nodes
#[derive(Debug, Clone)]
pub enum Test {
    /// `-name PATTERN`
    Name(NamePattern),
    /// `-newer FILE`
    Newer(NewerThan),
}

/// Side-effect nodes
#[derive(Debug, Clone)]
pub enum Action {
    /// `-print`
    Print,
    /// `-exec CMD... ;`
    Exec(ExecTemplate),
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Test(Test),
    Action(Action),
}

/// One link of the compiled chain
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub join: JoinOp,
}

impl Node {
    pub fn is_action(&self) -> bool {
        matches!(self.kind, NodeKind::Action(_))
    }
}

/// Compiled glob for `-name`, matched against the basename only
#[derive(Debug, Clone)]
pub struct NamePattern {
    pattern: String,
    matcher: GlobMatcher,
}

impl NamePattern {
    pub fn new(pattern: &str) -> ConfigResult<Self> {
        let matcher = Glob::new(pattern)
            .map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source: e,
            })?
            .compile_matcher();

        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match the final path segment of `path`
    pub fn matches(&self, path: &Path) -> bool {
        self.matcher.is_match(Path::new(basename(path)))
    }
}

/// Reference modification time for `-newer`, captured at compile time
#[derive(Debug, Clone)]
pub struct NewerThan {
    reference: PathBuf,
    mtime: SystemTime,
}

impl NewerThan {
    /// Stat the reference file; failure is fatal
    pub fn new(reference: &Path) -> ConfigResult<Self> {
        let mtime = fs::metadata(reference)
            .and_then(|m| m.modified())
            .map_err(|e| ConfigError::NewerReference {
                path: reference.to_path_buf(),
                source: e,
            })?;

        Ok(Self {
            reference: reference.to_path_buf(),
            mtime,
        })
    }

    pub fn reference(&self) -> &Path {
        &self.reference
    }

    pub fn mtime(&self) -> SystemTime {
        self.mtime
    }
}

/// Ordered, immutable node chain shared by every evaluation
#[derive(Debug, Clone, Default)]
pub struct Expression {
    nodes: Vec<Node>,
}

impl Expression {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// An empty chain evaluates to true, so the walker prints every entry
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
