//! Explicit-stack directory walker
//!
//! A single LIFO stack of frames replaces recursion, so deep trees cannot
//! exhaust the call stack. Each root is seeded at depth 0 and drained before
//! the next root starts; the visited set is shared by all roots.
//!
//! ```text
//!   pop Enter(path, depth)
//!     │
//!     ├─ stat (lstat under -P) ── fail ──▶ log, drop frame
//!     │
//!     ├─ identity seen? ──────── yes ───▶ warn loop, drop frame
//!     │
//!     ├─ not a directory ───────────────▶ evaluate
//!     │
//!     └─ directory
//!          ├─ pre-order:  evaluate now
//!          ├─ post-order: push Leave(path)  (pops after all descendants)
//!          └─ depth < max: push Enter(child, depth + 1) per child
//! ```
//!
//! Siblings are pushed in listing order and therefore popped in reverse.

use super::visited::{FileId, VisitedSet};
use crate::config::{SymlinkMode, WalkOptions};
use crate::error::EntryError;
use crate::expr::{Action, Expression};
use std::fs::{self, Metadata};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace, warn};

/// Unit of work on the traversal stack
#[derive(Debug, Clone, PartialEq, Eq)]
enum Frame {
    /// Stat, evaluate and possibly expand `path`
    Enter { path: PathBuf, depth: usize },
    /// All descendants of `path` are done; evaluate it (post-order only)
    Leave { path: PathBuf },
}

/// Counters collected during a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub dirs: u64,
    pub files: u64,
    pub evaluated: u64,
    pub errors: u64,
    pub loops: u64,
}

/// Single-threaded walker evaluating one expression over every entry
pub struct Walker<'a, W: Write> {
    options: WalkOptions,
    expression: &'a Expression,
    visited: VisitedSet,
    stats: WalkStats,
    out: W,
}

impl<'a, W: Write> Walker<'a, W> {
    pub fn new(options: WalkOptions, expression: &'a Expression, out: W) -> Self {
        Self {
            options,
            expression,
            visited: VisitedSet::new(),
            stats: WalkStats::default(),
            out,
        }
    }

    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Consume the walker, returning the output sink and final counters
    pub fn finish(self) -> (W, WalkStats) {
        (self.out, self.stats)
    }

    /// Walk each root in order, sharing the visited set between them
    pub fn walk_roots<P: AsRef<Path>>(&mut self, roots: &[P]) -> &WalkStats {
        for root in roots {
            self.walk(root.as_ref());
        }
        &self.stats
    }

    /// Walk a single root until its stack is empty
    pub fn walk(&mut self, root: &Path) {
        debug!("walking {}", root.display());

        let mut stack = vec![Frame::Enter {
            path: root.to_path_buf(),
            depth: 0,
        }];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter { path, depth } => {
                    if let Err(e) = self.enter(&path, depth, &mut stack) {
                        self.report(e);
                    }
                }
                Frame::Leave { path } => self.apply(&path),
            }
        }
    }

    fn enter(
        &mut self,
        path: &Path,
        depth: usize,
        stack: &mut Vec<Frame>,
    ) -> Result<(), EntryError> {
        let meta = self.stat(path).map_err(|e| EntryError::from_io(path, e))?;

        if self.visited.test_and_insert_id(FileId::from_metadata(&meta)) {
            return Err(EntryError::Loop {
                path: path.to_path_buf(),
            });
        }

        if !meta.is_dir() {
            self.stats.files += 1;
            self.apply(path);
            return Ok(());
        }
        self.stats.dirs += 1;

        if self.options.post_order {
            stack.push(Frame::Leave {
                path: path.to_path_buf(),
            });
        } else {
            self.apply(path);
        }

        if self.options.descends_below(depth) {
            self.push_children(path, depth, stack)?;
        } else {
            trace!("{}: depth limit {} reached", path.display(), depth);
        }

        Ok(())
    }

    fn stat(&self, path: &Path) -> io::Result<Metadata> {
        match self.options.symlinks {
            SymlinkMode::Physical => fs::symlink_metadata(path),
            SymlinkMode::Logical => fs::metadata(path),
        }
    }

    fn push_children(
        &mut self,
        dir: &Path,
        depth: usize,
        stack: &mut Vec<Frame>,
    ) -> Result<(), EntryError> {
        let entries = fs::read_dir(dir).map_err(|e| EntryError::ReadDir {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut pushed = 0usize;
        for entry in entries {
            match entry {
                Ok(entry) => {
                    stack.push(Frame::Enter {
                        path: entry.path(),
                        depth: depth + 1,
                    });
                    pushed += 1;
                }
                Err(e) => self.report(EntryError::ReadDir {
                    path: dir.to_path_buf(),
                    source: e,
                }),
            }
        }

        trace!("{}: queued {} children at depth {}", dir.display(), pushed, depth + 1);
        Ok(())
    }

    /// Evaluate the expression, printing when no expression was given
    fn apply(&mut self, path: &Path) {
        self.stats.evaluated += 1;
        if self.expression.is_empty() {
            Action::Print.run(path, &mut self.out);
        } else {
            self.expression.evaluate(path, &mut self.out);
        }
    }

    fn report(&mut self, err: EntryError) {
        if err.is_loop() {
            self.stats.loops += 1;
            warn!("{}", err);
        } else {
            self.stats.errors += 1;
            error!("{}", err);
        }
    }
}
