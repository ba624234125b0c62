//! Expression evaluator
//!
//! Walks the chain from the head against one candidate path. Each node
//! produces a result (tests: their predicate, actions: always true) and its
//! join operator decides whether to stop:
//!
//! | result | join | outcome                    |
//! |--------|------|----------------------------|
//! | false  | AND  | return false               |
//! | true   | OR   | return true                |
//! | _      | _    | continue with next node    |
//!
//! An exhausted chain returns the last result (true for an empty chain).

use super::{Expression, JoinOp, NewerThan, NodeKind, Test};
use crate::error::EntryError;
use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use tracing::{error, trace};

impl Expression {
    /// Evaluate the chain for `path`, running actions against `out`
    pub fn evaluate<W: Write + ?Sized>(&self, path: &Path, out: &mut W) -> bool {
        let mut result = true;

        for node in self.nodes() {
            result = match &node.kind {
                NodeKind::Action(action) => {
                    action.run(path, out);
                    true
                }
                NodeKind::Test(test) => test.matches(path),
            };

            match (result, node.join) {
                (false, JoinOp::And) => return false,
                (true, JoinOp::Or) => return true,
                _ => {}
            }
        }

        trace!("{}: chain exhausted with {}", path.display(), result);
        result
    }
}

impl Test {
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            Test::Name(pattern) => pattern.matches(path),
            Test::Newer(newer) => newer.is_newer(path),
        }
    }
}

impl NewerThan {
    /// True iff `path` was modified strictly after the reference file
    pub fn is_newer(&self, path: &Path) -> bool {
        match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(mtime) => mtime > self.mtime(),
            Err(e) => {
                error!("{}", EntryError::from_io(path, e));
                false
            }
        }
    }
}

/// Final path segment, after the last `/`
///
/// Trailing slashes are ignored; a path with no separator is its own
/// basename and `/` stays `/`.
pub fn basename(path: &Path) -> &OsStr {
    let bytes = path.as_os_str().as_bytes();

    let mut end = bytes.len();
    while end > 1 && bytes[end - 1] == b'/' {
        end -= 1;
    }
    let trimmed = &bytes[..end];

    let start = match trimmed.iter().rposition(|&b| b == b'/') {
        Some(i) if i + 1 < trimmed.len() => i + 1,
        _ => 0,
    };

    OsStr::from_bytes(&trimmed[start..])
}
