//! Cycle-safe filesystem traversal
//!
//! # Architecture
//!
//! ```text
//!                  ┌───────────────────────────┐
//!   roots ───────▶ │          Walker           │
//!                  │  - Vec<Frame> LIFO stack  │
//!                  │  - WalkOptions (immutable)│
//!                  └──────┬─────────────┬──────┘
//!                         │             │
//!               ┌─────────▼───┐   ┌─────▼──────────┐
//!               │ VisitedSet  │   │  Expression    │
//!               │ (dev, ino)  │   │  evaluate()    │
//!               └─────────────┘   └─────┬──────────┘
//!                                       │
//!                                 print / exec
//! ```

pub mod traversal;
pub mod visited;

pub use traversal::{WalkStats, Walker};
pub use visited::{FileId, VisitedSet};

use crate::config::WalkConfig;
use crate::error::Result;
use std::io::Write;
use tracing::debug;

/// Walk every configured root, writing actions' output to `out`
///
/// Per-entry failures are logged and counted in the returned stats; only a
/// failure to flush `out` at the end is an error.
pub fn run<W: Write>(config: &WalkConfig, out: W) -> Result<WalkStats> {
    let mut walker = Walker::new(config.options, &config.expression, out);
    walker.walk_roots(&config.roots);

    let (mut out, stats) = walker.finish();
    out.flush()?;

    debug!(
        dirs = stats.dirs,
        files = stats.files,
        evaluated = stats.evaluated,
        errors = stats.errors,
        loops = stats.loops,
        "walk finished"
    );

    Ok(stats)
}
