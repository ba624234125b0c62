//! fiend - a restricted find(1)
//!
//! Walks one or more directory trees and, for every entry, evaluates a
//! compiled expression that decides whether to print the entry and/or run
//! an external command on it.
//!
//! # Features
//!
//! - **Compiled expressions**: `-name`, `-newer`, `-print` and `-exec` are
//!   compiled once into an ordered chain with per-node AND/OR early exit.
//!
//! - **Explicit-stack traversal**: no recursion; depth limiting with
//!   `-maxdepth` and true post-order evaluation with `-depth`.
//!
//! - **Cycle safe**: directories are tracked by (device, inode), so
//!   following symlinks with `-L` always terminates.
//!
//! - **No shell**: `-exec` runs its command from an argument vector, so
//!   path names never reach a shell parser.
//!
//! # Architecture
//!
//! ```text
//!   argv ──▶ config::WalkConfig ──▶ expr::compile ──▶ Expression
//!                    │                                    │
//!                    ▼                                    ▼
//!             walker::Walker ── per entry ──▶ Expression::evaluate
//!                    │                                    │
//!              VisitedSet                          print / exec
//! ```
//!
//! # Example
//!
//! ```bash
//! # Every Rust source below src
//! fiend src -name '*.rs' -print
//!
//! # Follow symlinks, two levels deep
//! fiend -L /data -maxdepth 2 -print
//!
//! # Remove object files, contents before their directory
//! fiend . -depth -name '*.o' -exec rm {} \;
//! ```
//!
//! Unix only: entry identity and raw path bytes come from the Unix
//! extensions of `std`.

pub mod config;
pub mod error;
pub mod expr;
pub mod walker;

pub use config::{CliArgs, SymlinkMode, WalkConfig, WalkOptions};
pub use error::{ConfigError, EntryError, FiendError, Result};
pub use expr::{compile, Expression};
pub use walker::{run, VisitedSet, WalkStats, Walker};
