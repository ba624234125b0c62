//! Configuration types for fiend
//!
//! This module defines:
//! - CLI entry point using clap derive macros
//! - find(1)-style token parsing (symlink mode, roots, traversal options)
//! - Runtime configuration handed to the walker

use crate::error::{ConfigError, ConfigResult};
use crate::expr::compile::token_at;
use crate::expr::{compile, Expression};
use clap::Parser;
use std::path::PathBuf;

/// Root used when none is given
const DEFAULT_ROOT: &str = ".";

/// Restricted find: walk directory trees and evaluate an expression per entry
#[derive(Parser, Debug, Clone)]
#[command(
    name = "fiend",
    version,
    about = "Walk directory trees and evaluate a predicate/action expression per entry",
    long_about = "Walks each ROOT (default: the current directory) and evaluates the expression \
                  for every entry.\n\n\
                  Arguments follow find(1) order:\n    \
                  [-P|-L]... [ROOT...] [-depth] [-maxdepth N] [EXPRESSION]\n\n\
                  Expression tokens: -name PATTERN, -newer FILE, -print, -exec CMD... ;, -a, -o.\n\
                  With no expression every entry is printed.",
    after_help = "EXAMPLES:\n    \
        fiend src -name '*.rs' -print\n    \
        fiend -L /data -maxdepth 2 -print\n    \
        fiend . -depth -name '*.o' -exec rm {} \\;\n    \
        fiend logs -newer logs/last-run -print"
)]
pub struct CliArgs {
    /// Symlink mode, roots, traversal options and expression
    #[arg(
        value_name = "ARGS",
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    pub args: Vec<String>,
}

/// How symbolic links are treated when stat-ing entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymlinkMode {
    /// `-P`: never follow symlinks
    #[default]
    Physical,
    /// `-L`: follow symlinks, detecting loops
    Logical,
}

/// Traversal options, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WalkOptions {
    pub symlinks: SymlinkMode,

    /// Maximum depth below a root (unlimited if not set)
    pub max_depth: Option<usize>,

    /// Evaluate directories after their contents (`-depth`)
    pub post_order: bool,
}

impl WalkOptions {
    /// Whether children of an entry at `depth` are still within the limit
    pub fn descends_below(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Roots, walked in order
    pub roots: Vec<PathBuf>,

    pub options: WalkOptions,

    /// Compiled expression (may be empty)
    pub expression: Expression,

    /// Tokens left after the expression stopped compiling
    pub ignored: Vec<String>,
}

impl WalkConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> ConfigResult<Self> {
        Self::from_tokens(&args.args)
    }

    /// Parse find-style tokens (without the program name)
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> ConfigResult<Self> {
        let mut options = WalkOptions::default();
        let mut i = 0;

        // -P / -L, last one wins
        while let Some(token) = token_at(tokens, i) {
            options.symlinks = match token {
                "-P" => SymlinkMode::Physical,
                "-L" => SymlinkMode::Logical,
                _ => break,
            };
            i += 1;
        }

        // Roots run until the first token starting with '-'
        let mut roots = Vec::new();
        while let Some(token) = token_at(tokens, i) {
            if token.starts_with('-') {
                break;
            }
            roots.push(trim_root(token));
            i += 1;
        }
        if roots.is_empty() {
            roots.push(PathBuf::from(DEFAULT_ROOT));
        }

        // Traversal options must precede the expression
        while let Some(token) = token_at(tokens, i) {
            match token {
                "-depth" => {
                    options.post_order = true;
                    i += 1;
                }
                "-maxdepth" => {
                    let value = token_at(tokens, i + 1).ok_or_else(|| {
                        ConfigError::MissingArgument {
                            flag: "-maxdepth".to_string(),
                        }
                    })?;
                    options.max_depth = Some(parse_max_depth(value)?);
                    i += 2;
                }
                _ => break,
            }
        }

        let (expression, used) = compile(&tokens[i..])?;
        let ignored = tokens[i + used..]
            .iter()
            .map(|t| t.as_ref().to_string())
            .collect();

        Ok(Self {
            roots,
            options,
            expression,
            ignored,
        })
    }
}

fn parse_max_depth(value: &str) -> ConfigResult<usize> {
    value
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidMaxDepth {
            value: value.to_string(),
        })
}

/// Strip trailing slashes, keeping `/` itself
fn trim_root(root: &str) -> PathBuf {
    let trimmed = root.trim_end_matches('/');
    if trimmed.is_empty() && root.starts_with('/') {
        PathBuf::from("/")
    } else {
        PathBuf::from(trimmed)
    }
}
