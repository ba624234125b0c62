//! Expression compiler
//!
//! Turns the expression part of the command line into an [`Expression`].
//! Compilation stops at the first token it does not recognise, including
//! `-depth` and `-maxdepth`, which must come before the expression. The
//! caller gets the number of consumed tokens and decides what to do with
//! the rest.

use super::{Action, Expression, JoinOp, NamePattern, NewerThan, Node, NodeKind, Test};
use crate::error::{ConfigError, ConfigResult};
use crate::expr::ExecTemplate;
use std::path::Path;

/// Compile `tokens` into an expression chain
///
/// Returns the chain and how many tokens were consumed. `-a` and `-o` set
/// the join operator recorded on every node compiled after them; the
/// operator starts as AND.
pub fn compile<S: AsRef<str>>(tokens: &[S]) -> ConfigResult<(Expression, usize)> {
    let mut nodes = Vec::new();
    let mut join = JoinOp::And;
    let mut i = 0;

    while i < tokens.len() {
        let kind = match tokens[i].as_ref() {
            "-a" => {
                join = JoinOp::And;
                i += 1;
                continue;
            }
            "-o" => {
                join = JoinOp::Or;
                i += 1;
                continue;
            }
            "-name" => {
                let pattern = operand(tokens, i, "-name")?;
                i += 2;
                NodeKind::Test(Test::Name(NamePattern::new(pattern)?))
            }
            "-newer" => {
                let reference = operand(tokens, i, "-newer")?;
                i += 2;
                NodeKind::Test(Test::Newer(NewerThan::new(Path::new(reference))?))
            }
            "-print" => {
                i += 1;
                NodeKind::Action(Action::Print)
            }
            "-exec" => {
                let (template, used) = exec_template(&tokens[i + 1..])?;
                i += 1 + used;
                NodeKind::Action(Action::Exec(template))
            }
            _ => break,
        };

        nodes.push(Node { kind, join });
    }

    Ok((Expression::new(nodes), i))
}

/// Token at `i` as a string slice, if any
pub(crate) fn token_at<S: AsRef<str>>(tokens: &[S], i: usize) -> Option<&str> {
    tokens.get(i).map(|t| t.as_ref())
}

/// Required non-flag argument following `tokens[at]`
fn operand<'t, S: AsRef<str>>(tokens: &'t [S], at: usize, flag: &str) -> ConfigResult<&'t str> {
    match token_at(tokens, at + 1) {
        Some(arg) if !arg.starts_with('-') => Ok(arg),
        _ => Err(ConfigError::MissingArgument {
            flag: flag.to_string(),
        }),
    }
}

/// Collect the command up to a token ending in `;`
fn exec_template<S: AsRef<str>>(tokens: &[S]) -> ConfigResult<(ExecTemplate, usize)> {
    let mut args = Vec::new();

    for (n, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        if let Some(head) = token.strip_suffix(';') {
            let head = head.strip_suffix('\\').unwrap_or(head);
            if !head.is_empty() {
                args.push(head.to_string());
            }
            let template = ExecTemplate::from_args(args).ok_or_else(|| {
                ConfigError::MissingArgument {
                    flag: "-exec".to_string(),
                }
            })?;
            return Ok((template, n + 1));
        }
        args.push(token.to_string());
    }

    Err(ConfigError::UnterminatedExec)
}
