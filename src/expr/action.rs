//! Action executors: `-print` and `-exec`
//!
//! Actions always report success to the evaluator. Their own failures
//! (a broken output stream, a command that exits non-zero or cannot be
//! spawned) are logged and otherwise ignored.

use super::Action;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::{debug, warn};

/// Token replaced by the candidate path in `-exec` arguments
pub const PLACEHOLDER: &str = "{}";

impl Action {
    /// Run the action for `path`, logging any failure
    pub fn run<W: Write + ?Sized>(&self, path: &Path, out: &mut W) {
        match self {
            Action::Print => {
                if let Err(e) = print_path(path, out) {
                    warn!("{}: cannot write to output: {}", path.display(), e);
                }
            }
            Action::Exec(template) => {
                let command_line = template.command_line(path);
                match template.run(path, out) {
                    Ok(status) if status.success() => {
                        debug!("exec ok: {}", command_line);
                    }
                    Ok(status) => {
                        warn!("`{}' failed: {}", command_line, status);
                    }
                    Err(e) => {
                        warn!("`{}' could not be run: {}", command_line, e);
                    }
                }
            }
        }
    }
}

/// Write the raw path bytes followed by a newline
pub fn print_path<W: Write + ?Sized>(path: &Path, out: &mut W) -> io::Result<()> {
    out.write_all(path.as_os_str().as_bytes())?;
    out.write_all(b"\n")
}

/// Replace every placeholder in `template` with `path`
pub fn substitute(template: &str, path: &str) -> String {
    template.replace(PLACEHOLDER, path)
}

/// Same as [`substitute`] but keeps non-UTF-8 paths intact
fn substitute_os(arg: &str, path: &OsStr) -> OsString {
    let mut pieces = arg.split(PLACEHOLDER);
    let mut out = OsString::from(pieces.next().unwrap_or_default());
    for piece in pieces {
        out.push(path);
        out.push(piece);
    }
    out
}

/// Argument vector of an `-exec` action, with `{}` placeholders
///
/// The command is run directly, never through a shell, so metacharacters in
/// path names are passed through as plain bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecTemplate {
    args: Vec<String>,
}

impl ExecTemplate {
    /// Build a template from the tokens between `-exec` and `;`
    ///
    /// A single token holding spaces (`-exec "echo {} ;"`) is split on
    /// whitespace. Returns `None` when no program is left.
    pub fn from_args(args: Vec<String>) -> Option<Self> {
        let args = if args.len() == 1 && args[0].contains(char::is_whitespace) {
            args[0].split_whitespace().map(str::to_string).collect()
        } else {
            args
        };

        if args.is_empty() {
            None
        } else {
            Some(Self { args })
        }
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Concrete argument vector for `path`
    pub fn argv(&self, path: &Path) -> Vec<OsString> {
        self.args
            .iter()
            .map(|arg| substitute_os(arg, path.as_os_str()))
            .collect()
    }

    /// Substituted command rendered as a single line, for diagnostics
    pub fn command_line(&self, path: &Path) -> String {
        substitute(&self.args.join(" "), &path.to_string_lossy())
    }

    /// Flush pending output, then run the command and wait for it
    pub fn run<W: Write + ?Sized>(&self, path: &Path, out: &mut W) -> io::Result<ExitStatus> {
        out.flush()?;

        let argv = self.argv(path);
        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))?;

        Command::new(program).args(rest).status()
    }
}

impl fmt::Display for ExecTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn template(args: &[&str]) -> ExecTemplate {
        ExecTemplate::from_args(args.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_substitute_every_occurrence() {
        assert_eq!(substitute("echo {} {}", "/tmp/x"), "echo /tmp/x /tmp/x");
        assert_eq!(substitute("ls", "/tmp/x"), "ls");
        assert_eq!(substitute("{}{}", "a"), "aa");
    }

    #[test]
    fn test_command_line() {
        let t = template(&["echo", "{}", "{}"]);
        assert_eq!(t.command_line(Path::new("/tmp/x")), "echo /tmp/x /tmp/x");
        assert_eq!(t.to_string(), "echo {} {}");
    }

    #[test]
    fn test_argv_embedded_placeholder() {
        let t = template(&["cp", "{}", "{}.bak"]);
        let argv = t.argv(Path::new("dir/a b.txt"));
        assert_eq!(
            argv,
            vec![
                OsString::from("cp"),
                OsString::from("dir/a b.txt"),
                OsString::from("dir/a b.txt.bak"),
            ]
        );
    }

    #[test]
    fn test_single_token_is_split() {
        let t = template(&["echo {}  done"]);
        assert_eq!(t.args(), ["echo", "{}", "done"]);
    }

    #[test]
    fn test_empty_template_rejected() {
        assert!(ExecTemplate::from_args(Vec::new()).is_none());
        assert!(ExecTemplate::from_args(vec!["   ".to_string()]).is_none());
    }

    #[test]
    fn test_print_path() {
        let mut out = Vec::new();
        print_path(Path::new("d/a.txt"), &mut out).unwrap();
        assert_eq!(out, b"d/a.txt\n");
    }

    #[test]
    fn test_run_reports_exit_status() {
        let mut out = Vec::new();
        let ok = template(&["true"]).run(Path::new("x"), &mut out).unwrap();
        assert!(ok.success());

        let failed = template(&["false"]).run(Path::new("x"), &mut out).unwrap();
        assert!(!failed.success());
    }

    #[test]
    fn test_run_passes_path_without_shell() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("it's $HOME; ok");

        let mut out = Vec::new();
        let status = template(&["touch", "{}"]).run(&target, &mut out).unwrap();
        assert!(status.success());
        assert!(fs::metadata(&target).unwrap().is_file());
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let mut out = Vec::new();
        let result = template(&["fiend-no-such-program-xyz"]).run(Path::new("x"), &mut out);
        assert!(result.is_err());
    }
}
