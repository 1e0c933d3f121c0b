//! Structured command lines.
//!
//! Commands are argv lists handed directly to the process spawner, never
//! a single string through a shell. The shell-quoted rendering exists for
//! logs, dry runs, and emitted plans.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A structured external command: a program and its argv.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandLine {
    /// Create a command for the given program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandLine {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a plain argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a `--name=value` flag as a single argv entry.
    pub fn flag(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.args.push(format!("--{}={}", name, value));
        self
    }

    /// Get the program path.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Render the command the way a shell would need to see it.
    ///
    /// The program and every flag value are single-quoted; flag names are
    /// left bare. The rendering is deterministic for identical input.
    pub fn to_shell_string(&self) -> String {
        let mut parts = vec![sq(&self.program.display().to_string())];
        parts.extend(self.args.iter().map(|arg| quote_arg(arg)));
        parts.join(" ")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_shell_string())
    }
}

/// Single-quote a string for POSIX shell consumption.
pub fn sq(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Quote one argv entry; `--name=value` keeps the flag name bare and
/// quotes only the value.
fn quote_arg(arg: &str) -> String {
    if let Some(rest) = arg.strip_prefix("--") {
        if let Some((name, value)) = rest.split_once('=') {
            return format!("--{}={}", name, sq(value));
        }
    }
    sq(arg)
}
