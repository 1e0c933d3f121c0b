//! Command execution seam.
//!
//! Actions issue commands through a CommandRunner rather than spawning
//! processes themselves, so dry runs and tests can observe exactly what
//! would be executed.

use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::builder::command::CommandLine;
use crate::util::process::ProcessBuilder;

/// Issues external commands on behalf of generation actions.
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion, failing on nonzero exit.
    fn run(&self, cmd: &CommandLine) -> Result<()>;
}

/// Spawns commands directly (argv, no shell).
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Create a new process runner.
    pub fn new() -> Self {
        ProcessRunner
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, cmd: &CommandLine) -> Result<()> {
        tracing::debug!("running {}", cmd);
        ProcessBuilder::new(cmd.program())
            .args(cmd.args())
            .exec_and_check()
            .with_context(|| format!("generator command failed: {}", cmd))?;
        Ok(())
    }
}

/// Records commands without executing them. Backs dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Mutex<Vec<CommandLine>>,
}

impl RecordingRunner {
    /// Create a new recording runner.
    pub fn new() -> Self {
        RecordingRunner::default()
    }

    /// Commands recorded so far, in issue order.
    pub fn commands(&self) -> Vec<CommandLine> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, cmd: &CommandLine) -> Result<()> {
        self.commands.lock().unwrap().push(cmd.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_runner_preserves_order() {
        let runner = RecordingRunner::new();
        runner.run(&CommandLine::new("first")).unwrap();
        runner.run(&CommandLine::new("second")).unwrap();

        let recorded = runner.commands();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].program(), std::path::Path::new("first"));
        assert_eq!(recorded[1].program(), std::path::Path::new("second"));
    }

    #[test]
    fn test_process_runner_propagates_failure() {
        let runner = ProcessRunner::new();
        let err = runner
            .run(&CommandLine::new("/nonexistent/generator"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("generator command failed"));
    }
}
