//! Generation context - resolved paths, parameters, and command issue.
//!
//! The context is the narrow capability surface an action sees: where
//! generated files go, where sources live, which configuration
//! parameters were supplied, and a way to issue the generator command.
//! It is built once per invocation and never mutated.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::builder::command::CommandLine;
use crate::builder::runner::CommandRunner;
use crate::core::error::RuleError;
use crate::core::variant::BuildVariant;

/// Immutable per-invocation context handed to generation actions.
#[derive(Clone)]
pub struct GenContext {
    genfiles_root: PathBuf,
    source_root: PathBuf,
    variant: BuildVariant,
    params: BTreeMap<String, String>,
    runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for GenContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenContext")
            .field("genfiles_root", &self.genfiles_root)
            .field("source_root", &self.source_root)
            .field("variant", &self.variant)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl GenContext {
    /// Create a new context.
    pub fn new(
        genfiles_root: impl Into<PathBuf>,
        source_root: impl Into<PathBuf>,
        variant: BuildVariant,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        GenContext {
            genfiles_root: genfiles_root.into(),
            source_root: source_root.into(),
            variant,
            params: BTreeMap::new(),
            runner,
        }
    }

    /// Add a configuration parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Add several configuration parameters.
    pub fn with_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in params {
            self.params.insert(name.into(), value.into());
        }
        self
    }

    /// Output directory for generated files: the genfiles root under the
    /// variant's four-segment subpath.
    pub fn genfiles_dir(&self) -> PathBuf {
        self.genfiles_root.join(self.variant.subpath())
    }

    /// The configured source root.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// The build variant.
    pub fn variant(&self) -> &BuildVariant {
        &self.variant
    }

    /// Look up a configuration parameter.
    pub fn param(&self, name: &str) -> Result<&str, RuleError> {
        self.params
            .get(name)
            .map(|v| v.as_str())
            .ok_or_else(|| RuleError::MissingParam(name.to_string()))
    }

    /// Issue a command through the configured runner.
    pub fn run(&self, cmd: &CommandLine) -> Result<()> {
        self.runner.run(cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::runner::RecordingRunner;

    fn test_context() -> GenContext {
        GenContext::new(
            "/out",
            "/src",
            BuildVariant::new("x86", "linux", "gcc", "O2"),
            Arc::new(RecordingRunner::new()),
        )
    }

    #[test]
    fn test_genfiles_dir_composes_four_segments() {
        let ctx = test_context();
        assert_eq!(ctx.genfiles_dir(), PathBuf::from("/out/x86/linux/gcc/O2"));
    }

    #[test]
    fn test_param_lookup() {
        let ctx = test_context().with_param("cflags", "-O2 -Wall");
        assert_eq!(ctx.param("cflags").unwrap(), "-O2 -Wall");

        let err = ctx.param("ldflags").unwrap_err();
        assert!(matches!(err, RuleError::MissingParam(_)));
    }

    #[test]
    fn test_commands_reach_the_runner() {
        let runner = Arc::new(RecordingRunner::new());
        let ctx = GenContext::new(
            "/out",
            "/src",
            BuildVariant::new("x86", "linux", "gcc", "O2"),
            runner.clone(),
        );

        ctx.run(&CommandLine::new("/bin/gen")).unwrap();
        assert_eq!(runner.commands().len(), 1);
    }
}
