//! Rule evaluation operations.
//!
//! These functions assemble a generation context from configuration and
//! overrides, then drive the built-in rules through it - for real
//! (`run_generation`), as a dry run (`plan_generation`), or purely as a
//! consistency check (`validate_rules`).

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::context::GenContext;
use crate::builder::executor::{GenExecutor, GenPlan, LibraryUnit};
use crate::builder::runner::{CommandRunner, ProcessRunner, RecordingRunner};
use crate::core::artifact::Artifact;
use crate::core::variant::BuildVariant;
use crate::rules::base::{base_rules, DEFAULT_SCRIPT};
use crate::util::config::Config;
use crate::util::fs::ensure_dir;
use crate::util::process::find_executable;

/// Caller-supplied overrides, typically from command-line flags. Any
/// field left `None` falls back to `flbuild.toml` and then to built-in
/// defaults.
#[derive(Debug, Clone, Default)]
pub struct GenOverrides {
    pub source_root: Option<PathBuf>,
    pub genfiles_root: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub arch: Option<String>,
    pub kernel: Option<String>,
    pub compiler: Option<String>,
    pub flags: Option<String>,
    pub cflags: Option<String>,
}

/// Fully resolved inputs for one rule evaluation.
#[derive(Debug, Clone)]
pub struct GenOptions {
    /// Source tree root
    pub source_root: PathBuf,

    /// Output root for generated files
    pub genfiles_root: PathBuf,

    /// Configuration generator script
    pub script: PathBuf,

    /// Build variant axes
    pub variant: BuildVariant,

    /// Generator parameters; always carries `cflags`
    pub params: BTreeMap<String, String>,
}

impl GenOptions {
    /// Merge overrides on top of `flbuild.toml` and built-in defaults.
    pub fn resolve(overrides: GenOverrides) -> Result<Self> {
        let cwd =
            std::env::current_dir().context("failed to determine the current directory")?;

        let config_dir = overrides.source_root.clone().unwrap_or_else(|| cwd.clone());
        let config = Config::load(&config_dir)?;

        let source_root = overrides
            .source_root
            .or(config.paths.source_root.clone())
            .unwrap_or(cwd);

        let genfiles_root = overrides
            .genfiles_root
            .or(config.paths.genfiles_root.clone())
            .unwrap_or_else(|| source_root.join("genfiles"));

        let script = resolve_script(overrides.script.or(config.paths.script.clone()));

        let mut params = config.params.clone();
        let cflags = overrides
            .cflags
            .or_else(|| params.get("cflags").cloned())
            .unwrap_or_default();
        params.insert("cflags".to_string(), cflags.clone());

        let variant = BuildVariant::new(
            overrides
                .arch
                .or(config.variant.arch)
                .unwrap_or_else(|| std::env::consts::ARCH.to_string()),
            overrides
                .kernel
                .or(config.variant.kernel)
                .unwrap_or_else(|| std::env::consts::OS.to_string()),
            overrides
                .compiler
                .or(config.variant.compiler)
                .unwrap_or_else(|| "gcc".to_string()),
            overrides
                .flags
                .or(config.variant.flags)
                .unwrap_or_else(|| BuildVariant::flags_label(&cflags)),
        );

        Ok(GenOptions {
            source_root,
            genfiles_root,
            script,
            variant,
            params,
        })
    }

    fn context(&self, runner: Arc<dyn CommandRunner>) -> GenContext {
        GenContext::new(
            self.genfiles_root.clone(),
            self.source_root.clone(),
            self.variant.clone(),
            runner,
        )
        .with_params(self.params.clone())
    }
}

/// A bare script name is looked up in PATH the way a compiler would be;
/// anything with a directory component is left for unit-relative
/// resolution.
fn resolve_script(script: Option<PathBuf>) -> PathBuf {
    let script = script.unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPT));
    if script.components().count() == 1 && !script.is_absolute() {
        if let Some(name) = script.to_str() {
            if let Some(found) = find_executable(name) {
                return found;
            }
        }
    }
    script
}

/// A serializable record of one evaluation: the commands that were (or
/// would be) issued, plus the resolved outputs and units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    /// Shell renderings of the issued commands, in execution order
    pub commands: Vec<String>,

    /// Declared outputs, keyed by custom rule name
    pub outputs: BTreeMap<String, Vec<Artifact>>,

    /// Resolved library units
    pub units: Vec<LibraryUnit>,
}

impl PlanReport {
    fn new(commands: Vec<String>, plan: GenPlan) -> Self {
        PlanReport {
            commands,
            outputs: plan.outputs,
            units: plan.units,
        }
    }
}

/// Run the built-in rules for real: the generator script is executed and
/// the declared artifacts are expected to appear on disk.
pub fn run_generation(opts: &GenOptions) -> Result<GenPlan> {
    let ctx = opts.context(Arc::new(ProcessRunner::new()));
    ensure_dir(&ctx.genfiles_dir())?;

    let rules = base_rules(&opts.script)?;
    GenExecutor::new(&rules).execute(&ctx)
}

/// Dry-run the built-in rules: commands are recorded, nothing executes.
pub fn plan_generation(opts: &GenOptions) -> Result<PlanReport> {
    let runner = Arc::new(RecordingRunner::new());
    let ctx = opts.context(runner.clone());

    let rules = base_rules(&opts.script)?;
    let plan = GenExecutor::new(&rules).execute(&ctx)?;

    let commands = runner
        .commands()
        .iter()
        .map(|c| c.to_shell_string())
        .collect();
    Ok(PlanReport::new(commands, plan))
}

/// Check the built-in rules without executing anything: cross-references
/// must resolve, dependency groups must resolve, and every action must be
/// able to construct its command. Returns (custom, library) rule counts.
pub fn validate_rules(opts: &GenOptions) -> Result<(usize, usize)> {
    let ctx = opts.context(Arc::new(RecordingRunner::new()));

    let rules = base_rules(&opts.script)?;
    GenExecutor::new(&rules).execute(&ctx)?;

    Ok((rules.custom_rules().len(), rules.lib_rules().len()))
}
