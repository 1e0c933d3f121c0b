//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use flbuild::ops::GenOverrides;

/// Flbuild - declarative header generation for C libraries
#[derive(Parser)]
#[command(name = "flbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the code-generation rules
    Gen(GenArgs),

    /// Show the commands and library units without running anything
    Plan(PlanArgs),

    /// Check that the rule declarations are well-formed
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every rule-evaluating command.
#[derive(Args)]
pub struct RuleOpts {
    /// Source tree root (defaults to the current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Output root for generated files
    #[arg(long)]
    pub genfiles_root: Option<PathBuf>,

    /// Configuration generator script
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Target architecture axis
    #[arg(long)]
    pub arch: Option<String>,

    /// Kernel axis
    #[arg(long)]
    pub kernel: Option<String>,

    /// Compiler axis
    #[arg(long)]
    pub compiler: Option<String>,

    /// Label for the compiler-flags axis (derived from cflags if unset)
    #[arg(long)]
    pub flags: Option<String>,

    /// Compiler flags handed to the generator
    #[arg(long, env = "FLBUILD_CFLAGS", allow_hyphen_values = true)]
    pub cflags: Option<String>,
}

impl From<RuleOpts> for GenOverrides {
    fn from(opts: RuleOpts) -> Self {
        GenOverrides {
            source_root: opts.source_root,
            genfiles_root: opts.genfiles_root,
            script: opts.script,
            arch: opts.arch,
            kernel: opts.kernel,
            compiler: opts.compiler,
            flags: opts.flags,
            cflags: opts.cflags,
        }
    }
}

#[derive(Args)]
pub struct GenArgs {
    #[command(flatten)]
    pub rules: RuleOpts,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub rules: RuleOpts,

    /// Emit the plan as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub rules: RuleOpts,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
