//! Generation actions.
//!
//! A GenAction turns resolved rule inputs into one external generator
//! command and declares the artifacts that command writes. Actions never
//! touch the filesystem themselves; all execution goes through the
//! context's runner.

use anyhow::Result;

use crate::builder::command::CommandLine;
use crate::builder::context::GenContext;
use crate::core::artifact::{Artifact, ArtifactKind, ResolvedDeps};

/// The callback seam of a custom rule.
pub trait GenAction: Send + Sync {
    /// Issue the rule's command through `ctx` and return the declared
    /// outputs.
    fn run(&self, ctx: &GenContext, deps: &ResolvedDeps) -> Result<Vec<Artifact>>;
}

/// Logical name of the header written by the configuration generator.
pub const CONFIG_HEADER: &str = "base/basic_types.h";

/// Subdirectory of the source root handed to the generator as its input.
const SOURCE_SUBDIR: &str = "fastlib";

/// Regenerates the platform-specific `base/basic_types.h` by invoking the
/// external configuration script.
///
/// The `script` group must hold exactly one script artifact. The
/// `sources` group exists only to declare what the generator reads; its
/// contents are never opened here. The command carries exactly three
/// flags, in a fixed order, and the declared output lives under the
/// variant-specific genfiles directory. Failure of the script itself is
/// propagated untouched; there is no retry and no recovery.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigHeaders;

impl GenAction for ConfigHeaders {
    fn run(&self, ctx: &GenContext, deps: &ResolvedDeps) -> Result<Vec<Artifact>> {
        let script = deps.group("script")?.single(ArtifactKind::Script)?;
        let outdir = ctx.genfiles_dir();
        let indir = ctx.source_root().join(SOURCE_SUBDIR);
        let cflags = ctx.param("cflags")?;

        let cmd = CommandLine::new(script.path())
            .flag("genfiles_dir", outdir.display())
            .flag("source_dir", indir.display())
            .flag("cflags", cflags);
        ctx.run(&cmd)?;

        Ok(vec![Artifact::new(
            ArtifactKind::Header,
            outdir.join(CONFIG_HEADER),
        )])
    }
}
