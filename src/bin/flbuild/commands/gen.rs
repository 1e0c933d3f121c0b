//! `flbuild gen` command

use anyhow::Result;

use crate::cli::GenArgs;
use flbuild::ops::{run_generation, GenOptions};

pub fn execute(args: GenArgs) -> Result<()> {
    let opts = GenOptions::resolve(args.rules.into())?;
    let plan = run_generation(&opts)?;

    for (rule, artifacts) in &plan.outputs {
        for artifact in artifacts {
            eprintln!("   Generated {} ({})", artifact.path.display(), rule);
        }
    }
    eprintln!(
        "    Finished {} rule(s), {} unit(s)",
        plan.outputs.len(),
        plan.units.len()
    );

    Ok(())
}
