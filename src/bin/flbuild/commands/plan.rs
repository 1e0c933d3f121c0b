//! `flbuild plan` command

use anyhow::Result;

use crate::cli::PlanArgs;
use flbuild::ops::{plan_generation, GenOptions};

pub fn execute(args: PlanArgs) -> Result<()> {
    let opts = GenOptions::resolve(args.rules.into())?;
    let report = plan_generation(&opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Commands:");
    for command in &report.commands {
        println!("  {}", command);
    }

    for unit in &report.units {
        println!("Unit {} ({})", unit.name, unit.dir.display());
        println!("  sources:");
        for source in &unit.sources {
            println!("    {}", source.display());
        }
        println!("  headers:");
        for header in &unit.headers {
            println!("    {}", header.display());
        }
    }

    Ok(())
}
