//! `flbuild validate` command

use anyhow::Result;

use crate::cli::ValidateArgs;
use flbuild::ops::{validate_rules, GenOptions};

pub fn execute(args: ValidateArgs) -> Result<()> {
    let opts = GenOptions::resolve(args.rules.into())?;
    let (custom, libs) = validate_rules(&opts)?;

    eprintln!(
        "     Checked {} custom rule(s), {} library rule(s): ok",
        custom, libs
    );

    Ok(())
}
