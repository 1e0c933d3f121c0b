//! Rule definitions for the fastlib `base` module.
//!
//! One custom rule regenerates the platform configuration header; one
//! library rule enumerates the base unit that consumes it through the
//! `:config_headers` cross-reference.

use std::path::Path;

use anyhow::Result;

use crate::builder::genrule::ConfigHeaders;
use crate::core::artifact::ArtifactKind;
use crate::core::registry::RuleSet;
use crate::core::rule::{CustomRule, DepSpec, LibRule, RuleName};

/// Directory of the base unit, relative to the source root.
pub const BASE_DIR: &str = "fastlib/base";

/// Default location of the configuration generator, relative to the base
/// unit directory.
pub const DEFAULT_SCRIPT: &str = "../../script/config.py";

/// Build the rule set for the base module.
///
/// `script` is the configuration generator; a relative path is resolved
/// against the unit directory at execution time.
pub fn base_rules(script: &Path) -> Result<RuleSet> {
    let mut rules = RuleSet::new();

    let config_headers = CustomRule::new(
        RuleName::new("config_headers")?,
        Box::new(ConfigHeaders),
    )
    .with_dir(BASE_DIR)
    .with_dep("script", DepSpec::path(ArtifactKind::Script, script))
    .with_dep("sources", DepSpec::glob(ArtifactKind::Any, "config/*.c"));
    rules.register_custom(config_headers)?;

    let base = LibRule::new(RuleName::new("base")?)
        .with_dir(BASE_DIR)
        .with_sources(["common.c", "debug.c", "cc.cc", "ccmem.cc", "otrav.cc"])
        .with_headers([
            "ansi_colors.h",
            "base.h",
            "common.h",
            "compiler.h",
            "debug.h",
            "cc.h",
            "ccmem.h",
            "otrav.h",
            "otrav_impl.h",
            "fortran.h",
            "test.h",
            "deprecated.h",
            ":config_headers",
        ])?;
    rules.register_lib(base)?;

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rule::HeaderSpec;

    #[test]
    fn test_base_rules_register_and_validate() {
        let rules = base_rules(Path::new(DEFAULT_SCRIPT)).unwrap();
        assert_eq!(rules.custom_rules().len(), 1);
        assert_eq!(rules.lib_rules().len(), 1);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_base_unit_shape() {
        let rules = base_rules(Path::new(DEFAULT_SCRIPT)).unwrap();
        let base = &rules.lib_rules()[0];

        assert_eq!(base.sources().len(), 5);
        assert_eq!(base.headers().len(), 13);
        assert!(matches!(
            base.headers().last().unwrap(),
            HeaderSpec::Rule(name) if name.as_str() == "config_headers"
        ));
    }

    #[test]
    fn test_config_headers_dep_groups() {
        let rules = base_rules(Path::new(DEFAULT_SCRIPT)).unwrap();
        let config = rules.custom("config_headers").unwrap();

        let roles: Vec<&String> = config.deps().keys().collect();
        assert_eq!(roles, ["script", "sources"]);
        assert_eq!(config.dir(), Path::new(BASE_DIR));
    }
}
