//! Explicit rule registry.
//!
//! Rules are registered into a RuleSet rather than declared through
//! module-level side effects; the set owns validation of cross-rule
//! references.

use std::collections::BTreeSet;

use crate::core::error::RuleError;
use crate::core::rule::{CustomRule, HeaderSpec, LibRule, RuleName};

/// A registered collection of custom and library rules.
#[derive(Debug, Default)]
pub struct RuleSet {
    custom: Vec<CustomRule>,
    libs: Vec<LibRule>,
    names: BTreeSet<String>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        RuleSet::default()
    }

    /// Register a custom rule. Names are unique across both rule kinds.
    pub fn register_custom(&mut self, rule: CustomRule) -> Result<(), RuleError> {
        self.claim_name(rule.name())?;
        self.custom.push(rule);
        Ok(())
    }

    /// Register a library rule. Names are unique across both rule kinds.
    pub fn register_lib(&mut self, rule: LibRule) -> Result<(), RuleError> {
        self.claim_name(rule.name())?;
        self.libs.push(rule);
        Ok(())
    }

    fn claim_name(&mut self, name: &RuleName) -> Result<(), RuleError> {
        if !self.names.insert(name.as_str().to_string()) {
            return Err(RuleError::DuplicateRule(name.as_str().to_string()));
        }
        Ok(())
    }

    /// Custom rules in registration order.
    pub fn custom_rules(&self) -> &[CustomRule] {
        &self.custom
    }

    /// Library rules in registration order.
    pub fn lib_rules(&self) -> &[LibRule] {
        &self.libs
    }

    /// Look up a custom rule by name.
    pub fn custom(&self, name: &str) -> Option<&CustomRule> {
        self.custom.iter().find(|r| r.name().as_str() == name)
    }

    /// Check that every cross-reference in every library rule resolves to
    /// a registered custom rule.
    pub fn validate(&self) -> Result<(), RuleError> {
        for lib in &self.libs {
            for header in lib.headers() {
                if let HeaderSpec::Rule(reference) = header {
                    if self.custom(reference.as_str()).is_none() {
                        return Err(RuleError::MissingRule {
                            rule: lib.name().as_str().to_string(),
                            reference: reference.as_str().to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    use crate::builder::context::GenContext;
    use crate::builder::genrule::GenAction;
    use crate::core::artifact::{Artifact, ResolvedDeps};

    struct NoopAction;

    impl GenAction for NoopAction {
        fn run(&self, _ctx: &GenContext, _deps: &ResolvedDeps) -> Result<Vec<Artifact>> {
            Ok(Vec::new())
        }
    }

    fn custom(name: &str) -> CustomRule {
        CustomRule::new(RuleName::new(name).unwrap(), Box::new(NoopAction))
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut rules = RuleSet::new();
        rules.register_custom(custom("config_headers")).unwrap();

        let err = rules.register_custom(custom("config_headers")).unwrap_err();
        assert!(matches!(err, RuleError::DuplicateRule(_)));

        let lib = LibRule::new(RuleName::new("config_headers").unwrap());
        let err = rules.register_lib(lib).unwrap_err();
        assert!(matches!(err, RuleError::DuplicateRule(_)));
    }

    #[test]
    fn test_validate_resolves_references() {
        let mut rules = RuleSet::new();
        rules.register_custom(custom("config_headers")).unwrap();
        rules
            .register_lib(
                LibRule::new(RuleName::new("base").unwrap())
                    .with_headers(["common.h", ":config_headers"])
                    .unwrap(),
            )
            .unwrap();

        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_validate_reports_dangling_reference() {
        let mut rules = RuleSet::new();
        rules
            .register_lib(
                LibRule::new(RuleName::new("base").unwrap())
                    .with_headers([":config_headers"])
                    .unwrap(),
            )
            .unwrap();

        let err = rules.validate().unwrap_err();
        assert!(matches!(err, RuleError::MissingRule { .. }));
        assert!(err.to_string().contains("config_headers"));
    }

    #[test]
    fn test_lookup_by_name() {
        let mut rules = RuleSet::new();
        rules.register_custom(custom("config_headers")).unwrap();

        assert!(rules.custom("config_headers").is_some());
        assert!(rules.custom("other").is_none());
    }
}
