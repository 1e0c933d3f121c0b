//! Rule execution and plan materialization.
//!
//! The executor resolves each custom rule's declared dependency groups,
//! invokes its action, and then materializes each library rule into a
//! fully resolved file list. Custom rules run in registration order;
//! there is no scheduling, no incremental skip, and no retry - the
//! surrounding build drives all of that.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::context::GenContext;
use crate::core::artifact::{Artifact, FileGroup, ResolvedDeps};
use crate::core::error::RuleError;
use crate::core::registry::RuleSet;
use crate::core::rule::{CustomRule, DepSpec, HeaderSpec, LibRule};
use crate::util::fs::{glob_files, normalize_lexical};

/// Result of evaluating a rule set: declared outputs per custom rule and
/// the resolved library units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenPlan {
    /// Declared outputs, keyed by custom rule name
    pub outputs: BTreeMap<String, Vec<Artifact>>,

    /// Library units with fully resolved file lists
    pub units: Vec<LibraryUnit>,
}

/// One compilable unit: resolved source and header paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryUnit {
    /// Rule name
    pub name: String,

    /// Unit directory (source root + the rule's relative dir)
    pub dir: PathBuf,

    /// Resolved source paths, in declaration order
    pub sources: Vec<PathBuf>,

    /// Resolved header paths, in declaration order; cross-references are
    /// expanded to the referenced rule's declared outputs
    pub headers: Vec<PathBuf>,
}

/// Drives a rule set through a generation context.
#[derive(Debug)]
pub struct GenExecutor<'a> {
    rules: &'a RuleSet,
}

impl<'a> GenExecutor<'a> {
    /// Create an executor over a rule set.
    pub fn new(rules: &'a RuleSet) -> Self {
        GenExecutor { rules }
    }

    /// Run every custom rule through `ctx`, then resolve each library
    /// unit against the declared outputs.
    pub fn execute(&self, ctx: &GenContext) -> Result<GenPlan> {
        self.rules.validate()?;

        let mut outputs: BTreeMap<String, Vec<Artifact>> = BTreeMap::new();
        for rule in self.rules.custom_rules() {
            let deps = self.resolve_deps(ctx, rule)?;
            tracing::info!("generating {}", rule.name());
            let declared = rule
                .action()
                .run(ctx, &deps)
                .with_context(|| format!("rule `{}` failed", rule.name()))?;
            tracing::debug!("rule `{}` declared {} output(s)", rule.name(), declared.len());
            outputs.insert(rule.name().as_str().to_string(), declared);
        }

        let mut units = Vec::with_capacity(self.rules.lib_rules().len());
        for lib in self.rules.lib_rules() {
            units.push(self.resolve_unit(ctx, lib, &outputs)?);
        }

        Ok(GenPlan { outputs, units })
    }

    /// Resolve a custom rule's declared dependency groups against the
    /// source tree.
    fn resolve_deps(&self, ctx: &GenContext, rule: &CustomRule) -> Result<ResolvedDeps> {
        let unit_dir = ctx.source_root().join(rule.dir());
        let mut deps = ResolvedDeps::new();

        for (role, specs) in rule.deps() {
            let mut group = FileGroup::new(role.as_str());
            for spec in specs {
                match spec {
                    DepSpec::Path { kind, path } => {
                        let resolved = if path.is_absolute() {
                            path.clone()
                        } else {
                            normalize_lexical(&unit_dir.join(path))
                        };
                        group.push(Artifact::new(*kind, resolved));
                    }
                    DepSpec::Glob { kind, pattern } => {
                        let matches = glob_files(&unit_dir, pattern).with_context(|| {
                            format!("rule `{}`, group `{}`", rule.name(), role)
                        })?;
                        if matches.is_empty() {
                            // An empty match only loses a rebuild trigger,
                            // which nothing here acts on.
                            tracing::debug!(
                                "group `{}` glob `{}` matched no files",
                                role,
                                pattern
                            );
                        }
                        for path in matches {
                            group.push(Artifact::new(*kind, path));
                        }
                    }
                }
            }
            deps.insert(group);
        }

        Ok(deps)
    }

    /// Resolve a library rule against the unit directory and the declared
    /// outputs of the custom rules it references.
    fn resolve_unit(
        &self,
        ctx: &GenContext,
        lib: &LibRule,
        outputs: &BTreeMap<String, Vec<Artifact>>,
    ) -> Result<LibraryUnit> {
        let unit_dir = ctx.source_root().join(lib.dir());

        let sources = lib.sources().iter().map(|s| unit_dir.join(s)).collect();

        let mut headers = Vec::with_capacity(lib.headers().len());
        for spec in lib.headers() {
            match spec {
                HeaderSpec::File(h) => headers.push(unit_dir.join(h)),
                HeaderSpec::Rule(name) => {
                    let declared =
                        outputs
                            .get(name.as_str())
                            .ok_or_else(|| RuleError::MissingRule {
                                rule: lib.name().as_str().to_string(),
                                reference: name.as_str().to_string(),
                            })?;
                    headers.extend(declared.iter().map(|a| a.path.clone()));
                }
            }
        }

        Ok(LibraryUnit {
            name: lib.name().as_str().to_string(),
            dir: unit_dir,
            sources,
            headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use crate::builder::genrule::ConfigHeaders;
    use crate::builder::runner::RecordingRunner;
    use crate::core::artifact::ArtifactKind;
    use crate::core::rule::RuleName;
    use crate::core::variant::BuildVariant;
    use crate::rules::base::base_rules;

    fn example_context(source_root: &Path, runner: Arc<RecordingRunner>) -> GenContext {
        GenContext::new(
            "/out",
            source_root,
            BuildVariant::new("x86", "linux", "gcc", "O2"),
            runner,
        )
        .with_param("cflags", "-O2 -Wall")
    }

    #[test]
    fn test_execute_base_rules_dry() {
        let runner = Arc::new(RecordingRunner::new());
        let ctx = example_context(Path::new("/src"), runner.clone());
        let rules = base_rules(Path::new("/path/to/config.py")).unwrap();

        let plan = GenExecutor::new(&rules).execute(&ctx).unwrap();

        // One command issued, one rule output, one unit.
        assert_eq!(runner.commands().len(), 1);
        assert_eq!(plan.outputs.len(), 1);
        assert_eq!(plan.units.len(), 1);

        let unit = &plan.units[0];
        assert_eq!(unit.name, "base");
        assert_eq!(unit.dir, PathBuf::from("/src/fastlib/base"));
        assert_eq!(unit.sources.len(), 5);
        assert_eq!(unit.sources[0], PathBuf::from("/src/fastlib/base/common.c"));

        // 12 literal headers plus the expanded generated one.
        assert_eq!(unit.headers.len(), 13);
        assert_eq!(
            *unit.headers.last().unwrap(),
            PathBuf::from("/out/x86/linux/gcc/O2/base/basic_types.h")
        );
    }

    #[test]
    fn test_relative_script_resolves_against_unit_dir() {
        let runner = Arc::new(RecordingRunner::new());
        let ctx = example_context(Path::new("/src"), runner.clone());
        let rules = base_rules(Path::new("../../script/config.py")).unwrap();

        GenExecutor::new(&rules).execute(&ctx).unwrap();

        // /src/fastlib/base/../../script/config.py -> /src/script/config.py
        let cmd = &runner.commands()[0];
        assert_eq!(cmd.program(), Path::new("/src/script/config.py"));
    }

    #[test]
    fn test_empty_sources_glob_is_not_an_error() {
        let runner = Arc::new(RecordingRunner::new());
        let ctx = example_context(Path::new("/definitely/not/there"), runner);
        let rules = base_rules(Path::new("/path/to/config.py")).unwrap();

        // The config/*.c glob matches nothing, which is fine: the group
        // only ever established a rebuild dependency.
        assert!(GenExecutor::new(&rules).execute(&ctx).is_ok());
    }

    #[test]
    fn test_dangling_reference_fails_before_running_anything() {
        let runner = Arc::new(RecordingRunner::new());
        let ctx = example_context(Path::new("/src"), runner.clone());

        let mut rules = RuleSet::new();
        rules
            .register_custom(
                crate::core::rule::CustomRule::new(
                    RuleName::new("config_headers").unwrap(),
                    Box::new(ConfigHeaders),
                )
                .with_dep(
                    "script",
                    DepSpec::path(ArtifactKind::Script, "/path/to/config.py"),
                ),
            )
            .unwrap();
        rules
            .register_lib(
                LibRule::new(RuleName::new("base").unwrap())
                    .with_headers([":missing_rule"])
                    .unwrap(),
            )
            .unwrap();

        let err = GenExecutor::new(&rules).execute(&ctx).unwrap_err();
        assert!(err.to_string().contains("missing_rule"));
        assert!(runner.commands().is_empty());
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let runner = Arc::new(RecordingRunner::new());
        let ctx = example_context(Path::new("/src"), runner);
        let rules = base_rules(Path::new("/path/to/config.py")).unwrap();

        let plan = GenExecutor::new(&rules).execute(&ctx).unwrap();
        let json = serde_json::to_string_pretty(&plan).unwrap();
        let parsed: GenPlan = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.units.len(), 1);
        assert!(json.contains("basic_types.h"));
    }
}
