//! Rule declarations - custom generation rules and library rules.
//!
//! Rules are pure data registered into a [`RuleSet`](crate::core::RuleSet).
//! A custom rule names its dependency groups and carries the action that
//! turns resolved inputs into a generator command; a library rule is a
//! literal enumeration of one compilable unit.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::builder::genrule::GenAction;
use crate::core::artifact::ArtifactKind;
use crate::core::error::RuleError;

/// The name of a rule.
///
/// Valid names are non-empty and contain only ASCII alphanumerics,
/// `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleName(String);

impl RuleName {
    /// Create a validated rule name.
    pub fn new(name: impl Into<String>) -> Result<Self, RuleError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(RuleError::InvalidName(name));
        }
        Ok(RuleName(name))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declaration of one artifact source within a dependency group.
///
/// Paths and glob patterns are resolved relative to the owning rule's
/// unit directory.
#[derive(Debug, Clone)]
pub enum DepSpec {
    /// A fixed path
    Path { kind: ArtifactKind, path: PathBuf },

    /// A glob pattern
    Glob { kind: ArtifactKind, pattern: String },
}

impl DepSpec {
    /// Declare a fixed-path dependency.
    pub fn path(kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        DepSpec::Path {
            kind,
            path: path.into(),
        }
    }

    /// Declare a glob-pattern dependency.
    pub fn glob(kind: ArtifactKind, pattern: impl Into<String>) -> Self {
        DepSpec::Glob {
            kind,
            pattern: pattern.into(),
        }
    }
}

/// A custom rule: named dependency groups plus a generation action.
pub struct CustomRule {
    name: RuleName,
    dir: PathBuf,
    deps: BTreeMap<String, Vec<DepSpec>>,
    action: Box<dyn GenAction>,
}

impl CustomRule {
    /// Create a new custom rule with the given action.
    pub fn new(name: RuleName, action: Box<dyn GenAction>) -> Self {
        CustomRule {
            name,
            dir: PathBuf::new(),
            deps: BTreeMap::new(),
            action,
        }
    }

    /// Set the unit directory, relative to the source root.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Add a dependency declaration under a role.
    pub fn with_dep(mut self, role: impl Into<String>, spec: DepSpec) -> Self {
        self.deps.entry(role.into()).or_default().push(spec);
        self
    }

    /// Get the rule name.
    pub fn name(&self) -> &RuleName {
        &self.name
    }

    /// Get the unit directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the declared dependency groups.
    pub fn deps(&self) -> &BTreeMap<String, Vec<DepSpec>> {
        &self.deps
    }

    /// Get the generation action.
    pub fn action(&self) -> &dyn GenAction {
        self.action.as_ref()
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("name", &self.name)
            .field("dir", &self.dir)
            .field("deps", &self.deps)
            .finish_non_exhaustive()
    }
}

/// One entry in a library rule's header list: a literal file or a
/// cross-reference to another rule's declared outputs (`:name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSpec {
    /// Literal header path, relative to the unit directory
    File(String),

    /// Outputs of a registered custom rule
    Rule(RuleName),
}

impl FromStr for HeaderSpec {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, RuleError> {
        match s.strip_prefix(':') {
            Some(name) => Ok(HeaderSpec::Rule(RuleName::new(name)?)),
            None => Ok(HeaderSpec::File(s.to_string())),
        }
    }
}

impl fmt::Display for HeaderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderSpec::File(path) => f.write_str(path),
            HeaderSpec::Rule(name) => write!(f, ":{}", name),
        }
    }
}

/// A library rule: the literal file lists of one compilable unit.
///
/// Immutable once declared; order among sources and headers is preserved
/// as written.
#[derive(Debug, Clone)]
pub struct LibRule {
    name: RuleName,
    dir: PathBuf,
    sources: Vec<String>,
    headers: Vec<HeaderSpec>,
}

impl LibRule {
    /// Create a new library rule.
    pub fn new(name: RuleName) -> Self {
        LibRule {
            name,
            dir: PathBuf::new(),
            sources: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Set the unit directory, relative to the source root.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Set the source file list.
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sources = sources.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Set the header list. Entries starting with `:` are parsed as
    /// cross-rule references.
    pub fn with_headers<I, S>(mut self, headers: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.headers = headers
            .into_iter()
            .map(|h| h.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self)
    }

    /// Get the rule name.
    pub fn name(&self) -> &RuleName {
        &self.name
    }

    /// Get the unit directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the source list.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Get the header list.
    pub fn headers(&self) -> &[HeaderSpec] {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_name_validation() {
        assert!(RuleName::new("config_headers").is_ok());
        assert!(RuleName::new("base-2").is_ok());
        assert!(RuleName::new("").is_err());
        assert!(RuleName::new("has space").is_err());
        assert!(RuleName::new(":leading").is_err());
    }

    #[test]
    fn test_header_spec_parsing() {
        let file: HeaderSpec = "common.h".parse().unwrap();
        assert_eq!(file, HeaderSpec::File("common.h".to_string()));

        let reference: HeaderSpec = ":config_headers".parse().unwrap();
        assert_eq!(
            reference,
            HeaderSpec::Rule(RuleName::new("config_headers").unwrap())
        );

        assert!(":".parse::<HeaderSpec>().is_err());
    }

    #[test]
    fn test_header_spec_display_round_trip() {
        for raw in ["common.h", ":config_headers"] {
            let spec: HeaderSpec = raw.parse().unwrap();
            assert_eq!(spec.to_string(), raw);
        }
    }

    #[test]
    fn test_lib_rule_builder() {
        let rule = LibRule::new(RuleName::new("base").unwrap())
            .with_dir("fastlib/base")
            .with_sources(["common.c", "debug.c"])
            .with_headers(["common.h", ":config_headers"])
            .unwrap();

        assert_eq!(rule.name().as_str(), "base");
        assert_eq!(rule.dir(), Path::new("fastlib/base"));
        assert_eq!(rule.sources().len(), 2);
        assert_eq!(rule.headers().len(), 2);
        assert!(matches!(rule.headers()[1], HeaderSpec::Rule(_)));
    }
}
