//! Typed artifacts and resolved dependency groups.
//!
//! An Artifact is a typed, resolved reference to a file a rule produces
//! or consumes. Groups of artifacts are bound to named roles and handed
//! to generation actions as a read-only mapping.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::RuleError;

/// The kind of a file artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Executable generator script
    Script,

    /// C/C++ source file
    Source,

    /// Header file
    Header,

    /// Matches any kind
    Any,
}

impl ArtifactKind {
    /// Check whether an artifact of kind `other` satisfies this
    /// constraint. `Any` accepts everything; concrete kinds must match.
    pub fn accepts(&self, other: ArtifactKind) -> bool {
        matches!(self, ArtifactKind::Any) || *self == other
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Script => "script",
            ArtifactKind::Source => "source",
            ArtifactKind::Header => "header",
            ArtifactKind::Any => "any",
        };
        write!(f, "{}", name)
    }
}

/// A typed, resolved reference to a file produced or consumed by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Artifact kind
    pub kind: ArtifactKind,

    /// Resolved filesystem path
    pub path: PathBuf,
}

impl Artifact {
    /// Create a new artifact.
    pub fn new(kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Artifact {
            kind,
            path: path.into(),
        }
    }

    /// Get the artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// An ordered group of artifacts bound to a named role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileGroup {
    role: String,
    artifacts: Vec<Artifact>,
}

impl FileGroup {
    /// Create an empty group for the given role.
    pub fn new(role: impl Into<String>) -> Self {
        FileGroup {
            role: role.into(),
            artifacts: Vec::new(),
        }
    }

    /// Append an artifact to the group.
    pub fn push(&mut self, artifact: Artifact) {
        self.artifacts.push(artifact);
    }

    /// The role this group is bound to.
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Number of artifacts in the group.
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    /// Check whether the group is empty.
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Iterate over the artifacts in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    /// Exactly-one accessor with a kind check.
    ///
    /// Fails when the group holds zero or more than one artifact, or when
    /// the artifact's kind does not satisfy `kind`.
    pub fn single(&self, kind: ArtifactKind) -> Result<&Artifact, RuleError> {
        if self.artifacts.len() != 1 {
            return Err(RuleError::SingleExpected {
                role: self.role.clone(),
                found: self.artifacts.len(),
            });
        }
        let artifact = &self.artifacts[0];
        if !kind.accepts(artifact.kind) {
            return Err(RuleError::KindMismatch {
                role: self.role.clone(),
                path: artifact.path.clone(),
                expected: kind,
                found: artifact.kind,
            });
        }
        Ok(artifact)
    }
}

/// The rule dependency mapping: role name to resolved file group.
///
/// Constructed by the executor at resolution time; read-only to actions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedDeps {
    groups: BTreeMap<String, FileGroup>,
}

impl ResolvedDeps {
    /// Create an empty mapping.
    pub fn new() -> Self {
        ResolvedDeps::default()
    }

    /// Insert a group under its role. A later group replaces an earlier
    /// one with the same role.
    pub fn insert(&mut self, group: FileGroup) {
        self.groups.insert(group.role().to_string(), group);
    }

    /// Look up a group by role.
    pub fn group(&self, role: &str) -> Result<&FileGroup, RuleError> {
        self.groups
            .get(role)
            .ok_or_else(|| RuleError::MissingGroup(role.to_string()))
    }

    /// Iterate over the role names in sorted order.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(|k| k.as_str())
    }
}
