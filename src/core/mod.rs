//! Core data model for flbuild.
//!
//! This module contains the foundational types used throughout flbuild:
//! - Typed artifacts and resolved dependency groups
//! - Rule declarations as pure data
//! - The explicit rule registry
//! - Build-variant axes

pub mod artifact;
pub mod error;
pub mod registry;
pub mod rule;
pub mod variant;

pub use artifact::{Artifact, ArtifactKind, FileGroup, ResolvedDeps};
pub use error::RuleError;
pub use registry::RuleSet;
pub use rule::{CustomRule, DepSpec, HeaderSpec, LibRule, RuleName};
pub use variant::BuildVariant;
