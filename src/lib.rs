//! Flbuild - a declarative build-rule engine for C libraries
//!
//! This crate models build rules as plain data: a custom rule names its
//! dependency groups and carries the action that regenerates a
//! platform-specific header through an external script; a library rule
//! enumerates the files of one compilable unit, including the generated
//! header by cross-reference. A thin executor resolves declared inputs,
//! issues the generator commands, and materializes per-unit file lists.

pub mod builder;
pub mod core;
pub mod ops;
pub mod rules;
pub mod util;

pub use crate::core::artifact::{Artifact, ArtifactKind, FileGroup, ResolvedDeps};
pub use crate::core::error::RuleError;
pub use crate::core::registry::RuleSet;
pub use crate::core::rule::{CustomRule, DepSpec, HeaderSpec, LibRule, RuleName};
pub use crate::core::variant::BuildVariant;

pub use crate::builder::command::CommandLine;
pub use crate::builder::context::GenContext;
pub use crate::builder::executor::{GenExecutor, GenPlan, LibraryUnit};
pub use crate::builder::genrule::{ConfigHeaders, GenAction};
pub use crate::builder::runner::{CommandRunner, ProcessRunner, RecordingRunner};
