//! Command construction and rule execution.
//!
//! This module turns resolved rule inputs into structured generator
//! commands and drives them through an injected runner.

pub mod command;
pub mod context;
pub mod executor;
pub mod genrule;
pub mod runner;

pub use command::CommandLine;
pub use context::GenContext;
pub use executor::{GenExecutor, GenPlan, LibraryUnit};
pub use genrule::{ConfigHeaders, GenAction};
pub use runner::{CommandRunner, ProcessRunner, RecordingRunner};
