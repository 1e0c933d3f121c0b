//! Command implementations for the flbuild CLI.

pub mod completions;
pub mod gen;
pub mod plan;
pub mod validate;
