//! High-level operations bridging the CLI and the rule engine.

pub mod generate;

pub use generate::{
    plan_generation, run_generation, validate_rules, GenOptions, GenOverrides, PlanReport,
};
