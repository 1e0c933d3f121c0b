//! Domain error types for rule declaration and resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::artifact::ArtifactKind;

/// Error raised while declaring or resolving build rules.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("duplicate rule name `{0}`")]
    DuplicateRule(String),

    #[error("invalid rule name `{0}`")]
    InvalidName(String),

    #[error("library rule `{rule}` references unknown rule `:{reference}`")]
    MissingRule { rule: String, reference: String },

    #[error("no dependency group named `{0}`")]
    MissingGroup(String),

    #[error("missing parameter `{0}`")]
    MissingParam(String),

    #[error("group `{role}` must contain exactly one artifact, found {found}")]
    SingleExpected { role: String, found: usize },

    #[error("group `{role}` artifact `{path}` has kind {found}, expected {expected}")]
    KindMismatch {
        role: String,
        path: PathBuf,
        expected: ArtifactKind,
        found: ArtifactKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RuleError::DuplicateRule("base".to_string());
        assert_eq!(err.to_string(), "duplicate rule name `base`");

        let err = RuleError::MissingRule {
            rule: "base".to_string(),
            reference: "config_headers".to_string(),
        };
        assert!(err.to_string().contains(":config_headers"));

        let err = RuleError::KindMismatch {
            role: "script".to_string(),
            path: PathBuf::from("config.py"),
            expected: ArtifactKind::Script,
            found: ArtifactKind::Header,
        };
        assert!(err.to_string().contains("expected script"));
        assert!(err.to_string().contains("has kind header"));
    }
}
