//! Build-variant axes.
//!
//! Generated artifacts are kept distinct per build configuration by a
//! four-segment subpath: architecture, kernel, compiler, and a label for
//! the compiler flags.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::util::hash::Fingerprint;

/// Longest cflags-derived label used verbatim before falling back to a
/// fingerprint.
const MAX_FLAGS_LABEL: usize = 32;

/// The four build-variant axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildVariant {
    /// Target architecture (e.g. `x86_64`)
    pub arch: String,

    /// Kernel / operating system (e.g. `linux`)
    pub kernel: String,

    /// Compiler family (e.g. `gcc`)
    pub compiler: String,

    /// Label for the compiler-flags axis
    pub flags: String,
}

impl BuildVariant {
    /// Create a variant from explicit axis values.
    pub fn new(
        arch: impl Into<String>,
        kernel: impl Into<String>,
        compiler: impl Into<String>,
        flags: impl Into<String>,
    ) -> Self {
        BuildVariant {
            arch: arch.into(),
            kernel: kernel.into(),
            compiler: compiler.into(),
            flags: flags.into(),
        }
    }

    /// Create a variant for the host, with the given compiler and flags
    /// label.
    pub fn host(compiler: impl Into<String>, flags: impl Into<String>) -> Self {
        BuildVariant::new(
            std::env::consts::ARCH,
            std::env::consts::OS,
            compiler,
            flags,
        )
    }

    /// The variant subpath: `arch/kernel/compiler/flags`, in that fixed
    /// order.
    pub fn subpath(&self) -> PathBuf {
        PathBuf::from(&self.arch)
            .join(&self.kernel)
            .join(&self.compiler)
            .join(&self.flags)
    }

    /// Derive a path-safe flags label from raw cflags text.
    ///
    /// Short flag strings become a readable label (`-O2 -Wall` turns into
    /// `O2-Wall`); anything empty stays `default`, and anything long or
    /// containing shell-hostile characters falls back to a deterministic
    /// fingerprint.
    pub fn flags_label(cflags: &str) -> String {
        if cflags.trim().is_empty() {
            return "default".to_string();
        }

        let label: String = cflags
            .split_whitespace()
            .map(|t| t.trim_start_matches('-'))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("-");

        let safe = !label.is_empty()
            && label.len() <= MAX_FLAGS_LABEL
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');

        if safe {
            label
        } else {
            let mut fp = Fingerprint::new();
            fp.update_str(cflags);
            format!("flags-{}", fp.finish_short())
        }
    }
}
