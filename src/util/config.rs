//! Configuration file loading.
//!
//! An optional `flbuild.toml` at the source root supplies defaults for
//! the variant axes, the generator parameters, and the tree paths;
//! command-line flags override anything set here.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "flbuild.toml";

/// Parsed configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path defaults
    #[serde(default)]
    pub paths: PathsConfig,

    /// Variant axis defaults
    #[serde(default)]
    pub variant: VariantConfig,

    /// Generator parameters (e.g. cflags)
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

/// The `[paths]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Source tree root
    pub source_root: Option<PathBuf>,

    /// Output root for generated files
    pub genfiles_root: Option<PathBuf>,

    /// Configuration generator script
    pub script: Option<PathBuf>,
}

/// The `[variant]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantConfig {
    /// Target architecture
    pub arch: Option<String>,

    /// Kernel / operating system
    pub kernel: Option<String>,

    /// Compiler family
    pub compiler: Option<String>,

    /// Label for the compiler-flags axis (derived from cflags if unset)
    pub flags: Option<String>,
}

impl Config {
    /// Load `flbuild.toml` from `dir`, or defaults when the file is
    /// absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }
}
