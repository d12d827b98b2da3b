//! Generator configuration.
//!
//! ```toml
//! version = "1.8.8"
//! output_dir = "out/1.8.8"
//!
//! [sources]
//! srg = "data/joined.srg"
//! mcp_fields = "data/fields.csv"
//! mcp_methods = "data/methods.csv"
//! spigot_classes = "data/bukkit-1.8.8-cl.csrg"
//! spigot_members = "data/bukkit-1.8.8-members.csrg"
//! spigot_packages = "data/package.srg"
//! ```

use crate::errors::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Versions the published tables are known to exist for.
pub const KNOWN_VERSIONS: &[&str] = &["1.8", "1.8.8", "1.9", "1.9.4", "1.10", "1.10.2"];

/// Lines known to be wrong in upstream tables.
pub const KNOWN_BROKEN_LINES: &[&str] = &[
    // member table shipped with the 1.8.8 update
    "IDispenseBehavior a(LISourceBlock;LItemStack;)LItemStack; dispense",
];

/// Configuration for one generator run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Game version the tables belong to.
    pub version: String,
    /// Where output files go; defaults to a directory named after the version.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_known_versions")]
    pub known_versions: Vec<String>,
    /// Lines dropped from every table before parsing.
    #[serde(default = "default_broken_lines")]
    pub broken_lines: Vec<String>,
    #[serde(default)]
    pub sources: SourcePaths,
}

/// Local paths of the upstream tables. Any of them may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePaths {
    pub srg: Option<PathBuf>,
    pub mcp_fields: Option<PathBuf>,
    pub mcp_methods: Option<PathBuf>,
    /// JSON cache of the mcp name tables.
    pub mcp_cache: Option<PathBuf>,
    pub spigot_classes: Option<PathBuf>,
    pub spigot_members: Option<PathBuf>,
    pub spigot_packages: Option<PathBuf>,
}

impl SourcePaths {
    /// Conventional file names inside one directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            srg: Some(dir.join("joined.srg")),
            mcp_fields: Some(dir.join("fields.csv")),
            mcp_methods: Some(dir.join("methods.csv")),
            mcp_cache: Some(dir.join("mcp.json")),
            spigot_classes: Some(dir.join("classes.csrg")),
            spigot_members: Some(dir.join("members.csrg")),
            spigot_packages: Some(dir.join("packages.srg")),
        }
    }
}

fn default_known_versions() -> Vec<String> {
    KNOWN_VERSIONS.iter().map(|v| v.to_string()).collect()
}

fn default_broken_lines() -> Vec<String> {
    KNOWN_BROKEN_LINES.iter().map(|l| l.to_string()).collect()
}

impl GenConfig {
    /// Defaults for `version` with no sources configured.
    pub fn for_version(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            output_dir: None,
            known_versions: default_known_versions(),
            broken_lines: default_broken_lines(),
            sources: SourcePaths::default(),
        }
    }

    /// Load from a TOML file. Relative paths are resolved against the file's directory.
    pub fn load(path: &Path) -> GenResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| GenError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| GenError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Reject versions outside the allowlist.
    pub fn validate(&self) -> GenResult<()> {
        if self.known_versions.iter().any(|v| v == &self.version) {
            Ok(())
        } else {
            Err(GenError::UnknownVersion {
                version: self.version.clone(),
            })
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.version))
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(path) = p {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        };
        resolve(&mut self.output_dir);
        let sources = &mut self.sources;
        for path in [
            &mut sources.srg,
            &mut sources.mcp_fields,
            &mut sources.mcp_methods,
            &mut sources.mcp_cache,
            &mut sources.spigot_classes,
            &mut sources.spigot_members,
            &mut sources.spigot_packages,
        ] {
            resolve(path);
        }
    }
}
