//! Loading the upstream tables named by a [`GenConfig`].
//!
//! A source that is not configured or not on disk is reported and left out;
//! outputs that need it are skipped later. A source that exists but fails to
//! read or parse is an error.

use crate::config::GenConfig;
use crate::errors::{GenError, GenResult};
use crate::names::McpNames;
use crate::parser::{parse_compact_srg, parse_packages, parse_srg, ParseOptions};
use srg_mappings::{ChainedMapping, ImmutableMapping, Mapping, PackageMapping};
use std::fs;
use std::path::{Path, PathBuf};

/// The three Spigot tables, applied in order: classes, members, packages.
#[derive(Debug, Clone)]
pub struct SpigotMappings {
    pub classes: ImmutableMapping,
    pub members: ImmutableMapping,
    pub packages: PackageMapping,
}

impl SpigotMappings {
    /// Obfuscated names to Spigot names.
    pub fn chain(&self) -> ChainedMapping<'_> {
        ChainedMapping::new([
            &self.classes as &dyn Mapping,
            &self.members,
            &self.packages,
        ])
    }
}

/// Everything one run can draw from.
#[derive(Debug, Default)]
pub struct Sources {
    pub srg: Option<ImmutableMapping>,
    pub mcp: Option<McpNames>,
    pub spigot: Option<SpigotMappings>,
}

impl Sources {
    pub fn load(config: &GenConfig) -> GenResult<Self> {
        let options = ParseOptions::from_config(config);
        Ok(Self {
            srg: available(load_srg(config, &options))?,
            mcp: available(load_mcp(config))?,
            spigot: available(load_spigot(config, &options))?,
        })
    }
}

/// Turn an unavailable source into `None`, keeping real errors.
fn available<T>(result: GenResult<T>) -> GenResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_unavailable() => {
            tracing::warn!("{}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn load_srg(config: &GenConfig, options: &ParseOptions) -> GenResult<ImmutableMapping> {
    let path = require("srg", &config.sources.srg)?;
    let mapping = parse_file(path, |input| parse_srg(input, options))?;
    tracing::info!(path = %path.display(), entries = mapping.len(), "loaded srg table");
    Ok(mapping)
}

fn load_mcp(config: &GenConfig) -> GenResult<McpNames> {
    let sources = &config.sources;
    if let Some(cache) = sources.mcp_cache.as_deref().filter(|p| p.exists()) {
        let names = ensure_complete(McpNames::load_cache(cache)?, cache, cache)?;
        tracing::info!(path = %cache.display(), "loaded mcp names from cache");
        return Ok(names);
    }

    let fields = require("mcp fields", &sources.mcp_fields)?;
    let methods = require("mcp methods", &sources.mcp_methods)?;
    let names = ensure_complete(McpNames::from_csv(fields, methods)?, fields, methods)?;
    tracing::info!(
        fields = names.fields.len(),
        methods = names.methods.len(),
        "loaded mcp names"
    );
    if let Some(cache) = &sources.mcp_cache {
        names.save_cache(cache)?;
        tracing::debug!(path = %cache.display(), "wrote mcp name cache");
    }
    Ok(names)
}

/// An export without field names or without method names is unusable.
fn ensure_complete(names: McpNames, fields: &Path, methods: &Path) -> GenResult<McpNames> {
    let missing = if names.fields.is_empty() {
        Some(("field", fields))
    } else if names.methods.is_empty() {
        Some(("method", methods))
    } else {
        None
    };
    match missing {
        Some((kind, path)) => Err(GenError::Load {
            path: path.display().to_string(),
            message: format!("no {} names found", kind),
        }),
        None => Ok(names),
    }
}

fn load_spigot(config: &GenConfig, options: &ParseOptions) -> GenResult<SpigotMappings> {
    let sources = &config.sources;
    let classes = require("spigot classes", &sources.spigot_classes)?;
    let members = require("spigot members", &sources.spigot_members)?;
    let packages = require("spigot packages", &sources.spigot_packages)?;

    let spigot = SpigotMappings {
        classes: parse_file(classes, |input| parse_compact_srg(input, options))?,
        members: parse_file(members, |input| parse_compact_srg(input, options))?,
        packages: parse_file(packages, |input| parse_packages(input, options))?,
    };
    tracing::info!(
        classes = spigot.classes.class_count(),
        members = spigot.members.len(),
        packages = spigot.packages.len(),
        "loaded spigot tables"
    );
    Ok(spigot)
}

fn require<'a>(name: &str, path: &'a Option<PathBuf>) -> GenResult<&'a Path> {
    match path {
        None => Err(GenError::SourceUnavailable {
            source_name: name.to_string(),
            message: "not configured".to_string(),
        }),
        Some(path) if !path.exists() => Err(GenError::SourceUnavailable {
            source_name: name.to_string(),
            message: format!("{} does not exist", path.display()),
        }),
        Some(path) => Ok(path),
    }
}

/// Read `path` and parse it, attaching the path to parse errors.
fn parse_file<T>(path: &Path, parse: impl FnOnce(&str) -> GenResult<T>) -> GenResult<T> {
    let input = fs::read_to_string(path).map_err(|e| GenError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse(&input).map_err(|e| match e {
        GenError::Parse { .. } => GenError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use srg_mappings::{ClassSymbol, FieldSymbol};

    fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    #[test]
    fn missing_sources_are_left_out() {
        let mut config = GenConfig::for_version("1.8.8");
        config.sources.srg = Some(fixtures().join("joined.srg"));
        config.sources.spigot_classes = Some(fixtures().join("missing.csrg"));

        let sources = Sources::load(&config).unwrap();
        assert!(sources.srg.is_some());
        assert!(sources.mcp.is_none());
        assert!(sources.spigot.is_none());
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("joined.srg");
        fs::write(&path, "CL: a\n").unwrap();
        let mut config = GenConfig::for_version("1.8.8");
        config.sources.srg = Some(path);

        let err = Sources::load(&config).unwrap_err();
        match err {
            GenError::Load { path, message } => {
                assert!(path.ends_with("joined.srg"));
                assert!(message.contains("line 1"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn mcp_csv_is_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GenConfig::for_version("1.8.8");
        config.sources.mcp_fields = Some(fixtures().join("fields.csv"));
        config.sources.mcp_methods = Some(fixtures().join("methods.csv"));
        config.sources.mcp_cache = Some(dir.path().join("mcp.json"));

        let first = Sources::load(&config).unwrap().mcp.unwrap();
        assert!(dir.path().join("mcp.json").exists());

        // the cache wins once it exists
        config.sources.mcp_fields = None;
        config.sources.mcp_methods = None;
        let second = Sources::load(&config).unwrap().mcp.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_mcp_export_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = GenConfig::for_version("1.8.8");
        config.sources.mcp_fields = Some(fixtures().join("fields.csv"));
        config.sources.mcp_methods = Some(fixtures().join("methods_empty.csv"));
        config.sources.mcp_cache = Some(dir.path().join("mcp.json"));

        let err = Sources::load(&config).unwrap_err();
        match err {
            GenError::Load { path, message } => {
                assert!(path.ends_with("methods_empty.csv"));
                assert_eq!(message, "no method names found");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(!dir.path().join("mcp.json").exists());

        // an empty cache is rejected too
        fs::write(dir.path().join("mcp.json"), r#"{"fields":{},"methods":{}}"#).unwrap();
        let err = Sources::load(&config).unwrap_err();
        assert!(err.to_string().contains("no field names found"));
    }

    #[test]
    fn spigot_chain_applies_members_and_packages() {
        let mut config = GenConfig::for_version("1.8.8");
        config.sources = crate::config::SourcePaths::in_dir(&fixtures());
        config.sources.mcp_cache = None;
        let spigot = Sources::load(&config).unwrap().spigot.unwrap();
        let chain = spigot.chain();

        assert_eq!(
            chain.get_class(&ClassSymbol::new("a")),
            Some(ClassSymbol::new("net/minecraft/server/World"))
        );
        assert_eq!(
            chain.get_field(&FieldSymbol::new(ClassSymbol::new("a"), "c")),
            Some(FieldSymbol::new(
                ClassSymbol::new("net/minecraft/server/World"),
                "time"
            ))
        );
    }
}
