//! MCP human-readable names for SRG members.
//!
//! Names come from the `fields.csv` and `methods.csv` exports (columns
//! `searge,name,...`) and are cached as a single JSON object:
//!
//! ```json
//! {"fields": {"field_1_a": "worldTime"}, "methods": {"func_2_b": "tick"}}
//! ```

use crate::errors::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use srg_mappings::Renamer;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// SRG member name to MCP name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpNames {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub methods: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct NameRow {
    searge: String,
    name: String,
}

impl McpNames {
    /// Read both CSV exports.
    pub fn from_csv(fields: &Path, methods: &Path) -> GenResult<Self> {
        Ok(Self {
            fields: read_csv(fields)?,
            methods: read_csv(methods)?,
        })
    }

    pub fn load_cache(path: &Path) -> GenResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| load_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| load_error(path, e))
    }

    pub fn save_cache(&self, path: &Path) -> GenResult<()> {
        let write_error = |e: &dyn std::fmt::Display| GenError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(&e))?;
        }
        let json = serde_json::to_string(self).map_err(|e| write_error(&e))?;
        fs::write(path, json).map_err(|e| write_error(&e))
    }

    /// MCP name for an SRG field name, or the name itself.
    pub fn field_name<'a>(&'a self, searge: &'a str) -> &'a str {
        self.fields.get(searge).map(String::as_str).unwrap_or(searge)
    }

    /// MCP name for an SRG method name, or the name itself.
    pub fn method_name<'a>(&'a self, searge: &'a str) -> &'a str {
        self.methods.get(searge).map(String::as_str).unwrap_or(searge)
    }

    /// Renames members by name and leaves classes alone.
    pub fn renamer(&self) -> Renamer<'_> {
        Renamer::new()
            .with_fields(move |f| self.field_name(&f.name).to_string())
            .with_methods(move |m| self.method_name(&m.name).to_string())
    }
}

fn read_csv(path: &Path) -> GenResult<BTreeMap<String, String>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| load_error(path, e))?;
    let mut names = BTreeMap::new();
    for row in reader.deserialize() {
        let row: NameRow = row.map_err(|e| load_error(path, e))?;
        names.insert(row.searge, row.name);
    }
    tracing::debug!(path = %path.display(), names = names.len(), "read mcp names");
    Ok(names)
}

fn load_error(path: &Path, e: impl std::fmt::Display) -> GenError {
    GenError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
