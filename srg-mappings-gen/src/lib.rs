//! Builds translation tables between obfuscated, srg, mcp and spigot names.
//!
//! The upstream tables are read from local files named by a [`GenConfig`].
//! [`generate`] then writes up to twelve SRG files, one per direction of
//! every pairing whose sources are available.
//!
//! ```no_run
//! use srg_mappings_gen::{generate, GenConfig, MappingWriter, Sources};
//!
//! let config = GenConfig::load("genmappings.toml".as_ref())?;
//! let sources = Sources::load(&config)?;
//! let report = generate(&sources, &MappingWriter::new(config.output_dir()))?;
//! println!("wrote {} files", report.written.len());
//! # Ok::<(), srg_mappings_gen::GenError>(())
//! ```

mod config;
mod errors;
mod loader;
mod names;
mod parser;
mod runner;
mod writer;

pub use config::{GenConfig, SourcePaths, KNOWN_BROKEN_LINES, KNOWN_VERSIONS};
pub use errors::{GenError, GenResult};
pub use loader::{Sources, SpigotMappings};
pub use names::McpNames;
pub use parser::{parse_compact_srg, parse_packages, parse_srg, ParseOptions};
pub use runner::{generate, GenerationReport};
pub use writer::MappingWriter;
