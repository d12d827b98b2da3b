//! `genmappings`: write every mapping table derivable from local upstream tables.

use std::path::PathBuf;

use clap::Parser;
use srg_mappings_gen::{generate, GenConfig, MappingWriter, SourcePaths, Sources};
use tracing::{error, info};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "genmappings")]
#[command(about = "Generate SRG tables between obfuscated, srg, mcp and spigot names")]
struct Args {
    /// Game version to generate for
    #[arg(required_unless_present = "config")]
    version: Option<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the upstream tables under their conventional names
    #[arg(short, long, value_name = "DIR")]
    sources: Option<PathBuf>,

    /// Output directory (defaults to the version)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = resolve_config(args)?;
    config.validate()?;
    info!(version = %config.version, "generating mappings");

    let sources = Sources::load(&config)?;
    let writer = MappingWriter::new(config.output_dir());
    let report = generate(&sources, &writer)?;

    if report.is_empty() {
        error!("no mappings were written");
        std::process::exit(1);
    }
    info!(out = %writer.out_dir().display(), files = report.written.len(), "done");
    Ok(())
}

/// Command line values override the configuration file.
fn resolve_config(args: Args) -> Result<GenConfig, Box<dyn std::error::Error>> {
    let mut config = match (&args.config, &args.version) {
        (Some(path), _) => GenConfig::load(path)?,
        (None, Some(version)) => GenConfig::for_version(version.clone()),
        (None, None) => return Err("a version or a configuration file is required".into()),
    };
    if let Some(version) = args.version {
        config.version = version;
    }
    if let Some(dir) = args.sources {
        config.sources = SourcePaths::in_dir(&dir);
    }
    if let Some(output) = args.output {
        config.output_dir = Some(output);
    }
    Ok(config)
}
