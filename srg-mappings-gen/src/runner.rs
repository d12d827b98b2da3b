//! The fixed set of outputs derived from the loaded sources.
//!
//! | file | built from |
//! |------|------------|
//! | `obf2srg.srg`, `srg2obf.srg` | srg |
//! | `srg2mcp.srg`, `mcp2srg.srg` | mcp names over the srg side of srg |
//! | `obf2mcp.srg`, `mcp2obf.srg` | srg then mcp |
//! | `obf2spigot.srg`, `spigot2obf.srg` | spigot |
//! | `spigot2srg.srg`, `srg2spigot.srg` | inverted spigot then srg |
//! | `spigot2mcp.srg`, `mcp2spigot.srg` | spigot2srg then mcp |

use crate::errors::GenResult;
use crate::loader::Sources;
use crate::writer::MappingWriter;
use srg_mappings::{ChainedMapping, ImmutableMapping, Mapping, RenamingMapping};

/// What one run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// File names with their line counts, in write order.
    pub written: Vec<(String, usize)>,
    /// File names whose sources were unavailable.
    pub skipped: Vec<String>,
}

impl GenerationReport {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

struct Emitter<'w> {
    writer: &'w MappingWriter,
    report: GenerationReport,
}

impl Emitter<'_> {
    fn emit(&mut self, file_name: &str, mapping: Option<&dyn Mapping>) -> GenResult<()> {
        match mapping {
            Some(mapping) => {
                let lines = self.writer.write(mapping, file_name)?;
                self.report.written.push((file_name.to_string(), lines));
            }
            None => {
                tracing::warn!(file = file_name, "skipping output, sources unavailable");
                self.report.skipped.push(file_name.to_string());
            }
        }
        Ok(())
    }

    /// Emit `mapping` and its inverse.
    fn emit_both(
        &mut self,
        forward: &str,
        inverse: &str,
        mapping: Option<&dyn Mapping>,
    ) -> GenResult<()> {
        self.emit(forward, mapping)?;
        let inverted = mapping.map(|m| m.invert());
        self.emit(inverse, as_dyn(&inverted))
    }
}

fn as_dyn<'a, M: Mapping + 'a>(mapping: &'a Option<M>) -> Option<&'a dyn Mapping> {
    mapping.as_ref().map(|m| m as &dyn Mapping)
}

/// Write every output whose sources are available.
pub fn generate(sources: &Sources, writer: &MappingWriter) -> GenResult<GenerationReport> {
    let mut out = Emitter {
        writer,
        report: GenerationReport::default(),
    };

    let srg = sources.srg.as_ref();
    let srg_inverse = srg.map(|m| m.invert());
    let mcp = match (&srg_inverse, &sources.mcp) {
        (Some(srg_inverse), Some(names)) => {
            Some(RenamingMapping::new(srg_inverse, names.renamer()))
        }
        _ => None,
    };
    let obf2mcp = match (srg, &mcp) {
        (Some(srg), Some(mcp)) => Some(ChainedMapping::pair(srg, mcp)),
        _ => None,
    };

    out.emit_both("obf2srg.srg", "srg2obf.srg", srg.map(|m| m as &dyn Mapping))?;
    out.emit_both("srg2mcp.srg", "mcp2srg.srg", as_dyn(&mcp))?;
    out.emit_both("obf2mcp.srg", "mcp2obf.srg", as_dyn(&obf2mcp))?;

    let spigot = sources.spigot.as_ref().map(|s| s.chain());
    let spigot_inverse: Option<ImmutableMapping> = spigot.as_ref().map(|s| s.invert());
    out.emit("obf2spigot.srg", as_dyn(&spigot))?;
    out.emit("spigot2obf.srg", as_dyn(&spigot_inverse))?;

    let spigot2srg = match (&spigot_inverse, srg) {
        (Some(inverse), Some(srg)) => Some(ChainedMapping::pair(inverse, srg)),
        _ => None,
    };
    let spigot2mcp = match (&spigot2srg, &mcp) {
        (Some(spigot2srg), Some(mcp)) => Some(ChainedMapping::pair(spigot2srg, mcp)),
        _ => None,
    };
    out.emit_both("spigot2srg.srg", "srg2spigot.srg", as_dyn(&spigot2srg))?;
    out.emit_both("spigot2mcp.srg", "mcp2spigot.srg", as_dyn(&spigot2mcp))?;

    tracing::info!(
        written = out.report.written.len(),
        skipped = out.report.skipped.len(),
        "generation finished"
    );
    Ok(out.report)
}
