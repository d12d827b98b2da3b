//! Writing output tables.

use crate::errors::{GenError, GenResult};
use srg_mappings::{strip_duplicates, write_srg, Mapping};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Writes deduplicated, sorted SRG files into one directory.
#[derive(Debug, Clone)]
pub struct MappingWriter {
    out_dir: PathBuf,
}

impl MappingWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write `mapping` to `file_name`, replacing any existing file.
    ///
    /// Returns the number of lines written.
    pub fn write(&self, mapping: &dyn Mapping, file_name: &str) -> GenResult<usize> {
        let path = self.out_dir.join(file_name);
        let write_error = |e: std::io::Error| GenError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.out_dir).map_err(write_error)?;
        let stripped = strip_duplicates(mapping);
        let file = File::create(&path).map_err(write_error)?;
        let lines = write_srg(&stripped, BufWriter::new(file)).map_err(write_error)?;

        tracing::info!(path = %path.display(), lines, "wrote mappings");
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use srg_mappings::{ClassSymbol, ImmutableMapping};

    #[test]
    fn writes_stripped_sorted_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MappingWriter::new(dir.path().join("1.8.8"));
        let mapping = ImmutableMapping::new(
            vec![
                (ClassSymbol::new("b"), ClassSymbol::new("Entity")),
                (ClassSymbol::new("Same"), ClassSymbol::new("Same")),
                (ClassSymbol::new("a"), ClassSymbol::new("World")),
            ],
            vec![],
            vec![],
        );

        let lines = writer.write(&mapping, "obf2srg.srg").unwrap();
        assert_eq!(lines, 2);
        let content = fs::read_to_string(dir.path().join("1.8.8/obf2srg.srg")).unwrap();
        assert_eq!(content, "CL a World\nCL b Entity\n");
    }

    #[test]
    fn overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.srg");
        fs::write(&path, "stale content that is longer than the new table\n").unwrap();

        let writer = MappingWriter::new(dir.path());
        writer.write(&ImmutableMapping::empty(), "out.srg").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
