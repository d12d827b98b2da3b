//! Canonical SRG text output.
//!
//! ```text
//! CL <original> <renamed>
//! FD <owner>/<name> <renamed-owner>/<renamed-name>
//! MD <owner>/<name> <descriptor> <renamed-owner>/<renamed-name> <renamed-descriptor>
//! ```

use crate::mapping::Mapping;
use crate::symbol::{ClassSymbol, FieldSymbol, MethodSymbol};
use std::io::{self, Write};

/// One line per pair, in enumeration order.
pub fn serialize_srg(mapping: &dyn Mapping) -> impl Iterator<Item = String> + '_ {
    let classes = mapping.classes().map(|(o, r)| class_line(&o, &r));
    let fields = mapping.fields().map(|(o, r)| field_line(&o, &r));
    let methods = mapping.methods().map(|(o, r)| method_line(&o, &r));
    classes.chain(fields).chain(methods)
}

/// Every line, sorted so identical inputs give identical output.
pub fn serialize_sorted(mapping: &dyn Mapping) -> Vec<String> {
    let mut lines: Vec<String> = serialize_srg(mapping).collect();
    lines.sort();
    lines
}

/// Write the sorted lines, each terminated by `\n`.
pub fn write_srg<W: Write>(mapping: &dyn Mapping, mut out: W) -> io::Result<usize> {
    let lines = serialize_sorted(mapping);
    for line in &lines {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(lines.len())
}

fn class_line(original: &ClassSymbol, renamed: &ClassSymbol) -> String {
    format!("CL {} {}", original, renamed)
}

fn field_line(original: &FieldSymbol, renamed: &FieldSymbol) -> String {
    format!("FD {} {}", original, renamed)
}

fn method_line(original: &MethodSymbol, renamed: &MethodSymbol) -> String {
    format!("MD {} {}", original, renamed)
}
