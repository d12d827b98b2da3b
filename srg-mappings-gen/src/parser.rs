//! Parsers for the published table formats.
//!
//! - SRG: `CL: a b`, `FD: a/b c/d`, `MD: a/b (desc) c/d (desc)`. The colon is
//!   optional, so the output of [`srg_mappings::serialize_srg`] reads back.
//! - Compact SRG: `a b` for classes, `owner name renamed` for fields and
//!   `owner name desc renamed` for methods.
//! - Package tables: `original/ renamed/`, with `./` for the default package.

use crate::config::GenConfig;
use crate::errors::{GenError, GenResult};
use srg_mappings::{
    is_valid_package, ClassSymbol, FieldSymbol, ImmutableMapping, MethodDescriptor, MethodSymbol,
    PackageMapping,
};

/// Options shared by every parser.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Exact lines (after trimming) to drop before parsing.
    pub broken_lines: Vec<String>,
}

impl ParseOptions {
    pub fn new(broken_lines: Vec<String>) -> Self {
        Self { broken_lines }
    }

    pub fn from_config(config: &GenConfig) -> Self {
        Self::new(config.broken_lines.clone())
    }

    pub fn is_broken(&self, line: &str) -> bool {
        self.broken_lines.iter().any(|b| b.trim() == line)
    }

    /// Numbered (1-based) content lines: no blanks, comments or broken lines.
    pub fn filter<'a>(&'a self, input: &'a str) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        input
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .filter(move |(line_num, line)| {
                if self.is_broken(line) {
                    tracing::debug!(line = line_num, "skipping known broken line");
                    false
                } else {
                    true
                }
            })
    }
}

/// Parse an SRG table.
pub fn parse_srg(input: &str, options: &ParseOptions) -> GenResult<ImmutableMapping> {
    let mut classes = Vec::new();
    let mut fields = Vec::new();
    let mut methods = Vec::new();

    for (line_num, line) in options.filter(input) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let tag = tokens[0].trim_end_matches(':');
        let args = &tokens[1..];
        match tag {
            "PK" => {}
            "CL" => {
                expect_args(line_num, tag, args, 2)?;
                classes.push((ClassSymbol::new(args[0]), ClassSymbol::new(args[1])));
            }
            "FD" => {
                expect_args(line_num, tag, args, 2)?;
                let (owner, name) = split_member(line_num, args[0])?;
                let (renamed_owner, renamed_name) = split_member(line_num, args[1])?;
                fields.push((
                    FieldSymbol::new(owner, name),
                    FieldSymbol::new(renamed_owner, renamed_name),
                ));
            }
            "MD" => {
                expect_args(line_num, tag, args, 4)?;
                let (owner, name) = split_member(line_num, args[0])?;
                let descriptor = parse_descriptor(line_num, args[1])?;
                let (renamed_owner, renamed_name) = split_member(line_num, args[2])?;
                let renamed_descriptor = parse_descriptor(line_num, args[3])?;
                methods.push((
                    MethodSymbol::new(owner, name, descriptor),
                    MethodSymbol::new(renamed_owner, renamed_name, renamed_descriptor),
                ));
            }
            other => {
                return Err(GenError::Parse {
                    line: line_num,
                    message: format!("unknown record type '{}'", other),
                })
            }
        }
    }

    tracing::debug!(
        classes = classes.len(),
        fields = fields.len(),
        methods = methods.len(),
        "parsed srg table"
    );
    Ok(ImmutableMapping::new(classes, fields, methods))
}

/// Parse a compact SRG table.
///
/// Renamed members keep the original owner and descriptor; a class table
/// chained in front of this one supplies the owner renames.
pub fn parse_compact_srg(input: &str, options: &ParseOptions) -> GenResult<ImmutableMapping> {
    let mut classes = Vec::new();
    let mut fields = Vec::new();
    let mut methods = Vec::new();

    for (line_num, line) in options.filter(input) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [original, renamed] => {
                classes.push((ClassSymbol::new(*original), ClassSymbol::new(*renamed)));
            }
            [owner, name, renamed] => {
                let original = FieldSymbol::new(ClassSymbol::new(*owner), *name);
                let mut target = original.clone();
                target.name = renamed.to_string();
                fields.push((original, target));
            }
            [owner, name, descriptor, renamed] => {
                let descriptor = parse_descriptor(line_num, descriptor)?;
                let original = MethodSymbol::new(ClassSymbol::new(*owner), *name, descriptor);
                let mut target = original.clone();
                target.name = renamed.to_string();
                methods.push((original, target));
            }
            _ => {
                return Err(GenError::Parse {
                    line: line_num,
                    message: format!("expected 2 to 4 tokens, found {}", tokens.len()),
                })
            }
        }
    }

    tracing::debug!(
        classes = classes.len(),
        fields = fields.len(),
        methods = methods.len(),
        "parsed compact srg table"
    );
    Ok(ImmutableMapping::new(classes, fields, methods))
}

/// Parse a package table into a [`PackageMapping`].
pub fn parse_packages(input: &str, options: &ParseOptions) -> GenResult<PackageMapping> {
    let mut packages = Vec::new();

    for (line_num, line) in options.filter(input) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(GenError::Parse {
                line: line_num,
                message: format!("expected 2 tokens, found {}", tokens.len()),
            });
        }
        let original = package_name(line_num, line, tokens[0])?;
        let renamed = package_name(line_num, line, tokens[1])?;
        packages.push((original, renamed));
    }

    Ok(PackageMapping::new(packages)?)
}

fn package_name(line_num: usize, line: &str, token: &str) -> GenResult<String> {
    let name = token.strip_suffix('/').ok_or_else(|| GenError::Parse {
        line: line_num,
        message: format!("not a package: {}", line),
    })?;
    let name = name.strip_prefix('.').unwrap_or(name);
    if !is_valid_package(name) {
        return Err(GenError::Parse {
            line: line_num,
            message: format!("invalid package: {}", name),
        });
    }
    Ok(name.to_string())
}

fn expect_args(line_num: usize, tag: &str, args: &[&str], expected: usize) -> GenResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(GenError::Parse {
            line: line_num,
            message: format!("{} expects {} arguments, found {}", tag, expected, args.len()),
        })
    }
}

fn split_member(line_num: usize, token: &str) -> GenResult<(ClassSymbol, String)> {
    match token.rsplit_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
            Ok((ClassSymbol::new(owner), name.to_string()))
        }
        _ => Err(GenError::Parse {
            line: line_num,
            message: format!("expected owner/name, found '{}'", token),
        }),
    }
}

fn parse_descriptor(line_num: usize, token: &str) -> GenResult<MethodDescriptor> {
    token.parse().map_err(|e: srg_mappings::MappingError| GenError::Parse {
        line: line_num,
        message: e.to_string(),
    })
}
