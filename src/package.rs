//! Package-level renames.

use crate::errors::{MappingError, MappingResult};
use crate::mapping::{Mapping, Pairs};
use crate::symbol::{ClassSymbol, FieldSymbol, MethodSymbol};
use std::collections::BTreeMap;
use std::iter;

/// Moves every class of a package into another package.
///
/// Only exact package matches are renamed; subpackages need their own entry.
/// The default package is the empty string. This mapping has no explicit
/// pairs to enumerate and only acts through lookups, so it is meant to be a
/// stage of a [`ChainedMapping`](crate::ChainedMapping).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMapping {
    packages: BTreeMap<String, String>,
}

impl PackageMapping {
    /// Build from `(original, renamed)` package names in dotted or internal form.
    pub fn new<S: AsRef<str>>(packages: impl IntoIterator<Item = (S, S)>) -> MappingResult<Self> {
        let mut table = BTreeMap::new();
        for (original, renamed) in packages {
            let original = normalize(original.as_ref())?;
            let renamed = normalize(renamed.as_ref())?;
            table.insert(original, renamed);
        }
        Ok(Self { packages: table })
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// The renamed package for `package` (internal form).
    pub fn get_package(&self, package: &str) -> Option<&str> {
        self.packages.get(package).map(String::as_str)
    }
}

impl Mapping for PackageMapping {
    fn classes(&self) -> Pairs<'_, ClassSymbol> {
        Box::new(iter::empty())
    }

    fn fields(&self) -> Pairs<'_, FieldSymbol> {
        Box::new(iter::empty())
    }

    fn methods(&self) -> Pairs<'_, MethodSymbol> {
        Box::new(iter::empty())
    }

    fn get_class(&self, original: &ClassSymbol) -> Option<ClassSymbol> {
        self.get_package(original.package())
            .map(|renamed| original.with_package(renamed))
    }

    fn get_field(&self, _original: &FieldSymbol) -> Option<FieldSymbol> {
        None
    }

    fn get_method(&self, _original: &MethodSymbol) -> Option<MethodSymbol> {
        None
    }
}

fn normalize(name: &str) -> MappingResult<String> {
    if !is_valid_package(name) {
        return Err(MappingError::InvalidPackage {
            name: name.to_string(),
        });
    }
    Ok(name.replace('.', "/"))
}

/// Whether `name` is a dotted or slash-separated sequence of Java identifiers.
/// The empty string names the default package.
pub fn is_valid_package(name: &str) -> bool {
    if name.is_empty() {
        return true;
    }
    name.split(|c| c == '.' || c == '/').all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
