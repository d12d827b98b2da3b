//! Composable renaming tables for JVM symbols.
//!
//! A [`Mapping`] is a set of three partial functions that rename classes,
//! fields and methods. Tables published by different naming schemes are
//! loaded as [`ImmutableMapping`]s and combined into translations between any
//! two schemes:
//!
//! - [`ChainedMapping`] threads symbols through an ordered list of mappings
//! - [`RenamingMapping`] projects rename functions onto an existing mapping
//! - [`PackageMapping`] moves whole packages
//! - [`Mapping::invert`] swaps the two sides of every relation
//! - [`strip_duplicates`] drops pairs that do not rename anything
//! - [`serialize_srg`] renders the result as canonical SRG lines
//!
//! ## Example
//!
//! ```
//! use srg_mappings::{ChainedMapping, ClassSymbol, FieldSymbol, ImmutableMapping, Mapping};
//!
//! let a = ClassSymbol::new("A");
//! let b = ClassSymbol::new("B");
//! let obf = ImmutableMapping::new(
//!     vec![(a.clone(), b.clone())],
//!     vec![(FieldSymbol::new(a, "x"), FieldSymbol::new(b.clone(), "y"))],
//!     vec![],
//! );
//! let named = ImmutableMapping::new(vec![(b, ClassSymbol::new("C"))], vec![], vec![]);
//!
//! let chained = ChainedMapping::pair(&obf, &named);
//! let lines = srg_mappings::serialize_sorted(&chained);
//! assert_eq!(lines, vec!["CL A C", "FD A/x C/y"]);
//! ```

mod chained;
mod dedup;
mod descriptor;
mod errors;
mod immutable;
mod mapping;
mod package;
mod renaming;
mod serializer;
mod symbol;

pub use chained::{compose, ChainedMapping};
pub use dedup::strip_duplicates;
pub use descriptor::{MethodDescriptor, Primitive, TypeDescriptor};
pub use errors::{MappingError, MappingResult};
pub use immutable::{ImmutableMapping, Inversion};
pub use mapping::{Mapping, Pairs};
pub use package::{is_valid_package, PackageMapping};
pub use renaming::{Renamer, RenamingMapping};
pub use serializer::{serialize_sorted, serialize_srg, write_srg};
pub use symbol::{ClassSymbol, FieldSymbol, MethodSymbol, SymbolKind};

#[cfg(test)]
mod tests;
