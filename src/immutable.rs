//! Materialized mappings.

use crate::errors::{MappingError, MappingResult};
use crate::mapping::{Mapping, Pairs};
use crate::symbol::{ClassSymbol, FieldSymbol, MethodSymbol, SymbolKind};
use std::collections::BTreeMap;
use std::fmt::Display;

/// A mapping backed by explicit tables.
///
/// Construction follows "last write wins": when the same original appears
/// more than once, the last renamed value is kept. Enumeration is ordered by
/// original symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImmutableMapping {
    pub(crate) classes: BTreeMap<ClassSymbol, ClassSymbol>,
    pub(crate) fields: BTreeMap<FieldSymbol, FieldSymbol>,
    pub(crate) methods: BTreeMap<MethodSymbol, MethodSymbol>,
}

impl ImmutableMapping {
    pub fn new(
        classes: impl IntoIterator<Item = (ClassSymbol, ClassSymbol)>,
        fields: impl IntoIterator<Item = (FieldSymbol, FieldSymbol)>,
        methods: impl IntoIterator<Item = (MethodSymbol, MethodSymbol)>,
    ) -> Self {
        Self {
            classes: classes.into_iter().collect(),
            fields: fields.into_iter().collect(),
            methods: methods.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn len(&self) -> usize {
        self.class_count() + self.field_count() + self.method_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invert, failing on the first original that would be lost.
    pub fn try_invert(&self) -> MappingResult<Self> {
        let inversion = self.inversion();
        match inversion.ambiguities.into_iter().next() {
            Some(ambiguity) => Err(ambiguity),
            None => Ok(inversion.mapping),
        }
    }
}

impl Mapping for ImmutableMapping {
    fn classes(&self) -> Pairs<'_, ClassSymbol> {
        Box::new(self.classes.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    fn fields(&self) -> Pairs<'_, FieldSymbol> {
        Box::new(self.fields.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    fn methods(&self) -> Pairs<'_, MethodSymbol> {
        Box::new(self.methods.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    fn get_class(&self, original: &ClassSymbol) -> Option<ClassSymbol> {
        self.classes.get(original).cloned()
    }

    fn get_field(&self, original: &FieldSymbol) -> Option<FieldSymbol> {
        self.fields.get(original).cloned()
    }

    fn get_method(&self, original: &MethodSymbol) -> Option<MethodSymbol> {
        self.methods.get(original).cloned()
    }
}

/// The inverse of a mapping, with every collision that was resolved by
/// keeping the later pair.
#[derive(Debug, Clone)]
pub struct Inversion {
    pub mapping: ImmutableMapping,
    pub ambiguities: Vec<MappingError>,
}

impl Inversion {
    pub fn of(
        classes: Pairs<'_, ClassSymbol>,
        fields: Pairs<'_, FieldSymbol>,
        methods: Pairs<'_, MethodSymbol>,
    ) -> Self {
        let mut ambiguities = Vec::new();
        let mapping = ImmutableMapping {
            classes: invert_relation(SymbolKind::Class, classes, &mut ambiguities),
            fields: invert_relation(SymbolKind::Field, fields, &mut ambiguities),
            methods: invert_relation(SymbolKind::Method, methods, &mut ambiguities),
        };
        Self {
            mapping,
            ambiguities,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.ambiguities.is_empty()
    }

    /// Log the collisions, if any.
    pub fn report(&self) {
        if self.is_exact() {
            return;
        }
        for ambiguity in &self.ambiguities {
            tracing::debug!(%ambiguity, "inverse collision");
        }
        tracing::warn!(
            collisions = self.ambiguities.len(),
            "mapping is not injective, inverse keeps the last pair"
        );
    }
}

fn invert_relation<T: Ord + Clone + Display>(
    kind: SymbolKind,
    pairs: impl Iterator<Item = (T, T)>,
    ambiguities: &mut Vec<MappingError>,
) -> BTreeMap<T, T> {
    let mut inverted = BTreeMap::new();
    for (original, renamed) in pairs {
        let label = renamed.to_string();
        if let Some(previous) = inverted.insert(renamed, original.clone()) {
            if previous != original {
                ambiguities.push(MappingError::AmbiguousInverse {
                    kind,
                    renamed: label,
                    first: previous.to_string(),
                    second: original.to_string(),
                });
            }
        }
    }
    inverted
}
