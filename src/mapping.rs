//! The abstract renaming table.

use crate::immutable::{ImmutableMapping, Inversion};
use crate::symbol::{ClassSymbol, FieldSymbol, MethodSymbol};

/// A lazy, restartable sequence of `(original, renamed)` pairs.
pub type Pairs<'a, T> = Box<dyn Iterator<Item = (T, T)> + 'a>;

/// A renaming table over classes, fields and methods.
///
/// Each relation is a partial function from original to renamed symbols.
/// Enumeration may be repeated any number of times and must yield the same
/// pairs every time, though not necessarily in the same order.
///
/// The `map_*` methods apply the table as a total function: symbols without
/// an explicit entry keep their name, with every class they reference passed
/// through [`Mapping::map_class`].
pub trait Mapping {
    fn classes(&self) -> Pairs<'_, ClassSymbol>;

    fn fields(&self) -> Pairs<'_, FieldSymbol>;

    fn methods(&self) -> Pairs<'_, MethodSymbol>;

    /// The explicit entry for `original`, if this table has one.
    fn get_class(&self, original: &ClassSymbol) -> Option<ClassSymbol>;

    fn get_field(&self, original: &FieldSymbol) -> Option<FieldSymbol>;

    fn get_method(&self, original: &MethodSymbol) -> Option<MethodSymbol>;

    fn map_class(&self, original: &ClassSymbol) -> ClassSymbol {
        self.get_class(original).unwrap_or_else(|| original.clone())
    }

    fn map_field(&self, original: &FieldSymbol) -> FieldSymbol {
        self.get_field(original)
            .unwrap_or_else(|| original.map_classes(|c| self.map_class(c)))
    }

    fn map_method(&self, original: &MethodSymbol) -> MethodSymbol {
        self.get_method(original)
            .unwrap_or_else(|| original.map_classes(|c| self.map_class(c)))
    }

    /// Swap both sides of every relation, keeping track of collisions.
    fn inversion(&self) -> Inversion {
        Inversion::of(self.classes(), self.fields(), self.methods())
    }

    /// Swap both sides of every relation.
    ///
    /// When two originals share a renamed symbol the last one enumerated wins.
    /// Collisions are logged, never fatal; use [`Mapping::inversion`] to
    /// inspect them.
    fn invert(&self) -> ImmutableMapping {
        let inversion = self.inversion();
        inversion.report();
        inversion.mapping
    }
}
