//! Rename functions projected onto an existing mapping.

use crate::mapping::{Mapping, Pairs};
use crate::symbol::{ClassSymbol, FieldSymbol, MethodSymbol};

type ClassFn<'f> = Box<dyn Fn(&ClassSymbol) -> ClassSymbol + 'f>;
type MemberFn<'f, T> = Box<dyn Fn(&T) -> String + 'f>;

/// Total rename functions, one per symbol kind.
///
/// Every function always returns a name; unset functions are the identity.
/// Field and method functions only choose the new name; owners and
/// descriptors are rewritten with the class function.
pub struct Renamer<'f> {
    class: ClassFn<'f>,
    field: MemberFn<'f, FieldSymbol>,
    method: MemberFn<'f, MethodSymbol>,
}

impl<'f> Renamer<'f> {
    pub fn new() -> Self {
        Self {
            class: Box::new(|c| c.clone()),
            field: Box::new(|f| f.name.clone()),
            method: Box::new(|m| m.name.clone()),
        }
    }

    pub fn with_classes(mut self, f: impl Fn(&ClassSymbol) -> ClassSymbol + 'f) -> Self {
        self.class = Box::new(f);
        self
    }

    pub fn with_fields(mut self, f: impl Fn(&FieldSymbol) -> String + 'f) -> Self {
        self.field = Box::new(f);
        self
    }

    pub fn with_methods(mut self, f: impl Fn(&MethodSymbol) -> String + 'f) -> Self {
        self.method = Box::new(f);
        self
    }

    pub fn rename_class(&self, original: &ClassSymbol) -> ClassSymbol {
        (self.class)(original)
    }

    pub fn rename_field(&self, original: &FieldSymbol) -> FieldSymbol {
        let mut renamed = original.map_classes(|c| self.rename_class(c));
        renamed.name = (self.field)(original);
        renamed
    }

    pub fn rename_method(&self, original: &MethodSymbol) -> MethodSymbol {
        let mut renamed = original.map_classes(|c| self.rename_class(c));
        renamed.name = (self.method)(original);
        renamed
    }
}

impl Default for Renamer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Renamer`] applied to the symbols named by a source mapping.
///
/// For every source pair `(a, b)` this mapping holds `(a, rename(a))`; the
/// source's renamed side is ignored. To rename the output side of a table,
/// pass its inverse. Nothing is materialized; each enumeration walks the
/// source again.
pub struct RenamingMapping<'a> {
    source: &'a dyn Mapping,
    renamer: Renamer<'a>,
}

impl<'a> RenamingMapping<'a> {
    pub fn new(source: &'a dyn Mapping, renamer: Renamer<'a>) -> Self {
        Self { source, renamer }
    }

    pub fn renamer(&self) -> &Renamer<'a> {
        &self.renamer
    }
}

impl Mapping for RenamingMapping<'_> {
    fn classes(&self) -> Pairs<'_, ClassSymbol> {
        Box::new(self.source.classes().map(move |(symbol, _)| {
            let renamed = self.renamer.rename_class(&symbol);
            (symbol, renamed)
        }))
    }

    fn fields(&self) -> Pairs<'_, FieldSymbol> {
        Box::new(self.source.fields().map(move |(symbol, _)| {
            let renamed = self.renamer.rename_field(&symbol);
            (symbol, renamed)
        }))
    }

    fn methods(&self) -> Pairs<'_, MethodSymbol> {
        Box::new(self.source.methods().map(move |(symbol, _)| {
            let renamed = self.renamer.rename_method(&symbol);
            (symbol, renamed)
        }))
    }

    fn get_class(&self, original: &ClassSymbol) -> Option<ClassSymbol> {
        Some(self.renamer.rename_class(original))
    }

    fn get_field(&self, original: &FieldSymbol) -> Option<FieldSymbol> {
        Some(self.renamer.rename_field(original))
    }

    fn get_method(&self, original: &MethodSymbol) -> Option<MethodSymbol> {
        Some(self.renamer.rename_method(original))
    }
}
