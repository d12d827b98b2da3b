//! Identities of classes, fields and methods.

use crate::descriptor::{MethodDescriptor, TypeDescriptor};
use std::fmt;

/// A fully-qualified class name.
///
/// Names are kept in internal form (`net/minecraft/server/World`). Dotted
/// names are accepted on construction and normalized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassSymbol {
    name: String,
}

impl ClassSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.contains('.') {
            name.replace('.', "/")
        } else {
            name
        };
        Self { name }
    }

    /// The slash-separated name used by descriptors and SRG lines.
    pub fn internal_name(&self) -> &str {
        &self.name
    }

    /// The dot-separated source name.
    pub fn qualified_name(&self) -> String {
        self.name.replace('/', ".")
    }

    /// The package in internal form, `""` for the default package.
    pub fn package(&self) -> &str {
        match self.name.rfind('/') {
            Some(idx) => &self.name[..idx],
            None => "",
        }
    }

    pub fn simple_name(&self) -> &str {
        match self.name.rfind('/') {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }

    /// The same simple name placed in `package` (internal or dotted form).
    pub fn with_package(&self, package: &str) -> Self {
        if package.is_empty() {
            Self::new(self.simple_name())
        } else {
            Self::new(format!("{}/{}", package, self.simple_name()))
        }
    }
}

impl fmt::Display for ClassSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A field, identified by its owner, name and (when known) its type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldSymbol {
    pub owner: ClassSymbol,
    pub name: String,
    /// SRG tables do not record field types, so this is often absent.
    pub descriptor: Option<TypeDescriptor>,
}

impl FieldSymbol {
    pub fn new(owner: ClassSymbol, name: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
            descriptor: None,
        }
    }

    pub fn with_descriptor(mut self, descriptor: TypeDescriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    /// Rewrite every class reference (owner and type) with `f`.
    pub fn map_classes(&self, f: impl Fn(&ClassSymbol) -> ClassSymbol) -> Self {
        Self {
            owner: f(&self.owner),
            name: self.name.clone(),
            descriptor: self.descriptor.as_ref().map(|d| d.map_classes(&f)),
        }
    }
}

impl fmt::Display for FieldSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A method, identified by its owner, name and descriptor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodSymbol {
    pub owner: ClassSymbol,
    pub name: String,
    pub descriptor: MethodDescriptor,
}

impl MethodSymbol {
    pub fn new(owner: ClassSymbol, name: impl Into<String>, descriptor: MethodDescriptor) -> Self {
        Self {
            owner,
            name: name.into(),
            descriptor,
        }
    }

    /// Rewrite every class reference (owner, parameters and return type) with `f`.
    pub fn map_classes(&self, f: impl Fn(&ClassSymbol) -> ClassSymbol) -> Self {
        Self {
            owner: f(&self.owner),
            name: self.name.clone(),
            descriptor: self.descriptor.map_classes(&f),
        }
    }
}

impl fmt::Display for MethodSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.owner, self.name, self.descriptor)
    }
}

/// The three relations a mapping is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Class,
    Field,
    Method,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Class => write!(f, "class"),
            SymbolKind::Field => write!(f, "field"),
            SymbolKind::Method => write!(f, "method"),
        }
    }
}
