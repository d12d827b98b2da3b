//! JVM type and method descriptors.
//!
//! Descriptors are parsed so the class names they reference can be renamed
//! along with the classes themselves.

use crate::errors::{MappingError, MappingResult};
use crate::symbol::ClassSymbol;
use std::fmt;
use std::str::FromStr;

/// Primitive JVM types, including `void` for method returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Void,
}

impl Primitive {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'B' => Primitive::Byte,
            'C' => Primitive::Char,
            'D' => Primitive::Double,
            'F' => Primitive::Float,
            'I' => Primitive::Int,
            'J' => Primitive::Long,
            'S' => Primitive::Short,
            'Z' => Primitive::Boolean,
            'V' => Primitive::Void,
            _ => return None,
        })
    }

    fn as_char(self) -> char {
        match self {
            Primitive::Byte => 'B',
            Primitive::Char => 'C',
            Primitive::Double => 'D',
            Primitive::Float => 'F',
            Primitive::Int => 'I',
            Primitive::Long => 'J',
            Primitive::Short => 'S',
            Primitive::Boolean => 'Z',
            Primitive::Void => 'V',
        }
    }
}

/// A field type: `I`, `Ljava/lang/String;`, `[[B`, ...
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    Class(ClassSymbol),
    Array(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Rewrite the referenced class, if any, with `f`.
    pub fn map_classes(&self, f: &dyn Fn(&ClassSymbol) -> ClassSymbol) -> Self {
        match self {
            TypeDescriptor::Primitive(p) => TypeDescriptor::Primitive(*p),
            TypeDescriptor::Class(class) => TypeDescriptor::Class(f(class)),
            TypeDescriptor::Array(element) => TypeDescriptor::Array(Box::new(element.map_classes(f))),
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = MappingError;

    fn from_str(s: &str) -> MappingResult<Self> {
        let mut cursor = Cursor::new(s);
        let parsed = cursor.parse_type()?;
        if parsed == TypeDescriptor::Primitive(Primitive::Void) {
            return Err(cursor.error("void is not a field type"));
        }
        cursor.expect_end()?;
        Ok(parsed)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(p) => write!(f, "{}", p.as_char()),
            TypeDescriptor::Class(class) => write!(f, "L{};", class.internal_name()),
            TypeDescriptor::Array(element) => write!(f, "[{}", element),
        }
    }
}

/// A method signature: `(Ljava/lang/String;I)V`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodDescriptor {
    pub params: Vec<TypeDescriptor>,
    pub ret: TypeDescriptor,
}

impl MethodDescriptor {
    pub fn new(params: Vec<TypeDescriptor>, ret: TypeDescriptor) -> Self {
        Self { params, ret }
    }

    pub fn map_classes(&self, f: &dyn Fn(&ClassSymbol) -> ClassSymbol) -> Self {
        Self {
            params: self.params.iter().map(|p| p.map_classes(f)).collect(),
            ret: self.ret.map_classes(f),
        }
    }
}

impl FromStr for MethodDescriptor {
    type Err = MappingError;

    fn from_str(s: &str) -> MappingResult<Self> {
        let mut cursor = Cursor::new(s);
        if cursor.bump() != Some('(') {
            return Err(cursor.error("expected '('"));
        }
        let mut params = Vec::new();
        while cursor.peek() != Some(')') {
            if cursor.peek().is_none() {
                return Err(cursor.error("unterminated parameter list"));
            }
            let param = cursor.parse_type()?;
            if param == TypeDescriptor::Primitive(Primitive::Void) {
                return Err(cursor.error("void parameter"));
            }
            params.push(param);
        }
        cursor.bump();
        let ret = cursor.parse_type()?;
        cursor.expect_end()?;
        Ok(Self { params, ret })
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for param in &self.params {
            write!(f, "{}", param)?;
        }
        write!(f, "){}", self.ret)
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: &str) -> MappingError {
        MappingError::MalformedDescriptor {
            descriptor: self.input.to_string(),
            message: format!("{} at offset {}", message, self.pos),
        }
    }

    fn expect_end(&self) -> MappingResult<()> {
        if self.pos == self.input.len() {
            Ok(())
        } else {
            Err(self.error("trailing characters"))
        }
    }

    fn parse_type(&mut self) -> MappingResult<TypeDescriptor> {
        match self.bump() {
            Some('[') => Ok(TypeDescriptor::Array(Box::new(self.parse_type()?))),
            Some('L') => {
                let rest = &self.input[self.pos..];
                let end = rest
                    .find(';')
                    .ok_or_else(|| self.error("unterminated class reference"))?;
                if end == 0 {
                    return Err(self.error("empty class name"));
                }
                if rest[..end].contains('.') {
                    return Err(self.error("'.' in class name"));
                }
                let class = ClassSymbol::new(&rest[..end]);
                self.pos += end + 1;
                Ok(TypeDescriptor::Class(class))
            }
            Some(c) => Primitive::from_char(c)
                .map(TypeDescriptor::Primitive)
                .ok_or_else(|| self.error(&format!("unknown type '{}'", c))),
            None => Err(self.error("unexpected end")),
        }
    }
}
