//! Type system definitions for the AST.
//!
//! This module defines the types a program can spell out:
//!
//! - Base types (`int`, `byte`, `bool`, `double`, `float`, `string`, `void`)
//! - Pointer types (`T*`)
//! - Structure types (`struct { x: int; }`)
//! - Array types (`T[N]`)
//! - Named references to a `type` declaration (`Point`, `geometry.Point`)
//!
//! Named references stay unresolved in the tree; the type checker's context
//! canonicalizes them on demand.

use std::fmt::Display;

use crate::Span;

/// Built in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Int,
    Byte,
    Bool,
    Double,
    Float,
    String,
    Void,
}

impl BaseType {
    /// Maps a type keyword to its base type.
    pub fn from_name(name: &str) -> Option<BaseType> {
        match name {
            "int" => Some(BaseType::Int),
            "byte" => Some(BaseType::Byte),
            "bool" => Some(BaseType::Bool),
            "double" => Some(BaseType::Double),
            "float" => Some(BaseType::Float),
            "string" => Some(BaseType::String),
            "void" => Some(BaseType::Void),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BaseType::Int => "int",
            BaseType::Byte => "byte",
            BaseType::Bool => "bool",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::String => "string",
            BaseType::Void => "void",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, BaseType::Int | BaseType::Byte)
    }
}

/// A single `name: type` entry of a structure.
#[derive(Debug, Clone)]
pub struct StructField {
    pub name: String,
    pub typ: Type,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StructType {
    pub fields: Vec<StructField>,
}

impl StructType {
    pub fn field_type(&self, name: &str) -> Option<&Type> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.typ)
    }
}

#[derive(Debug, Clone)]
pub struct ArrayType {
    pub element: Box<Type>,
    pub size: usize,
}

/// Reference to a `type` declaration.
///
/// The parser always fills in `module`: the declaring module for plain
/// names, the qualifier for `module.Name`. `referenced_in` is the module
/// whose source contains the reference; only its own types and those of
/// its imports are visible.
#[derive(Debug, Clone)]
pub struct TypeName {
    pub module: String,
    pub name: String,
    pub referenced_in: String,
    pub span: Span,
}

impl TypeName {
    pub fn same_as(&self, other: &TypeName) -> bool {
        self.module == other.module && self.name == other.name
    }
}

#[derive(Debug, Clone)]
pub enum Type {
    Base(BaseType),
    Pointer(Box<Type>),
    Struct(StructType),
    Array(ArrayType),
    Named(TypeName),
}

impl Type {
    pub fn int() -> Type {
        Type::Base(BaseType::Int)
    }

    pub fn bool() -> Type {
        Type::Base(BaseType::Bool)
    }

    pub fn void() -> Type {
        Type::Base(BaseType::Void)
    }

    pub fn pointer_to(pointee: Type) -> Type {
        Type::Pointer(Box::new(pointee))
    }

    pub fn as_base(&self) -> Option<BaseType> {
        match self {
            Type::Base(base) => Some(*base),
            _ => None,
        }
    }

    pub fn is_base(&self, base: BaseType) -> bool {
        self.as_base() == Some(base)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Base(base) => write!(f, "{}", base.name()),
            Type::Pointer(pointee) => write!(f, "{}*", pointee),
            Type::Struct(structure) => {
                write!(f, "struct {{")?;
                for field in structure.fields.iter() {
                    write!(f, " {}: {};", field.name, field.typ)?;
                }
                write!(f, " }}")
            }
            Type::Array(array) => write!(f, "{}[{}]", array.element, array.size),
            Type::Named(name) => write!(f, "{}", name.name),
        }
    }
}
