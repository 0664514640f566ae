// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Go types as GooseLang `go_type` descriptors

/// A `go_type` term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// A named type (`uint64T`, `boolT`, a declared type name, ...)
    Ident(String),
    /// Reference to a struct descriptor by name
    StructName(String),
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    /// Any function type; GooseLang does not track signatures here
    Func,
    Slice(Box<Type>),
    Array {
        len: u64,
        elem: Box<Type>,
    },
    /// Any pointer; the pointee type lives on the load/store instead
    Ptr,
    Tuple(Vec<Type>),
}

impl Type {
    pub fn ident(name: impl Into<String>) -> Self {
        Type::Ident(name.into())
    }

    pub fn struct_name(name: impl Into<String>) -> Self {
        Type::StructName(name.into())
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn slice(elem: Type) -> Self {
        Type::Slice(Box::new(elem))
    }

    pub fn array(len: u64, elem: Type) -> Self {
        Type::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// Tuple of result types; a single type is not wrapped.
    pub fn tuple(mut types: Vec<Type>) -> Self {
        if types.len() == 1 {
            types.remove(0)
        } else {
            Type::Tuple(types)
        }
    }

    pub fn unit() -> Self {
        Type::ident("unitT")
    }
}
