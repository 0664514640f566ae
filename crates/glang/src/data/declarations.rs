// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Top-level declarations of a generated Coq file

use crate::data::binders::FieldDecl;
use crate::data::expressions::Expr;
use crate::data::types::Type;

/// A function (or method, when `receiver` is set) definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    pub type_params: Vec<String>,
    /// Methods take their receiver as the first parameter
    pub receiver: Option<FieldDecl>,
    pub params: Vec<FieldDecl>,
    pub return_type: Type,
    pub body: Expr,
    /// Go doc comment, emitted above the definition
    pub comment: String,
    /// Emit a typing obligation (`Theorem f_t`) after the definition
    pub add_types: bool,
}

impl FuncDecl {
    pub fn new(name: impl Into<String>, params: Vec<FieldDecl>, body: Expr) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            receiver: None,
            params,
            return_type: Type::unit(),
            body,
            comment: String::new(),
            add_types: false,
        }
    }

    pub fn with_receiver(mut self, receiver: FieldDecl) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn with_return_type(mut self, return_type: Type) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_type_params(mut self, type_params: Vec<String>) -> Self {
        self.type_params = type_params;
        self
    }

    pub fn with_types(mut self, add_types: bool) -> Self {
        self.add_types = add_types;
        self
    }
}

/// A struct type descriptor definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
}

/// A named type defined as another type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub body: Type,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDecl {
    pub name: String,
    pub const_type: Type,
    pub value: Expr,
    pub comment: String,
    pub add_types: bool,
}

/// A top-level comment, sitting among declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDecl(String);

impl CommentDecl {
    /// Trailing whitespace is dropped so the closing `*)` hugs the text.
    pub fn new(text: &str) -> Self {
        CommentDecl(text.trim_end_matches(&[' ', '\t', '\n'][..]).to_string())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

/// An import of another translated Go package, identified by its import path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImportDecl {
    pub path: String,
}

impl ImportDecl {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Func(FuncDecl),
    Struct(StructDecl),
    Type(TypeDecl),
    Const(ConstDecl),
    Comment(CommentDecl),
    Import(ImportDecl),
}

impl Decl {
    pub fn comment(text: &str) -> Self {
        Decl::Comment(CommentDecl::new(text))
    }

    pub fn import(path: impl Into<String>) -> Self {
        Decl::Import(ImportDecl::new(path))
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Decl::Comment(_))
    }
}

impl From<FuncDecl> for Decl {
    fn from(d: FuncDecl) -> Self {
        Decl::Func(d)
    }
}

impl From<StructDecl> for Decl {
    fn from(d: StructDecl) -> Self {
        Decl::Struct(d)
    }
}

impl From<TypeDecl> for Decl {
    fn from(d: TypeDecl) -> Self {
        Decl::Type(d)
    }
}

impl From<ConstDecl> for Decl {
    fn from(d: ConstDecl) -> Self {
        Decl::Const(d)
    }
}
