// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! GooseLang IR (glang)
//!
//! The closed node set a translated Go package is expressed in before it is
//! rendered to Coq. This crate only holds data and smart constructors; the
//! text for each node is produced by the `glang-coq` renderer.

mod data;

// Binders and destructuring patterns (from data/binders.rs)
pub use data::binders::{Binder, Binding, FieldDecl};

// Type nodes (from data/types.rs)
pub use data::types::Type;

// Expression nodes (from data/expressions.rs)
pub use data::expressions::{
    interface_method, type_method, BinOp, CallExpr, Expr, Literal, StructLiteral,
};

// Declaration nodes (from data/declarations.rs)
pub use data::declarations::{
    CommentDecl, ConstDecl, Decl, FuncDecl, ImportDecl, StructDecl, TypeDecl,
};

// Whole files (from data/file.rs)
pub use data::file::File;
