// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Coq renderer for glang IR.
//!
//! Every IR node renders itself to GooseLang notation through the [`Render`]
//! and [`RenderDecl`] traits. All layout goes through the line-based
//! [`CoqWriter`], so nested blocks line up the same way everywhere.

pub mod escape;
pub mod prelude;
mod renderer;

pub use renderer::{
    add_parens, indent_lines, print_imports, render_file, write_file, CoqWriter, Render,
    RenderDecl,
};
