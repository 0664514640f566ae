// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Simple Coq renderer - pure translation with minimal logic.
//!
//! Each IR node is pattern matched and emitted as the corresponding GooseLang
//! text. Nothing here inspects more than the node being rendered and its
//! children.

mod coq_writer;
mod decl_renderer;
mod file_renderer;
mod render;
mod type_renderer;

pub use coq_writer::{add_parens, indent_lines, CoqWriter};
pub use decl_renderer::RenderDecl;
pub use file_renderer::{print_imports, render_file, write_file};
pub use render::Render;
