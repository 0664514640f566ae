// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Renders a complete glang File to a Coq source file.

use super::decl_renderer::{sorted_import_lines, RenderDecl};
use crate::prelude::FRAMEWORK_IMPORT;
use glang::{CommentDecl, File, ImportDecl};
use itertools::Itertools;
use std::io;

/// Import statements of a file, one per line.
pub fn print_imports(imports: &[ImportDecl]) -> String {
    sorted_import_lines(imports).join("\n")
}

/// Render the whole file: banner, framework and package imports, effects
/// preamble, declarations separated by blank lines, effects footer.
pub fn render_file(file: &File) -> String {
    let notice = CommentDecl::new(&format!("autogenerated from {}", file.pkg_path));
    let mut out = format!(
        "{}\n{}\n{}\n",
        notice.render_decl(),
        FRAMEWORK_IMPORT,
        print_imports(&file.imports)
    );
    if !file.imports.is_empty() {
        out.push('\n');
    }
    out.push_str(&file.import_header);
    out.push_str("\n\n");
    let mut decls = file.decls.iter().map(|d| format!("{}\n", d.render_decl()));
    out.push_str(&decls.join("\n"));
    out.push_str(&file.footer);
    out
}

pub fn write_file<W: io::Write>(file: &File, w: &mut W) -> io::Result<()> {
    w.write_all(render_file(file).as_bytes())
}
