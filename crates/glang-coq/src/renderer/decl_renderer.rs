// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Renders top-level declarations to Coq vernacular.

use super::coq_writer::CoqWriter;
use super::render::Render;
use crate::escape;
use glang::{
    CommentDecl, ConstDecl, Decl, FieldDecl, FuncDecl, ImportDecl, StructDecl, TypeDecl,
};
use itertools::Itertools;

pub trait RenderDecl {
    fn render_decl(&self) -> String;
}

impl RenderDecl for Decl {
    fn render_decl(&self) -> String {
        match self {
            Decl::Func(d) => d.render_decl(),
            Decl::Struct(d) => d.render_decl(),
            Decl::Type(d) => d.render_decl(),
            Decl::Const(d) => d.render_decl(),
            Decl::Comment(d) => d.render_decl(),
            Decl::Import(d) => d.render_decl(),
        }
    }
}

/// Binders of a function: receiver first, then the parameters. A function
/// without parameters still takes a unit argument.
fn signature(d: &FuncDecl) -> String {
    let mut args: Vec<String> = d
        .receiver
        .iter()
        .chain(&d.params)
        .map(|p| p.binder().render(false))
        .collect();
    if d.params.is_empty() {
        args.push("<>".to_string());
    }
    args.join(" ")
}

/// Curried `go_type` of a function, for its typing obligation.
fn function_type(d: &FuncDecl) -> String {
    let mut types: Vec<String> = d
        .receiver
        .iter()
        .chain(&d.params)
        .map(|p| p.field_type.render(true))
        .collect();
    if d.params.is_empty() {
        types.push("unitT".to_string());
    }
    types.push(d.return_type.render(true));
    types.join(" -> ")
}

impl RenderDecl for FuncDecl {
    fn render_decl(&self) -> String {
        let mut w = CoqWriter::new();
        w.add_comment(&self.comment);

        let type_params: String = self
            .type_params
            .iter()
            .map(|t| format!("({}: go_type) ", t))
            .collect();

        w.add_fmt(format_args!("Definition {} {}: val :=", self.name, type_params));
        w.with_indent(2, |w| {
            w.add_fmt(format_args!("rec: \"{}\" {} :=", self.name, signature(self)));
            w.with_indent(2, |w| w.add_line(&format!("{}.", self.body.render(false))));
        });

        if self.add_types {
            w.add_fmt(format_args!(
                "Theorem {}_t: ⊢ {} : ({}).",
                self.name,
                self.name,
                function_type(self)
            ));
            w.add_line("Proof. typecheck. Qed.");
            w.add_fmt(format_args!("Hint Resolve {}_t : types.", self.name));
        }
        w.into_string()
    }
}

fn struct_type(fields: &[FieldDecl]) -> String {
    let mut w = CoqWriter::new();
    w.add_line("structT [");
    w.with_indent(2, |w| {
        for (i, field) in fields.iter().enumerate() {
            let sep = if i == fields.len() - 1 { "" } else { ";" };
            w.add_fmt(format_args!(
                "{} :: {}{}",
                escape::quote(&field.name),
                field.field_type.render(false),
                sep
            ));
        }
    });
    w.add_line("]");
    w.into_string()
}

impl RenderDecl for StructDecl {
    fn render_decl(&self) -> String {
        let mut w = CoqWriter::new();
        w.add_fmt(format_args!(
            "Definition {} : go_type := {}.",
            self.name,
            struct_type(&self.fields)
        ));
        w.into_string()
    }
}

impl RenderDecl for TypeDecl {
    fn render_decl(&self) -> String {
        let mut w = CoqWriter::new();
        w.add_fmt(format_args!(
            "Definition {} : go_type := {}.",
            self.name,
            self.body.render(false)
        ));
        w.into_string()
    }
}

impl RenderDecl for ConstDecl {
    fn render_decl(&self) -> String {
        let mut w = CoqWriter::new();
        w.add_comment(&self.comment);
        let width = w.block(
            "Definition ",
            &format!("{} : expr := {}.", self.name, self.value.render(false)),
        );
        w.indent(-(width as isize));
        if self.add_types {
            w.add_fmt(format_args!(
                "Theorem {}_t Γ : Γ ⊢ {} : {}.",
                self.name,
                self.name,
                self.const_type.render(true)
            ));
            w.add_line("Proof. typecheck. Qed.");
        }
        w.into_string()
    }
}

impl RenderDecl for CommentDecl {
    fn render_decl(&self) -> String {
        let mut w = CoqWriter::new();
        w.add_comment(self.text());
        w.into_string()
    }
}

impl RenderDecl for ImportDecl {
    fn render_decl(&self) -> String {
        format!("From New.code Require {}.", escape::import_qualid(&self.path))
    }
}

/// Sorted, duplicate-free import block.
pub(crate) fn sorted_import_lines<'a>(imports: impl IntoIterator<Item = &'a ImportDecl>) -> Vec<String> {
    imports
        .into_iter()
        .map(|i| i.render_decl())
        .sorted()
        .dedup()
        .collect()
}
