// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Unified expression renderer - renders glang expressions to GooseLang syntax

use super::coq_writer::{add_parens, indent_lines, CoqWriter};
use crate::escape;
use glang::{BinOp, Binder, Binding, CallExpr, Expr, Literal, StructLiteral};
use itertools::Itertools;

/// Self-rendering of IR nodes.
///
/// `needs_paren` is set when the surrounding syntax would be ambiguous
/// without grouping. Nodes whose syntax is already delimited ignore it.
pub trait Render {
    fn render(&self, needs_paren: bool) -> String;
}

impl Render for Binder {
    fn render(&self, _needs_paren: bool) -> String {
        match self.name() {
            Some(name) => escape::quote(name),
            None => "<>".to_string(),
        }
    }
}

impl Render for Literal {
    fn render(&self, _needs_paren: bool) -> String {
        match self {
            Literal::Bool(true) => "#true".to_string(),
            Literal::Bool(false) => "#false".to_string(),
            Literal::Unit => "#()".to_string(),
            Literal::UInt64(v) => format!("#{}", v),
            Literal::UInt32(v) => format!("#(U32 {})", v),
            Literal::Byte(v) => format!("#(U8 {})", v),
            Literal::String(s) => format!("#(str \"{}\")", escape::escape_string_literal(s)),
            Literal::Null => "#null".to_string(),
        }
    }
}

impl Render for CallExpr {
    fn render(&self, needs_paren: bool) -> String {
        let call = std::iter::once(self.func())
            .chain(self.args())
            .map(|e| e.render(true))
            .join(" ");
        add_parens(needs_paren, call)
    }
}

impl Render for StructLiteral {
    fn render(&self, needs_paren: bool) -> String {
        let mut w = CoqWriter::new();
        w.add_fmt(format_args!("struct.make {} [{{", self.struct_name()));
        let fields = self.fields();
        w.with_indent(2, |w| {
            for (i, (field, value)) in fields.iter().enumerate() {
                let terminator = if i == fields.len() - 1 { "" } else { ";" };
                w.add_fmt(format_args!(
                    "{} ::= {}{}",
                    escape::quote(field),
                    value.render(false),
                    terminator
                ));
            }
        });
        w.add_line("}]");
        add_parens(needs_paren, w.into_string())
    }
}

impl Render for Expr {
    fn render(&self, needs_paren: bool) -> String {
        match self {
            Expr::GallinaIdent(ident) => ident.clone(),
            Expr::PackageIdent { package, ident } => {
                format!("{}.{}", escape::import_qualid(package), ident)
            }
            Expr::Var(name) | Expr::GallinaString(name) => escape::quote(name),
            Expr::Literal(lit) => lit.render(needs_paren),

            Expr::BinOp { op, lhs, rhs } => add_parens(
                needs_paren,
                format!("{} {} {}", lhs.render(true), binop_symbol(*op), rhs.render(true)),
            ),
            Expr::Not(e) => format!("(~ {})", e.render(true)),
            Expr::Call(call) => call.render(needs_paren),
            Expr::StructLiteral(lit) => lit.render(needs_paren),
            Expr::Tuple(elems) => {
                let elems = elems.iter().map(|e| e.render(false)).join(", ");
                format!("({})", indent_lines(1, &elems))
            }
            Expr::List(elems) => {
                let elems = indent_lines(1, &elems.iter().map(|e| e.render(false)).join("; "));
                // `[#` lexes as the vector notation
                if elems.starts_with('#') {
                    format!("[ {} ]", elems)
                } else {
                    format!("[{}]", elems)
                }
            }
            Expr::Paren(inner) => format!("({})", inner.render(false)),

            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => {
                // the whole form is parenthesized, so the parts never need grouping
                let mut w = CoqWriter::new();
                w.add_fmt(format_args!("(if: {}", cond.render(false)));
                flow_branch(&mut w, "then", then_branch, "");
                flow_branch(&mut w, "else", else_branch, ")");
                w.into_string()
            }
            Expr::ForLoop { cond, post, body } => {
                let mut w = CoqWriter::new();
                w.add_fmt(format_args!(
                    "(for: (λ: <>, {}); (λ: <>, {}) := λ: <>,",
                    cond.render(false),
                    post.render(false)
                ));
                w.with_indent(2, |w| w.add_fmt(format_args!("{})", body.render(false))));
                w.into_string()
            }
            Expr::ForRangeSlice {
                key,
                value,
                elem_type,
                slice,
                body,
            } => {
                let mut w = CoqWriter::new();
                w.add_fmt(format_args!(
                    "slice.for_range {} {} (λ: {} {},",
                    elem_type.render(true),
                    slice.render(true),
                    key.render(false),
                    value.render(false)
                ));
                w.with_indent(2, |w| {
                    // loop variables are addressable in Go
                    if !key.is_anonymous() {
                        let k = key.render(false);
                        w.add_fmt(format_args!("let: {} := ref_ty uint64T {} in", k, k));
                    }
                    if !value.is_anonymous() {
                        let v = value.render(false);
                        w.add_fmt(format_args!(
                            "let: {} := ref_ty {} {} in",
                            v,
                            elem_type.render(true),
                            v
                        ));
                    }
                    w.add_fmt(format_args!("{})", body.render(false)));
                });
                add_parens(needs_paren, w.into_string())
            }
            Expr::ForRangeMap {
                key,
                value,
                map,
                body,
            } => {
                let mut w = CoqWriter::new();
                w.add_fmt(format_args!(
                    "MapIter {} (λ: {} {},",
                    map.render(true),
                    key.render(false),
                    value.render(false)
                ));
                w.with_indent(2, |w| w.add_fmt(format_args!("{})", body.render(false))));
                add_parens(needs_paren, w.into_string())
            }
            Expr::Spawn(body) => {
                let mut w = CoqWriter::new();
                let width = w.block("Fork (", &format!("{})", body.render(false)));
                w.indent(-(width as isize));
                add_parens(needs_paren, w.into_string())
            }

            Expr::Load { ptr, ty } => add_parens(
                needs_paren,
                format!("![{}] {}", ty.render(false), ptr.render(true)),
            ),
            Expr::Store { dst, ty, value } => add_parens(
                needs_paren,
                format!(
                    "{} <-[{}] {}",
                    dst.render(true),
                    ty.render(false),
                    value.render(true)
                ),
            ),
            Expr::Ref { value, ty } => add_parens(
                needs_paren,
                format!("ref_ty {} {}", ty.render(true), value.render(true)),
            ),

            Expr::Let {
                binding,
                value,
                cont,
            } => {
                let mut w = CoqWriter::new();
                let value = value.render(false);
                match binding {
                    Binding::Anonymous => w.add_fmt(format_args!("{};;;", value)),
                    Binding::Single(a) => {
                        w.add_fmt(format_args!("let: {} := {} in", a.render(false), value))
                    }
                    Binding::Pair(a, b) => w.add_fmt(format_args!(
                        "let: ({}, {}) := {} in",
                        a.render(false),
                        b.render(false),
                        value
                    )),
                    Binding::Triple(a, b, c) => w.add_fmt(format_args!(
                        "let: (({}, {}), {}) := {} in",
                        a.render(false),
                        b.render(false),
                        c.render(false),
                        value
                    )),
                    Binding::Quad(a, b, c, d) => w.add_fmt(format_args!(
                        "let: ((({}, {}), {}), {}) := {} in",
                        a.render(false),
                        b.render(false),
                        c.render(false),
                        d.render(false),
                        value
                    )),
                }
                w.add_line(&cont.render(false));
                add_parens(needs_paren, w.into_string())
            }
            Expr::Do(e) => add_parens(needs_paren, format!("do:  {}", e.render(false))),
            Expr::FuncLit { params, body } => {
                let sig = if params.is_empty() {
                    "<>".to_string()
                } else {
                    params.iter().map(|p| p.binder().render(false)).join(" ")
                };
                let mut w = CoqWriter::new();
                w.add_fmt(format_args!("(λ: {},", sig));
                w.with_indent(2, |w| {
                    w.add_line(&body.render(false));
                    w.add_line(")");
                });
                w.into_string()
            }
            Expr::Return(value) => format!("return: {}", value.render(needs_paren)),
            Expr::Break => "break: #()".to_string(),
            Expr::Continue => "continue: #()".to_string(),
            Expr::Logging(call) => {
                let mut w = CoqWriter::new();
                w.add_comment(call);
                w.into_string()
            }
        }
    }
}

/// Render one branch of an `if:`, on the keyword's line when it fits on one
/// line and indented under it otherwise.
fn flow_branch(w: &mut CoqWriter, keyword: &str, branch: &Expr, suffix: &str) {
    let code = branch.render(false) + suffix;
    if !code.contains('\n') {
        let width = w.block(&format!("{} ", keyword), &code);
        w.indent(-(width as isize));
        return;
    }
    w.add_line(keyword);
    w.with_indent(2, |w| w.add_line(&code));
}

fn binop_symbol(op: BinOp) -> &'static str {
    match op {
        BinOp::Plus => "+",
        BinOp::Minus => "-",
        BinOp::Equals => "=",
        BinOp::NotEquals => "≠",
        BinOp::LessThan => "<",
        BinOp::GreaterThan => ">",
        BinOp::LessEq => "≤",
        BinOp::GreaterEq => "≥",
        BinOp::Append => "+",
        BinOp::Mul => "*",
        BinOp::Quot => "`quot`",
        BinOp::Rem => "`rem`",
        BinOp::And => "`and`",
        BinOp::Or => "`or`",
        BinOp::Xor => "`xor`",
        BinOp::AndNot => "`and_not`",
        BinOp::LAnd => "&&",
        BinOp::LOr => "||",
        BinOp::Shl => "≪",
        BinOp::Shr => "≫",
    }
}
