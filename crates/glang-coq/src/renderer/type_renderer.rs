// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Renders glang types to `go_type` terms.
//! Pure translation - no logic, just pattern matching.

use super::coq_writer::add_parens;
use super::render::Render;
use glang::Type;
use itertools::Itertools;

impl Render for Type {
    fn render(&self, needs_paren: bool) -> String {
        match self {
            Type::Ident(name) | Type::StructName(name) => name.clone(),
            Type::Map { key, value } => add_parens(
                needs_paren,
                format!("mapT {} {}", key.render(true), value.render(true)),
            ),
            Type::Func => "funcT".to_string(),
            Type::Slice(elem) => add_parens(needs_paren, format!("sliceT {}", elem.render(true))),
            Type::Array { len, elem } => add_parens(
                needs_paren,
                format!("arrayT {} {}", len, elem.render(true)),
            ),
            Type::Ptr => "ptrT".to_string(),
            Type::Tuple(types) => {
                format!("({})", types.iter().map(|t| t.render(true)).join(" * "))
            }
        }
    }
}
