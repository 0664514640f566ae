// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Centralized escaping utilities for Coq identifiers, strings and module paths

use itertools::Itertools;
use std::path::PathBuf;

pub fn quote(s: &str) -> String {
    format!("\"{}\"", s)
}

/// Break up comment delimiters so Go comment text cannot open or close a Coq
/// comment. Coq lexes string literals inside comments, so every `"` is
/// doubled into a closed empty string.
pub fn escape_comment(comment: &str) -> String {
    comment
        .replace("(*", "( *")
        .replace("*)", "* )")
        .replace('"', "\"\"")
}

/// Coq string literals escape a double quote by doubling it.
pub fn escape_string_literal(s: &str) -> String {
    s.replace('"', "\"\"")
}

/// Map a Go package path to a Coq file path, one path component per directory.
///
/// Every component becomes a valid Coq identifier and the mapping is
/// injective: `_` is doubled, `.`, `-` and `~` are spelled out, and a
/// component starting with a digit gets a single `_` in front, which no
/// other rule produces before a digit.
pub fn go_path_to_coq_path(path: &str) -> String {
    path.split('/').map(coq_ident_component).join("/")
}

fn coq_ident_component(component: &str) -> String {
    let mut ident = String::with_capacity(component.len());
    if component.starts_with(|c: char| c.is_ascii_digit()) {
        ident.push('_');
    }
    for c in component.chars() {
        match c {
            '_' => ident.push_str("__"),
            '.' => ident.push_str("_dot_"),
            '-' => ident.push_str("_dash_"),
            '~' => ident.push_str("_tilde_"),
            c => ident.push(c),
        }
    }
    ident
}

/// Dotted Coq module name for a Go package path.
pub fn import_qualid(path: &str) -> String {
    go_path_to_coq_path(path).replace('/', ".")
}

/// Relative `.v` file the package at `pkg_path` is generated into.
pub fn coq_output_path(pkg_path: &str) -> PathBuf {
    let coq_path = go_path_to_coq_path(pkg_path);
    match coq_path.rsplit_once('/') {
        Some((dir, base)) => PathBuf::from(dir).join(format!("{}.v", base)),
        None => PathBuf::from(format!("{}.v", coq_path)),
    }
}
