// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Simple line-based writer for generating Coq code with proper indentation.

use crate::escape;
use std::fmt;

/// Indenting pretty printer.
///
/// Holds the finished lines and the current indentation width. Multi-line
/// text added at some indentation keeps its own relative layout: every line
/// after the first is shifted by the same amount.
#[derive(Debug, Default)]
pub struct CoqWriter {
    lines: Vec<String>,
    indent: usize,
}

impl CoqWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current indentation width in spaces.
    pub fn indentation(&self) -> usize {
        self.indent
    }

    /// Add a (possibly multi-line) string at the current indentation.
    pub fn add_line(&mut self, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            let prefix = " ".repeat(self.indent);
            self.lines
                .push(format!("{}{}", prefix, indent_lines(self.indent, line)));
        }
    }

    /// Write a formatted line.
    /// Convenience method to avoid `w.add_line(&format!(...))`.
    pub fn add_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.add_line(&args.to_string());
    }

    /// Shift the indentation of subsequent lines by `delta` spaces.
    ///
    /// Every positive shift must be undone by the caller.
    pub fn indent(&mut self, delta: isize) {
        self.indent = self
            .indent
            .checked_add_signed(delta)
            .expect("BUG: indentation popped below zero");
    }

    /// Run `f` with the indentation shifted by `spaces`, restoring it afterwards.
    pub fn with_indent<R>(&mut self, spaces: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        self.indent += spaces;
        let result = f(self);
        self.indent -= spaces;
        result
    }

    /// Add `prefix` immediately followed by `body`, with the rest of `body`
    /// aligned under the end of the prefix.
    ///
    /// Leaves the indentation shifted by the prefix width and returns that
    /// width, which the caller pops with `indent(-width)`.
    pub fn block(&mut self, prefix: &str, body: &str) -> usize {
        let width = prefix.chars().count();
        self.add_line(&format!("{}{}", prefix, indent_lines(width, body)));
        self.indent += width;
        width
    }

    /// Add a Coq comment. Empty comments are dropped.
    pub fn add_comment(&mut self, comment: &str) {
        if comment.is_empty() {
            return;
        }
        let comment = escape::escape_comment(comment);
        let width = self.block("(* ", &format!("{} *)", comment));
        self.indent(-(width as isize));
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn build(&self) -> String {
        self.lines.join("\n")
    }

    pub fn into_string(self) -> String {
        self.lines.join("\n")
    }
}

/// Indent every line of `s` but the first by `spaces`. Empty lines stay empty.
pub fn indent_lines(spaces: usize, s: &str) -> String {
    let indentation = " ".repeat(spaces);
    s.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{}{}", indentation, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn add_parens(needs_paren: bool, expr: String) -> String {
    if needs_paren {
        format!("({})", expr)
    } else {
        expr
    }
}
