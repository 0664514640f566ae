// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Binders for let-bindings, lambdas and loop variables

use crate::data::types::Type;

/// A GooseLang binder: either a named variable or the anonymous binder `<>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binder {
    Anonymous,
    Named(String),
}

impl Binder {
    /// The Go blank identifier `_` binds nothing, so it becomes the anonymous binder.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == "_" {
            Binder::Anonymous
        } else {
            Binder::Named(name)
        }
    }

    /// `Named("_")` is the blank identifier and binds nothing either.
    pub fn is_anonymous(&self) -> bool {
        self.name().is_none()
    }

    /// The bound variable, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Binder::Anonymous => None,
            Binder::Named(name) if name == "_" => None,
            Binder::Named(name) => Some(name),
        }
    }
}

impl From<&str> for Binder {
    fn from(name: &str) -> Self {
        Binder::from_name(name)
    }
}

impl From<String> for Binder {
    fn from(name: String) -> Self {
        Binder::from_name(name)
    }
}

/// Left-hand side of a sequential bind.
///
/// Multiple return values are nested tuples in GooseLang, so destructuring is
/// only supported up to four names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// `e;;; k` - evaluate for effect only
    Anonymous,
    Single(Binder),
    Pair(Binder, Binder),
    Triple(Binder, Binder, Binder),
    Quad(Binder, Binder, Binder, Binder),
}

impl Binding {
    /// Build a binding from a list of names. Returns `None` for more than four names.
    pub fn from_names<I, S>(names: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Binder>,
    {
        let mut names: Vec<Binder> = names.into_iter().map(Into::into).collect();
        let binding = match names.len() {
            0 => Binding::Anonymous,
            1 => Binding::Single(names.remove(0)),
            2 => {
                let b = names.remove(1);
                Binding::Pair(names.remove(0), b)
            }
            3 => {
                let c = names.remove(2);
                let b = names.remove(1);
                Binding::Triple(names.remove(0), b, c)
            }
            4 => {
                let d = names.remove(3);
                let c = names.remove(2);
                let b = names.remove(1);
                Binding::Quad(names.remove(0), b, c, d)
            }
            _ => return None,
        };
        Some(binding)
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Binding::Anonymous)
    }

    /// Number of names bound (0 for the anonymous sequencing form).
    pub fn arity(&self) -> usize {
        match self {
            Binding::Anonymous => 0,
            Binding::Single(_) => 1,
            Binding::Pair(..) => 2,
            Binding::Triple(..) => 3,
            Binding::Quad(..) => 4,
        }
    }
}

/// A `name : type` pair, used for struct fields and function parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub field_type: Type,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, field_type: Type) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    pub fn binder(&self) -> Binder {
        Binder::from_name(self.name.as_str())
    }
}
