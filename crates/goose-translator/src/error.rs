// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use glang::File;
use std::fmt;
use thiserror::Error;

/// A top-level declaration the front-end could not translate. Recoverable:
/// the rest of the package is still translated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DeclTranslationError {
    pub message: String,
}

impl DeclTranslationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error attached to a source position such as `file.go:12:3`.
    pub fn at(position: &str, message: impl fmt::Display) -> Self {
        Self::new(format!("{}: {}", position, message))
    }

    pub fn unsupported(position: &str, construct: &str) -> Self {
        Self::at(position, format_args!("unsupported: {}", construct))
    }
}

/// A problem reported by the loader for one package.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LoadError(pub String);

/// A list of errors, displayed one per paragraph followed by their count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipleErrors<E>(pub Vec<E>);

impl<E> MultipleErrors<E> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.0.iter()
    }
}

impl<E: fmt::Display> fmt::Display for MultipleErrors<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in self.iter() {
            write!(f, "{}\n\n", err)?;
        }
        match self.0.len() {
            1 => write!(f, "1 error"),
            n => write!(f, "{} errors", n),
        }
    }
}

impl<E: fmt::Debug + fmt::Display> std::error::Error for MultipleErrors<E> {}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("could not load package {pkg_path}:\n{errors}")]
    Load {
        pkg_path: String,
        errors: MultipleErrors<LoadError>,
    },

    /// Some declarations failed. `file` holds everything that did translate.
    #[error("conversion failed for {}:\n{errors}", .file.pkg_path)]
    Conversion {
        file: Box<File>,
        errors: MultipleErrors<DeclTranslationError>,
    },

    #[error("cyclic declarations in {pkg_path}: {}", .cycles.join("; "))]
    CyclicDeclarations { pkg_path: String, cycles: Vec<String> },

    #[error("patterns matched no packages")]
    NoPackagesMatched,

    #[error(transparent)]
    Loader(#[from] anyhow::Error),
}

impl TranslateError {
    /// The partially translated file of a `Conversion` failure.
    pub fn partial_file(&self) -> Option<&File> {
        match self {
            TranslateError::Conversion { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn decl_errors(&self) -> &[DeclTranslationError] {
        match self {
            TranslateError::Conversion { errors, .. } => &errors.0,
            _ => &[],
        }
    }
}
