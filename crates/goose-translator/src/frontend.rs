// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Seams to the parts of the pipeline that know Go: the loader that finds
//! and type-checks packages and the front-end that maps one top-level
//! declaration to glang.

use crate::error::{DeclTranslationError, LoadError};
use glang::Decl;
use std::path::{Path, PathBuf};

/// Names introduced and referenced by one top-level declaration.
///
/// A fresh tracker is handed to the front-end for every declaration; the
/// orderer uses the recorded names to emit producers before consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepTracker {
    names: Vec<String>,
    deps: Vec<String>,
}

impl DepTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a top-level name this declaration defines.
    pub fn add_name(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Record a top-level name this declaration refers to. References to
    /// names nothing in the package introduces are ignored later.
    pub fn add_dep(&mut self, name: impl Into<String>) {
        self.deps.push(name.into());
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn deps(&self) -> &[String] {
        &self.deps
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.names, self.deps)
    }
}

pub trait FrontEnd {
    /// A type-checked top-level declaration of the source language.
    type Decl;

    fn translate_decl(
        &self,
        decl: &Self::Decl,
        deps: &mut DepTracker,
    ) -> Result<Vec<Decl>, DeclTranslationError>;
}

pub trait PackageLoader {
    type Decl;

    /// Load every package in `mod_dir` matching `patterns`. Problems with an
    /// individual package are reported in its `errors`; an `Err` means
    /// nothing could be loaded.
    fn load(&self, mod_dir: &Path, patterns: &[String])
        -> anyhow::Result<Vec<LoadedPackage<Self::Decl>>>;
}

#[derive(Debug, Clone)]
pub struct SourceFile<D> {
    pub path: PathBuf,
    /// Package documentation attached to this file, if any.
    pub doc: Option<String>,
    pub decls: Vec<D>,
}

impl<D> SourceFile<D> {
    pub fn new(path: impl Into<PathBuf>, decls: Vec<D>) -> Self {
        Self {
            path: path.into(),
            doc: None,
            decls,
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Base name used in generated comments.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[derive(Debug, Clone)]
pub struct LoadedPackage<D> {
    /// Full import path, e.g. `github.com/goose-lang/goose/testdata/semantics`.
    pub pkg_path: String,
    /// Go package name.
    pub name: String,
    /// Effects configuration, `none` for effect-free code.
    pub ffi: String,
    pub files: Vec<SourceFile<D>>,
    pub errors: Vec<LoadError>,
}

impl<D> LoadedPackage<D> {
    pub fn new(pkg_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pkg_path: pkg_path.into(),
            name: name.into(),
            ffi: glang_coq::prelude::NO_FFI.to_string(),
            files: vec![],
            errors: vec![],
        }
    }

    pub fn with_ffi(mut self, ffi: impl Into<String>) -> Self {
        self.ffi = ffi.into();
        self
    }

    pub fn with_file(mut self, file: SourceFile<D>) -> Self {
        self.files.push(file);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.errors.push(LoadError(error.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_file_name_is_base_name() {
        let f: SourceFile<()> = SourceFile::new("/work/pkg/interfaces.go", vec![]);
        assert_eq!(f.name(), "interfaces.go");
    }

    #[test]
    fn tracker_records_in_order() {
        let mut deps = DepTracker::new();
        deps.add_name("Foo");
        deps.add_dep("Bar");
        deps.add_dep("Baz");
        assert_eq!(deps.names(), ["Foo"]);
        assert_eq!(
            deps.into_parts(),
            (vec!["Foo".to_string()], vec!["Bar".to_string(), "Baz".to_string()])
        );
    }
}
