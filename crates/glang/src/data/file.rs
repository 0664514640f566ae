// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::data::declarations::{Decl, ImportDecl};

/// A complete generated Coq file for one Go package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    /// Go import path of the package
    pub pkg_path: String,
    /// Go package name (the `package` clause)
    pub go_package: String,
    /// Effects preamble, placed after the imports
    pub import_header: String,
    pub footer: String,
    /// Deduplicated and sorted
    pub imports: Vec<ImportDecl>,
    /// In emission order
    pub decls: Vec<Decl>,
}

impl File {
    pub fn new(pkg_path: impl Into<String>, go_package: impl Into<String>) -> Self {
        Self {
            pkg_path: pkg_path.into(),
            go_package: go_package.into(),
            ..Default::default()
        }
    }
}
