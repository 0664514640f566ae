// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Passes over a package's translated declarations

mod dependency_order;

pub use dependency_order::{DeclId, DependencyOrderer, FileHeader, OrderedDecls, TranslatedDecl};
