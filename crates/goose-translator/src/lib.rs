// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Go package to Coq file translation driver.
//!
//! Each package's top-level declarations are handed to a [`FrontEnd`] one at
//! a time. The resulting glang declarations are reordered so that every
//! definition precedes its uses (Coq has no forward references), deduplicated,
//! and assembled into a [`glang::File`]. Packages are independent and are
//! translated concurrently by [`Translator::translate_packages`].

pub mod analysis;
mod error;
mod frontend;
mod options;
mod output;
mod translator;

pub use analysis::{DeclId, DependencyOrderer, FileHeader, OrderedDecls, TranslatedDecl};
pub use error::{DeclTranslationError, LoadError, MultipleErrors, TranslateError};
pub use frontend::{DepTracker, FrontEnd, LoadedPackage, PackageLoader, SourceFile};
pub use options::Options;
pub use output::write_package_file;
pub use translator::Translator;
