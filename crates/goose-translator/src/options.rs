// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Translator options, usually read from a toml source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Emit a typing obligation after every function and constant.
    pub type_check: bool,
    /// Announce file names and cross-file dependencies with comments.
    pub add_source_file_comments: bool,
    /// Reject packages whose declarations depend on each other cyclically.
    /// Otherwise cycles are broken at the first declaration revisited.
    pub strict_cycles: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            type_check: false,
            add_source_file_comments: true,
            strict_cycles: false,
        }
    }
}

impl Options {
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("invalid translator options")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading options from {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("in {}", path.display()))
    }
}
