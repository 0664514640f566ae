// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use glang::File;
use glang_coq::escape::coq_output_path;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a translated package below `out_dir`, at the path derived from its
/// package path (`a/b.c/d` becomes `a/b_dot_c/d.v`). Returns the written path.
pub fn write_package_file(out_dir: &Path, file: &File) -> anyhow::Result<PathBuf> {
    let path = out_dir.join(coq_output_path(&file.pkg_path));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    debug!("writing coq to `{}`", path.display());
    let mut out = fs::File::create(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    glang_coq::write_file(file, &mut out)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_below_mangled_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = File::new("github.com/goose-lang/goose", "goose");
        let path = write_package_file(dir.path(), &file).unwrap();
        assert_eq!(
            path,
            dir.path().join("github_dot_com/goose_dash_lang/goose.v")
        );
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("(* autogenerated from github.com/goose-lang/goose *)\n"));
    }
}
