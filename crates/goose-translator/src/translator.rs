// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Package and batch translation drivers.

use crate::analysis::{DeclId, DependencyOrderer, FileHeader, TranslatedDecl};
use crate::error::{MultipleErrors, TranslateError};
use crate::frontend::{DepTracker, FrontEnd, LoadedPackage, PackageLoader, SourceFile};
use crate::options::Options;
use futures::future::join_all;
use glang::{Decl, File};
use glang_coq::prelude::ffi_header_footer;
use itertools::Itertools;
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Translator {
    options: Options,
}

impl Translator {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Translate one loaded package into a single Coq file.
    ///
    /// Declarations the front-end rejects are left out; the remaining file is
    /// returned inside [`TranslateError::Conversion`] together with every
    /// rejection.
    pub fn translate_package<F: FrontEnd>(
        &self,
        front_end: &F,
        package: &LoadedPackage<F::Decl>,
    ) -> Result<File, TranslateError> {
        if !package.errors.is_empty() {
            return Err(TranslateError::Load {
                pkg_path: package.pkg_path.clone(),
                errors: MultipleErrors(package.errors.clone()),
            });
        }
        info!("translating package {}", package.pkg_path);

        let files: Vec<&SourceFile<F::Decl>> =
            package.files.iter().sorted_by(|a, b| a.path.cmp(&b.path)).collect();
        let headers = files
            .iter()
            .map(|f| FileHeader {
                name: f.name(),
                doc: f.doc.clone(),
                decl_count: f.decls.len(),
            })
            .collect();

        let mut orderer = DependencyOrderer::new(headers, self.options.add_source_file_comments);
        let mut errors = vec![];
        for (file_index, file) in files.iter().enumerate() {
            for (decl_index, decl) in file.decls.iter().enumerate() {
                let id = DeclId::new(file_index, decl_index);
                let mut deps = DepTracker::new();
                match front_end.translate_decl(decl, &mut deps) {
                    Ok(decls) => {
                        let (names, deps) = deps.into_parts();
                        let decls = decls.into_iter().map(|d| self.with_obligations(d)).collect();
                        orderer.add(id, TranslatedDecl { decls, names, deps });
                    }
                    Err(err) => {
                        debug!("{} declaration {} failed: {}", file.name(), id, err);
                        errors.push(err);
                    }
                }
            }
        }

        self.check_cycles(&package.pkg_path, &orderer)?;

        let ordered = orderer.order();
        let (import_header, footer) = ffi_header_footer(&package.ffi);
        let file = File {
            pkg_path: package.pkg_path.clone(),
            go_package: package.name.clone(),
            import_header,
            footer,
            imports: ordered.imports,
            decls: ordered.decls,
        };

        if errors.is_empty() {
            info!(
                "translated {} declarations of {}",
                file.decls.iter().filter(|d| !d.is_comment()).count(),
                package.pkg_path
            );
            Ok(file)
        } else {
            warn!("{} declarations of {} failed", errors.len(), package.pkg_path);
            Err(TranslateError::Conversion {
                file: Box::new(file),
                errors: MultipleErrors(errors),
            })
        }
    }

    /// Load the packages matching `patterns` and translate them
    /// concurrently. Results are in the loader's package order.
    pub async fn translate_packages<L, F>(
        &self,
        loader: &L,
        front_end: Arc<F>,
        mod_dir: &Path,
        patterns: &[String],
    ) -> Result<Vec<Result<File, TranslateError>>, TranslateError>
    where
        L: PackageLoader<Decl = F::Decl>,
        F: FrontEnd + Send + Sync + 'static,
        F::Decl: Send + Sync + 'static,
    {
        let packages = loader.load(mod_dir, patterns)?;
        if packages.is_empty() {
            return Err(TranslateError::NoPackagesMatched);
        }
        info!("loaded {} packages from {}", packages.len(), mod_dir.display());
        Ok(self.translate_loaded(front_end, packages).await)
    }

    /// Translate already loaded packages, one blocking task each.
    /// A panic in any task is resumed on the caller.
    pub async fn translate_loaded<F>(
        &self,
        front_end: Arc<F>,
        packages: Vec<LoadedPackage<F::Decl>>,
    ) -> Vec<Result<File, TranslateError>>
    where
        F: FrontEnd + Send + Sync + 'static,
        F::Decl: Send + Sync + 'static,
    {
        let tasks = packages.into_iter().map(|package| {
            let translator = self.clone();
            let front_end = front_end.clone();
            tokio::task::spawn_blocking(move || {
                translator.translate_package(front_end.as_ref(), &package)
            })
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(result) => result,
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(err) => panic!("BUG: translation task cancelled: {}", err),
            })
            .collect()
    }

    fn with_obligations(&self, decl: Decl) -> Decl {
        if !self.options.type_check {
            return decl;
        }
        match decl {
            Decl::Func(f) => Decl::Func(f.with_types(true)),
            Decl::Const(mut c) => {
                c.add_types = true;
                Decl::Const(c)
            }
            other => other,
        }
    }

    fn check_cycles(
        &self,
        pkg_path: &str,
        orderer: &DependencyOrderer,
    ) -> Result<(), TranslateError> {
        let cycles: Vec<String> = orderer
            .cycles()
            .iter()
            .map(|cycle| cycle.iter().map(|id| orderer.describe(*id)).join(" <-> "))
            .collect();
        if cycles.is_empty() {
            return Ok(());
        }
        if self.options.strict_cycles {
            return Err(TranslateError::CyclicDeclarations {
                pkg_path: pkg_path.to_string(),
                cycles,
            });
        }
        for cycle in &cycles {
            warn!("{}: cyclic declarations {}", pkg_path, cycle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeclTranslationError;
    use glang::{Expr, FuncDecl};
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone)]
    struct ToyDecl {
        name: &'static str,
        calls: Vec<&'static str>,
        fails: bool,
        delay: Duration,
    }

    fn decl(name: &'static str, calls: &[&'static str]) -> ToyDecl {
        ToyDecl {
            name,
            calls: calls.to_vec(),
            fails: false,
            delay: Duration::ZERO,
        }
    }

    fn failing(name: &'static str) -> ToyDecl {
        ToyDecl {
            fails: true,
            ..decl(name, &[])
        }
    }

    /// Every declaration becomes a function calling the functions it names.
    #[derive(Default)]
    struct ToyFrontEnd {
        finished: Mutex<Vec<&'static str>>,
    }

    impl FrontEnd for ToyFrontEnd {
        type Decl = ToyDecl;

        fn translate_decl(
            &self,
            decl: &ToyDecl,
            deps: &mut DepTracker,
        ) -> Result<Vec<Decl>, DeclTranslationError> {
            std::thread::sleep(decl.delay);
            if decl.name == "panic" {
                panic!("boom");
            }
            self.finished.lock().unwrap().push(decl.name);
            if decl.fails {
                return Err(DeclTranslationError::unsupported("toy.go:1:1", decl.name));
            }
            deps.add_name(decl.name);
            for callee in &decl.calls {
                deps.add_dep(*callee);
            }
            let body = decl.calls.iter().rev().fold(Expr::skip(), |rest, callee| {
                Expr::do_seq(Expr::call(Expr::gallina(*callee), vec![]), rest)
            });
            Ok(vec![FuncDecl::new(decl.name, vec![], body).into()])
        }
    }

    fn package(pkg_path: &str, files: Vec<(&str, Vec<ToyDecl>)>) -> LoadedPackage<ToyDecl> {
        files.into_iter().fold(
            LoadedPackage::new(pkg_path, pkg_path.rsplit('/').next().unwrap_or(pkg_path)),
            |pkg, (path, decls)| pkg.with_file(SourceFile::new(path, decls)),
        )
    }

    fn func_names(file: &File) -> Vec<String> {
        file.decls
            .iter()
            .map(|d| match d {
                Decl::Func(f) => f.name.clone(),
                Decl::Comment(c) => format!("(* {} *)", c.text()),
                other => format!("{:?}", other),
            })
            .collect()
    }

    #[test]
    fn failures_are_isolated() {
        let pkg = package(
            "example.com/p",
            vec![(
                "p.go",
                vec![
                    decl("a", &[]),
                    failing("b"),
                    decl("c", &["a"]),
                    failing("d"),
                    decl("e", &["b"]),
                ],
            )],
        );
        let err = Translator::default()
            .translate_package(&ToyFrontEnd::default(), &pkg)
            .unwrap_err();
        let file = err.partial_file().unwrap();
        assert_eq!(func_names(file), ["a", "c", "e"]);
        assert_eq!(
            err.decl_errors(),
            [
                DeclTranslationError::new("toy.go:1:1: unsupported: b"),
                DeclTranslationError::new("toy.go:1:1: unsupported: d"),
            ]
        );
    }

    #[test]
    fn load_errors_reject_package() {
        let front_end = ToyFrontEnd::default();
        let pkg = package("example.com/p", vec![("p.go", vec![decl("a", &[])])])
            .with_error("p.go:3:2: undefined: x");
        match Translator::default().translate_package(&front_end, &pkg) {
            Err(TranslateError::Load { pkg_path, errors }) => {
                assert_eq!(pkg_path, "example.com/p");
                assert_eq!(errors.len(), 1);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(front_end.finished.lock().unwrap().is_empty());
    }

    #[test]
    fn files_walked_in_path_order() {
        let pkg = package(
            "example.com/p",
            vec![
                ("b.go", vec![decl("fromB", &[])]),
                ("a.go", vec![decl("fromA", &["fromB"])]),
            ],
        );
        let file = Translator::default()
            .translate_package(&ToyFrontEnd::default(), &pkg)
            .unwrap();
        assert_eq!(
            func_names(&file),
            [
                "(* a.go *)",
                "(* fromB from b.go *)",
                "fromB",
                "(* a.go *)",
                "fromA",
                "(* b.go *)"
            ]
        );
    }

    #[test]
    fn ffi_selects_preamble() {
        let pkg = package("example.com/p", vec![("p.go", vec![])]).with_ffi("grove");
        let file = Translator::default()
            .translate_package(&ToyFrontEnd::default(), &pkg)
            .unwrap();
        assert_eq!(file.import_header, "From New Require Import grove_prelude.");
        assert!(file.footer.is_empty());
        assert_eq!(file.go_package, "p");
    }

    #[test]
    fn type_check_adds_obligations() {
        let pkg = package("example.com/p", vec![("p.go", vec![decl("a", &[])])]);
        let translator = Translator::new(Options {
            type_check: true,
            ..Options::default()
        });
        let file = translator
            .translate_package(&ToyFrontEnd::default(), &pkg)
            .unwrap();
        match &file.decls[..] {
            [Decl::Func(f)] => assert!(f.add_types),
            other => panic!("unexpected decls {:?}", other),
        }
    }

    #[test]
    fn cycles_rejected_only_when_strict() {
        let pkg = package(
            "example.com/p",
            vec![("p.go", vec![decl("even", &["odd"]), decl("odd", &["even"])])],
        );
        let lenient = Translator::default()
            .translate_package(&ToyFrontEnd::default(), &pkg)
            .unwrap();
        assert_eq!(func_names(&lenient), ["odd", "even"]);

        let strict = Translator::new(Options {
            strict_cycles: true,
            ..Options::default()
        });
        match strict.translate_package(&ToyFrontEnd::default(), &pkg) {
            Err(TranslateError::CyclicDeclarations { cycles, .. }) => {
                assert_eq!(cycles, ["even (p.go) <-> odd (p.go)"]);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn translation_is_deterministic() {
        let pkg = package(
            "example.com/p",
            vec![
                ("x.go", vec![decl("a", &["b", "c"]), decl("b", &["c"])]),
                ("y.go", vec![decl("c", &[]), decl("d", &["a"])]),
            ],
        );
        let render = || {
            let file = Translator::default()
                .translate_package(&ToyFrontEnd::default(), &pkg)
                .unwrap();
            glang_coq::render_file(&file)
        };
        assert_eq!(render(), render());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn batch_preserves_package_order() {
        let slow = |name| ToyDecl {
            delay: Duration::from_millis(300),
            ..decl(name, &[])
        };
        let packages = vec![
            package("example.com/one", vec![("one.go", vec![slow("one")])]),
            package("example.com/two", vec![("two.go", vec![decl("two", &[])])]),
            package("example.com/three", vec![("three.go", vec![slow("three")])]),
        ];
        let front_end = Arc::new(ToyFrontEnd::default());
        let results = Translator::default()
            .translate_loaded(front_end.clone(), packages)
            .await;

        let paths: Vec<_> = results
            .into_iter()
            .map(|r| r.unwrap().pkg_path)
            .collect();
        assert_eq!(paths, ["example.com/one", "example.com/two", "example.com/three"]);
        assert_eq!(front_end.finished.lock().unwrap()[0], "two");
    }

    #[tokio::test]
    #[should_panic(expected = "boom")]
    async fn worker_panic_is_resumed() {
        let packages = vec![package("example.com/p", vec![("p.go", vec![decl("panic", &[])])])];
        Translator::default()
            .translate_loaded(Arc::new(ToyFrontEnd::default()), packages)
            .await;
    }

    struct ToyLoader(Vec<LoadedPackage<ToyDecl>>);

    impl PackageLoader for ToyLoader {
        type Decl = ToyDecl;

        fn load(
            &self,
            mod_dir: &Path,
            patterns: &[String],
        ) -> anyhow::Result<Vec<LoadedPackage<ToyDecl>>> {
            anyhow::ensure!(mod_dir.exists(), "no module at {}", mod_dir.display());
            Ok(self
                .0
                .iter()
                .filter(|p| patterns.iter().any(|pat| p.pkg_path.ends_with(pat.as_str())))
                .cloned()
                .collect())
        }
    }

    #[tokio::test]
    async fn batch_loader_outcomes() {
        let loader = ToyLoader(vec![package("example.com/p", vec![("p.go", vec![])])]);
        let front_end = Arc::new(ToyFrontEnd::default());
        let translator = Translator::default();
        let here = PathBuf::from(".");

        let results = translator
            .translate_packages(&loader, front_end.clone(), &here, &["p".to_string()])
            .await
            .unwrap();
        assert_eq!(results.len(), 1);

        let none = translator
            .translate_packages(&loader, front_end.clone(), &here, &["q".to_string()])
            .await;
        assert!(matches!(none, Err(TranslateError::NoPackagesMatched)));

        let missing = translator
            .translate_packages(&loader, front_end, Path::new("/nonexistent"), &[])
            .await;
        assert!(matches!(missing, Err(TranslateError::Loader(_))));
    }
}
