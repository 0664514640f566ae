// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Orders a package's declarations so that every definition precedes its
//! uses. Coq has no forward references, while Go declarations may appear in
//! any order and in any file of the package.

use glang::{Decl, ImportDecl};
use glang_coq::RenderDecl;
use indexmap::IndexMap;
use log::debug;
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Position of a top-level declaration: file index in path order, then
/// index within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId {
    pub file_index: usize,
    pub decl_index: usize,
}

impl DeclId {
    pub fn new(file_index: usize, decl_index: usize) -> Self {
        Self {
            file_index,
            decl_index,
        }
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.file_index, self.decl_index)
    }
}

/// Front-end output for one source declaration.
#[derive(Debug, Clone, Default)]
pub struct TranslatedDecl {
    pub decls: Vec<Decl>,
    /// Top-level names this declaration defines.
    pub names: Vec<String>,
    /// Top-level names it refers to.
    pub deps: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FileHeader {
    pub name: String,
    pub doc: Option<String>,
    pub decl_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedDecls {
    /// Sorted and free of duplicates.
    pub imports: Vec<ImportDecl>,
    pub decls: Vec<Decl>,
}

pub struct DependencyOrderer {
    files: Vec<FileHeader>,
    groups: IndexMap<DeclId, TranslatedDecl>,
    producers: HashMap<String, DeclId>,
    add_source_file_comments: bool,
}

impl DependencyOrderer {
    pub fn new(files: Vec<FileHeader>, add_source_file_comments: bool) -> Self {
        Self {
            files,
            groups: IndexMap::new(),
            producers: HashMap::new(),
            add_source_file_comments,
        }
    }

    /// Register a successfully translated declaration. If two declarations
    /// introduce the same name, the one added last produces it.
    pub fn add(&mut self, id: DeclId, translated: TranslatedDecl) {
        for name in &translated.names {
            self.producers.insert(name.clone(), id);
        }
        self.groups.insert(id, translated);
    }

    pub fn producer(&self, name: &str) -> Option<DeclId> {
        self.producers.get(name).copied()
    }

    /// Groups of two or more declarations that depend on each other.
    /// Each group and the list itself are sorted.
    pub fn cycles(&self) -> Vec<Vec<DeclId>> {
        let mut graph = DiGraphMap::<DeclId, ()>::new();
        for id in self.groups.keys() {
            graph.add_node(*id);
        }
        for (id, group) in &self.groups {
            for producer in group.deps.iter().filter_map(|dep| self.producer(dep)) {
                if producer != *id {
                    graph.add_edge(*id, producer, ());
                }
            }
        }

        let mut cycles: Vec<Vec<DeclId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|mut scc| {
                scc.sort();
                scc
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Human readable name of a declaration, for diagnostics.
    pub fn describe(&self, id: DeclId) -> String {
        let file = self.file_name(id.file_index);
        match self.groups.get(&id).and_then(|g| g.names.first()) {
            Some(name) => format!("{} ({})", name, file),
            None => format!("declaration {} of {}", id.decl_index, file),
        }
    }

    /// Emit every registered declaration after the producers of the names
    /// it depends on, walking files and declarations in order.
    pub fn order(&self) -> OrderedDecls {
        Emitter {
            orderer: self,
            visited: HashSet::new(),
            emitted: HashSet::new(),
            last_file: 0,
            imports: BTreeMap::new(),
            decls: vec![],
        }
        .run()
    }

    fn file_name(&self, index: usize) -> &str {
        self.files.get(index).map_or("<unknown>", |f| f.name.as_str())
    }
}

struct Emitter<'a> {
    orderer: &'a DependencyOrderer,
    visited: HashSet<DeclId>,
    /// Rendered text of every non-comment declaration emitted so far.
    emitted: HashSet<String>,
    last_file: usize,
    /// Keyed by rendered import line, which fixes the output order.
    imports: BTreeMap<String, ImportDecl>,
    decls: Vec<Decl>,
}

impl<'a> Emitter<'a> {
    fn run(mut self) -> OrderedDecls {
        let orderer = self.orderer;
        let multiple_files = orderer.files.len() > 1;
        for (file_index, file) in orderer.files.iter().enumerate() {
            if multiple_files && orderer.add_source_file_comments {
                self.decls.push(Decl::comment(&file.name));
            }
            if let Some(doc) = &file.doc {
                self.decls.push(Decl::comment(doc));
            }
            self.last_file = file_index;
            for decl_index in 0..file.decl_count {
                self.visit(DeclId::new(file_index, decl_index), None);
            }
        }
        OrderedDecls {
            imports: self.imports.into_values().collect(),
            decls: self.decls,
        }
    }

    /// `via` is the name through which a dependency reached this
    /// declaration, `None` when visited from the top-level walk.
    fn visit(&mut self, id: DeclId, via: Option<&str>) {
        if !self.visited.insert(id) {
            return;
        }
        let orderer = self.orderer;
        let group = match orderer.groups.get(&id) {
            Some(group) => group,
            // failed to translate
            None => return,
        };

        for dep in &group.deps {
            if let Some(producer) = orderer.producer(dep) {
                self.visit(producer, Some(dep));
            }
        }

        let emits_code = group.decls.iter().any(|d| !matches!(d, Decl::Import(_)));
        if id.file_index != self.last_file && emits_code {
            if orderer.add_source_file_comments {
                let file = orderer.file_name(id.file_index);
                let comment = match via {
                    Some(name) => format!("{} from {}", name, file),
                    None => file.to_string(),
                };
                self.decls.push(Decl::comment(&comment));
            }
            self.last_file = id.file_index;
        }

        for decl in &group.decls {
            match decl {
                Decl::Import(import) => {
                    self.imports
                        .entry(import.render_decl())
                        .or_insert_with(|| import.clone());
                }
                Decl::Comment(_) => self.decls.push(decl.clone()),
                _ => {
                    if self.emitted.insert(decl.render_decl()) {
                        self.decls.push(decl.clone());
                    } else {
                        debug!("dropping duplicate declaration from {}", orderer.describe(id));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glang::{Expr, FieldDecl, FuncDecl, StructDecl, Type};

    fn func(name: &str) -> Decl {
        FuncDecl::new(name, vec![], Expr::skip()).into()
    }

    fn group(decls: Vec<Decl>, names: &[&str], deps: &[&str]) -> TranslatedDecl {
        TranslatedDecl {
            decls,
            names: names.iter().map(|n| n.to_string()).collect(),
            deps: deps.iter().map(|n| n.to_string()).collect(),
        }
    }

    fn file(name: &str, decl_count: usize) -> FileHeader {
        FileHeader {
            name: name.to_string(),
            doc: None,
            decl_count,
        }
    }

    /// Function names and comment texts, in emission order.
    fn summary(ordered: &OrderedDecls) -> Vec<String> {
        ordered
            .decls
            .iter()
            .map(|d| match d {
                Decl::Func(f) => f.name.clone(),
                Decl::Struct(s) => s.name.clone(),
                Decl::Comment(c) => format!("(* {} *)", c.text()),
                other => other.render_decl(),
            })
            .collect()
    }

    #[test]
    fn producers_come_first() {
        let mut orderer = DependencyOrderer::new(vec![file("a.go", 3)], true);
        orderer.add(DeclId::new(0, 0), group(vec![func("A")], &["A"], &["B", "C"]));
        orderer.add(DeclId::new(0, 1), group(vec![func("B")], &["B"], &["C"]));
        orderer.add(DeclId::new(0, 2), group(vec![func("C")], &["C"], &[]));
        assert_eq!(summary(&orderer.order()), ["C", "B", "A"]);
    }

    #[test]
    fn cross_file_dependencies_are_announced() {
        let files = vec![file("a.go", 1), file("b.go", 2)];
        let build = |comments| {
            let mut orderer = DependencyOrderer::new(files.clone(), comments);
            orderer.add(DeclId::new(0, 0), group(vec![func("A")], &["A"], &["C"]));
            orderer.add(DeclId::new(1, 0), group(vec![func("C")], &["C"], &[]));
            orderer.add(DeclId::new(1, 1), group(vec![func("D")], &["D"], &["A"]));
            summary(&orderer.order())
        };
        assert_eq!(
            build(true),
            [
                "(* a.go *)",
                "(* C from b.go *)",
                "C",
                "(* a.go *)",
                "A",
                "(* b.go *)",
                "D"
            ]
        );
        assert_eq!(build(false), ["C", "A", "D"]);
    }

    #[test]
    fn doc_comment_follows_file_header() {
        let mut header = file("a.go", 1);
        header.doc = Some("Package p tests things.".to_string());
        let mut orderer = DependencyOrderer::new(vec![header], true);
        orderer.add(DeclId::new(0, 0), group(vec![func("A")], &["A"], &[]));
        assert_eq!(
            summary(&orderer.order()),
            ["(* Package p tests things. *)", "A"]
        );
    }

    #[test]
    fn duplicates_dropped_except_comments() {
        let s: Decl = StructDecl {
            name: "S".to_string(),
            fields: vec![FieldDecl::new("x", Type::ident("uint64T"))],
        }
        .into();
        let mut orderer = DependencyOrderer::new(vec![file("a.go", 2)], true);
        orderer.add(
            DeclId::new(0, 0),
            group(
                vec![Decl::comment("S"), s.clone(), Decl::import("sync")],
                &["S"],
                &[],
            ),
        );
        orderer.add(
            DeclId::new(0, 1),
            group(
                vec![
                    Decl::comment("S"),
                    s,
                    Decl::import("fmt"),
                    Decl::import("sync"),
                ],
                &[],
                &[],
            ),
        );
        let ordered = orderer.order();
        assert_eq!(summary(&ordered), ["(* S *)", "S", "(* S *)"]);
        assert_eq!(
            ordered.imports,
            [ImportDecl::new("fmt"), ImportDecl::new("sync")]
        );
    }

    #[test]
    fn self_reference_and_unknown_names() {
        let mut orderer = DependencyOrderer::new(vec![file("a.go", 2)], true);
        orderer.add(DeclId::new(0, 0), group(vec![func("F")], &["F"], &["F", "fmt.Println"]));
        orderer.add(DeclId::new(0, 1), group(vec![func("G")], &["G"], &["F"]));
        assert_eq!(summary(&orderer.order()), ["F", "G"]);
        assert!(orderer.cycles().is_empty());
    }

    #[test]
    fn later_introducer_wins() {
        let mut orderer = DependencyOrderer::new(vec![file("a.go", 3)], true);
        orderer.add(DeclId::new(0, 0), group(vec![func("U")], &[], &["X"]));
        orderer.add(DeclId::new(0, 1), group(vec![func("X1")], &["X"], &[]));
        orderer.add(DeclId::new(0, 2), group(vec![func("X2")], &["X"], &[]));
        assert_eq!(orderer.producer("X"), Some(DeclId::new(0, 2)));
        assert_eq!(summary(&orderer.order()), ["X2", "U", "X1"]);
    }

    #[test]
    fn failed_declarations_are_skipped() {
        let mut orderer = DependencyOrderer::new(vec![file("a.go", 3)], true);
        orderer.add(DeclId::new(0, 0), group(vec![func("A")], &["A"], &["B"]));
        // 0#1 introduced B but failed to translate
        orderer.add(DeclId::new(0, 2), group(vec![func("C")], &["C"], &[]));
        assert_eq!(summary(&orderer.order()), ["A", "C"]);
    }

    #[test]
    fn mutual_recursion_is_reported_and_still_ordered() {
        let mut orderer = DependencyOrderer::new(vec![file("a.go", 3)], true);
        orderer.add(DeclId::new(0, 0), group(vec![func("even")], &["even"], &["odd"]));
        orderer.add(DeclId::new(0, 1), group(vec![func("odd")], &["odd"], &["even"]));
        orderer.add(DeclId::new(0, 2), group(vec![func("loop")], &["loop"], &["loop"]));
        assert_eq!(
            orderer.cycles(),
            vec![vec![DeclId::new(0, 0), DeclId::new(0, 1)]]
        );
        assert_eq!(orderer.describe(DeclId::new(0, 1)), "odd (a.go)");
        assert_eq!(DeclId::new(0, 1).to_string(), "0#1");
        assert_eq!(summary(&orderer.order()), ["odd", "even", "loop"]);
    }

    #[test]
    fn ordering_is_deterministic() {
        let build = || {
            let mut orderer = DependencyOrderer::new(vec![file("a.go", 4)], true);
            let names = ["a", "b", "c", "d"];
            for (i, name) in names.into_iter().enumerate() {
                orderer.add(
                    DeclId::new(0, i),
                    group(vec![func(name), Decl::import(name)], &[name], &names[i + 1..]),
                );
            }
            orderer.order()
        };
        let first = build();
        assert_eq!(summary(&first), ["d", "c", "b", "a"]);
        assert_eq!(first, build());
    }
}
