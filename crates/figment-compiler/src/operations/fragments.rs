//! Batch-wide fragment table and the memoized spread resolver.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use apollo_parser::SyntaxNode;
use apollo_parser::cst::{self, CstNode};
use indexmap::{IndexMap, IndexSet};

use super::wire::wire_text;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::source::{DocumentKind, Location, SourceMap};
use crate::syntax::{DocumentContext, ParsedDocument, name_of};

/// A fragment spread site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spread {
    pub name: String,
    pub location: Location,
}

#[derive(Debug, Clone)]
pub struct Fragment {
    pub name: String,
    /// Definition text with internal directives removed.
    pub text: String,
    /// Spreads inside the fragment, in document order.
    pub spreads: Vec<Spread>,
    pub location: Location,
}

/// Every fragment of the batch by name, harvested before any operation is
/// translated so spreads may cross documents.
#[derive(Debug, Default)]
pub struct FragmentTable {
    fragments: IndexMap<String, Fragment>,
}

impl FragmentTable {
    pub fn harvest(
        parsed: &[ParsedDocument],
        sources: &SourceMap,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut table = Self::default();

        for doc in parsed.iter().filter(|d| d.kind == DocumentKind::Operation) {
            let ctx = DocumentContext::new(sources, doc.id);
            for definition in doc.document.definitions() {
                let cst::Definition::FragmentDefinition(def) = definition else {
                    continue;
                };
                let Some(name) = def.fragment_name().and_then(|f| name_of(f.name())) else {
                    continue;
                };
                let fragment = Fragment {
                    text: wire_text(def.syntax()),
                    spreads: spreads_in(def.syntax(), &ctx),
                    location: ctx.locate(def.syntax()),
                    name,
                };
                table.insert(fragment, diagnostics);
            }
        }

        tracing::debug!(fragments = table.len(), "harvested fragments");
        table
    }

    fn insert(&mut self, fragment: Fragment, diagnostics: &mut Diagnostics) {
        if let Some(first) = self.fragments.get(&fragment.name) {
            diagnostics
                .report(DiagnosticKind::DuplicateFragment, fragment.location.clone())
                .message(fragment.name.as_str())
                .related_to("first defined here", first.location.clone())
                .emit();
            return;
        }
        self.fragments.insert(fragment.name.clone(), fragment);
    }

    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.fragments.get(name)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.values()
    }
}

/// Fragment spreads anywhere below `node`, in document order.
pub fn spreads_in(node: &SyntaxNode, ctx: &DocumentContext<'_>) -> Vec<Spread> {
    node.descendants()
        .filter_map(cst::FragmentSpread::cast)
        .filter_map(|spread| {
            Some(Spread {
                name: spread.fragment_name().and_then(|f| name_of(f.name()))?,
                location: ctx.locate(spread.syntax()),
            })
        })
        .collect()
}

/// Resolves spreads to the fragments they transitively reach.
///
/// Each fragment is expanded once per batch; operations sharing a fragment
/// reuse its closure.
pub struct FragmentResolver<'t> {
    table: &'t FragmentTable,
    /// Fragment → itself followed by everything it reaches, depth-first preorder.
    resolved: HashMap<String, Rc<[String]>>,
    /// Current DFS path.
    in_progress: IndexSet<String>,
    /// Fragments whose expansion already failed and was reported.
    failed: HashSet<String>,
}

impl<'t> FragmentResolver<'t> {
    pub fn new(table: &'t FragmentTable) -> Self {
        Self {
            table,
            resolved: HashMap::new(),
            in_progress: IndexSet::new(),
            failed: HashSet::new(),
        }
    }

    /// Fragments reachable from `spreads`, each once, depth-first preorder.
    ///
    /// `None` when any spread is undefined or cyclic.
    pub fn closure(
        &mut self,
        spreads: &[Spread],
        diagnostics: &mut Diagnostics,
    ) -> Option<Vec<&'t Fragment>> {
        let mut names = IndexSet::new();
        let mut valid = true;
        for spread in spreads {
            match self.resolve(spread, diagnostics) {
                Some(reached) => names.extend(reached.iter().cloned()),
                None => valid = false,
            }
        }
        if !valid {
            return None;
        }

        let table = self.table;
        Some(names.iter().filter_map(|name| table.get(name)).collect())
    }

    fn resolve(&mut self, spread: &Spread, diagnostics: &mut Diagnostics) -> Option<Rc<[String]>> {
        if let Some(reached) = self.resolved.get(&spread.name) {
            return Some(Rc::clone(reached));
        }
        if self.failed.contains(&spread.name) {
            return None;
        }

        let table = self.table;
        let Some(fragment) = table.get(&spread.name) else {
            diagnostics
                .report(DiagnosticKind::UndefinedFragment, spread.location.clone())
                .message(spread.name.as_str())
                .emit();
            return None;
        };

        if let Some(start) = self.in_progress.get_index_of(&spread.name) {
            let path: Vec<&str> = self
                .in_progress
                .iter()
                .skip(start)
                .map(String::as_str)
                .chain([spread.name.as_str()])
                .collect();
            diagnostics
                .report(DiagnosticKind::FragmentCycle, spread.location.clone())
                .message(path.join(" -> "))
                .related_to("fragment defined here", fragment.location.clone())
                .emit();
            self.failed.insert(spread.name.clone());
            return None;
        }

        self.in_progress.insert(spread.name.clone());
        let mut reached = IndexSet::new();
        reached.insert(spread.name.clone());
        let mut valid = true;
        for inner in &fragment.spreads {
            match self.resolve(inner, diagnostics) {
                Some(names) => reached.extend(names.iter().cloned()),
                None => valid = false,
            }
        }
        self.in_progress.pop();

        if !valid {
            self.failed.insert(spread.name.clone());
            return None;
        }

        let reached: Rc<[String]> = reached.into_iter().collect();
        self.resolved
            .insert(spread.name.clone(), Rc::clone(&reached));
        Some(reached)
    }
}
