//! Import resolution against the symbol index
//!
//! Strategies, in order:
//! 1. exact FQN match
//! 2. on-demand import `pkg.*` → every type declared directly in `pkg`
//! 3. enclosing type: drop trailing segments until a declared type matches
//!    (`pkg.Outer.Inner` → `pkg.Outer`, static `pkg.Util.helper` → `pkg.Util`)
//!
//! Anything else is an external symbol and resolves to nothing.

use super::symbol_index::SymbolIndex;
use super::types::{ResolutionMethod, ResolvedImport};

/// Import resolver over a built symbol index
pub struct ImportResolver<'a> {
    symbol_index: &'a SymbolIndex,
}

impl<'a> ImportResolver<'a> {
    pub fn new(symbol_index: &'a SymbolIndex) -> Self {
        Self { symbol_index }
    }

    /// Resolve one import string; an empty result means external or unknown
    pub fn resolve(&self, imported_name: &str) -> Vec<ResolvedImport> {
        let name = imported_name.trim();
        if name.is_empty() {
            return Vec::new();
        }

        // Strategy 1: Exact FQN match
        if let Some(file) = self.symbol_index.resolve_exact(name) {
            return vec![resolved(name, name, file, ResolutionMethod::ExactMatch)];
        }

        // Strategy 2: On-demand import of a namespace
        if let Some(namespace) = name.strip_suffix(".*") {
            let matches: Vec<ResolvedImport> = self
                .symbol_index
                .types_in_namespace(namespace)
                .into_iter()
                .map(|(fqn, file)| resolved(name, fqn, file, ResolutionMethod::Wildcard))
                .collect();
            if !matches.is_empty() {
                return matches;
            }
            // `pkg.Outer.*` imports the members of a type
            return self.resolve_enclosing(name, namespace);
        }

        // Strategy 3: Enclosing type
        self.resolve_enclosing(name, name)
    }

    fn resolve_enclosing(&self, imported_name: &str, start: &str) -> Vec<ResolvedImport> {
        let mut candidate = start;
        loop {
            if let Some(file) = self.symbol_index.resolve_exact(candidate) {
                return vec![resolved(
                    imported_name,
                    candidate,
                    file,
                    ResolutionMethod::EnclosingType,
                )];
            }
            match candidate.rsplit_once('.') {
                Some((parent, _)) if !parent.is_empty() => candidate = parent,
                _ => return Vec::new(),
            }
        }
    }
}

fn resolved(imported: &str, fqn: &str, file: &str, method: ResolutionMethod) -> ResolvedImport {
    ResolvedImport {
        imported_name: imported.to_string(),
        matched_fqn: fqn.to_string(),
        target_file: file.to_string(),
        method,
    }
}
