//! Symbol index
//!
//! Maps fully-qualified type names (`namespace.TypeName`) to the file that
//! declares them. Built sequentially so that collisions resolve to the last
//! document in input order.

use std::collections::{BTreeSet, HashMap};
use tracing::warn;

use super::types::ResolutionAmbiguity;
use crate::shared::models::AnalysisDocument;

/// FQN → declaring file
#[derive(Debug, Default)]
pub struct SymbolIndex {
    /// FQN → file path
    symbols: HashMap<String, String>,

    /// Namespace → FQNs declared directly in it
    namespace_types: HashMap<String, BTreeSet<String>>,

    /// Collisions seen while indexing
    ambiguities: Vec<ResolutionAmbiguity>,
}

impl SymbolIndex {
    /// Create empty symbol index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build symbol index from documents
    pub fn build(documents: &[AnalysisDocument]) -> Self {
        let mut index = Self::new();
        for doc in documents {
            index.register_document(doc);
        }
        index
    }

    /// Register every declared type of one document
    pub fn register_document(&mut self, doc: &AnalysisDocument) {
        let Some(namespace) = doc.metadata.namespace.as_deref() else {
            return;
        };

        for fqn in doc.metadata.qualified_types() {
            self.namespace_types
                .entry(namespace.to_string())
                .or_default()
                .insert(fqn.clone());

            if let Some(previous) = self.symbols.insert(fqn.clone(), doc.file_path.clone()) {
                if previous != doc.file_path {
                    warn!(
                        "Duplicate type {} declared in {} and {}, using {}",
                        fqn, previous, doc.file_path, doc.file_path
                    );
                    self.ambiguities.push(ResolutionAmbiguity {
                        fqn,
                        previous_file: previous,
                        winning_file: doc.file_path.clone(),
                    });
                }
            }
        }
    }

    /// Exact FQN lookup
    pub fn resolve_exact(&self, fqn: &str) -> Option<&str> {
        self.symbols.get(fqn).map(String::as_str)
    }

    /// FQNs declared directly in `namespace`, with their files, sorted by FQN
    pub fn types_in_namespace(&self, namespace: &str) -> Vec<(&str, &str)> {
        self.namespace_types
            .get(namespace)
            .map(|fqns| {
                fqns.iter()
                    .filter_map(|fqn| {
                        self.symbols
                            .get(fqn)
                            .map(|file| (fqn.as_str(), file.as_str()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn ambiguities(&self) -> &[ResolutionAmbiguity] {
        &self.ambiguities
    }

    pub fn into_ambiguities(self) -> Vec<ResolutionAmbiguity> {
        self.ambiguities
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
