//! File dependency graph
//!
//! Two passes over the documents of one snapshot:
//! 1. symbol indexing: one node per file, `namespace.Type` → file
//! 2. edge resolution: every import resolved against the index, self edges
//!    dropped, one edge per ordered (source, target) pair
//!
//! Nodes are sorted by id and edges by (source, target), so for inputs without
//! duplicate FQNs the result does not depend on input order.
//! Cycle detection uses petgraph's Tarjan SCC.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

use super::import_resolver::ImportResolver;
use super::symbol_index::SymbolIndex;
use super::types::{DependencyEdge, DependencyNode, ResolutionAmbiguity};
use crate::shared::models::{AnalysisDocument, Result};

/// Directed file → file dependency graph
///
/// An edge `A → B` means A imports a type declared in B.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraph {
    pub nodes: Vec<DependencyNode>,
    pub edges: Vec<DependencyEdge>,
    /// Duplicate FQNs resolved by last-write-wins while indexing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ambiguities: Vec<ResolutionAmbiguity>,
}

impl DependencyGraph {
    /// Create empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&DependencyNode> {
        self.nodes
            .binary_search_by(|n| n.id.as_str().cmp(id))
            .ok()
            .map(|idx| &self.nodes[idx])
    }

    /// Files that this file depends on
    pub fn dependencies_of(&self, file_path: &str) -> Vec<&str> {
        // Edges are sorted by (source, target)
        let first = self.edges.partition_point(|e| e.source.as_str() < file_path);
        self.edges[first..]
            .iter()
            .take_while(|e| e.source == file_path)
            .map(|e| e.target.as_str())
            .collect()
    }

    /// Files that depend on this file (reverse lookup)
    pub fn dependents_of(&self, file_path: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.target == file_path)
            .map(|e| e.source.as_str())
            .collect()
    }

    /// Strongly connected components with more than one file, each sorted
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let graph = self.to_petgraph();
        let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1) // Only cycles
            .map(|scc| {
                let mut files: Vec<String> =
                    scc.into_iter().map(|idx| graph[idx].to_string()).collect();
                files.sort();
                files
            })
            .collect();
        cycles.sort();
        cycles
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn to_petgraph(&self) -> DiGraph<&str, u32> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut index = HashMap::with_capacity(self.nodes.len());
        for node in &self.nodes {
            index.insert(node.id.as_str(), graph.add_node(node.id.as_str()));
        }
        for edge in &self.edges {
            if let (Some(&from), Some(&to)) =
                (index.get(edge.source.as_str()), index.get(edge.target.as_str()))
            {
                graph.add_edge(from, to, edge.weight);
            }
        }
        graph
    }
}

/// Builds a `DependencyGraph` from the documents of one snapshot
#[derive(Debug, Default, Clone, Copy)]
pub struct DependencyGraphBuilder;

impl DependencyGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, documents: &[AnalysisDocument]) -> DependencyGraph {
        let usable: Vec<&AnalysisDocument> = documents
            .iter()
            .filter(|doc| {
                if doc.file_path.trim().is_empty() {
                    warn!("Skipping document without a file path");
                    return false;
                }
                true
            })
            .collect();

        // Pass 1: nodes and symbol index
        let mut nodes: BTreeMap<String, DependencyNode> = BTreeMap::new();
        let mut index = SymbolIndex::new();
        for doc in &usable {
            let node = DependencyNode::file(&doc.file_path, doc.raw_content.len());
            match nodes.get(&doc.file_path) {
                // Duplicate paths keep the heaviest node whatever the input order
                Some(existing) => {
                    warn!("Duplicate document for {}", doc.file_path);
                    if node.weight > existing.weight {
                        nodes.insert(doc.file_path.clone(), node);
                    }
                }
                None => {
                    nodes.insert(doc.file_path.clone(), node);
                }
            }
            index.register_document(doc);
        }

        // Pass 2: edges
        let resolver = ImportResolver::new(&index);
        let candidates: Vec<(String, String)> = usable
            .par_iter()
            .flat_map_iter(|doc| {
                doc.metadata
                    .imported_symbols
                    .iter()
                    .flat_map(|import| resolver.resolve(import))
                    .filter(|r| r.target_file != doc.file_path)
                    .map(|r| (doc.file_path.clone(), r.target_file))
                    .collect::<Vec<_>>()
            })
            .collect();

        let pairs: BTreeSet<(String, String)> = candidates.into_iter().collect();
        let edges: Vec<DependencyEdge> = pairs
            .into_iter()
            .map(|(source, target)| DependencyEdge {
                source,
                target,
                weight: 1,
            })
            .collect();

        debug!(
            "Built dependency graph: {} nodes, {} edges, {} symbols",
            nodes.len(),
            edges.len(),
            index.len()
        );

        DependencyGraph {
            nodes: nodes.into_values().collect(),
            edges,
            ambiguities: index.into_ambiguities(),
        }
    }
}
