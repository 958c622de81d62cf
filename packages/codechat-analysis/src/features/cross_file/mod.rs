//! Cross-File Resolution Module
//!
//! Builds the file-to-file dependency graph of a repository snapshot from the
//! declared types and imports of its documents.
//!
//! Key features:
//! - Symbol index of `namespace.Type` → file (last write wins on collisions)
//! - Import resolution: exact, on-demand (`pkg.*`), enclosing type
//! - Parallel edge resolution with Rayon
//! - Dependency graph queries with petgraph (Tarjan SCC for cycle detection)

mod dep_graph;
mod import_resolver;
mod symbol_index;
mod types;

pub use dep_graph::{DependencyGraph, DependencyGraphBuilder};
pub use import_resolver::ImportResolver;
pub use symbol_index::SymbolIndex;
pub use types::*;
