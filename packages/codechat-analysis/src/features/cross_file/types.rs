//! Cross-file types

use serde::{Deserialize, Serialize};

/// Minimum and maximum node weight
pub const MIN_NODE_WEIGHT: u32 = 20;
pub const MAX_NODE_WEIGHT: u32 = 100;

/// Content bytes per weight unit
const BYTES_PER_WEIGHT: usize = 100;

/// A file in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    /// File path
    pub id: String,
    /// Last path segment
    pub display_name: String,
    /// Always "file"
    pub kind: String,
    /// Visualization size in [20, 100], grows with content length
    pub weight: u32,
}

impl DependencyNode {
    pub fn file(path: &str, content_len: usize) -> Self {
        Self {
            id: path.to_string(),
            display_name: path.rsplit('/').next().unwrap_or(path).to_string(),
            kind: "file".to_string(),
            weight: node_weight(content_len),
        }
    }
}

/// `clamp(content_len / 100, 20, 100)`
pub fn node_weight(content_len: usize) -> u32 {
    let units = (content_len / BYTES_PER_WEIGHT).min(MAX_NODE_WEIGHT as usize) as u32;
    units.clamp(MIN_NODE_WEIGHT, MAX_NODE_WEIGHT)
}

/// `source` depends on a type declared in `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyEdge {
    pub source: String,
    pub target: String,
    pub weight: u32,
}

/// Two files declared the same fully-qualified type; the later one won
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionAmbiguity {
    pub fqn: String,
    pub previous_file: String,
    pub winning_file: String,
}

/// How an import string was matched against the symbol index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionMethod {
    /// Exact FQN match
    ExactMatch,
    /// `pkg.*` matched every type declared directly in `pkg`
    Wildcard,
    /// Enclosing type match (`pkg.Outer.Inner` → `pkg.Outer`)
    EnclosingType,
}

/// One file an import resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImport {
    pub imported_name: String,
    pub matched_fqn: String,
    pub target_file: String,
    pub method: ResolutionMethod,
}
