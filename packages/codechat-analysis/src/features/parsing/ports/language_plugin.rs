//! Language Plugin Port
//!
//! Defines the contract for language-specific extraction plugins.
//! Each supported language family (Java, Kotlin) implements this trait.

use std::collections::HashMap;
use tree_sitter::{Language as TSLanguage, Node as TSNode, Tree};

use crate::shared::models::StructuralMetadata;

/// Language identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Java,
    Kotlin,
}

impl LanguageId {
    /// Get language name as string
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::Java => "java",
            LanguageId::Kotlin => "kotlin",
        }
    }

    /// Get language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "java" => Some(LanguageId::Java),
            "kt" | "kts" => Some(LanguageId::Kotlin),
            _ => None,
        }
    }

}

/// Extraction context passed to plugins
///
/// Accumulates the metadata of one file while the plugin walks its tree.
pub struct ExtractionContext<'a> {
    /// Source code
    pub source: &'a str,
    metadata: StructuralMetadata,
}

impl<'a> ExtractionContext<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            metadata: StructuralMetadata::default(),
        }
    }

    /// Get node text from tree-sitter node
    pub fn node_text(&self, node: &TSNode) -> &'a str {
        self.source.get(node.byte_range()).unwrap_or("")
    }

    /// Record the top-level namespace; later declarations are ignored
    pub fn set_namespace(&mut self, namespace: &str) {
        let namespace = namespace.trim();
        if self.metadata.namespace.is_none() && !namespace.is_empty() {
            self.metadata.namespace = Some(namespace.to_string());
        }
    }

    pub fn add_type(&mut self, name: &str) {
        if !name.is_empty() {
            self.metadata.declared_types.push(name.to_string());
        }
    }

    pub fn add_member(&mut self, signature: String) {
        if !signature.is_empty() {
            self.metadata.declared_members.push(signature);
        }
    }

    pub fn add_field(&mut self, name: &str) {
        if !name.is_empty() {
            self.metadata.fields.push(name.to_string());
        }
    }

    pub fn add_import(&mut self, symbol: String) {
        if !symbol.is_empty() {
            self.metadata.imported_symbols.push(symbol);
        }
    }

    pub fn into_metadata(self) -> StructuralMetadata {
        self.metadata
    }
}

/// Language Plugin trait
///
/// Each supported language implements this trait to provide:
/// - Tree-sitter grammar
/// - Structural extraction over a parsed, error-free tree
pub trait LanguagePlugin: Send + Sync {
    /// Get the tree-sitter language
    fn tree_sitter_language(&self) -> TSLanguage;

    /// Get the language identifier
    fn language_id(&self) -> LanguageId;

    /// Collect declared types, members, fields, imports and the namespace
    fn extract(&self, ctx: &mut ExtractionContext, tree: &Tree);
}

/// Language plugin registry
pub struct LanguageRegistry {
    plugins: HashMap<LanguageId, Box<dyn LanguagePlugin>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register a language plugin
    pub fn register(&mut self, plugin: Box<dyn LanguagePlugin>) {
        self.plugins.insert(plugin.language_id(), plugin);
    }

    /// Get plugin by language ID
    pub fn get(&self, lang: LanguageId) -> Option<&dyn LanguagePlugin> {
        self.plugins.get(&lang).map(|p| p.as_ref())
    }

    /// Get plugin by file extension
    pub fn get_by_extension(&self, ext: &str) -> Option<&dyn LanguagePlugin> {
        let lang = LanguageId::from_extension(ext)?;
        self.get(lang)
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
