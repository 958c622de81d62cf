//! Kotlin Language Plugin
//!
//! Implements LanguagePlugin for Kotlin source code.
//! Supports: classes, interfaces, objects, functions (including extension
//! functions), class-level and top-level properties, imports.

use tree_sitter::{Language as TSLanguage, Node as TSNode, Tree};

use crate::features::parsing::infrastructure::{
    child_of_kind, render_signature, walk_preorder, SignatureStyle, Visit,
};
use crate::features::parsing::ports::{ExtractionContext, LanguageId, LanguagePlugin};

const SIGNATURE_STYLE: SignatureStyle<'static> = SignatureStyle {
    body_kinds: &["function_body"],
    annotation_kinds: &["annotation"],
    attach_kinds: &["function_value_parameters", ":", "."],
};

/// Parents under which a property is a field rather than a local
const FIELD_SCOPES: &[&str] = &["class_body", "enum_class_body", "source_file"];

/// Kotlin language plugin
pub struct KotlinPlugin;

impl KotlinPlugin {
    pub fn new() -> Self {
        Self
    }

    fn extract_package(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        // tree-sitter-kotlin exposes the dotted name as an `identifier` child
        if let Some(identifier) = child_of_kind(node, &["identifier"]) {
            let text: String = ctx.node_text(&identifier).split_whitespace().collect();
            ctx.set_namespace(&text);
        }
    }

    fn extract_import(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        let Some(identifier) = child_of_kind(node, &["identifier"]) else {
            return;
        };

        let mut imported: String = ctx.node_text(&identifier).split_whitespace().collect();
        if child_of_kind(node, &["wildcard_import"]).is_some() {
            imported.push_str(".*");
        }
        ctx.add_import(imported);
    }

    /// Class, interface and object names are aliased to `type_identifier`
    fn extract_type(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        if let Some(name) = child_of_kind(node, &["type_identifier", "simple_identifier"]) {
            let text = ctx.node_text(&name);
            ctx.add_type(text);
        }
    }

    fn extract_property(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        let is_field = node
            .parent()
            .map(|p| FIELD_SCOPES.contains(&p.kind()))
            .unwrap_or(false);
        if !is_field {
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "variable_declaration" => self.extract_variable(ctx, &child),
                "multi_variable_declaration" => {
                    let mut inner = child.walk();
                    for var in child
                        .children(&mut inner)
                        .filter(|c| c.kind() == "variable_declaration")
                    {
                        self.extract_variable(ctx, &var);
                    }
                }
                _ => {}
            }
        }
    }

    fn extract_variable(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        if let Some(name) = child_of_kind(node, &["simple_identifier"]) {
            let text = ctx.node_text(&name);
            ctx.add_field(text);
        }
    }

    fn visit(&self, ctx: &mut ExtractionContext, node: TSNode) -> Visit {
        match node.kind() {
            "package_header" => {
                self.extract_package(ctx, &node);
                Visit::Skip
            }
            "import_header" => {
                self.extract_import(ctx, &node);
                Visit::Skip
            }
            "class_declaration" | "object_declaration" => {
                self.extract_type(ctx, &node);
                Visit::Descend
            }
            "function_declaration" => {
                ctx.add_member(render_signature(&node, ctx.source, &SIGNATURE_STYLE));
                Visit::Descend
            }
            "property_declaration" => {
                self.extract_property(ctx, &node);
                Visit::Descend
            }
            _ => Visit::Descend,
        }
    }
}

impl Default for KotlinPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePlugin for KotlinPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_kotlin::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Kotlin
    }

    fn extract(&self, ctx: &mut ExtractionContext, tree: &Tree) {
        walk_preorder(tree, |node| self.visit(ctx, node));
    }
}
