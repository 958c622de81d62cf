//! Java Language Plugin
//!
//! Implements LanguagePlugin for Java source code.
//! Supports: classes, interfaces, enums, records, annotation types,
//! methods, constructors, fields, interface constants, single, static and
//! on-demand imports.

use tree_sitter::{Language as TSLanguage, Node as TSNode, Tree};

use crate::features::parsing::infrastructure::{
    child_of_kind, render_signature, walk_preorder, SignatureStyle, Visit,
};
use crate::features::parsing::ports::{ExtractionContext, LanguageId, LanguagePlugin};

const SIGNATURE_STYLE: SignatureStyle<'static> = SignatureStyle {
    body_kinds: &["block", "constructor_body", ";"],
    annotation_kinds: &["annotation", "marker_annotation"],
    attach_kinds: &["formal_parameters", "dimensions"],
};

/// Java language plugin
pub struct JavaPlugin;

impl JavaPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Extract package declaration as namespace
    fn extract_package(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        if let Some(name) = child_of_kind(node, &["scoped_identifier", "identifier"]) {
            let text = ctx.node_text(&name);
            ctx.set_namespace(text);
        }
    }

    /// Extract import (`a.b.C`, `a.b.*`, static `a.b.C.member`)
    fn extract_import(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        let Some(name) = child_of_kind(node, &["scoped_identifier", "identifier"]) else {
            return;
        };

        let mut imported: String = ctx.node_text(&name).split_whitespace().collect();
        if child_of_kind(node, &["asterisk"]).is_some() {
            imported.push_str(".*");
        }
        ctx.add_import(imported);
    }

    /// Extract class/interface/enum/record/annotation type name
    fn extract_type(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        if let Some(name) = node.child_by_field_name("name") {
            let text = ctx.node_text(&name);
            ctx.add_type(text);
        }
    }

    /// Extract every declarator of a field or constant declaration
    fn extract_fields(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        let mut cursor = node.walk();
        for declarator in node
            .children(&mut cursor)
            .filter(|c| c.kind() == "variable_declarator")
        {
            if let Some(name) = declarator.child_by_field_name("name") {
                let text = ctx.node_text(&name);
                ctx.add_field(text);
            }
        }
    }

    fn visit(&self, ctx: &mut ExtractionContext, node: TSNode) -> Visit {
        match node.kind() {
            "package_declaration" => {
                // Only a top-level package clause names the namespace
                if node.parent().map(|p| p.kind() == "program").unwrap_or(false) {
                    self.extract_package(ctx, &node);
                }
                Visit::Skip
            }
            "import_declaration" => {
                self.extract_import(ctx, &node);
                Visit::Skip
            }
            "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "annotation_type_declaration" => {
                self.extract_type(ctx, &node);
                Visit::Descend
            }
            "method_declaration" | "constructor_declaration" | "compact_constructor_declaration" => {
                ctx.add_member(render_signature(&node, ctx.source, &SIGNATURE_STYLE));
                // Local and anonymous classes live inside bodies
                Visit::Descend
            }
            "field_declaration" | "constant_declaration" => {
                self.extract_fields(ctx, &node);
                Visit::Descend
            }
            _ => Visit::Descend,
        }
    }
}

impl Default for JavaPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePlugin for JavaPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_java::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Java
    }

    fn extract(&self, ctx: &mut ExtractionContext, tree: &Tree) {
        walk_preorder(tree, |node| self.visit(ctx, node));
    }
}
