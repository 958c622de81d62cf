//! Tree-sitter parsing and tree helpers
//!
//! This is where the tree-sitter parser is driven. Plugins only see
//! error-free trees.

use tree_sitter::{Node as TSNode, Parser as TSParser, Tree};

use crate::features::parsing::ports::LanguagePlugin;
use crate::shared::models::ParseError;

/// Traversal decision returned by a pre-order visitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Visit the node's children next
    Descend,
    /// Continue with the next sibling
    Skip,
    /// End the traversal
    Stop,
}

/// Parse `source` with the plugin's grammar and reject trees with syntax errors
pub fn parse_source(
    plugin: &dyn LanguagePlugin,
    source: &str,
    file_path: &str,
) -> Result<Tree, ParseError> {
    let mut parser = TSParser::new();
    parser
        .set_language(&plugin.tree_sitter_language())
        .map_err(|e| ParseError::Grammar {
            path: file_path.to_string(),
            message: format!("Failed to set language: {}", e),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::Grammar {
            path: file_path.to_string(),
            message: "Failed to parse source code".to_string(),
        })?;

    if tree.root_node().has_error() {
        return Err(first_syntax_error(&tree, source, file_path));
    }

    Ok(tree)
}

/// Iterative pre-order walk over the whole tree
pub fn walk_preorder<'t>(tree: &'t Tree, mut visit: impl FnMut(TSNode<'t>) -> Visit) {
    let mut cursor = tree.root_node().walk();
    loop {
        match visit(cursor.node()) {
            Visit::Stop => return,
            Visit::Descend if cursor.goto_first_child() => continue,
            _ => {}
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

/// Locate the first error or missing node in document order
fn first_syntax_error(tree: &Tree, source: &str, file_path: &str) -> ParseError {
    let mut found: Option<(usize, usize, String)> = None;

    walk_preorder(tree, |node| {
        if !node.has_error() {
            return Visit::Skip;
        }
        if node.is_missing() || node.is_error() {
            let pos = node.start_position();
            let detail = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                let text = collapse_whitespace(source.get(node.byte_range()).unwrap_or(""));
                format!("unexpected `{}`", truncate(&text, 40))
            };
            found = Some((pos.row + 1, pos.column + 1, detail));
            return Visit::Stop;
        }
        Visit::Descend
    });

    let (line, column, detail) = found.unwrap_or_else(|| (1, 1, "invalid syntax".to_string()));
    ParseError::Syntax {
        path: file_path.to_string(),
        line,
        column,
        detail,
    }
}

/// First direct child with one of the given kinds
pub fn child_of_kind<'t>(node: &TSNode<'t>, kinds: &[&str]) -> Option<TSNode<'t>> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|c| kinds.contains(&c.kind()));
    found
}

/// Collapse every run of whitespace into a single space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Rules for rendering a declaration header as a one-line signature
pub struct SignatureStyle<'s> {
    /// Child kinds that end the header (bodies, default values)
    pub body_kinds: &'s [&'s str],
    /// Modifier children dropped from the signature
    pub annotation_kinds: &'s [&'s str],
    /// Pieces attached to the previous piece without a space
    pub attach_kinds: &'s [&'s str],
}

/// Render a member declaration as a normalized signature
///
/// Modifiers keep their keywords but lose annotations, the body is dropped
/// and all whitespace runs collapse to one space, so `public  int\n add(int a,
/// int b) { ... }` becomes `public int add(int a, int b)`.
pub fn render_signature(node: &TSNode, source: &str, style: &SignatureStyle) -> String {
    let mut out = String::new();
    let mut attach_next = false;
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        if child.is_extra() {
            continue;
        }
        let kind = child.kind();
        if style.body_kinds.contains(&kind) {
            break;
        }

        let piece = if kind == "modifiers" {
            let mut inner = child.walk();
            let words: Vec<String> = child
                .children(&mut inner)
                .filter(|m| !m.is_extra() && !style.annotation_kinds.contains(&m.kind()))
                .map(|m| collapse_whitespace(source.get(m.byte_range()).unwrap_or("")))
                .filter(|w| !w.is_empty())
                .collect();
            words.join(" ")
        } else {
            collapse_whitespace(source.get(child.byte_range()).unwrap_or(""))
        };

        if piece.is_empty() {
            continue;
        }

        let attach = attach_next || style.attach_kinds.contains(&kind);
        if !out.is_empty() && !attach {
            out.push(' ');
        }
        out.push_str(&piece);
        attach_next = kind == ".";
    }

    out
}
