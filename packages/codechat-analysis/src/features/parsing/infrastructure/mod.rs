//! Parsing infrastructure (tree-sitter)

mod syntax;

pub use syntax::{
    child_of_kind, collapse_whitespace, parse_source, render_signature, walk_preorder,
    SignatureStyle, Visit,
};
