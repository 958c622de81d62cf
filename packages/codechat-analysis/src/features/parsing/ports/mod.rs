//! Parsing ports

pub mod language_plugin;

pub use language_plugin::{ExtractionContext, LanguageId, LanguagePlugin, LanguageRegistry};
