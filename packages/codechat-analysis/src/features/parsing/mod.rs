//! Parsing Feature
//!
//! Turns source files into structural metadata.
//!
//! ## Structure
//! - `ports/` - LanguagePlugin trait, ExtractionContext, LanguageRegistry
//! - `application/` - StructuralExtractor (single file and parallel batch)
//! - `infrastructure/` - tree-sitter parsing, traversal and signature rendering
//! - `plugins/` - Language-specific plugins (Java, Kotlin)

pub mod application;
pub mod infrastructure;
pub mod plugins;
pub mod ports;

pub use application::{ExtractionBatch, StructuralExtractor};
pub use plugins::{create_full_registry, JavaPlugin, KotlinPlugin};
pub use ports::{ExtractionContext, LanguageId, LanguagePlugin, LanguageRegistry};
