//! Shared models

mod document;
mod error;

pub use document::{AnalysisDocument, SourceFile, StructuralMetadata};
pub use error::{AnalysisError, FileFailure, ParseError, Result};
