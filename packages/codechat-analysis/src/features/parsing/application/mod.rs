//! Parsing application layer

mod extractor;

pub use extractor::{ExtractionBatch, StructuralExtractor};
