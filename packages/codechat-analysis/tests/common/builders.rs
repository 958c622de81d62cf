//! Test data builders

use codechat_analysis::{AnalysisDocument, SourceFile, StructuralMetadata};

/// Builder for AnalysisDocument without going through a parser
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    path: String,
    content: String,
    metadata: StructuralMetadata,
}

impl DocumentBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Default::default()
        }
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.metadata.namespace = Some(namespace.to_string());
        self
    }

    pub fn declares(mut self, type_name: &str) -> Self {
        self.metadata.declared_types.push(type_name.to_string());
        self
    }

    pub fn imports(mut self, symbol: &str) -> Self {
        self.metadata.imported_symbols.push(symbol.to_string());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn build(self) -> AnalysisDocument {
        AnalysisDocument::new(
            &SourceFile::new(self.path, self.content, super::REVISION),
            self.metadata,
            "java",
        )
    }
}
