//! Pipeline input and per-file analysis records

use serde::{Deserialize, Serialize};

/// One file of a repository snapshot, as handed over by the source collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub path: String,
    pub content: String,
    pub revision_id: String,
}

impl SourceFile {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        revision_id: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            revision_id: revision_id.into(),
        }
    }

    /// Lowercase extension of the path, if any
    pub fn extension(&self) -> Option<String> {
        let file_name = self.path.rsplit('/').next().unwrap_or(&self.path);
        let (stem, ext) = file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Declared and referenced symbols of one source file
///
/// Sequences keep source order. Duplicates are kept on purpose: overloaded
/// members legitimately repeat, and nested types may share a simple name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralMetadata {
    pub namespace: Option<String>,
    pub declared_types: Vec<String>,
    pub declared_members: Vec<String>,
    pub fields: Vec<String>,
    pub imported_symbols: Vec<String>,
}

impl StructuralMetadata {
    /// Fully-qualified names of the declared types (empty without a namespace)
    pub fn qualified_types(&self) -> impl Iterator<Item = String> + '_ {
        self.namespace.iter().flat_map(move |ns| {
            self.declared_types
                .iter()
                .map(move |name| format!("{}.{}", ns, name))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.namespace.is_none()
            && self.declared_types.is_empty()
            && self.declared_members.is_empty()
            && self.fields.is_empty()
            && self.imported_symbols.is_empty()
    }
}

/// A successfully parsed file together with its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument {
    pub file_path: String,
    pub raw_content: String,
    pub metadata: StructuralMetadata,
    pub revision_id: String,
    pub language: String,
}

impl AnalysisDocument {
    pub fn new(file: &SourceFile, metadata: StructuralMetadata, language: &str) -> Self {
        Self {
            file_path: file.path.clone(),
            raw_content: file.content.clone(),
            metadata,
            revision_id: file.revision_id.clone(),
            language: language.to_string(),
        }
    }

    /// Last `/`-separated segment of the path
    pub fn display_name(&self) -> &str {
        self.file_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        let file = SourceFile::new("src/main/java/Foo.JAVA", "", "r1");
        assert_eq!(file.extension().as_deref(), Some("java"));

        assert_eq!(SourceFile::new("Makefile", "", "r1").extension(), None);
        assert_eq!(SourceFile::new("dir.d/.hidden", "", "r1").extension(), None);
    }

    #[test]
    fn test_qualified_types() {
        let metadata = StructuralMetadata {
            namespace: Some("com.example".to_string()),
            declared_types: vec!["Foo".to_string(), "Bar".to_string()],
            ..Default::default()
        };
        let fqns: Vec<String> = metadata.qualified_types().collect();
        assert_eq!(fqns, vec!["com.example.Foo", "com.example.Bar"]);

        let no_ns = StructuralMetadata {
            declared_types: vec!["Foo".to_string()],
            ..Default::default()
        };
        assert_eq!(no_ns.qualified_types().count(), 0);
    }

    #[test]
    fn test_document_json_field_names() {
        let file = SourceFile::new("a/B.java", "class B {}", "rev");
        let doc = AnalysisDocument::new(&file, StructuralMetadata::default(), "java");
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["filePath"], "a/B.java");
        assert_eq!(json["rawContent"], "class B {}");
        assert_eq!(json["revisionId"], "rev");
        assert!(json["metadata"]["declaredTypes"].is_array());
        assert_eq!(doc.display_name(), "B.java");
    }
}
