//! Source fixtures

use codechat_analysis::SourceFile;

pub const REVISION: &str = "rev-1";

/// A Java class in `package` importing `imports`
pub fn fixture_java_class(package: &str, class_name: &str, imports: &[&str]) -> String {
    let import_lines: String = imports.iter().map(|i| format!("import {i};\n")).collect();
    format!(
        "package {package};\n\n{import_lines}\npublic class {class_name} {{\n    private int value;\n\n    public int getValue() {{\n        return value;\n    }}\n}}\n"
    )
}

/// A Kotlin class in `package` importing `imports`
pub fn fixture_kotlin_class(package: &str, class_name: &str, imports: &[&str]) -> String {
    let import_lines: String = imports.iter().map(|i| format!("import {i}\n")).collect();
    format!(
        "package {package}\n\n{import_lines}\nclass {class_name} {{\n    val name: String = \"\"\n\n    fun greet(): String = name\n}}\n"
    )
}

/// A Java class with `n` methods, large enough to need several chunks
pub fn fixture_java_large(package: &str, class_name: &str, n: usize) -> String {
    let methods: String = (0..n)
        .map(|i| format!("    public int method{i}(int x) {{\n        return x + {i};\n    }}\n\n"))
        .collect();
    format!("package {package};\n\npublic class {class_name} {{\n{methods}}}\n")
}

pub fn source(path: &str, content: impl Into<String>) -> SourceFile {
    SourceFile::new(path, content, REVISION)
}
