//! Brace-delimited record types (`type User struct { ... }`) and inline
//! `CREATE TABLE` statements

use super::{FileContext, ModelExtractor, SourcePolicy};
use archviz_core::DatabaseInfo;
use regex::Regex;
use std::sync::LazyLock;

static STRUCT_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"type\s+(\w+)\s+struct\s+\{([^}]+)\}").expect("struct pattern is valid")
});

static CREATE_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"CREATE\s+TABLE\s+(\w+)\s*\(([^)]+)\)").expect("table pattern is valid")
});

pub const EXTRACTOR: ModelExtractor = ModelExtractor {
    name: "structural",
    is_eligible,
    extract,
    source_policy: SourcePolicy::Always,
};

/// `.go` files below a directory whose name mentions "models"
fn is_eligible(file: &FileContext<'_>) -> bool {
    file.extension() == Some("go") && file.parent_dir().to_lowercase().contains("models")
}

/// Collect struct field lines and table column definitions keyed by type/table name
pub fn extract(content: &str) -> DatabaseInfo {
    let mut tables = DatabaseInfo::new();

    for captures in STRUCT_DECL.captures_iter(content) {
        let fields = tables.entry(captures[1].to_string()).or_default();
        fields.extend(
            captures[2]
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    for captures in CREATE_TABLE.captures_iter(content) {
        let columns = tables.entry(captures[1].to_string()).or_default();
        columns.extend(captures[2].split(',').map(|column| column.trim().to_string()));
    }

    tables
}
