//! Indentation-delimited model classes (Django, Flask-SQLAlchemy, SQLAlchemy declarative)

use super::{FileContext, ModelExtractor, SourcePolicy};
use archviz_core::DatabaseInfo;
use regex::Regex;
use std::sync::LazyLock;

/// Base types that mark a class as a persisted model
pub const KNOWN_MODEL_BASES: &[&str] = &["models.Model", "db.Model", "Base", "DeclarativeBase"];

/// Imports that make a file worth scanning even outside a models directory
pub const MODEL_IMPORT_SIGNATURES: &[&str] = &[
    "from django.db import models",
    "from flask_sqlalchemy import",
    "from sqlalchemy",
];

static CLASS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^class\s+(\w+)\s*\(([^)]*)\)\s*:").expect("class pattern is valid")
});

// `(?s)` lets a declaration's argument list run over several lines.
static FIELD_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?sm)^\s*(\w+)\s*=\s*\w+\.([A-Za-z0-9_]+)\((.*?)\)")
        .expect("field pattern is valid")
});

pub const EXTRACTOR: ModelExtractor = ModelExtractor {
    name: "decorator",
    is_eligible,
    extract,
    source_policy: SourcePolicy::OnMatch,
};

fn is_eligible(file: &FileContext<'_>) -> bool {
    if file.extension() != Some("py") {
        return false;
    }

    file.relative_path.to_lowercase().contains("models")
        || MODEL_IMPORT_SIGNATURES
            .iter()
            .any(|signature| file.content.contains(signature))
        || KNOWN_MODEL_BASES
            .iter()
            .any(|base| file.content.contains(base))
}

fn has_model_base(bases: &str) -> bool {
    bases
        .split(',')
        .map(str::trim)
        .any(|base| KNOWN_MODEL_BASES.contains(&base))
}

/// Collect `name type arguments` field descriptions for every model class
///
/// A class body runs from the end of its header to the next model class header,
/// or to the end of the content.
pub fn extract(content: &str) -> DatabaseInfo {
    let headers: Vec<(String, usize, usize)> = CLASS_HEADER
        .captures_iter(content)
        .filter(|captures| has_model_base(&captures[2]))
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            Some((captures[1].to_string(), whole.start(), whole.end()))
        })
        .collect();

    let mut models = DatabaseInfo::new();

    for (index, (name, _, body_start)) in headers.iter().enumerate() {
        let body_end = headers
            .get(index + 1)
            .map_or(content.len(), |(_, next_start, _)| *next_start);
        let body = &content[*body_start..body_end];

        let fields = models.entry(name.clone()).or_default();
        fields.extend(FIELD_DECL.captures_iter(body).map(|field| {
            format!(
                "{} {} {}",
                field[1].trim(),
                field[2].trim(),
                field[3].trim()
            )
        }));
    }

    models
}
