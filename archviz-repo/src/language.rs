//! Extension based language classification

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static EXTENSION_LANGUAGES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("go", "Go"),
        ("js", "JavaScript"),
        ("ts", "TypeScript"),
        ("py", "Python"),
        ("java", "Java"),
        ("c", "C"),
        ("cpp", "C++"),
        ("cs", "C#"),
        ("rb", "Ruby"),
        ("php", "PHP"),
        ("html", "HTML"),
        ("css", "CSS"),
        ("json", "JSON"),
        ("xml", "XML"),
        ("sh", "Shell"),
        ("md", "Markdown"),
    ])
});

/// Map a file name to its language label; `None` leaves it unclassified
pub fn classify(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name).extension()?.to_str()?;
    EXTENSION_LANGUAGES.get(extension).copied()
}
