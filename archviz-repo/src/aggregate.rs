//! Tree-wide statistics

use archviz_core::{Aggregates, FileNode, UNCLASSIFIED_LANGUAGE};

/// Reduce a finished tree to line/file totals and a per-language histogram
///
/// Pre-order traversal; directories only contribute through their children.
pub fn compute_aggregates(root: &FileNode) -> Aggregates {
    let mut aggregates = Aggregates::default();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if !node.is_dir {
            aggregates.file_count += 1;
            aggregates.total_line_count += node.line_count.unwrap_or(0);
            let language = node.language.as_deref().unwrap_or(UNCLASSIFIED_LANGUAGE);
            *aggregates
                .language_stats
                .entry(language.to_string())
                .or_default() += 1;
        }
        stack.extend(node.children.iter().rev());
    }

    aggregates
}
