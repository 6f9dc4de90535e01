//! Plain-text summary handed to the diagram generator

use archviz_core::RepoAnalysisReport;
use std::fmt::Write;

/// Describe a report in a few lines of prose
pub fn generate_summary(report: &RepoAnalysisReport) -> String {
    let mut summary = String::from("Repository Summary:\n");
    let _ = writeln!(
        summary,
        "The repository contains {} files with a total of {} lines.",
        report.file_count, report.total_line_count
    );
    summary.push_str("Key components detected:\n");

    if !report.models.is_empty() {
        summary.push_str("- Model extraction from files in 'models' folders.\n");
    }
    if !report.database_info.is_empty() {
        summary.push_str("- Database extraction and table definitions found.\n");
    }
    if !report.git_commits.is_empty() {
        summary.push_str("- Git commit history analyzed.\n");
    }
    if !report.branches.is_empty() {
        summary.push_str("- Branch information is available.\n");
    }
    if !report.language_stats.is_empty() {
        let languages = report
            .language_stats
            .iter()
            .map(|(language, count)| format!("{}:{}", language, count))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(summary, "- Languages used: {}.", languages);
    }

    summary
}
