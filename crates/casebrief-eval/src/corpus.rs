//! Corpus evaluation: score every case folder holding both a reference and
//! a generated summary.

use std::fmt::Write as _;
use std::path::Path;

use casebrief_core::Result;
use casebrief_ingest::read_case_text;
use casebrief_runtime::{case_folders, parse};
use serde::Serialize;
use tracing::{info, warn};

use crate::rouge::{rouge1, RougeScore};

pub const DEFAULT_REFERENCE_FILE: &str = "human summary.txt";

#[derive(Debug, Clone, Serialize)]
pub struct CaseScore {
    pub case: String,
    #[serde(flatten)]
    pub score: RougeScore,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EvalReport {
    pub cases: Vec<CaseScore>,
    pub average: Option<RougeScore>,
    /// Case folders missing one of the two files.
    pub skipped: Vec<String>,
}

/// Candidate text to score: the section bodies when the file is a summary
/// artifact, the whole file otherwise.
fn candidate_text(content: &str) -> String {
    let summary = parse(content);
    if summary.total_sentences() == 0 {
        return content.to_string();
    }
    summary
        .iter()
        .flat_map(|(_, sentences)| sentences.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("\n")
}

fn score_case(dir: &Path, reference_file: &str, summary_file: &str) -> Result<RougeScore> {
    let reference = read_case_text(&dir.join(reference_file))?;
    let candidate = read_case_text(&dir.join(summary_file))?;
    Ok(rouge1(&reference, &candidate_text(&candidate)))
}

/// Score all case folders under `root` in sorted order.
///
/// Folders missing either file are skipped with a warning; other read
/// errors abort the run.
pub fn evaluate_corpus(root: &Path, reference_file: &str, summary_file: &str) -> Result<EvalReport> {
    let mut report = EvalReport::default();

    for dir in case_folders(root)? {
        let case = folder_name(&dir);
        match score_case(&dir, reference_file, summary_file) {
            Ok(score) => report.cases.push(CaseScore { case, score }),
            Err(e) if e.is_not_found() => {
                warn!("Skipping case {}: {}", case, e);
                report.skipped.push(case);
            }
            Err(e) => return Err(e),
        }
    }

    let scores: Vec<RougeScore> = report.cases.iter().map(|c| c.score).collect();
    report.average = RougeScore::mean(&scores);
    info!(
        "Evaluated {} cases ({} skipped)",
        report.cases.len(),
        report.skipped.len()
    );
    Ok(report)
}

fn folder_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

/// Fixed-width table: one row per case plus an average row.
pub fn render_table(report: &EvalReport) -> String {
    let width = report
        .cases
        .iter()
        .map(|c| c.case.chars().count())
        .max()
        .unwrap_or(0)
        .max("Average".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:>9}  {:>9}  {:>9}", "Case", "Recall", "Precision", "F1");
    for c in &report.cases {
        let _ = writeln!(
            out,
            "{:<width$}  {:>9.4}  {:>9.4}  {:>9.4}",
            c.case, c.score.recall, c.score.precision, c.score.f1
        );
    }
    if let Some(avg) = &report.average {
        let _ = writeln!(
            out,
            "{:<width$}  {:>9.4}  {:>9.4}  {:>9.4}",
            "Average", avg.recall, avg.precision, avg.f1
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebrief_core::Section;
    use casebrief_runtime::{assemble, SummaryMap};

    fn write_case(root: &Path, name: &str, reference: Option<&str>, summary: Option<&str>) {
        let dir = root.join(name);
        std::fs::create_dir(&dir).unwrap();
        if let Some(text) = reference {
            std::fs::write(dir.join(DEFAULT_REFERENCE_FILE), text).unwrap();
        }
        if let Some(text) = summary {
            std::fs::write(dir.join("summary.txt"), text).unwrap();
        }
    }

    #[test]
    fn test_banners_are_not_scored() {
        let mut summary = SummaryMap::default();
        summary.set(Section::Rulings, vec!["The petition is denied.".into()]);
        let artifact = assemble(&summary);
        assert_eq!(candidate_text(&artifact), "The petition is denied.");
        assert_eq!(candidate_text("plain text"), "plain text");
    }

    #[test]
    fn test_evaluate_corpus() {
        let root = tempfile::tempdir().unwrap();
        let mut summary = SummaryMap::default();
        summary.set(Section::Rulings, vec!["The petition is denied.".into()]);
        let artifact = assemble(&summary);

        write_case(root.path(), "case_a", Some("The petition is denied."), Some(&artifact));
        write_case(root.path(), "case_b", Some("The petition is granted."), None);
        write_case(root.path(), "case_c", None, Some(&artifact));

        let report = evaluate_corpus(root.path(), DEFAULT_REFERENCE_FILE, "summary.txt").unwrap();
        assert_eq!(report.cases.len(), 1);
        assert_eq!(report.cases[0].case, "case_a");
        assert_eq!(report.cases[0].score.f1, 1.0);
        assert_eq!(report.skipped, vec!["case_b", "case_c"]);
        assert_eq!(report.average.unwrap().f1, 1.0);

        let table = render_table(&report);
        assert!(table.starts_with("Case"));
        assert!(table.contains("case_a"));
        assert!(table.lines().last().unwrap().starts_with("Average"));
    }

    #[test]
    fn test_empty_corpus_has_no_average() {
        let root = tempfile::tempdir().unwrap();
        let report = evaluate_corpus(root.path(), DEFAULT_REFERENCE_FILE, "summary.txt").unwrap();
        assert!(report.cases.is_empty());
        assert!(report.average.is_none());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["average"].is_null());
    }
}
