//! Runtime types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use casebrief_core::Section;
use serde::Serialize;

/// Section → selected sentences. All four sections are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryMap {
    sentences: BTreeMap<Section, Vec<String>>,
}

impl Default for SummaryMap {
    fn default() -> Self {
        Self {
            sentences: Section::ALL.iter().map(|s| (*s, Vec::new())).collect(),
        }
    }
}

impl SummaryMap {
    pub fn get(&self, section: Section) -> &[String] {
        self.sentences.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set(&mut self, section: Section, sentences: Vec<String>) {
        self.sentences.insert(section, sentences);
    }

    /// Sections with their sentences, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &[String])> + '_ {
        Section::ALL.iter().map(move |s| (*s, self.get(*s)))
    }

    pub fn total_sentences(&self) -> usize {
        self.sentences.values().map(Vec::len).sum()
    }
}

/// What happened to one case folder in a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CaseStatus {
    /// Summary written; hex SHA-256 of the artifact.
    Written { digest: String },
    /// The case text file was missing.
    Skipped,
    /// Any other failure.
    Failed { error: String },
}

/// Outcome for one case folder.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub case: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: CaseStatus,
}

/// Result of a batch run over a corpus folder.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub cases: Vec<CaseOutcome>,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

impl BatchReport {
    /// Build a report from outcomes already in sorted order.
    pub fn from_outcomes(cases: Vec<CaseOutcome>, duration_ms: u64) -> Self {
        let mut report = Self {
            duration_ms,
            ..Default::default()
        };
        for outcome in &cases {
            match outcome.status {
                CaseStatus::Written { .. } => report.written += 1,
                CaseStatus::Skipped => report.skipped += 1,
                CaseStatus::Failed { .. } => report.failed += 1,
            }
        }
        report.cases = cases;
        report
    }
}
