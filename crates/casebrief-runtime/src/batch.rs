//! Corpus batch runner: one case per sub-folder of a root folder.

use std::path::{Path, PathBuf};
use std::time::Instant;

use casebrief_core::{Error, Result};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use crate::assemble::assemble;
use crate::pipeline::CaseSummarizer;
use crate::types::{BatchReport, CaseOutcome, CaseStatus};

pub const DEFAULT_CASE_FILE: &str = "court_case.txt";
pub const DEFAULT_SUMMARY_FILE: &str = "summary.txt";

/// Summarizes every case folder under a corpus root.
pub struct BatchRunner {
    summarizer: CaseSummarizer,
    case_file: String,
    summary_file: String,
    parallel: bool,
}

impl BatchRunner {
    pub fn new(summarizer: CaseSummarizer) -> Self {
        Self {
            summarizer,
            case_file: DEFAULT_CASE_FILE.to_string(),
            summary_file: DEFAULT_SUMMARY_FILE.to_string(),
            parallel: false,
        }
    }

    pub fn with_case_file(mut self, name: impl Into<String>) -> Self {
        self.case_file = name.into();
        self
    }

    pub fn with_summary_file(mut self, name: impl Into<String>) -> Self {
        self.summary_file = name.into();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Process all case folders in sorted order.
    ///
    /// Only an unreadable root is an error; per-case failures are recorded
    /// in the report.
    pub fn run(&self, root: &Path) -> Result<BatchReport> {
        let start = Instant::now();
        let folders = case_folders(root)?;
        info!("Batch over {} case folders in {}", folders.len(), root.display());

        // Indexed collect keeps sorted order in parallel mode too
        let cases: Vec<CaseOutcome> = if self.parallel {
            folders.par_iter().map(|dir| self.process_case(dir)).collect()
        } else {
            folders.iter().map(|dir| self.process_case(dir)).collect()
        };

        let report = BatchReport::from_outcomes(cases, start.elapsed().as_millis() as u64);
        info!(
            "Batch complete: {} written, {} skipped, {} failed in {}ms",
            report.written, report.skipped, report.failed, report.duration_ms
        );
        Ok(report)
    }

    /// Summarize one case folder and write its summary artifact.
    pub fn process_case(&self, dir: &Path) -> CaseOutcome {
        let case = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());

        let status = match self.write_summary(dir) {
            Ok(digest) => {
                info!("Wrote summary for case {}", case);
                CaseStatus::Written { digest }
            }
            Err(e) if e.is_not_found() => {
                warn!("Skipping case {}: {} not found", case, self.case_file);
                CaseStatus::Skipped
            }
            Err(e) => {
                error!("Case {} failed: {}", case, e);
                CaseStatus::Failed {
                    error: e.to_string(),
                }
            }
        };

        CaseOutcome {
            case,
            path: dir.to_path_buf(),
            status,
        }
    }

    fn write_summary(&self, dir: &Path) -> Result<String> {
        let summary = self.summarizer.summarize_file(&dir.join(&self.case_file))?;
        let artifact = assemble(&summary);
        std::fs::write(dir.join(&self.summary_file), &artifact)?;
        Ok(file_digest(&artifact))
    }
}

/// Hex SHA-256 of an artifact's bytes.
pub fn file_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Immediate sub-directories of `root`, sorted by path.
pub fn case_folders(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotFound(root.display().to_string()));
    }
    let mut folders = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            folders.push(path);
        }
    }
    folders.sort();
    Ok(folders)
}
