//! Single-document pipeline: segment → rank per section → summary map.

use std::path::Path;

use casebrief_core::{HeadingCatalog, Result, SummaryConfig};
use casebrief_ingest::{read_case_text, Sections, Segmenter};
use casebrief_rank::ExtractiveRanker;
use tracing::{debug, info};

use crate::assemble::assemble;
use crate::types::SummaryMap;

/// Summarizes one case document. Holds read-only config and catalog only,
/// so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct CaseSummarizer {
    config: SummaryConfig,
    catalog: HeadingCatalog,
    ranker: ExtractiveRanker,
}

impl CaseSummarizer {
    /// Build from config, resolving the configured heading catalog.
    pub fn new(config: SummaryConfig) -> Result<Self> {
        config.validate()?;
        let catalog = config.heading_catalog()?;
        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: SummaryConfig, catalog: HeadingCatalog) -> Self {
        let ranker = ExtractiveRanker::from_config(&config);
        Self {
            config,
            catalog,
            ranker,
        }
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    pub fn catalog(&self) -> &HeadingCatalog {
        &self.catalog
    }

    pub fn segment(&self, text: &str) -> Sections {
        Segmenter::from_config(&self.catalog, &self.config).segment(text)
    }

    /// Segment and rank. Empty sections stay empty and are never ranked.
    pub fn summarize_text(&self, text: &str) -> Result<SummaryMap> {
        let sections = self.segment(text);
        let mut summary = SummaryMap::default();

        for (section, lines) in sections.iter() {
            if lines.is_empty() {
                debug!("Section {} is empty, nothing to rank", section);
                continue;
            }
            let selected = self.ranker.rank_and_select(
                lines,
                self.config.keep_fraction(section),
                self.catalog.phrases(section),
            )?;
            debug!("Section {}: kept {} of {} lines", section, selected.len(), lines.len());
            summary.set(section, selected);
        }

        info!(
            "Summarized {} lines into {} sentences",
            sections.total_lines(),
            summary.total_sentences()
        );
        Ok(summary)
    }

    /// Read a case file and summarize it. A missing file is `NotFound`.
    pub fn summarize_file(&self, path: &Path) -> Result<SummaryMap> {
        let text = read_case_text(path)?;
        let summary = self.summarize_text(&text)?;
        info!("Summarized {}", path.display());
        Ok(summary)
    }

    /// Summarize and serialize to the artifact format.
    pub fn summarize_to_string(&self, text: &str) -> Result<String> {
        Ok(assemble(&self.summarize_text(text)?))
    }
}

impl Default for CaseSummarizer {
    fn default() -> Self {
        Self::with_catalog(SummaryConfig::default(), HeadingCatalog::default())
    }
}
