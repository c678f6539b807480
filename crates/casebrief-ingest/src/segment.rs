//! Heading-driven segmentation of a case document into sections.
//!
//! Lines are read top to bottom. A line that looks like a heading switches
//! the current section and is itself kept in the new section; every other
//! non-blank line joins whatever section is current. Blank lines are dropped.

use std::collections::BTreeMap;

use casebrief_core::{HeadingCatalog, Section, SummaryConfig, DEFAULT_SIMILARITY_THRESHOLD};
use serde::Serialize;
use tracing::debug;

/// Section → ordered lines of one document. All four sections are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sections {
    lines: BTreeMap<Section, Vec<String>>,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            lines: Section::ALL.iter().map(|s| (*s, Vec::new())).collect(),
        }
    }
}

impl Sections {
    pub fn get(&self, section: Section) -> &[String] {
        self.lines.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    fn push(&mut self, section: Section, line: String) {
        self.lines.entry(section).or_default().push(line);
    }

    /// Sections with their lines, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Section, &[String])> + '_ {
        Section::ALL.iter().map(move |s| (*s, self.get(*s)))
    }

    pub fn total_lines(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }
}

/// Splits raw text into sections using a heading catalog.
pub struct Segmenter<'a> {
    catalog: &'a HeadingCatalog,
    threshold: u8,
    lead_in: bool,
}

impl<'a> Segmenter<'a> {
    /// Segmenter with the default threshold and lead-in detection on.
    pub fn new(catalog: &'a HeadingCatalog) -> Self {
        Self {
            catalog,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            lead_in: true,
        }
    }

    pub fn from_config(catalog: &'a HeadingCatalog, config: &SummaryConfig) -> Self {
        Self {
            catalog,
            threshold: config.similarity_threshold,
            lead_in: config.lead_in_headings,
        }
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_lead_in(mut self, lead_in: bool) -> Self {
        self.lead_in = lead_in;
        self
    }

    pub fn segment(&self, text: &str) -> Sections {
        let mut sections = Sections::default();
        let mut current = Section::Title;

        // `str::lines` leaves a lone '\r' inside the line
        for raw in text.split(['\n', '\r']) {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(section) = self.catalog.classify(line, self.threshold, self.lead_in) {
                if section != current {
                    debug!("Section {} -> {} at '{}'", current, section, line);
                }
                current = section;
            }

            sections.push(current, line.to_string());
        }

        debug!(
            "Segmented {} lines: title={}, facts={}, issues={}, rulings={}",
            sections.total_lines(),
            sections.get(Section::Title).len(),
            sections.get(Section::Facts).len(),
            sections.get(Section::Issues).len(),
            sections.get(Section::Rulings).len(),
        );

        sections
    }
}

/// Segment with the built-in catalog and default settings.
pub fn segment(text: &str, catalog: &HeadingCatalog) -> Sections {
    Segmenter::new(catalog).segment(text)
}
