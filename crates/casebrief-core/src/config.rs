//! Summarization configuration: topic count, per-section fractions, match threshold.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::headings::{HeadingCatalog, Section};

pub const DEFAULT_NUM_TOPICS: usize = 4;
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 75;

pub const DEFAULT_FACTS_FRACTION: f64 = 0.50;
pub const DEFAULT_ISSUES_FRACTION: f64 = 0.05;
pub const DEFAULT_RULINGS_FRACTION: f64 = 0.45;

/// Stored summarization configuration (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Latent topic count for the SVD projection.
    #[serde(default = "default_num_topics")]
    pub num_topics: usize,
    /// Fraction of ranked sentences kept per section. `title` is always 1.0.
    #[serde(default = "default_section_percentages")]
    pub section_percentages: BTreeMap<Section, f64>,
    /// Fuzzy-match cutoff (0–100) for heading detection and heading-echo exclusion.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: u8,
    /// Emit selected sentences in reading order instead of rank order.
    #[serde(default)]
    pub preserve_document_order: bool,
    /// Treat lines opening with a multi-word heading phrase as headings.
    #[serde(default = "default_true")]
    pub lead_in_headings: bool,
    /// Stem vocabulary terms before TF-IDF weighting.
    #[serde(default = "default_true")]
    pub stem_terms: bool,
    /// Optional JSON heading catalog replacing the built-in one.
    #[serde(default)]
    pub headings_file: Option<PathBuf>,
}

fn default_num_topics() -> usize {
    DEFAULT_NUM_TOPICS
}
fn default_similarity_threshold() -> u8 {
    DEFAULT_SIMILARITY_THRESHOLD
}
fn default_true() -> bool {
    true
}
fn default_section_percentages() -> BTreeMap<Section, f64> {
    BTreeMap::from([
        (Section::Title, 1.0),
        (Section::Facts, DEFAULT_FACTS_FRACTION),
        (Section::Issues, DEFAULT_ISSUES_FRACTION),
        (Section::Rulings, DEFAULT_RULINGS_FRACTION),
    ])
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            num_topics: DEFAULT_NUM_TOPICS,
            section_percentages: default_section_percentages(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            preserve_document_order: false,
            lead_in_headings: true,
            stem_terms: true,
            headings_file: None,
        }
    }
}

impl SummaryConfig {
    /// Load config from an optional file, then apply env overrides and validate.
    ///
    /// Unlike missing optional settings, a named file that does not exist is an error.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::NotFound(path.display().to_string()));
                }
                let content = std::fs::read_to_string(path)?;
                let config: SummaryConfig = serde_json::from_str(&content)?;
                info!("Loaded summary config from {}", path.display());
                config
            }
            None => Self::default(),
        };

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Env vars override file values.
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(v) = std::env::var("CASEBRIEF_NUM_TOPICS") {
            self.num_topics = v
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("CASEBRIEF_NUM_TOPICS is not an integer: {}", v)))?;
        }
        if let Ok(v) = std::env::var("CASEBRIEF_SIMILARITY_THRESHOLD") {
            self.similarity_threshold = v.trim().parse().map_err(|_| {
                Error::Config(format!("CASEBRIEF_SIMILARITY_THRESHOLD is not in 0-100: {}", v))
            })?;
        }
        if let Ok(v) = std::env::var("CASEBRIEF_PRESERVE_ORDER") {
            self.preserve_document_order = parse_flag(&v).ok_or_else(|| {
                Error::Config(format!("CASEBRIEF_PRESERVE_ORDER is not a boolean: {}", v))
            })?;
        }
        Ok(())
    }

    /// Reject out-of-range policy parameters.
    pub fn validate(&self) -> Result<()> {
        if self.num_topics == 0 {
            return Err(Error::Config("num_topics must be at least 1".into()));
        }
        if self.similarity_threshold > 100 {
            return Err(Error::Config(format!(
                "similarity_threshold must be in 0-100, got {}",
                self.similarity_threshold
            )));
        }
        for (section, fraction) in &self.section_percentages {
            validate_fraction(*fraction).map_err(|_| {
                Error::Config(format!(
                    "percentage for section '{}' must be in (0, 1], got {}",
                    section, fraction
                ))
            })?;
        }
        Ok(())
    }

    /// Fraction of ranked sentences to keep for a section.
    pub fn keep_fraction(&self, section: Section) -> f64 {
        match section {
            Section::Title => 1.0,
            _ => self
                .section_percentages
                .get(&section)
                .copied()
                .or_else(|| default_section_percentages().get(&section).copied())
                .unwrap_or(1.0),
        }
    }

    /// Resolve the heading catalog: the configured file, or the built-in one.
    pub fn heading_catalog(&self) -> Result<HeadingCatalog> {
        match &self.headings_file {
            Some(path) => HeadingCatalog::load(path),
            None => Ok(HeadingCatalog::default()),
        }
    }
}

/// Case-insensitive boolean flag: 1/true/yes/on or 0/false/no/off.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// A keep fraction must be finite and in (0, 1].
pub fn validate_fraction(fraction: f64) -> Result<f64> {
    if fraction.is_finite() && fraction > 0.0 && fraction <= 1.0 {
        Ok(fraction)
    } else {
        Err(Error::Config(format!("keep fraction must be in (0, 1], got {}", fraction)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SummaryConfig::default();
        assert_eq!(config.num_topics, 4);
        assert_eq!(config.similarity_threshold, 75);
        assert!(!config.preserve_document_order);
        assert_eq!(config.keep_fraction(Section::Title), 1.0);
        assert_eq!(config.keep_fraction(Section::Facts), 0.50);
        assert_eq!(config.keep_fraction(Section::Issues), 0.05);
        assert_eq!(config.keep_fraction(Section::Rulings), 0.45);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_title_fraction_is_fixed() {
        let mut config = SummaryConfig::default();
        config.section_percentages.insert(Section::Title, 0.2);
        assert_eq!(config.keep_fraction(Section::Title), 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SummaryConfig =
            serde_json::from_str(r#"{"num_topics": 2, "section_percentages": {"facts": 0.3}}"#)
                .unwrap();
        assert_eq!(config.num_topics, 2);
        assert_eq!(config.keep_fraction(Section::Facts), 0.3);
        // Sections missing from the map fall back to their defaults
        assert_eq!(config.keep_fraction(Section::Rulings), 0.45);
        assert!(config.lead_in_headings);
        assert!(config.stem_terms);
    }

    #[test]
    fn test_invalid_values_fail_fast() {
        let mut config = SummaryConfig::default();
        config.num_topics = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = SummaryConfig::default();
        config.similarity_threshold = 101;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        for bad in [0.0, -0.5, 1.5, f64::NAN] {
            let mut config = SummaryConfig::default();
            config.section_percentages.insert(Section::Facts, bad);
            assert!(matches!(config.validate(), Err(Error::Config(_))), "{} accepted", bad);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SummaryConfig::load(Some(&dir.path().join("absent.json")));
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_load_rejects_bad_fraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"section_percentages": {"issues": 2.0}}"#).unwrap();
        assert!(matches!(SummaryConfig::load(Some(&path)), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_flag() {
        for yes in ["1", "true", "TRUE", "Yes", " on "] {
            assert_eq!(parse_flag(yes), Some(true), "{}", yes);
        }
        for no in ["0", "false", "False", "NO", "off"] {
            assert_eq!(parse_flag(no), Some(false), "{}", no);
        }
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }
}
