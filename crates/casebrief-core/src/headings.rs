//! Section names and the heading catalog used to detect section boundaries.
//!
//! The catalog is the single registry of heading phrases. The segmenter uses
//! it to switch sections and the ranker uses it to drop heading echoes, so
//! both always agree on what a heading looks like.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::similarity::heading_similarity;

/// A semantic zone of a court decision.
///
/// Declaration order is the default catalog check order and the order of
/// blocks in the summary artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Title,
    Facts,
    Issues,
    Rulings,
}

impl Section {
    pub const ALL: [Section; 4] = [Self::Title, Self::Facts, Self::Issues, Self::Rulings];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Facts => "facts",
            Self::Issues => "issues",
            Self::Rulings => "rulings",
        }
    }

    /// Name as printed in artifact banners.
    pub fn banner_name(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "facts" => Ok(Self::Facts),
            "issues" => Ok(Self::Issues),
            "rulings" => Ok(Self::Rulings),
            other => Err(Error::Config(format!("unknown section '{}'", other))),
        }
    }
}

/// Heading phrases that open one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingSet {
    pub section: Section,
    pub phrases: Vec<String>,
}

impl HeadingSet {
    fn new(section: Section, phrases: &[&str]) -> Self {
        Self {
            section,
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Ordered registry of heading sets. Set order is the classification
/// tie-break: the first set with a matching phrase wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingCatalog {
    sets: Vec<HeadingSet>,
}

const TITLE_HEADINGS: &[&str] = &["decision", "en banc", "resolution"];

const FACTS_HEADINGS: &[&str] = &[
    "facts",
    "antecedents",
    "the antecedents",
    "the factual antecedents",
    "evidence for the prosecution",
    "evidence for the defense",
    "ruling of the rtc",
    "ruling of the ca",
    "the ruling of the ca",
    "the charges",
    "the defense's version",
    "defense's version",
    "the prosecution's version",
    "proceedings before the court of appeals",
    "the facts",
    "version of the prosecution",
    "version of the defense",
    "the facts and the case",
];

const ISSUES_HEADINGS: &[&str] = &[
    "the issue",
    "the issues",
    "the issues presented",
    "the issue before the court",
    "the issues before the court",
    "issue",
    "issues",
    "the present",
    "petition",
    "presented",
];

const RULINGS_HEADINGS: &[&str] = &[
    "our ruling",
    "the ruling of the court",
    "the rulings of the court",
    "the ruling of this court",
    "proper penalty",
    "the court's ruling",
];

impl Default for HeadingCatalog {
    /// Built-in catalog for Philippine Supreme Court decisions.
    fn default() -> Self {
        Self {
            sets: vec![
                HeadingSet::new(Section::Title, TITLE_HEADINGS),
                HeadingSet::new(Section::Facts, FACTS_HEADINGS),
                HeadingSet::new(Section::Issues, ISSUES_HEADINGS),
                HeadingSet::new(Section::Rulings, RULINGS_HEADINGS),
            ],
        }
    }
}

impl HeadingCatalog {
    /// Build a catalog from explicit sets. Each section may appear at most once.
    pub fn new(sets: Vec<HeadingSet>) -> Result<Self> {
        let catalog = Self { sets };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON file (`{"sets": [{"section": .., "phrases": [..]}]}`).
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let catalog: HeadingCatalog = serde_json::from_str(&content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        for (i, set) in self.sets.iter().enumerate() {
            if self.sets[..i].iter().any(|s| s.section == set.section) {
                return Err(Error::Config(format!(
                    "section '{}' appears more than once in heading catalog",
                    set.section
                )));
            }
            if set.phrases.iter().any(|p| p.trim().is_empty()) {
                return Err(Error::Config(format!(
                    "empty heading phrase for section '{}'",
                    set.section
                )));
            }
        }
        Ok(())
    }

    pub fn sets(&self) -> &[HeadingSet] {
        &self.sets
    }

    /// Phrases registered for a section (empty if the catalog has none).
    pub fn phrases(&self, section: Section) -> &[String] {
        self.sets
            .iter()
            .find(|s| s.section == section)
            .map(|s| s.phrases.as_slice())
            .unwrap_or(&[])
    }

    /// Classify a trimmed line as a section heading.
    ///
    /// Returns the first set in catalog order holding a phrase whose
    /// similarity to `line` is at least `threshold`. When `lead_in` is set
    /// and no set clears the threshold, a multi-word phrase followed by a
    /// short introducer ("The facts are as follows.") also matches, again
    /// first set wins. Body sentences that merely open with a phrase
    /// ("The facts show that ...") do not.
    pub fn classify(&self, line: &str, threshold: u8, lead_in: bool) -> Option<Section> {
        for set in &self.sets {
            if let Some(phrase) = matching_phrase(line, &set.phrases, threshold) {
                debug!("Matched heading '{}' to '{}' ({})", line, phrase, set.section);
                return Some(set.section);
            }
        }

        if lead_in {
            let lower = line.to_lowercase();
            for set in &self.sets {
                if let Some(phrase) = set.phrases.iter().find(|p| opens_with_phrase(&lower, p)) {
                    debug!("Lead-in heading '{}' opens with '{}' ({})", line, phrase, set.section);
                    return Some(set.section);
                }
            }
        }

        None
    }
}

/// First phrase whose case-insensitive similarity to `line` reaches `threshold`.
pub fn matching_phrase<'a>(line: &str, phrases: &'a [String], threshold: u8) -> Option<&'a str> {
    phrases
        .iter()
        .find(|p| heading_similarity(line, p) >= threshold)
        .map(|p| p.as_str())
}

/// Words that may follow a lead-in phrase when the line introduces a section
/// rather than stating a fact.
const LEAD_IN_TAILS: &[&str] = &[
    "are as follows",
    "is as follows",
    "as follows",
    "are the following",
    "is the following",
    "follow",
    "of the case",
    "in this case",
    "are",
];

/// Whether a lower-cased line is a multi-word phrase followed only by a
/// short introducer ("the facts are as follows.") or a colon ("the issues:").
fn opens_with_phrase(line_lower: &str, phrase: &str) -> bool {
    let phrase = phrase.trim().to_lowercase();
    if phrase.split_whitespace().count() < 2 {
        return false;
    }
    let Some(rest) = line_lower.strip_prefix(phrase.as_str()) else {
        return false;
    };
    if rest.chars().next().is_some_and(|c| c.is_alphanumeric()) {
        return false;
    }

    let rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    if rest.starts_with(':') {
        return true;
    }
    let tail = rest.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ':' | ';'));
    let words: Vec<&str> = tail.split_whitespace().collect();
    words.is_empty() || LEAD_IN_TAILS.contains(&words.join(" ").as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order_and_names() {
        let names: Vec<&str> = Section::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["title", "facts", "issues", "rulings"]);
        assert_eq!(Section::Rulings.banner_name(), "RULINGS");
        assert_eq!("Facts".parse::<Section>().unwrap(), Section::Facts);
        assert!("appendix".parse::<Section>().is_err());
    }

    #[test]
    fn test_classify_exact_headings() {
        let catalog = HeadingCatalog::default();
        assert_eq!(catalog.classify("DECISION", 75, true), Some(Section::Title));
        assert_eq!(catalog.classify("The Antecedents", 75, true), Some(Section::Facts));
        assert_eq!(catalog.classify("ISSUES", 75, true), Some(Section::Issues));
        assert_eq!(catalog.classify("OUR RULING", 75, true), Some(Section::Rulings));
    }

    #[test]
    fn test_classify_fuzzy() {
        let catalog = HeadingCatalog::default();
        // Typo still clears the threshold
        assert_eq!(catalog.classify("Our Rulling", 75, false), Some(Section::Rulings));
        assert_eq!(catalog.classify("The accused pleaded guilty.", 75, true), None);
    }

    #[test]
    fn test_classify_catalog_order_wins() {
        // "issue ruling" is close to a phrase in both sets; the earlier set wins.
        let catalog = HeadingCatalog::new(vec![
            HeadingSet::new(Section::Issues, &["issue ruling"]),
            HeadingSet::new(Section::Rulings, &["issue ruling"]),
        ])
        .unwrap();
        assert_eq!(catalog.classify("Issue Ruling", 75, false), Some(Section::Issues));
    }

    #[test]
    fn test_lead_in() {
        let catalog = HeadingCatalog::default();
        assert_eq!(catalog.classify("The facts are as follows.", 75, true), Some(Section::Facts));
        assert_eq!(catalog.classify("The facts are as follows.", 75, false), None);
        // Single-word phrases never trigger a lead-in
        assert_eq!(catalog.classify("Petition for review was filed.", 75, true), None);
        // Phrase must end on a word boundary
        assert_eq!(catalog.classify("The factsheet was attached.", 75, true), None);
        assert_eq!(catalog.classify("The issues presented:", 75, true), Some(Section::Issues));
        assert_eq!(
            catalog.classify("The facts of the case:", 75, true),
            Some(Section::Facts)
        );
    }

    #[test]
    fn test_lead_in_ignores_body_sentences() {
        let catalog = HeadingCatalog::default();
        for line in [
            "The present appeal raises no new argument.",
            "The facts show that treachery attended the killing.",
            "The issue of prescription was raised in the answer.",
            "The charges against the accused were dismissed.",
            "The issues are moot and academic.",
        ] {
            assert_eq!(catalog.classify(line, 75, true), None, "{}", line);
        }
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let result = HeadingCatalog::new(vec![
            HeadingSet::new(Section::Facts, &["facts"]),
            HeadingSet::new(Section::Facts, &["the facts"]),
        ]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headings.json");
        std::fs::write(
            &path,
            r#"{"sets": [{"section": "rulings", "phrases": ["wherefore"]}]}"#,
        )
        .unwrap();
        let catalog = HeadingCatalog::load(&path).unwrap();
        assert_eq!(catalog.phrases(Section::Rulings), &["wherefore".to_string()]);
        assert!(catalog.phrases(Section::Facts).is_empty());

        let missing = HeadingCatalog::load(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }
}
