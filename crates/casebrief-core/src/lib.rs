//! casebrief core: sections, heading catalog, fuzzy similarity, configuration.

pub mod config;
pub mod error;
pub mod headings;
pub mod similarity;

pub use config::{
    validate_fraction, SummaryConfig, DEFAULT_NUM_TOPICS, DEFAULT_SIMILARITY_THRESHOLD,
};
pub use error::{Error, Result};
pub use headings::{matching_phrase, HeadingCatalog, HeadingSet, Section};
pub use similarity::{heading_similarity, ratio};
