//! Extractive sentence ranking and selection for one section.

use casebrief_core::{
    matching_phrase, validate_fraction, Error, Result, SummaryConfig, DEFAULT_NUM_TOPICS,
    DEFAULT_SIMILARITY_THRESHOLD,
};
use tracing::debug;

use crate::lsa::project;
use crate::tfidf::build_term_matrix;

/// Ranks a section's sentences by latent-topic weight and keeps the top fraction.
///
/// Holds only parameters; every call builds a fresh term matrix and SVD for
/// the sentences it is given.
#[derive(Debug, Clone)]
pub struct ExtractiveRanker {
    pub num_topics: usize,
    pub similarity_threshold: u8,
    pub preserve_document_order: bool,
    pub stem_terms: bool,
}

impl Default for ExtractiveRanker {
    fn default() -> Self {
        Self {
            num_topics: DEFAULT_NUM_TOPICS,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            preserve_document_order: false,
            stem_terms: true,
        }
    }
}

impl ExtractiveRanker {
    pub fn from_config(config: &SummaryConfig) -> Self {
        Self {
            num_topics: config.num_topics,
            similarity_threshold: config.similarity_threshold,
            preserve_document_order: config.preserve_document_order,
            stem_terms: config.stem_terms,
        }
    }

    /// Sentence indices from most to least important. Ties keep document order.
    pub fn rank(&self, sentences: &[String]) -> Result<Vec<usize>> {
        if sentences.is_empty() {
            return Err(Error::InsufficientData("no sentences to rank".into()));
        }
        if self.num_topics == 0 {
            return Err(Error::Config("num_topics must be at least 1".into()));
        }

        let term_matrix = build_term_matrix(sentences, self.stem_terms);
        let topics = project(&term_matrix.matrix, self.num_topics)?;
        let scores = topics.scores();

        let mut ranked: Vec<usize> = (0..sentences.len()).collect();
        // Stable: equal scores stay in document order
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        debug!(
            "Ranked {} sentences over {} terms, {} topics",
            sentences.len(),
            term_matrix.n_terms(),
            topics.singular_values.len()
        );

        Ok(ranked)
    }

    /// Rank, keep `max(1, floor(n * keep_fraction))` sentences, drop heading echoes.
    ///
    /// Output is in rank order unless `preserve_document_order` is set. A
    /// `keep_fraction` outside (0, 1] is rejected.
    pub fn rank_and_select(
        &self,
        sentences: &[String],
        keep_fraction: f64,
        excluded_headings: &[String],
    ) -> Result<Vec<String>> {
        let keep_fraction = validate_fraction(keep_fraction)?;
        let ranked = self.rank(sentences)?;

        let count = selection_count(sentences.len(), keep_fraction);
        let mut selected: Vec<usize> = ranked
            .into_iter()
            .take(count)
            .filter(|&idx| {
                match matching_phrase(&sentences[idx], excluded_headings, self.similarity_threshold) {
                    Some(phrase) => {
                        debug!("Excluding heading echo '{}' (~'{}')", sentences[idx], phrase);
                        false
                    }
                    None => true,
                }
            })
            .collect();

        if self.preserve_document_order {
            selected.sort_unstable();
        }

        Ok(selected.into_iter().map(|idx| sentences[idx].clone()).collect())
    }
}

/// `max(1, floor(n * fraction))`, never more than `n`.
pub fn selection_count(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction).floor() as usize).clamp(1, n.max(1))
}
