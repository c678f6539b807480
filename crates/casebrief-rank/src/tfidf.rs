//! Sentence × term TF-IDF matrix, each sentence treated as a document.

use std::collections::BTreeMap;

use ndarray::Array2;
use once_cell::sync::Lazy;
use regex::Regex;

use casebrief_ingest::stem;
use casebrief_ingest::stopwords::is_vectorizer_stopword;

/// Two or more word characters.
static TERM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("term pattern is valid"));

/// Weighted term matrix plus its vocabulary (column order).
#[derive(Debug, Clone)]
pub struct TermMatrix {
    pub matrix: Array2<f64>,
    pub vocabulary: Vec<String>,
}

impl TermMatrix {
    pub fn n_sentences(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Lower-cased, stop-word-filtered (and optionally stemmed) terms of a sentence.
pub fn analyze(sentence: &str, stem_terms: bool) -> Vec<String> {
    let lower = sentence.to_lowercase();
    TERM_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !is_vectorizer_stopword(t))
        .map(|t| if stem_terms { stem(t) } else { t.to_string() })
        .collect()
}

/// Build the TF-IDF matrix.
///
/// Weights are raw counts × smoothed idf `ln((1 + n) / (1 + df)) + 1`, and
/// every non-zero row is scaled to unit L2 norm. Vocabulary is sorted, so the
/// same sentences always produce the same columns.
pub fn build_term_matrix(sentences: &[String], stem_terms: bool) -> TermMatrix {
    let analyzed: Vec<Vec<String>> = sentences.iter().map(|s| analyze(s, stem_terms)).collect();

    let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
    for terms in &analyzed {
        let mut seen: Vec<&str> = terms.iter().map(String::as_str).collect();
        seen.sort_unstable();
        seen.dedup();
        for t in seen {
            *doc_freq.entry(t).or_insert(0) += 1;
        }
    }

    let vocabulary: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();
    let column: BTreeMap<&str, usize> = vocabulary
        .iter()
        .enumerate()
        .map(|(i, t)| (t.as_str(), i))
        .collect();

    let n = sentences.len() as f64;
    let idf: Vec<f64> = vocabulary
        .iter()
        .map(|t| ((1.0 + n) / (1.0 + doc_freq[t.as_str()] as f64)).ln() + 1.0)
        .collect();

    let mut matrix = Array2::<f64>::zeros((sentences.len(), vocabulary.len()));
    for (row, terms) in analyzed.iter().enumerate() {
        for t in terms {
            matrix[[row, column[t.as_str()]]] += 1.0;
        }
        let mut norm = 0.0;
        for (col, w) in idf.iter().enumerate() {
            matrix[[row, col]] *= w;
            norm += matrix[[row, col]] * matrix[[row, col]];
        }
        if norm > 0.0 {
            let norm = norm.sqrt();
            matrix.row_mut(row).mapv_inplace(|v| v / norm);
        }
    }

    TermMatrix { matrix, vocabulary }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_analyze() {
        assert_eq!(
            analyze("The accused was convicted of murder.", true),
            vec!["accus", "convict", "murd"]
        );
        assert_eq!(
            analyze("The accused was convicted of murder.", false),
            vec!["accused", "convicted", "murder"]
        );
        // Single characters never become terms
        assert!(analyze("a b c", false).is_empty());
    }

    #[test]
    fn test_matrix_shape_and_norms() {
        let tm = build_term_matrix(
            &strings(&["Petition denied.", "Petition granted.", "Appeal dismissed outright."]),
            false,
        );
        assert_eq!(tm.n_sentences(), 3);
        assert_eq!(
            tm.vocabulary,
            vec!["appeal", "denied", "dismissed", "granted", "outright", "petition"]
        );
        for row in tm.matrix.rows() {
            let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rare_terms_weigh_more() {
        let tm = build_term_matrix(&strings(&["Petition denied.", "Petition granted."]), false);
        let petition = tm.vocabulary.iter().position(|t| t == "petition").unwrap();
        let denied = tm.vocabulary.iter().position(|t| t == "denied").unwrap();
        assert!(tm.matrix[[0, denied]] > tm.matrix[[0, petition]]);
    }

    #[test]
    fn test_all_stopwords_gives_zero_row() {
        let tm = build_term_matrix(&strings(&["It is what it is.", "Petition denied."]), false);
        assert!(tm.matrix.row(0).iter().all(|v| *v == 0.0));
    }
}
