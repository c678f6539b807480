//! ROUGE-1: clipped unigram overlap between a reference and a candidate.

use std::collections::HashMap;

use casebrief_ingest::stem;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static ALNUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+").expect("token pattern is valid"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RougeScore {
    pub recall: f64,
    pub precision: f64,
    pub f1: f64,
}

impl RougeScore {
    /// Arithmetic mean of each field. `None` for an empty slice.
    pub fn mean(scores: &[RougeScore]) -> Option<RougeScore> {
        if scores.is_empty() {
            return None;
        }
        let n = scores.len() as f64;
        Some(RougeScore {
            recall: scores.iter().map(|s| s.recall).sum::<f64>() / n,
            precision: scores.iter().map(|s| s.precision).sum::<f64>() / n,
            f1: scores.iter().map(|s| s.f1).sum::<f64>() / n,
        })
    }
}

/// Lower-cased alphanumeric runs, stemmed.
pub fn rouge_tokens(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    ALNUM_RE.find_iter(&lower).map(|m| stem(m.as_str())).collect()
}

fn counts(tokens: &[String]) -> HashMap<&str, usize> {
    let mut map = HashMap::new();
    for t in tokens {
        *map.entry(t.as_str()).or_insert(0) += 1;
    }
    map
}

/// Score `candidate` against `reference`. Empty sides score zero.
pub fn rouge1(reference: &str, candidate: &str) -> RougeScore {
    let ref_tokens = rouge_tokens(reference);
    let cand_tokens = rouge_tokens(candidate);
    if ref_tokens.is_empty() || cand_tokens.is_empty() {
        return RougeScore::default();
    }

    let ref_counts = counts(&ref_tokens);
    let cand_counts = counts(&cand_tokens);
    let overlap: usize = ref_counts
        .iter()
        .map(|(t, n)| (*n).min(cand_counts.get(t).copied().unwrap_or(0)))
        .sum();

    let recall = overlap as f64 / ref_tokens.len() as f64;
    let precision = overlap as f64 / cand_tokens.len() as f64;
    let f1 = if recall > 0.0 && precision > 0.0 {
        2.0 * recall * precision / (recall + precision)
    } else {
        0.0
    };
    RougeScore { recall, precision, f1 }
}
