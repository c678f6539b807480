//! Section text cleaning: sentences → word tokens → stop words removed.
//!
//! The output feeds inspection artifacts and downstream analysis. Ranking
//! works on the raw section lines and does its own tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

use casebrief_core::Section;

use crate::segment::Sections;
use crate::sentences::split_sentences;
use crate::stopwords::is_cleaning_stopword;

/// Words (with inner apostrophes or hyphens) or single punctuation marks.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+(?:['\u{2019}-]\w+)*|[^\w\s]").expect("token pattern is valid")
});

/// Split a sentence into word and punctuation tokens.
pub fn tokenize(sentence: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(sentence).map(|m| m.as_str()).collect()
}

/// Clean one section's lines into stop-word-free token sentences.
///
/// Sentences left empty after filtering are dropped; order is preserved.
pub fn clean(lines: &[String]) -> Vec<Vec<String>> {
    let mut cleaned = Vec::new();
    for line in lines {
        for sentence in split_sentences(line) {
            let tokens: Vec<String> = tokenize(sentence)
                .into_iter()
                .filter(|t| !is_cleaning_stopword(&t.to_lowercase()))
                .map(str::to_string)
                .collect();
            if !tokens.is_empty() {
                cleaned.push(tokens);
            }
        }
    }
    cleaned
}

/// Clean every section except `title`, which is kept verbatim elsewhere.
pub fn clean_sections(sections: &Sections) -> Vec<(Section, Vec<Vec<String>>)> {
    sections
        .iter()
        .filter(|(section, _)| *section != Section::Title)
        .map(|(section, lines)| (section, clean(lines)))
        .collect()
}
