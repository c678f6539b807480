//! Sentence boundary detection for case text.
//!
//! A boundary is a `.`, `!` or `?` (optionally followed by closing quotes or
//! brackets) that is followed by whitespace. Periods ending a known legal or
//! honorific abbreviation, or a single-letter initial, are not boundaries.

use once_cell::sync::Lazy;
use std::collections::HashSet;

static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "atty", "hon", "sr", "jr", "st", "no", "nos", "vs", "v", "art",
        "arts", "sec", "secs", "par", "para", "p", "pp", "inc", "co", "corp", "ltd", "etc",
        "e.g", "i.e", "g.r", "r.a", "p.d", "b.p", "c.a", "j", "jj", "gen", "col", "capt", "lt",
        "sgt", "po", "spo", "ca", "rtc", "mtc", "vol", "rep", "sen", "phil", "rev", "approx",
    ]
    .into_iter()
    .collect()
});

/// Split a line or paragraph into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let chars: Vec<(usize, char)> = text.char_indices().collect();

    let mut i = 0;
    while i < chars.len() {
        let (_, c) = chars[i];
        if matches!(c, '.' | '!' | '?') {
            // Absorb trailing closers: ." ?) .'
            let mut end = i;
            while end + 1 < chars.len() && matches!(chars[end + 1].1, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}') {
                end += 1;
            }
            let followed_by_space = end + 1 < chars.len() && chars[end + 1].1.is_whitespace();
            if followed_by_space && !(c == '.' && ends_with_abbreviation(&text[start..chars[i].0])) {
                let cut = chars[end].0 + chars[end].1.len_utf8();
                let s = text[start..cut].trim();
                if !s.is_empty() {
                    sentences.push(s);
                }
                start = cut;
            }
            i = end;
        }
        i += 1;
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// Whether the text before a period ends with an abbreviation or initial.
fn ends_with_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(|c: char| c.is_whitespace() || c == '(' || c == '"')
        .next()
        .unwrap_or("");
    if word.is_empty() {
        return false;
    }
    let lower = word.to_lowercase();
    if ABBREVIATIONS.contains(lower.as_str()) {
        return true;
    }
    // Single capital initial: "J. Cruz"
    let mut it = word.chars();
    matches!((it.next(), it.next()), (Some(c), None) if c.is_uppercase())
}
