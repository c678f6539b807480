//! Suffix-stripping stemmer for English terms.
//!
//! Used by the ranker's vectorizer and by ROUGE scoring so that "convicted",
//! "convicting" and "convicts" fall on one vocabulary term. Rules are tried in
//! table order; the first suffix that leaves at least two characters wins.

/// (suffix, replacement), longer and more specific suffixes first.
const SUFFIX_RULES: &[(&str, &str)] = &[
    // -ing, doubled consonants first
    ("pping", "p"),
    ("tting", "t"),
    ("nning", "n"),
    ("mming", "m"),
    ("dding", "d"),
    ("gging", "g"),
    ("ying", "y"),
    ("eing", "e"),
    ("uing", "ue"),
    ("ing", ""),
    // -ed
    ("pped", "p"),
    ("tted", "t"),
    ("nned", "n"),
    ("mmed", "m"),
    ("dded", "d"),
    ("gged", "g"),
    ("ied", "y"),
    ("eed", "ee"),
    ("ued", "ue"),
    ("ved", "ve"),
    ("ed", ""),
    // plural / third person
    ("ies", "y"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("sses", "ss"),
    ("oes", "o"),
    ("es", "e"),
    ("ss", "ss"),
    ("us", "us"),
    ("is", "is"),
    ("s", ""),
    // nominal and adjectival endings
    ("ation", ""),
    ("ition", ""),
    ("ution", ""),
    ("tion", ""),
    ("sion", ""),
    ("ment", ""),
    ("iness", "y"),
    ("ness", ""),
    ("ily", "y"),
    ("ally", "al"),
    ("ly", ""),
    ("ful", ""),
    ("less", ""),
    ("able", ""),
    ("ible", ""),
    ("ity", ""),
    ("ive", ""),
    ("ious", ""),
    ("ous", ""),
    ("ical", "ic"),
    ("al", ""),
    ("er", ""),
    ("or", ""),
];

/// Stem a lower-case word. Words of three chars or fewer are returned as is.
pub fn stem(word: &str) -> String {
    if word.chars().count() <= 3 {
        return word.to_string();
    }

    for &(suffix, replacement) in SUFFIX_RULES {
        if let Some(base) = word.strip_suffix(suffix) {
            if base.chars().count() >= 2 {
                return format!("{}{}", base, replacement);
            }
        }
    }

    word.to_string()
}
