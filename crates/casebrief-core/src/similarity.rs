//! Fuzzy string similarity on a 0–100 scale.
//!
//! The score is the indel-distance ratio: `2 * LCS / (|a| + |b|)`, scaled to
//! 100 and rounded half-to-even. Lengths are counted in chars, not bytes.

/// Similarity of two strings, 0 (nothing shared) to 100 (identical).
///
/// Either string being empty yields 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let lcs = lcs_len(&a, &b);
    let numer = 200 * lcs;
    let denom = a.len() + b.len();

    let q = numer / denom;
    let r = numer % denom;
    let rounded = if 2 * r > denom || (2 * r == denom && q % 2 == 1) {
        q + 1
    } else {
        q
    };
    rounded.min(100) as u8
}

/// Case-insensitive similarity used for heading detection and exclusion.
pub fn heading_similarity(line: &str, phrase: &str) -> u8 {
    ratio(&line.to_lowercase(), &phrase.to_lowercase())
}

/// Longest common subsequence length, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
