//! Bounded textual similarity between a food name and a query.
//!
//! This is a ranking heuristic, not a metric: the fast paths collapse very
//! different pairs onto the same score, and callers must not treat
//! `1.0 - similarity` as a distance.

/// Score for an exact (case-insensitive) match.
pub const EXACT_MATCH: f64 = 1.0;
/// Score when one string is a prefix of the other.
pub const PREFIX_MATCH: f64 = 0.9;
/// Score when one string contains the other.
pub const SUBSTRING_MATCH: f64 = 0.8;

/// Calculate Levenshtein edit distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    // Use two rows for space optimization
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity of `candidate` to `query` in `[0, 1]`.
///
/// Case-insensitive; the first matching rule wins:
/// exact (1.0), prefix either way (0.9), substring either way (0.8), else
/// `1 - levenshtein / max(len)` measured in chars. Two empty strings are an
/// exact match.
#[must_use]
pub fn similarity(candidate: &str, query: &str) -> f64 {
    similarity_lowercase(&candidate.to_lowercase(), &query.to_lowercase())
}

/// [`similarity`] for inputs the caller has already lowercased.
#[must_use]
pub fn similarity_lowercase(a: &str, b: &str) -> f64 {
    if a == b {
        return EXACT_MATCH;
    }

    if a.starts_with(b) || b.starts_with(a) {
        return PREFIX_MATCH;
    }

    if a.contains(b) || b.contains(a) {
        return SUBSTRING_MATCH;
    }

    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let ratio = levenshtein_distance(a, b) as f64 / longest as f64;
    1.0 - ratio
}
