//! Fuzzy title matching.
//!
//! Local tags and Last.fm names rarely agree byte-for-byte ("Song (Remastered)",
//! different casing, stray punctuation), so membership checks go through here.

use strsim::normalized_levenshtein;

/// Similarity above which two names are treated as the same.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Case-insensitive normalized Levenshtein similarity, 0.0 ..= 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

pub fn is_similar(a: &str, b: &str) -> bool {
    similarity(a, b) > SIMILARITY_THRESHOLD
}

/// True if `name` is similar to any of `candidates`.
pub fn any_similar<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> bool {
    candidates.into_iter().any(|c| is_similar(name, c))
}
