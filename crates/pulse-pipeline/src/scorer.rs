//! Lexicon scorer for short social posts.

/// Words counted as positive signals.
///
/// Matching is substring containment on the lowercased text, so `"top"`
/// also fires inside `"stop"` and each word counts at most once.
pub(crate) const POSITIVE: &[&str] = &[
    "top", "best", "works", "insane", "love", "❤️", "good", "great", "tips", "hidden",
];

/// Words counted as negative signals.
pub(crate) const NEGATIVE: &[&str] = &[
    "bad",
    "worse",
    "worst",
    "hate",
    "problem",
    "issue",
    "slow",
    "delay",
    "complaint",
];

/// Score a text as `positive hits - negative hits`.
///
/// Returns `0` for empty text.
#[must_use]
pub fn lexicon_score(text: &str) -> i32 {
    if text.is_empty() {
        return 0;
    }
    let lowered = text.to_lowercase();
    let hits = |lexicon: &[&str]| {
        let count = lexicon.iter().filter(|w| lowered.contains(**w)).count();
        i32::try_from(count).unwrap_or(i32::MAX)
    };
    hits(POSITIVE) - hits(NEGATIVE)
}
