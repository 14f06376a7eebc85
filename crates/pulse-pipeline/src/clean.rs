//! Free-text cleaning, cleaned-row assembly, and empty-row filtering.

use std::sync::LazyLock;

use pulse_core::{CleanedPost, RawPost};
use regex::Regex;

use crate::error::PipelineError;
use crate::impute::impute_impressions;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)http\S+").expect("valid url regex"));
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("valid mention regex"));
static NON_ASCII_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\x00-\x7F]+").expect("valid non-ascii regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Normalize post text for lexical features.
///
/// Absent text becomes the empty string. URLs, `@mentions` and `#` symbols are
/// removed (the hashtag word stays), non-ASCII runs become a space, whitespace
/// is collapsed and trimmed, and the result is lowercased.
#[must_use]
pub fn clean_text(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    // Deleting a `#` or a mention can splice a new URL together (`ht#tp://`),
    // so passes repeat until the text is stable.
    let mut current = clean_pass(text);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(text: &str) -> String {
    let s = URL_RE.replace_all(text, "");
    let s = MENTION_RE.replace_all(&s, "");
    let s = s.replace('#', "");
    let s = NON_ASCII_RE.replace_all(&s, " ");
    let s = WHITESPACE_RE.replace_all(&s, " ");
    s.trim().to_ascii_lowercase()
}

/// Clean the text and impute the impressions of every post, preserving row
/// order. The raw text is kept next to its cleaned form.
///
/// # Errors
///
/// Returns [`PipelineError::NoObservedImpressions`] if a post lacks
/// impressions and nothing was observed to impute from.
pub fn clean_posts(posts: &[RawPost]) -> Result<Vec<CleanedPost>, PipelineError> {
    let impressions = impute_impressions(posts)?;
    let cleaned: Vec<CleanedPost> = posts
        .iter()
        .zip(impressions)
        .map(|(post, impressions)| CleanedPost {
            post_id: post.post_id.clone(),
            timestamp: post.timestamp,
            category: post.category,
            text: post.text.clone(),
            text_clean: clean_text(post.text.as_deref()),
            impressions,
            likes: post.likes,
            retweets: post.retweets,
            replies: post.replies,
            followers_at_post: post.followers_at_post,
            language: post.language.clone(),
        })
        .collect();
    tracing::info!(rows = cleaned.len(), "cleaned posts");
    Ok(cleaned)
}

/// Rows surviving the empty-text filter, with before/after counts.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub kept: Vec<CleanedPost>,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl FilterOutcome {
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Drop every post whose cleaned text is empty.
#[must_use]
pub fn drop_empty_text(posts: &[CleanedPost]) -> FilterOutcome {
    let kept: Vec<CleanedPost> = posts
        .iter()
        .filter(|p| !p.text_clean.is_empty())
        .cloned()
        .collect();
    FilterOutcome {
        rows_before: posts.len(),
        rows_after: kept.len(),
        kept,
    }
}
