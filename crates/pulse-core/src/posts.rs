use std::num::NonZeroU64;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::Category;

/// A synthetic post as generated, before any cleaning.
///
/// `text` and `impressions` may be absent; the cleaner is responsible for
/// resolving both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    /// Unique identifier, e.g. `"post_17"`.
    pub post_id: String,
    pub timestamp: NaiveDateTime,
    pub category: Category,
    pub text: Option<String>,
    pub impressions: Option<u64>,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    /// Follower count of the author at the time of posting.
    pub followers_at_post: u64,
    /// Two-letter language code.
    pub language: String,
}

/// A post after text cleaning and impression imputation.
///
/// The original `text` is retained because hashtag and mention counts are
/// taken from it, not from `text_clean`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedPost {
    pub post_id: String,
    pub timestamp: NaiveDateTime,
    pub category: Category,
    pub text: Option<String>,
    /// Lowercase, ASCII-only, URL/mention/hash free, whitespace-normalized.
    pub text_clean: String,
    pub impressions: NonZeroU64,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub followers_at_post: u64,
    pub language: String,
}

/// A cleaned post with its per-row derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPost {
    pub post: CleanedPost,
    /// `likes + retweets + replies`.
    pub engagement: u64,
    /// `engagement / impressions`.
    pub engagement_rate: f64,
    /// Character count of `text_clean`.
    pub text_length: usize,
    pub word_count: usize,
    /// `#` count in the original text.
    pub hashtags_count: usize,
    /// `@` count in the original text.
    pub mentions_count: usize,
    pub sentiment_score: i32,
    pub date: NaiveDate,
}

/// Per-category aggregate over enriched posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    pub posts_count: usize,
    pub avg_impressions: f64,
    pub median_impressions: f64,
    pub avg_engagement: f64,
    pub avg_engagement_rate: f64,
    pub median_engagement_rate: f64,
    pub avg_word_count: f64,
    pub avg_sentiment: f64,
}

/// Projection of an [`EnrichedPost`] used for the per-category ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPost {
    pub category: Category,
    pub post_id: String,
    pub date: NaiveDate,
    pub text_clean: String,
    pub impressions: u64,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub engagement: u64,
    pub engagement_rate: f64,
}

impl From<&EnrichedPost> for TopPost {
    fn from(p: &EnrichedPost) -> Self {
        Self {
            category: p.post.category,
            post_id: p.post.post_id.clone(),
            date: p.date,
            text_clean: p.post.text_clean.clone(),
            impressions: p.post.impressions.get(),
            likes: p.post.likes,
            retweets: p.post.retweets,
            replies: p.post.replies,
            engagement: p.engagement,
            engagement_rate: p.engagement_rate,
        }
    }
}
