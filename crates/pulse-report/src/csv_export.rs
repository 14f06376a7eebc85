//! Flat CSV export of the enriched post table.

use std::path::Path;

use pulse_core::{Category, EnrichedPost};
use serde::Serialize;

use crate::error::ReportError;

/// Column names, in [`PostRecord`] field order.
pub const COLUMNS: [&str; 19] = [
    "post_id",
    "timestamp",
    "category",
    "text",
    "impressions",
    "likes",
    "retweets",
    "replies",
    "followers_at_post",
    "language",
    "text_clean",
    "engagement",
    "engagement_rate",
    "text_length",
    "word_count",
    "hashtags_count",
    "mentions_count",
    "sentiment_score",
    "date",
];

/// One CSV row: raw columns first, derived columns after.
#[derive(Debug, Serialize)]
struct PostRecord<'a> {
    post_id: &'a str,
    timestamp: String,
    category: Category,
    text: &'a str,
    impressions: u64,
    likes: u64,
    retweets: u64,
    replies: u64,
    followers_at_post: u64,
    language: &'a str,
    text_clean: &'a str,
    engagement: u64,
    engagement_rate: f64,
    text_length: usize,
    word_count: usize,
    hashtags_count: usize,
    mentions_count: usize,
    sentiment_score: i32,
    date: String,
}

impl<'a> From<&'a EnrichedPost> for PostRecord<'a> {
    fn from(p: &'a EnrichedPost) -> Self {
        Self {
            post_id: &p.post.post_id,
            timestamp: p.post.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            category: p.post.category,
            text: p.post.text.as_deref().unwrap_or(""),
            impressions: p.post.impressions.get(),
            likes: p.post.likes,
            retweets: p.post.retweets,
            replies: p.post.replies,
            followers_at_post: p.post.followers_at_post,
            language: &p.post.language,
            text_clean: &p.post.text_clean,
            engagement: p.engagement,
            engagement_rate: p.engagement_rate,
            text_length: p.text_length,
            word_count: p.word_count,
            hashtags_count: p.hashtags_count,
            mentions_count: p.mentions_count,
            sentiment_score: p.sentiment_score,
            date: p.date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Write one row per post, with a header, to `path`; overwrites any existing file.
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// Returns [`ReportError::Csv`] if the file cannot be created or written.
pub fn write_posts_csv(path: &Path, posts: &[EnrichedPost]) -> Result<usize, ReportError> {
    let csv_err = |source: csv::Error| ReportError::Csv {
        path: path.display().to_string(),
        source,
    };

    // Headers are written explicitly so an empty table still gets one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;
    writer.write_record(COLUMNS).map_err(csv_err)?;
    for post in posts {
        writer
            .serialize(PostRecord::from(post))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|e| csv_err(e.into()))?;

    tracing::info!(path = %path.display(), rows = posts.len(), "wrote posts CSV");
    Ok(posts.len())
}
