//! Per-row derived metrics.

use pulse_core::{CleanedPost, EnrichedPost};

use crate::scorer::lexicon_score;

/// Derive engagement, lexical and sentiment features for one post.
#[must_use]
pub fn enrich_post(post: &CleanedPost) -> EnrichedPost {
    let engagement = post.likes + post.retweets + post.replies;
    #[allow(clippy::cast_precision_loss)]
    let engagement_rate = engagement as f64 / post.impressions.get() as f64;
    let original = post.text.as_deref().unwrap_or("");

    EnrichedPost {
        engagement,
        engagement_rate,
        text_length: post.text_clean.chars().count(),
        word_count: post.text_clean.split_whitespace().count(),
        hashtags_count: original.matches('#').count(),
        mentions_count: original.matches('@').count(),
        sentiment_score: lexicon_score(&post.text_clean),
        date: post.timestamp.date(),
        post: post.clone(),
    }
}

/// Derive features for every post, preserving row order.
#[must_use]
pub fn derive_features(posts: &[CleanedPost]) -> Vec<EnrichedPost> {
    let enriched: Vec<EnrichedPost> = posts.iter().map(enrich_post).collect();
    tracing::info!(rows = enriched.len(), "derived features");
    enriched
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use chrono::NaiveDate;
    use pulse_core::Category;

    use super::*;

    fn post(text: Option<&str>, text_clean: &str, impressions: u64) -> CleanedPost {
        CleanedPost {
            post_id: "post_1".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2025, 2, 14)
                .unwrap()
                .and_hms_opt(23, 0, 0)
                .unwrap(),
            category: Category::Beauty,
            text: text.map(str::to_string),
            text_clean: text_clean.to_string(),
            impressions: NonZeroU64::new(impressions).unwrap(),
            likes: 30,
            retweets: 5,
            replies: 5,
            followers_at_post: 2500,
            language: "en".to_string(),
        }
    }

    #[test]
    fn engagement_and_rate() {
        let enriched = enrich_post(&post(Some("x"), "x", 800));
        assert_eq!(enriched.engagement, 40);
        assert!((enriched.engagement_rate - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_come_from_original_text() {
        let enriched = enrich_post(&post(
            Some("Check this http://x.co @joe #great #great"),
            "check this great great",
            500,
        ));
        assert_eq!(enriched.hashtags_count, 2);
        assert_eq!(enriched.mentions_count, 1);
        assert_eq!(enriched.word_count, 4);
        assert_eq!(enriched.text_length, "check this great great".len());
        assert_eq!(enriched.sentiment_score, 1);
    }

    #[test]
    fn absent_text_counts_zero() {
        let enriched = enrich_post(&post(None, "", 500));
        assert_eq!(enriched.hashtags_count, 0);
        assert_eq!(enriched.mentions_count, 0);
        assert_eq!(enriched.word_count, 0);
        assert_eq!(enriched.text_length, 0);
        assert_eq!(enriched.sentiment_score, 0);
    }

    #[test]
    fn date_is_calendar_day_of_timestamp() {
        let enriched = enrich_post(&post(Some("x"), "x", 500));
        assert_eq!(enriched.date, NaiveDate::from_ymd_opt(2025, 2, 14).unwrap());
    }

    #[test]
    fn derive_features_keeps_order() {
        let mut second = post(Some("y"), "y", 100);
        second.post_id = "post_2".to_string();
        let enriched = derive_features(&[post(Some("x"), "x", 100), second]);
        let ids: Vec<&str> = enriched.iter().map(|e| e.post.post_id.as_str()).collect();
        assert_eq!(ids, ["post_1", "post_2"]);
    }
}
