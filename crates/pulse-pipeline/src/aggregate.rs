//! Category-level summaries and rankings.

use std::collections::{BTreeMap, HashMap};

use pulse_core::{Category, CategorySummary, EnrichedPost, TopPost};

use crate::stats::{mean, median};

#[allow(clippy::cast_precision_loss)]
fn summarize(category: Category, posts: &[&EnrichedPost]) -> CategorySummary {
    let column = |f: fn(&EnrichedPost) -> f64| posts.iter().map(|&p| f(p)).collect::<Vec<f64>>();

    let impressions = column(|p| p.post.impressions.get() as f64);
    let engagement = column(|p| p.engagement as f64);
    let rates = column(|p| p.engagement_rate);
    let words = column(|p| p.word_count as f64);
    let sentiment = column(|p| f64::from(p.sentiment_score));

    CategorySummary {
        category,
        posts_count: posts.len(),
        avg_impressions: mean(&impressions).unwrap_or_default(),
        median_impressions: median(&impressions).unwrap_or_default(),
        avg_engagement: mean(&engagement).unwrap_or_default(),
        avg_engagement_rate: mean(&rates).unwrap_or_default(),
        median_engagement_rate: median(&rates).unwrap_or_default(),
        avg_word_count: mean(&words).unwrap_or_default(),
        avg_sentiment: mean(&sentiment).unwrap_or_default(),
    }
}

/// One summary per category present in `posts`, sorted by mean engagement
/// rate, highest first.
#[must_use]
pub fn summarize_by_category(posts: &[EnrichedPost]) -> Vec<CategorySummary> {
    let mut groups: BTreeMap<Category, Vec<&EnrichedPost>> = BTreeMap::new();
    for post in posts {
        groups.entry(post.post.category).or_default().push(post);
    }

    let mut summaries: Vec<CategorySummary> = groups
        .into_iter()
        .map(|(category, members)| summarize(category, &members))
        .collect();
    summaries.sort_by(|a, b| b.avg_engagement_rate.total_cmp(&a.avg_engagement_rate));

    tracing::info!(categories = summaries.len(), "summarized categories");
    summaries
}

/// The `n` highest engagement-rate posts of each category.
///
/// Categories appear alphabetically; within a category posts are ordered by
/// engagement rate descending, ties keeping their original row order.
#[must_use]
pub fn top_posts_per_category(posts: &[EnrichedPost], n: usize) -> Vec<TopPost> {
    let mut ranked: Vec<&EnrichedPost> = posts.iter().collect();
    ranked.sort_by(|a, b| {
        a.post
            .category
            .as_str()
            .cmp(b.post.category.as_str())
            .then_with(|| b.engagement_rate.total_cmp(&a.engagement_rate))
    });

    let mut taken: HashMap<Category, usize> = HashMap::new();
    ranked
        .into_iter()
        .filter(|p| {
            let count = taken.entry(p.post.category).or_default();
            *count += 1;
            *count <= n
        })
        .map(TopPost::from)
        .collect()
}
