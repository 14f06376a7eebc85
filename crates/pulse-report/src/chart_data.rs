//! Series preparation for the charts, kept free of any drawing code.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pulse_core::{Category, CategorySummary, EnrichedPost};
use rand::seq::index;
use rand::Rng;

/// `(category, mean engagement rate)` bars, in summary order.
#[must_use]
pub fn engagement_rate_bars(summaries: &[CategorySummary]) -> Vec<(String, f64)> {
    summaries
        .iter()
        .map(|s| (s.category.to_string(), s.avg_engagement_rate))
        .collect()
}

/// Random `(impressions, engagement rate)` points, at most `cap` of them,
/// sampled without replacement.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn scatter_sample<R: Rng + ?Sized>(
    posts: &[EnrichedPost],
    cap: usize,
    rng: &mut R,
) -> Vec<(f64, f64)> {
    let amount = cap.min(posts.len());
    index::sample(rng, posts.len(), amount)
        .into_iter()
        .map(|i| {
            let p = &posts[i];
            (p.post.impressions.get() as f64, p.engagement_rate)
        })
        .collect()
}

/// Posts per calendar day from the first to the last posting day, with
/// quiet days counted as zero.
#[must_use]
pub fn daily_volume(posts: &[EnrichedPost]) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for post in posts {
        *counts.entry(post.date).or_default() += 1;
    }
    let (Some(first), Some(last)) = (counts.keys().next(), counts.keys().next_back()) else {
        return Vec::new();
    };
    let last = *last;
    first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|d| (d, counts.get(&d).copied().unwrap_or(0)))
        .collect()
}

/// Trailing mean over `window` days.
///
/// The first `window - 1` days have no full window and are omitted.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn moving_average(daily: &[(NaiveDate, usize)], window: usize) -> Vec<(NaiveDate, f64)> {
    if window == 0 {
        return Vec::new();
    }
    daily
        .windows(window)
        .map(|w| {
            let total: usize = w.iter().map(|(_, n)| n).sum();
            (w[w.len() - 1].0, total as f64 / window as f64)
        })
        .collect()
}

/// Engagement rates grouped by category, categories in declaration order,
/// empty categories skipped.
#[must_use]
pub fn rate_distributions(posts: &[EnrichedPost]) -> Vec<(Category, Vec<f64>)> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            let rates: Vec<f64> = posts
                .iter()
                .filter(|p| p.post.category == category)
                .map(|p| p.engagement_rate)
                .collect();
            (!rates.is_empty()).then_some((category, rates))
        })
        .collect()
}
