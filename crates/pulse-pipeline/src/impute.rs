//! Category-median imputation of missing impression counts.
//!
//! Medians are computed once into a lookup table, then a single pass over the
//! rows resolves every impression count. A zero count is treated as missing
//! so that resolved counts are always non-zero.

use std::collections::HashMap;
use std::num::NonZeroU64;

use pulse_core::{Category, RawPost};

use crate::error::PipelineError;
use crate::stats::median_truncated;

/// Per-category and overall impression medians over observed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpressionMedians {
    overall: Option<NonZeroU64>,
    by_category: HashMap<Category, NonZeroU64>,
}

impl ImpressionMedians {
    /// Compute medians from the observed, non-zero impression counts.
    #[must_use]
    pub fn from_posts(posts: &[RawPost]) -> Self {
        let observed = |p: &RawPost| p.impressions.filter(|&n| n > 0);

        let all: Vec<u64> = posts.iter().filter_map(observed).collect();
        let overall = median_truncated(&all).and_then(NonZeroU64::new);

        let mut grouped: HashMap<Category, Vec<u64>> = HashMap::new();
        for post in posts {
            if let Some(n) = observed(post) {
                grouped.entry(post.category).or_default().push(n);
            }
        }
        let by_category = grouped
            .into_iter()
            .filter_map(|(category, values)| {
                let median = median_truncated(&values).and_then(NonZeroU64::new)?;
                tracing::debug!(%category, median = median.get(), "category impression median");
                Some((category, median))
            })
            .collect();

        Self {
            overall,
            by_category,
        }
    }

    #[must_use]
    pub fn overall(&self) -> Option<NonZeroU64> {
        self.overall
    }

    /// Fill value for a category: its own median, else the overall median.
    #[must_use]
    pub fn for_category(&self, category: Category) -> Option<NonZeroU64> {
        self.by_category.get(&category).copied().or(self.overall)
    }

    /// Resolve a post's impressions, imputing when absent or zero.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::NoObservedImpressions`] when the post needs a
    /// fill value and no impressions were observed anywhere.
    pub fn resolve(&self, post: &RawPost) -> Result<NonZeroU64, PipelineError> {
        if let Some(n) = post.impressions.and_then(NonZeroU64::new) {
            return Ok(n);
        }
        self.for_category(post.category)
            .ok_or_else(|| PipelineError::NoObservedImpressions {
                post_id: post.post_id.clone(),
            })
    }
}

/// Resolve the impressions of every post, in row order, imputing absent or
/// zero counts.
///
/// # Errors
///
/// Returns [`PipelineError::NoObservedImpressions`] if a post lacks
/// impressions and nothing was observed to impute from.
pub fn impute_impressions(posts: &[RawPost]) -> Result<Vec<NonZeroU64>, PipelineError> {
    let medians = ImpressionMedians::from_posts(posts);

    for category in Category::ALL {
        let needs_fill = posts
            .iter()
            .any(|p| p.category == category && p.impressions.unwrap_or(0) == 0);
        if needs_fill && !medians.by_category.contains_key(&category) {
            tracing::warn!(
                %category,
                "no observed impressions in category; falling back to overall median"
            );
        }
    }

    let resolved = posts
        .iter()
        .map(|post| medians.resolve(post))
        .collect::<Result<Vec<_>, PipelineError>>()?;

    let imputed = posts
        .iter()
        .zip(&resolved)
        .filter(|(post, n)| post.impressions != Some(n.get()))
        .count();
    tracing::info!(rows = resolved.len(), imputed, "imputed impressions");
    Ok(resolved)
}
