//! Pipeline orchestration: generate, clean, filter, derive, aggregate.

use pulse_core::{AppConfig, CategorySummary, EnrichedPost, TopPost};
use rand::Rng;

use crate::aggregate::{summarize_by_category, top_posts_per_category};
use crate::clean::{clean_posts, drop_empty_text};
use crate::error::PipelineError;
use crate::features::derive_features;
use crate::generator::{generate, GeneratorParams};

/// Everything a run produces before reporting.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub posts: Vec<EnrichedPost>,
    pub summaries: Vec<CategorySummary>,
    pub top_posts: Vec<TopPost>,
    /// Rows before the empty-text filter.
    pub rows_before: usize,
    /// Rows after the empty-text filter.
    pub rows_after: usize,
}

/// Run every stage for one batch.
///
/// Each stage takes the previous table by reference and returns a new one;
/// the only randomness is drawn from `rng`.
///
/// # Errors
///
/// Returns [`PipelineError`] if generation parameters are invalid or no
/// impression value is available to impute from.
pub fn run_pipeline<R: Rng + ?Sized>(
    config: &AppConfig,
    rng: &mut R,
) -> Result<PipelineOutput, PipelineError> {
    let raw = generate(&GeneratorParams::from_config(config), rng)?;
    let cleaned = clean_posts(&raw)?;

    let filtered = drop_empty_text(&cleaned);
    tracing::info!(
        before = filtered.rows_before,
        after = filtered.rows_after,
        dropped = filtered.dropped(),
        "dropped rows with empty text"
    );

    let posts = derive_features(&filtered.kept);
    let summaries = summarize_by_category(&posts);
    let top_posts = top_posts_per_category(&posts, config.top_n);

    Ok(PipelineOutput {
        posts,
        summaries,
        top_posts,
        rows_before: filtered.rows_before,
        rows_after: filtered.rows_after,
    })
}
