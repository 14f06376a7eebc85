//! Writes every file output of a run: the CSV export and the four charts.

use pulse_core::{CategorySummary, EnrichedPost, OutputLayout};
use rand::Rng;

use crate::chart_data::{
    daily_volume, engagement_rate_bars, moving_average, rate_distributions, scatter_sample,
};
use crate::charts::{
    render_engagement_rate_bar, render_engagement_rate_box, render_impressions_scatter,
    render_posting_volume,
};
use crate::csv_export::write_posts_csv;
use crate::error::ReportError;

/// Knobs for the chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSettings {
    /// Maximum number of points in the impressions scatter.
    pub scatter_sample: usize,
    /// Window of the posting-volume moving average, in days.
    pub moving_average_days: usize,
}

/// Create the output and plot directories; existing directories are fine.
///
/// # Errors
///
/// Returns [`ReportError::CreateDir`] if a directory cannot be created.
pub fn ensure_output_dirs(layout: &OutputLayout) -> Result<(), ReportError> {
    let dirs = [
        layout.csv_path.parent().map(std::path::Path::to_path_buf),
        Some(layout.plots_dir.clone()),
    ];
    for dir in dirs.into_iter().flatten() {
        if dir.as_os_str().is_empty() {
            continue;
        }
        std::fs::create_dir_all(&dir).map_err(|source| ReportError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;
    }
    Ok(())
}

/// Write the CSV export.
///
/// # Errors
///
/// Returns [`ReportError`] if a directory or the file cannot be written.
pub fn write_csv(layout: &OutputLayout, posts: &[EnrichedPost]) -> Result<usize, ReportError> {
    ensure_output_dirs(layout)?;
    write_posts_csv(&layout.csv_path, posts)
}

/// Render all four charts. `rng` drives the scatter sample.
///
/// # Errors
///
/// Returns [`ReportError`] if a directory cannot be created or a chart fails
/// to render.
pub fn write_charts<R: Rng + ?Sized>(
    layout: &OutputLayout,
    posts: &[EnrichedPost],
    summaries: &[CategorySummary],
    settings: ChartSettings,
    rng: &mut R,
) -> Result<(), ReportError> {
    ensure_output_dirs(layout)?;

    render_engagement_rate_bar(&layout.engagement_rate_bar, &engagement_rate_bars(summaries))?;

    let points = scatter_sample(posts, settings.scatter_sample, rng);
    render_impressions_scatter(&layout.impressions_scatter, &points)?;

    let volume = moving_average(&daily_volume(posts), settings.moving_average_days);
    render_posting_volume(
        &layout.posting_volume,
        &volume,
        settings.moving_average_days,
    )?;

    render_engagement_rate_box(&layout.engagement_rate_box, &rate_distributions(posts))?;

    tracing::info!(
        dir = %layout.plots_dir.display(),
        scatter_points = points.len(),
        "rendered charts"
    );
    Ok(())
}
