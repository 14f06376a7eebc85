//! PNG chart rendering with Plotters.

use std::error::Error;
use std::path::Path;

use chrono::{NaiveDate, TimeDelta};
use plotters::prelude::*;
use pulse_core::Category;

use crate::error::ReportError;

type DrawResult = Result<(), Box<dyn Error>>;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);

fn chart_error(chart: &'static str, path: &Path, e: &dyn Error) -> ReportError {
    ReportError::Chart {
        chart,
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Upper axis bound with a little headroom; `1.0` for an all-zero series.
fn headroom(max: f64) -> f64 {
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Bar chart of mean engagement rate per category.
///
/// # Errors
///
/// Returns [`ReportError::Chart`] if drawing or encoding fails.
pub fn render_engagement_rate_bar(path: &Path, bars: &[(String, f64)]) -> Result<(), ReportError> {
    draw_engagement_rate_bar(path, bars).map_err(|e| chart_error("engagement-rate bar", path, &*e))
}

fn draw_engagement_rate_bar(path: &Path, bars: &[(String, f64)]) -> DrawResult {
    let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let n = i32::try_from(bars.len())?;
    let top = headroom(bars.iter().map(|(_, v)| *v).fold(0.0, f64::max));
    let mut chart = ChartBuilder::on(&root)
        .caption("Average Engagement Rate by Category", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..top)?;

    let label = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| bars.get(i))
            .map(|(name, _)| name.clone())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len().max(1))
        .x_label_formatter(&label)
        .x_desc("Category")
        .y_desc("Avg Engagement Rate")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.8).filled())
            .margin(12)
            .data(bars.iter().zip(0..n).map(|((_, v), i)| (i, *v))),
    )?;

    root.present()?;
    Ok(())
}

/// Scatter of impressions against engagement rate.
///
/// # Errors
///
/// Returns [`ReportError::Chart`] if drawing or encoding fails.
pub fn render_impressions_scatter(path: &Path, points: &[(f64, f64)]) -> Result<(), ReportError> {
    draw_impressions_scatter(path, points)
        .map_err(|e| chart_error("impressions scatter", path, &*e))
}

fn draw_impressions_scatter(path: &Path, points: &[(f64, f64)]) -> DrawResult {
    let root = BitMapBackend::new(path, (700, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = headroom(points.iter().map(|(x, _)| *x).fold(0.0, f64::max));
    let y_max = headroom(points.iter().map(|(_, y)| *y).fold(0.0, f64::max));
    let mut chart = ChartBuilder::on(&root)
        .caption("Impressions vs Engagement Rate (sample)", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Impressions")
        .y_desc("Engagement Rate")
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.mix(0.5).filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Line chart of the moving-average posting volume over time.
///
/// # Errors
///
/// Returns [`ReportError::Chart`] if drawing or encoding fails.
pub fn render_posting_volume(
    path: &Path,
    series: &[(NaiveDate, f64)],
    window: usize,
) -> Result<(), ReportError> {
    draw_posting_volume(path, series, window)
        .map_err(|e| chart_error("posting volume", path, &*e))
}

fn draw_posting_volume(path: &Path, series: &[(NaiveDate, f64)], window: usize) -> DrawResult {
    let root = BitMapBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    // Days are plotted as offsets from the first point and labelled as dates.
    let origin = series.first().map_or(NaiveDate::MIN, |(d, _)| *d);
    let offset = |d: NaiveDate| i32::try_from((d - origin).num_days()).unwrap_or(i32::MAX);
    let span = series.last().map_or(1, |(d, _)| offset(*d).max(1));
    let y_max = headroom(series.iter().map(|(_, v)| *v).fold(0.0, f64::max));

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Overall posting volume ({window}-day MA)"),
            CAPTION_FONT,
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..span, 0f64..y_max)?;

    let date_label = |x: &i32| {
        (origin + TimeDelta::days(i64::from(*x)))
            .format("%Y-%m-%d")
            .to_string()
    };
    chart
        .configure_mesh()
        .x_labels(8)
        .x_label_formatter(&date_label)
        .x_desc("Date")
        .y_desc(format!("Posts ({window}-day MA)"))
        .draw()?;

    chart.draw_series(LineSeries::new(
        series.iter().map(|(d, v)| (offset(*d), *v)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

/// Box plot of engagement-rate distributions per category.
///
/// # Errors
///
/// Returns [`ReportError::Chart`] if drawing or encoding fails.
pub fn render_engagement_rate_box(
    path: &Path,
    groups: &[(Category, Vec<f64>)],
) -> Result<(), ReportError> {
    draw_engagement_rate_box(path, groups)
        .map_err(|e| chart_error("engagement-rate box", path, &*e))
}

#[allow(clippy::cast_possible_truncation)]
fn draw_engagement_rate_box(path: &Path, groups: &[(Category, Vec<f64>)]) -> DrawResult {
    let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = groups.iter().map(|(c, _)| c.to_string()).collect();
    let quartiles: Vec<Quartiles> = groups
        .iter()
        .map(|(_, rates)| Quartiles::new(rates.as_slice()))
        .collect();
    let y_max = headroom(
        groups
            .iter()
            .flat_map(|(_, rates)| rates.iter().copied())
            .fold(0.0, f64::max),
    ) as f32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Engagement Rate Distribution by Category", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(labels[..].into_segmented(), 0f32..y_max)?;

    let label = |v: &SegmentValue<&String>| match v {
        SegmentValue::CenterOf(name) | SegmentValue::Exact(name) => (*name).clone(),
        SegmentValue::Last => String::new(),
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_label_formatter(&label)
        .x_desc("Category")
        .y_desc("Engagement Rate")
        .draw()?;

    chart.draw_series(
        labels
            .iter()
            .zip(&quartiles)
            .map(|(name, q)| Boxplot::new_vertical(SegmentValue::CenterOf(name), q)),
    )?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headroom_pads_positive_max() {
        assert!((headroom(0.5) - 0.55).abs() < 1e-12);
    }

    #[test]
    fn headroom_defaults_for_empty_series() {
        assert!((headroom(0.0) - 1.0).abs() < f64::EPSILON);
    }
}
