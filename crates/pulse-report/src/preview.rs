//! Tabular previews for an external presentation surface.
//!
//! The pipeline hands two tables to whatever is displaying the run: the
//! category summary and the per-category top posts. A [`PreviewSink`] decides
//! how they are shown.

use std::io::Write;

use pulse_core::{CategorySummary, TopPost};
use serde_json::{Map, Value};

use crate::error::ReportError;

pub const SUMMARY_TITLE: &str = "Category Summary (aggregations)";

/// A titled table of pre-formatted cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTable {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PreviewTable {
    fn new(title: String, columns: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            title,
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
        }
    }

    #[must_use]
    pub fn category_summary(summaries: &[CategorySummary]) -> Self {
        let rows = summaries
            .iter()
            .map(|s| {
                vec![
                    s.category.to_string(),
                    s.posts_count.to_string(),
                    format!("{:.1}", s.avg_impressions),
                    format!("{:.1}", s.median_impressions),
                    format!("{:.2}", s.avg_engagement),
                    format!("{:.5}", s.avg_engagement_rate),
                    format!("{:.5}", s.median_engagement_rate),
                    format!("{:.2}", s.avg_word_count),
                    format!("{:.3}", s.avg_sentiment),
                ]
            })
            .collect();
        Self::new(
            SUMMARY_TITLE.to_string(),
            &[
                "category",
                "posts_count",
                "avg_impressions",
                "median_impressions",
                "avg_engagement",
                "avg_engagement_rate",
                "median_engagement_rate",
                "avg_word_count",
                "avg_sentiment",
            ],
            rows,
        )
    }

    /// Ranking table; `n` is the per-category cap the ranking was built with.
    #[must_use]
    pub fn top_posts(posts: &[TopPost], n: usize) -> Self {
        let rows = posts
            .iter()
            .map(|p| {
                vec![
                    p.category.to_string(),
                    p.post_id.clone(),
                    p.date.format("%Y-%m-%d").to_string(),
                    p.text_clean.clone(),
                    p.impressions.to_string(),
                    p.likes.to_string(),
                    p.retweets.to_string(),
                    p.replies.to_string(),
                    p.engagement.to_string(),
                    format!("{:.5}", p.engagement_rate),
                ]
            })
            .collect();
        Self::new(
            format!("Top posts per category (top {n} by engagement_rate)"),
            &[
                "category",
                "post_id",
                "date",
                "text_clean",
                "impressions",
                "likes",
                "retweets",
                "replies",
                "engagement",
                "engagement_rate",
            ],
            rows,
        )
    }
}

/// A surface that can display preview tables.
pub trait PreviewSink {
    /// Display one table.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the table cannot be written out.
    fn show(&mut self, table: &PreviewTable) -> Result<(), ReportError>;
}

/// Renders tables as markdown.
#[derive(Debug)]
pub struct MarkdownPreview<W: Write> {
    out: W,
}

impl<W: Write> MarkdownPreview<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

impl<W: Write> PreviewSink for MarkdownPreview<W> {
    fn show(&mut self, table: &PreviewTable) -> Result<(), ReportError> {
        writeln!(self.out, "## {}", table.title)?;
        writeln!(self.out)?;
        writeln!(self.out, "| {} |", table.columns.join(" | "))?;
        let rule: Vec<&str> = table.columns.iter().map(|_| "---").collect();
        writeln!(self.out, "|{}|", rule.join("|"))?;
        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
            writeln!(self.out, "| {} |", cells.join(" | "))?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

/// Renders each table as one JSON object per line:
/// `{"title": ..., "rows": [{column: cell, ...}, ...]}`.
#[derive(Debug)]
pub struct JsonPreview<W: Write> {
    out: W,
}

impl<W: Write> JsonPreview<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PreviewSink for JsonPreview<W> {
    fn show(&mut self, table: &PreviewTable) -> Result<(), ReportError> {
        let rows: Vec<Value> = table
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = table
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned().map(Value::String))
                    .collect();
                Value::Object(object)
            })
            .collect();
        let payload = serde_json::json!({
            "title": table.title,
            "rows": rows,
        });
        serde_json::to_writer(&mut self.out, &payload)?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// Discards every table.
#[derive(Debug, Default)]
pub struct NoPreview;

impl PreviewSink for NoPreview {
    fn show(&mut self, _table: &PreviewTable) -> Result<(), ReportError> {
        Ok(())
    }
}
