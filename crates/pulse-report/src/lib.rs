//! Report outputs for the engagement pipeline: CSV export, PNG charts, and
//! tabular previews.

pub mod chart_data;
pub mod charts;
pub mod csv_export;
pub mod error;
pub mod preview;
pub mod report;

pub use csv_export::{write_posts_csv, COLUMNS};
pub use error::ReportError;
pub use preview::{
    JsonPreview, MarkdownPreview, NoPreview, PreviewSink, PreviewTable, SUMMARY_TITLE,
};
pub use report::{ensure_output_dirs, write_charts, write_csv, ChartSettings};
