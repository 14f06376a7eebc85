use std::path::{Path, PathBuf};

const CSV_FILE: &str = "social_media_category_analysis.csv";
const PLOTS_DIR: &str = "social_media_analysis_plots";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed: u64,
    pub post_count: usize,
    pub missing_text: usize,
    pub missing_impressions: usize,
    pub window_days: u32,
    pub scatter_sample: usize,
    pub top_n: usize,
    pub moving_average_days: usize,
    pub output_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// File layout of everything a run writes under `output_dir`.
    #[must_use]
    pub fn output_layout(&self) -> OutputLayout {
        OutputLayout::new(&self.output_dir)
    }
}

/// Paths of the CSV export and the four chart images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub csv_path: PathBuf,
    pub plots_dir: PathBuf,
    pub engagement_rate_bar: PathBuf,
    pub impressions_scatter: PathBuf,
    pub posting_volume: PathBuf,
    pub engagement_rate_box: PathBuf,
}

impl OutputLayout {
    #[must_use]
    pub fn new(base: &Path) -> Self {
        let plots_dir = base.join(PLOTS_DIR);
        Self {
            csv_path: base.join(CSV_FILE),
            engagement_rate_bar: plots_dir.join("avg_engagement_rate_by_category.png"),
            impressions_scatter: plots_dir.join("impressions_vs_engagement_rate.png"),
            posting_volume: plots_dir.join("posting_volume_7dayma.png"),
            engagement_rate_box: plots_dir.join("engagement_rate_boxplot.png"),
            plots_dir,
        }
    }
}
