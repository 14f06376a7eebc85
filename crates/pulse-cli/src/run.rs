use pulse_core::AppConfig;
use pulse_pipeline::{run_pipeline, PipelineOutput};
use pulse_report::{
    write_charts, write_csv, ChartSettings, JsonPreview, MarkdownPreview, NoPreview, PreviewSink,
    PreviewTable,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::PreviewFormat;

#[derive(Debug, Clone, Copy)]
pub(crate) struct RunOptions {
    pub(crate) dry_run: bool,
    pub(crate) preview: PreviewFormat,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            preview: PreviewFormat::Markdown,
        }
    }
}

pub(crate) fn preview_sink(format: PreviewFormat) -> Box<dyn PreviewSink> {
    match format {
        PreviewFormat::Markdown => Box::new(MarkdownPreview::new(std::io::stdout())),
        PreviewFormat::Json => Box::new(JsonPreview::new(std::io::stdout())),
        PreviewFormat::None => Box::new(NoPreview),
    }
}

fn print_row_counts(output: &PipelineOutput) {
    println!(
        "Rows before cleaning: {}, after cleaning (removed empty text): {}",
        output.rows_before, output.rows_after
    );
}

/// Generate, analyse, preview, and (unless dry-running) write every output.
pub(crate) fn run_full(config: &AppConfig, options: RunOptions) -> anyhow::Result<()> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let output = run_pipeline(config, &mut rng)?;
    print_row_counts(&output);

    let mut sink = preview_sink(options.preview);
    sink.show(&PreviewTable::category_summary(&output.summaries))?;
    sink.show(&PreviewTable::top_posts(&output.top_posts, config.top_n))?;

    if options.dry_run {
        tracing::info!("dry run, skipping CSV and chart output");
        return Ok(());
    }

    let layout = config.output_layout();
    write_csv(&layout, &output.posts)?;
    println!("Saved CSV to: {}", layout.csv_path.display());

    let settings = ChartSettings {
        scatter_sample: config.scatter_sample,
        moving_average_days: config.moving_average_days,
    };
    write_charts(
        &layout,
        &output.posts,
        &output.summaries,
        settings,
        &mut rng,
    )?;
    println!("Saved plots to: {}", layout.plots_dir.display());

    Ok(())
}

pub(crate) fn run_summary(config: &AppConfig) -> anyhow::Result<()> {
    let output = run_pipeline(config, &mut StdRng::seed_from_u64(config.seed))?;
    print_row_counts(&output);
    preview_sink(PreviewFormat::Markdown).show(&PreviewTable::category_summary(&output.summaries))?;
    Ok(())
}
