mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pulse_core::AppConfig;
use tracing_subscriber::EnvFilter;

use crate::run::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "pulse-cli")]
#[command(about = "Synthetic social-media engagement analysis by category")]
struct Cli {
    /// RNG seed; overrides `PULSE_SEED`.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Base output directory; overrides `PULSE_OUTPUT_DIR`.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline and write the CSV export and charts
    Run {
        /// Run the pipeline and show previews without writing any file
        #[arg(long)]
        dry_run: bool,

        /// How the summary and top-post tables are shown
        #[arg(long, value_enum, default_value_t = PreviewFormat::Markdown)]
        preview: PreviewFormat,
    },
    /// Run the pipeline and print only the category summary
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PreviewFormat {
    Markdown,
    Json,
    None,
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir.clone_from(dir);
    }
}

/// Config from the process environment with CLI flags applied on top.
///
/// `.env` loading happens once in `main`, before this runs.
fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = pulse_core::load_app_config_from_env()?;
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        None => run::run_full(&config, RunOptions::default()),
        Some(Commands::Run { dry_run, preview }) => {
            run::run_full(&config, RunOptions { dry_run, preview })
        }
        Some(Commands::Summary) => run::run_summary(&config),
    }
}

#[cfg(test)]
mod tests;
