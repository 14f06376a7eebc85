use std::path::{Path, PathBuf};

use super::*;

fn base_config() -> AppConfig {
    AppConfig {
        seed: 42,
        post_count: 1200,
        missing_text: 8,
        missing_impressions: 6,
        window_days: 200,
        scatter_sample: 400,
        top_n: 3,
        moving_average_days: 7,
        output_dir: PathBuf::from("./output"),
        log_level: "info".to_string(),
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pulse-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.seed.is_none());
    assert!(cli.output_dir.is_none());
}

#[test]
fn parses_run_with_defaults() {
    let cli = Cli::try_parse_from(["pulse-cli", "run"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            dry_run: false,
            preview: PreviewFormat::Markdown
        })
    ));
}

#[test]
fn parses_run_dry_run_with_json_preview() {
    let cli = Cli::try_parse_from(["pulse-cli", "run", "--dry-run", "--preview", "json"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            dry_run: true,
            preview: PreviewFormat::Json
        })
    ));
}

#[test]
fn parses_preview_none() {
    let cli = Cli::try_parse_from(["pulse-cli", "run", "--preview", "none"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Run {
            preview: PreviewFormat::None,
            ..
        })
    ));
}

#[test]
fn rejects_unknown_preview_format() {
    let result = Cli::try_parse_from(["pulse-cli", "run", "--preview", "html"]);
    assert!(result.is_err(), "html is not a preview format");
}

#[test]
fn parses_summary_command() {
    let cli = Cli::try_parse_from(["pulse-cli", "summary"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Summary)));
}

#[test]
fn global_flags_work_after_subcommand() {
    let cli = Cli::try_parse_from([
        "pulse-cli",
        "summary",
        "--seed",
        "7",
        "--output-dir",
        "/tmp/pulse",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.seed, Some(7));
    assert_eq!(cli.output_dir.as_deref(), Some(Path::new("/tmp/pulse")));
}

#[test]
fn rejects_non_numeric_seed() {
    assert!(Cli::try_parse_from(["pulse-cli", "--seed", "abc"]).is_err());
}

#[test]
fn overrides_replace_env_values() {
    let cli = Cli::try_parse_from(["pulse-cli", "--seed", "9", "--output-dir", "out2"])
        .expect("expected valid cli args");
    let mut config = base_config();
    apply_overrides(&mut config, &cli);
    assert_eq!(config.seed, 9);
    assert_eq!(config.output_dir, PathBuf::from("out2"));
    assert_eq!(config.post_count, 1200, "unrelated values stay untouched");
}

#[test]
fn absent_flags_keep_env_values() {
    let cli = Cli::try_parse_from(["pulse-cli", "run"]).expect("expected valid cli args");
    let mut config = base_config();
    apply_overrides(&mut config, &cli);
    assert_eq!(config, base_config());
}

#[test]
fn default_run_options_write_files_with_markdown() {
    let options = RunOptions::default();
    assert!(!options.dry_run);
    assert_eq!(options.preview, PreviewFormat::Markdown);
}

#[test]
fn resolve_config_applies_flags_over_environment() {
    let cli = Cli::try_parse_from(["pulse-cli", "--seed", "11", "--output-dir", "/tmp/pulse-run"])
        .expect("expected valid cli args");
    let config = resolve_config(&cli).expect("environment config should load");
    assert_eq!(config.seed, 11);
    assert_eq!(config.output_dir, PathBuf::from("/tmp/pulse-run"));
}
