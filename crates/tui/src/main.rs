mod renderer;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::Parser;
use scrollvis_core::{JsonDirSource, SECTION_NAMES, ScrollDriver, StepMarker, StoryConfig, build_story};

/// Preview the scroll-driven climate story in a terminal.
#[derive(Parser, Debug)]
#[command(name = "scrollvis", version)]
struct Cli {
    /// Directory holding one `<dataset>.json` file per dataset.
    data_dir: PathBuf,

    /// Story config JSON. Missing keys fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated scroll offsets to replay without a UI; commands are
    /// written to stdout as JSON lines.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    script: Option<Vec<f64>>,

    /// Log file. Logging never goes to the terminal.
    #[arg(long, default_value = "scrollvis.log")]
    log: PathBuf,

    /// Height of each story step, in scroll units.
    #[arg(long, default_value_t = 600.0)]
    step_height: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log)?;

    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            StoryConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => StoryConfig::default(),
    };

    let steps = StepMarker::uniform(SECTION_NAMES.len(), cli.step_height);
    let source = JsonDirSource::new(&cli.data_dir);
    let (data, driver) = build_story(&source, &config, steps)
        .with_context(|| format!("loading story from {}", cli.data_dir.display()))?;
    tracing::info!(data_dir = %cli.data_dir.display(), "story loaded");

    match cli.script {
        Some(offsets) => replay(driver, &offsets),
        None => renderer::render_tui(&data, driver, &config, cli.step_height),
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file =
        File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Headless mode: one JSON object per offset.
fn replay(mut driver: ScrollDriver, offsets: &[f64]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for &scroll_top in offsets {
        let commands = driver.scroll_to(scroll_top)?;
        let line = serde_json::json!({
            "scroll_top": scroll_top,
            "active": driver.active_index(),
            "commands": commands,
        });
        writeln!(out, "{line}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_script_offsets() {
        let cli = Cli::try_parse_from(["scrollvis", "data", "--script", "0,650.5,-20"]).unwrap();
        assert_eq!(cli.script, Some(vec![0.0, 650.5, -20.0]));
        assert_eq!(cli.step_height, 600.0);
        assert_eq!(cli.log, PathBuf::from("scrollvis.log"));
    }

    #[test]
    fn config_is_optional() {
        let cli = Cli::try_parse_from(["scrollvis", "data"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.script.is_none());
    }
}
