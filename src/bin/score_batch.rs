use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use xg_value::config::ScoreConfig;
use xg_value::history::TeamHistory;
use xg_value::pipeline::{Fixture, score_batch};

/// Reference Source/Sink stand-in: read a JSON batch document, score it,
/// print the report as JSON on stdout.
#[derive(Debug, Deserialize)]
struct BatchInput {
    teams: Vec<TeamHistory>,
    #[serde(default)]
    fixtures: Vec<Fixture>,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: score_batch <batch.json>")?;

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("read batch file {}", path.display()))?;
    let input: BatchInput = serde_json::from_str(&raw)
        .with_context(|| format!("parse batch file {}", path.display()))?;

    let cfg = ScoreConfig::from_env();
    let report = score_batch(&input.teams, &input.fixtures, &cfg, None);

    tracing::info!(
        matches = report.matches.len(),
        skipped = report.skipped.len(),
        leagues = report.leagues.len(),
        "batch scored"
    );

    let json = serde_json::to_string_pretty(&report).context("serialize report")?;
    println!("{json}");
    Ok(())
}
