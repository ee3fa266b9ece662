use std::env;

use crate::outcome_probs::DEFAULT_MAX_GOALS;
use crate::strength::ModelVariant;

const DEFAULT_TOTAL_LINES: [f64; 6] = [0.5, 1.5, 2.5, 3.5, 4.5, 5.5];

/// Tunables for a scoring run. `default()` matches the production settings;
/// `from_env()` lets deployments override without a code change.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    /// Scoreline grid cutoff K; goals beyond this are truncated.
    pub max_goals: u32,
    /// Half-goal totals lines to price, each inside (0, max_goals).
    pub total_lines: Vec<f64>,
    /// Model variants to score per fixture.
    pub variants: Vec<ModelVariant>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            max_goals: DEFAULT_MAX_GOALS,
            total_lines: DEFAULT_TOTAL_LINES.to_vec(),
            variants: ModelVariant::ALL.to_vec(),
        }
    }
}

impl ScoreConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(max_goals) = env_parse::<u32>("SCORE_MAX_GOALS") {
            cfg.max_goals = max_goals.clamp(4, 25);
        }

        if let Ok(raw) = env::var("SCORE_TOTAL_LINES") {
            let lines: Vec<f64> = raw
                .split(',')
                .filter_map(|part| part.trim().parse::<f64>().ok())
                .collect();
            if !lines.is_empty() {
                cfg.total_lines = lines;
            }
        }

        if let Ok(raw) = env::var("SCORE_VARIANTS") {
            let variants: Vec<ModelVariant> = raw
                .split(',')
                .filter_map(ModelVariant::from_key)
                .collect();
            if !variants.is_empty() {
                cfg.variants = variants;
            }
        }

        cfg.sanitize();
        cfg
    }

    /// Drop lines the grid cannot resolve. Lines at or beyond the cutoff
    /// would report truncated over-mass as zero.
    fn sanitize(&mut self) {
        let max = self.max_goals as f64;
        self.total_lines.retain(|line| *line > 0.0 && *line < max);
    }
}

pub fn scoring_parallelism() -> usize {
    env_parse::<usize>("SCORE_PARALLELISM")
        .unwrap_or(0)
        .clamp(0, 32)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|val| val.trim().parse().ok())
}
