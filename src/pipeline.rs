use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aggregate::{TeamAggregate, aggregate_history};
use crate::config::{ScoreConfig, scoring_parallelism};
use crate::error::ModelError;
use crate::expected_goals::expected_goals;
use crate::history::{TeamHistory, Venue};
use crate::league_averages::{LeagueAverages, compute_league_averages};
use crate::odds::{MarketOdds, MatchOdds, price_match};
use crate::outcome_probs::outcome_probs;
use crate::strength::{ModelVariant, team_strengths};

/// One match to price: team ids, league tag, and whatever the market quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    #[serde(default)]
    pub market: Option<MarketOdds>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSkip {
    pub variant: ModelVariant,
    pub error: ModelError,
}

/// A fixture that was scored. Variants that could not be priced are listed
/// alongside the ones that were, so partial coverage stays visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub results: Vec<MatchOdds>,
    #[serde(default)]
    pub skipped_variants: Vec<VariantSkip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedUnit {
    pub unit: String,
    pub error: ModelError,
}

/// Everything a batch run produced, failures included. No error aborts the
/// batch; skipped teams, leagues and fixtures are collected here instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub leagues: Vec<LeagueAverages>,
    pub matches: Vec<ScoredMatch>,
    pub skipped: Vec<SkippedUnit>,
}

/// Score a batch of fixtures against the supplied team histories.
///
/// Two ordered phases with a hard barrier between them: aggregation plus
/// league normalization must finish before any match is scored, because the
/// scoring phase reads the published league averages. Within each phase the
/// per-team and per-match units are independent and run on the rayon pool.
/// `cancel` is checked between matches; matches not yet started when it
/// flips are reported as skipped.
pub fn score_batch(
    teams: &[TeamHistory],
    fixtures: &[Fixture],
    cfg: &ScoreConfig,
    cancel: Option<&AtomicBool>,
) -> BatchReport {
    let mut skipped: Vec<SkippedUnit> = Vec::new();

    // Phase 1: fold every team's history. Aggregates are immutable from here.
    let aggregates: Vec<TeamAggregate> =
        with_scoring_pool(|| teams.par_iter().map(aggregate_history).collect());

    let by_team: HashMap<(&str, &str), &TeamAggregate> = aggregates
        .iter()
        .map(|agg| ((agg.league.as_str(), agg.team_id.as_str()), agg))
        .collect();

    let mut league_names: Vec<&str> = aggregates.iter().map(|agg| agg.league.as_str()).collect();
    league_names.sort_unstable();
    league_names.dedup();

    let refs: Vec<&TeamAggregate> = aggregates.iter().collect();
    let mut leagues: HashMap<&str, LeagueAverages> = HashMap::new();
    for league in league_names {
        let norm = compute_league_averages(league, &refs);
        for team_id in &norm.excluded {
            tracing::warn!(league, team = %team_id, "excluding team with no played matches");
            skipped.push(SkippedUnit {
                unit: format!("team {league}/{team_id}"),
                error: ModelError::MissingData("no played matches".to_string()),
            });
        }
        if norm.averages.avg_goals.is_none() {
            tracing::warn!(league, "skipping league with no scored matches");
            skipped.push(SkippedUnit {
                unit: format!("league {league}"),
                error: ModelError::Normalization("league has no played matches".to_string()),
            });
            continue;
        }
        leagues.insert(league, norm.averages);
    }

    // Phase 2: price each fixture against the frozen snapshots.
    let outcomes: Vec<Result<ScoredMatch, SkippedUnit>> = with_scoring_pool(|| {
        fixtures
            .par_iter()
            .map(|fixture| score_fixture(fixture, &by_team, &leagues, cfg, cancel))
            .collect()
    });

    let mut matches = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Ok(scored) => matches.push(scored),
            Err(skip) => skipped.push(skip),
        }
    }

    let mut leagues: Vec<LeagueAverages> = leagues.into_values().collect();
    leagues.sort_by(|a, b| a.league.cmp(&b.league));

    BatchReport {
        leagues,
        matches,
        skipped,
    }
}

fn score_fixture(
    fixture: &Fixture,
    by_team: &HashMap<(&str, &str), &TeamAggregate>,
    leagues: &HashMap<&str, LeagueAverages>,
    cfg: &ScoreConfig,
    cancel: Option<&AtomicBool>,
) -> Result<ScoredMatch, SkippedUnit> {
    let unit = format!(
        "{} vs {} ({})",
        fixture.home_team, fixture.away_team, fixture.league
    );
    let skip = |error: ModelError| {
        tracing::warn!(unit = %unit, error = %error, "skipping fixture");
        SkippedUnit {
            unit: unit.clone(),
            error,
        }
    };

    if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
        return Err(skip(ModelError::Cancelled));
    }

    let Some(league) = leagues.get(fixture.league.as_str()) else {
        return Err(skip(ModelError::Normalization(format!(
            "league {} has no usable averages",
            fixture.league
        ))));
    };

    let lookup = |team: &str| {
        by_team
            .get(&(fixture.league.as_str(), team))
            .copied()
            .ok_or_else(|| {
                ModelError::MissingData(format!("team {team} not found in {}", fixture.league))
            })
    };
    let home_agg = lookup(&fixture.home_team).map_err(&skip)?;
    let away_agg = lookup(&fixture.away_team).map_err(&skip)?;

    let mut results = Vec::with_capacity(cfg.variants.len());
    let mut skipped_variants = Vec::new();
    for &variant in &cfg.variants {
        match score_variant(home_agg, away_agg, league, variant, cfg, fixture.market.as_ref()) {
            Ok(odds) => results.push(odds),
            Err(error) => {
                tracing::warn!(
                    unit = %unit,
                    variant = variant.key(),
                    error = %error,
                    "variant not priced"
                );
                skipped_variants.push(VariantSkip { variant, error });
            }
        }
    }

    Ok(ScoredMatch {
        home_team: fixture.home_team.clone(),
        away_team: fixture.away_team.clone(),
        league: fixture.league.clone(),
        results,
        skipped_variants,
    })
}

fn score_variant(
    home_agg: &TeamAggregate,
    away_agg: &TeamAggregate,
    league: &LeagueAverages,
    variant: ModelVariant,
    cfg: &ScoreConfig,
    market: Option<&MarketOdds>,
) -> Result<MatchOdds, ModelError> {
    let home = team_strengths(home_agg, league, variant, Venue::Home)?;
    let away = team_strengths(away_agg, league, variant, Venue::Away)?;
    let (lambda_home, lambda_away) = expected_goals(home, away, league, variant)?;
    let probs = outcome_probs(lambda_home, lambda_away, cfg.max_goals, &cfg.total_lines)?;
    Ok(price_match(variant, lambda_home, lambda_away, &probs, market))
}

static SCORING_POOL: OnceCell<Option<rayon::ThreadPool>> = OnceCell::new();

/// Run `action` on the scoring pool. With no explicit SCORE_PARALLELISM the
/// rayon global pool is used; a failed pool build also falls back to it.
fn with_scoring_pool<T>(action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    let pool = SCORING_POOL.get_or_init(|| {
        let threads = scoring_parallelism();
        if threads == 0 {
            return None;
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .ok()
    });
    match pool {
        Some(pool) => pool.install(action),
        None => action(),
    }
}
