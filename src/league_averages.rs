use serde::{Deserialize, Serialize};

use crate::aggregate::TeamAggregate;

/// League-wide scoring baselines. Computed once per batch and treated as an
/// immutable snapshot by the strength and expected-goals stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueAverages {
    pub league: String,
    pub total_goals: u32,
    pub total_matches: u32,
    pub total_home_goals: u32,
    pub total_home_matches: u32,
    pub total_away_goals: u32,
    pub total_away_matches: u32,
    pub avg_goals: Option<f64>,
    pub avg_home_goals: Option<f64>,
    pub avg_away_goals: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct LeagueNormalization {
    pub averages: LeagueAverages,
    /// Teams left out of the sums because they have no played matches.
    /// Reported, not fatal to the league.
    pub excluded: Vec<String>,
}

pub fn compute_league_averages(league: &str, aggregates: &[&TeamAggregate]) -> LeagueNormalization {
    let mut out = LeagueAverages {
        league: league.to_string(),
        ..Default::default()
    };
    let mut excluded = Vec::new();

    for agg in aggregates {
        if agg.league != league {
            continue;
        }
        if agg.overall.matches_played == 0 {
            excluded.push(agg.team_id.clone());
            continue;
        }
        out.total_goals += agg.overall.scored;
        out.total_matches += agg.overall.matches_played;
        out.total_home_goals += agg.home.scored;
        out.total_home_matches += agg.home.matches_played;
        out.total_away_goals += agg.away.scored;
        out.total_away_matches += agg.away.matches_played;
    }

    out.avg_goals = ratio(out.total_goals, out.total_matches);
    out.avg_home_goals = ratio(out.total_home_goals, out.total_home_matches);
    out.avg_away_goals = ratio(out.total_away_goals, out.total_away_matches);

    LeagueNormalization {
        averages: out,
        excluded,
    }
}

fn ratio(goals: u32, matches: u32) -> Option<f64> {
    // Denominator is validated here so no caller ever divides by zero.
    if matches == 0 {
        None
    } else {
        Some(goals as f64 / matches as f64)
    }
}
