use crate::error::ModelError;
use crate::league_averages::LeagueAverages;
use crate::strength::{ModelVariant, StrengthRatio};

/// Expected goals for one fixture: attacker strength x opponent weakness x
/// league baseline, per side. Venue-split variants use the home/away
/// baselines; overall variants share the league-wide baseline.
pub fn expected_goals(
    home: StrengthRatio,
    away: StrengthRatio,
    league: &LeagueAverages,
    variant: ModelVariant,
) -> Result<(f64, f64), ModelError> {
    let (base_home, base_away) = if variant.venue_split() {
        (league.avg_home_goals, league.avg_away_goals)
    } else {
        (league.avg_goals, league.avg_goals)
    };

    let (Some(base_home), Some(base_away)) = (base_home, base_away) else {
        return Err(ModelError::Normalization(format!(
            "league {} is missing the goal baselines for {}",
            league.league,
            variant.key()
        )));
    };

    let inputs = [
        home.attack,
        home.defense,
        away.attack,
        away.defense,
        base_home,
        base_away,
    ];
    if inputs.iter().any(|v| !(*v >= 0.0)) {
        return Err(ModelError::NumericDomain(format!(
            "expected-goals inputs must be non-negative, got {inputs:?}"
        )));
    }

    let lambda_home = home.attack * away.defense * base_home;
    let lambda_away = away.attack * home.defense * base_away;
    Ok((lambda_home, lambda_away))
}
