use serde::{Deserialize, Serialize};

use crate::aggregate::TeamAggregate;
use crate::error::ModelError;
use crate::history::Venue;
use crate::league_averages::LeagueAverages;

/// The four strength-normalization schemes. A closed enum matched
/// exhaustively, so adding a scheme is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelVariant {
    ActualOverall,
    XgOverall,
    ActualHomeAway,
    XgHomeAway,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 4] = [
        ModelVariant::ActualOverall,
        ModelVariant::XgOverall,
        ModelVariant::ActualHomeAway,
        ModelVariant::XgHomeAway,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ModelVariant::ActualOverall => "actual_overall",
            ModelVariant::XgOverall => "xg_overall",
            ModelVariant::ActualHomeAway => "actual_home_away",
            ModelVariant::XgHomeAway => "xg_home_away",
        }
    }

    pub fn from_key(raw: &str) -> Option<ModelVariant> {
        ModelVariant::ALL
            .into_iter()
            .find(|variant| variant.key() == raw.trim().to_ascii_lowercase())
    }

    pub fn venue_split(self) -> bool {
        match self {
            ModelVariant::ActualHomeAway | ModelVariant::XgHomeAway => true,
            ModelVariant::ActualOverall | ModelVariant::XgOverall => false,
        }
    }
}

/// Dimensionless team-over-league ratios, ~0-3 in practice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthRatio {
    pub attack: f64,
    pub defense: f64,
}

/// Attack/defense strengths for one side of a fixture.
///
/// In the home/away variants a team's attack AND defense are both normalized
/// by its own venue's league baseline (home team: home average for scoring
/// and conceding alike). That asymmetry is a deliberate modeling choice
/// carried over from the production model, not scorer/concede symmetry.
pub fn team_strengths(
    agg: &TeamAggregate,
    league: &LeagueAverages,
    variant: ModelVariant,
    venue: Venue,
) -> Result<StrengthRatio, ModelError> {
    let (split, baseline, split_name) = if variant.venue_split() {
        match venue {
            Venue::Home => (&agg.home, league.avg_home_goals, "home"),
            Venue::Away => (&agg.away, league.avg_away_goals, "away"),
        }
    } else {
        (&agg.overall, league.avg_goals, "overall")
    };

    let (av_for, av_against) = match variant {
        ModelVariant::ActualOverall | ModelVariant::ActualHomeAway => {
            (split.av_goals, split.av_goals_conceded)
        }
        ModelVariant::XgOverall | ModelVariant::XgHomeAway => (split.av_xg, split.av_xg_conceded),
    };

    let baseline = match baseline {
        Some(avg) if avg > 0.0 => avg,
        _ => {
            return Err(ModelError::Normalization(format!(
                "league {} has no usable {split_name} goal baseline",
                league.league
            )));
        }
    };

    let (Some(av_for), Some(av_against)) = (av_for, av_against) else {
        return Err(ModelError::MissingData(format!(
            "team {} has no {split_name} averages for {}",
            agg.team_id,
            variant.key()
        )));
    };

    if av_for < 0.0 || av_against < 0.0 {
        return Err(ModelError::NumericDomain(format!(
            "team {} has negative {split_name} averages ({av_for}, {av_against})",
            agg.team_id
        )));
    }

    Ok(StrengthRatio {
        attack: av_for / baseline,
        defense: av_against / baseline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::SplitRecord;

    fn split(av_goals: f64, av_conceded: f64, av_xg: f64, av_xg_conceded: f64) -> SplitRecord {
        SplitRecord {
            matches_played: 10,
            av_goals: Some(av_goals),
            av_goals_conceded: Some(av_conceded),
            av_xg: Some(av_xg),
            av_xg_conceded: Some(av_xg_conceded),
            ..Default::default()
        }
    }

    fn aggregate() -> TeamAggregate {
        TeamAggregate {
            team_id: "team".to_string(),
            league: "EPL".to_string(),
            overall: split(1.5, 1.2, 1.6, 1.1),
            home: split(1.8, 0.9, 2.0, 0.8),
            away: split(1.2, 1.5, 1.2, 1.4),
        }
    }

    fn league() -> LeagueAverages {
        LeagueAverages {
            league: "EPL".to_string(),
            avg_goals: Some(1.4),
            avg_home_goals: Some(1.6),
            avg_away_goals: Some(1.2),
            ..Default::default()
        }
    }

    #[test]
    fn overall_variant_uses_shared_baseline() {
        let s = team_strengths(
            &aggregate(),
            &league(),
            ModelVariant::ActualOverall,
            Venue::Away,
        )
        .unwrap();
        assert!((s.attack - 1.5 / 1.4).abs() < 1e-12);
        assert!((s.defense - 1.2 / 1.4).abs() < 1e-12);
    }

    #[test]
    fn xg_variant_swaps_in_xg_averages() {
        let s = team_strengths(
            &aggregate(),
            &league(),
            ModelVariant::XgOverall,
            Venue::Home,
        )
        .unwrap();
        assert!((s.attack - 1.6 / 1.4).abs() < 1e-12);
        assert!((s.defense - 1.1 / 1.4).abs() < 1e-12);
    }

    #[test]
    fn venue_split_normalizes_both_sides_by_own_venue() {
        // Home side: home split over the home baseline, for attack and
        // defense alike.
        let home = team_strengths(
            &aggregate(),
            &league(),
            ModelVariant::ActualHomeAway,
            Venue::Home,
        )
        .unwrap();
        assert!((home.attack - 1.8 / 1.6).abs() < 1e-12);
        assert!((home.defense - 0.9 / 1.6).abs() < 1e-12);

        // Away side: away split over the away baseline.
        let away = team_strengths(
            &aggregate(),
            &league(),
            ModelVariant::XgHomeAway,
            Venue::Away,
        )
        .unwrap();
        assert!((away.attack - 1.2 / 1.2).abs() < 1e-12);
        assert!((away.defense - 1.4 / 1.2).abs() < 1e-12);
    }

    #[test]
    fn zero_league_average_is_a_normalization_error() {
        let mut league = league();
        league.avg_goals = Some(0.0);
        let err = team_strengths(
            &aggregate(),
            &league,
            ModelVariant::ActualOverall,
            Venue::Home,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Normalization(_)));

        league.avg_home_goals = None;
        let err = team_strengths(
            &aggregate(),
            &league,
            ModelVariant::ActualHomeAway,
            Venue::Home,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::Normalization(_)));
    }

    #[test]
    fn missing_team_averages_are_missing_data() {
        let mut agg = aggregate();
        agg.away = SplitRecord::default();
        let err = team_strengths(
            &agg,
            &league(),
            ModelVariant::ActualHomeAway,
            Venue::Away,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::MissingData(_)));
    }

    #[test]
    fn negative_average_is_a_numeric_domain_error() {
        let mut agg = aggregate();
        agg.overall.av_xg = Some(-0.2);
        let err = team_strengths(&agg, &league(), ModelVariant::XgOverall, Venue::Home)
            .unwrap_err();
        assert!(matches!(err, ModelError::NumericDomain(_)));
    }

    #[test]
    fn variant_keys_round_trip() {
        for variant in ModelVariant::ALL {
            assert_eq!(ModelVariant::from_key(variant.key()), Some(variant));
        }
        assert_eq!(ModelVariant::from_key("nonsense"), None);
    }
}
