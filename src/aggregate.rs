use serde::{Deserialize, Serialize};

use crate::history::{MatchRecord, MatchResult, TeamHistory, Venue};

/// Cumulative totals plus derived per-match averages for one venue split.
/// Averages stay `None` rather than zero while no matches have been played.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitRecord {
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub scored: u32,
    pub conceded: u32,
    pub xg: f64,
    pub xga: f64,
    pub av_goals: Option<f64>,
    pub av_goals_conceded: Option<f64>,
    pub av_xg: Option<f64>,
    pub av_xg_conceded: Option<f64>,
}

impl SplitRecord {
    fn add(&mut self, record: &MatchRecord) {
        // A record missing a metric still counts as a played match; it just
        // contributes nothing to that metric's sum.
        self.matches_played += 1;
        if let Some(goals) = record.scored {
            self.scored += goals;
        }
        if let Some(goals) = record.conceded {
            self.conceded += goals;
        }
        if let Some(xg) = record.xg {
            self.xg += xg;
        }
        if let Some(xga) = record.xga {
            self.xga += xga;
        }
        match record.result {
            Some(MatchResult::Win) => self.wins += 1,
            Some(MatchResult::Draw) => self.draws += 1,
            Some(MatchResult::Loss) => self.losses += 1,
            None => {}
        }
    }

    fn finish(&mut self) {
        if self.matches_played == 0 {
            return;
        }
        let n = self.matches_played as f64;
        self.av_goals = Some(self.scored as f64 / n);
        self.av_goals_conceded = Some(self.conceded as f64 / n);
        self.av_xg = Some(self.xg / n);
        self.av_xg_conceded = Some(self.xga / n);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAggregate {
    pub team_id: String,
    pub league: String,
    pub overall: SplitRecord,
    pub home: SplitRecord,
    pub away: SplitRecord,
}

/// Fold a team's full match history into overall/home/away records in a
/// single pass. A pure function of the record set, so re-running it after
/// re-ingestion can never double-count.
pub fn aggregate_history(team: &TeamHistory) -> TeamAggregate {
    let mut overall = SplitRecord::default();
    let mut home = SplitRecord::default();
    let mut away = SplitRecord::default();

    for record in &team.matches {
        overall.add(record);
        match record.venue {
            Venue::Home => home.add(record),
            Venue::Away => away.add(record),
        }
    }

    overall.finish();
    home.finish();
    away.finish();

    TeamAggregate {
        team_id: team.team_id.clone(),
        league: team.league.clone(),
        overall,
        home,
        away,
    }
}
