use serde::{Deserialize, Serialize};

use crate::outcome_probs::OutcomeProbs;
use crate::strength::ModelVariant;

/// Market-quoted decimal odds for one fixture, supplied by the caller.
/// Everything is optional; the model prices whatever the market covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketOdds {
    #[serde(default)]
    pub home_win: Option<f64>,
    #[serde(default)]
    pub draw: Option<f64>,
    #[serde(default)]
    pub away_win: Option<f64>,
    #[serde(default)]
    pub totals: Vec<MarketTotal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketTotal {
    pub line: f64,
    #[serde(default)]
    pub over: Option<f64>,
    #[serde(default)]
    pub under: Option<f64>,
}

/// One outcome priced by the model, with the market comparison when a quote
/// exists. `value` is None for outcomes the market does not price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricedOutcome {
    pub prob: f64,
    pub fair_odds: Option<f64>,
    pub market_odds: Option<f64>,
    pub value: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedTotal {
    pub line: f64,
    pub over: PricedOutcome,
    pub under: PricedOutcome,
}

/// Model output for one fixture under one variant. A pure value; callers
/// decide whether and where to persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOdds {
    pub variant: ModelVariant,
    pub lambda_home: f64,
    pub lambda_away: f64,
    pub home_win: PricedOutcome,
    pub draw: PricedOutcome,
    pub away_win: PricedOutcome,
    pub totals: Vec<PricedTotal>,
}

/// Breakeven decimal odds for a probability. Zero-probability outcomes are a
/// legitimate model result at extreme lines, so they price as None rather
/// than erroring.
pub fn fair_odds(prob: f64) -> Option<f64> {
    if prob > 0.0 { Some(1.0 / prob) } else { None }
}

/// True iff the market pays more than the model's breakeven price.
pub fn value_flag(market_odds: f64, fair: Option<f64>) -> bool {
    fair.map_or(false, |fair| market_odds > fair)
}

/// Two-decimal display rounding, as quoted odds are conventionally shown.
/// Value detection always uses the unrounded price.
pub fn round2(odds: f64) -> f64 {
    (odds * 100.0).round() / 100.0
}

pub fn price_outcome(prob: f64, market_odds: Option<f64>) -> PricedOutcome {
    let fair = fair_odds(prob);
    PricedOutcome {
        prob,
        fair_odds: fair,
        market_odds,
        value: market_odds.map(|market| value_flag(market, fair)),
    }
}

/// Attach fair odds and market comparisons to a computed outcome grid.
pub fn price_match(
    variant: ModelVariant,
    lambda_home: f64,
    lambda_away: f64,
    probs: &OutcomeProbs,
    market: Option<&MarketOdds>,
) -> MatchOdds {
    let quote = |get: fn(&MarketOdds) -> Option<f64>| market.and_then(get);

    let totals = probs
        .totals
        .iter()
        .map(|t| {
            // Match market lines on the half-goal grid; exact equality is
            // fine for half-integers.
            let market_line = market.and_then(|m| m.totals.iter().find(|mt| mt.line == t.line));
            PricedTotal {
                line: t.line,
                over: price_outcome(t.over, market_line.and_then(|m| m.over)),
                under: price_outcome(t.under, market_line.and_then(|m| m.under)),
            }
        })
        .collect();

    MatchOdds {
        variant,
        lambda_home,
        lambda_away,
        home_win: price_outcome(probs.home_win, quote(|m| m.home_win)),
        draw: price_outcome(probs.draw, quote(|m| m.draw)),
        away_win: price_outcome(probs.away_win, quote(|m| m.away_win)),
        totals,
    }
}
