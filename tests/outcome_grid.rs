use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use xg_value::odds::fair_odds;
use xg_value::outcome_probs::{outcome_probs, poisson_pmf};

const LINES: [f64; 6] = [0.5, 1.5, 2.5, 3.5, 4.5, 5.5];

#[test]
fn three_way_split_is_complete_for_realistic_lambdas() {
    // At the default cutoff of 10 the combined truncated tail stays below
    // 1e-6 for the lambdas typical fixtures produce (~5.7e-7 with 1.4 goals
    // a side; tail mass roughly doubles per extra tenth of a goal).
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let lambda_home = rng.gen_range(0.0..1.4);
        let lambda_away = rng.gen_range(0.0..1.4);
        let probs = outcome_probs(lambda_home, lambda_away, 10, &LINES).unwrap();
        let sum = probs.home_win + probs.draw + probs.away_win;
        assert!(
            (sum - 1.0).abs() < 1e-6,
            "lambdas ({lambda_home}, {lambda_away}) summed to {sum}"
        );
    }
}

#[test]
fn widened_grid_holds_the_bound_for_extreme_lambdas() {
    // Freak scorelines push lambda toward 5; a cutoff of 20 keeps the tail
    // below 1e-6 across that whole range.
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..200 {
        let lambda_home = rng.gen_range(0.0..5.0);
        let lambda_away = rng.gen_range(0.0..5.0);
        let probs = outcome_probs(lambda_home, lambda_away, 20, &LINES).unwrap();
        let sum = probs.home_win + probs.draw + probs.away_win;
        assert!(
            (sum - 1.0).abs() < 1e-6,
            "lambdas ({lambda_home}, {lambda_away}) summed to {sum}"
        );
    }
}

#[test]
fn totals_pairs_sum_to_exactly_one() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let lambda_home = rng.gen_range(0.0..6.0);
        let lambda_away = rng.gen_range(0.0..6.0);
        let probs = outcome_probs(lambda_home, lambda_away, 10, &LINES).unwrap();
        for t in &probs.totals {
            // Exact complement, not two independent sums.
            assert_eq!(
                t.over + t.under,
                1.0,
                "line {} at ({lambda_home}, {lambda_away})",
                t.line
            );
        }
    }
}

#[test]
fn zero_lambda_is_a_point_mass_at_zero_goals() {
    let pmf = poisson_pmf(0.0, 10);
    assert_eq!(pmf[0], 1.0);
    for (k, &p) in pmf.iter().enumerate().skip(1) {
        assert_eq!(p, 0.0, "P({k}; 0) should be 0");
    }
}

#[test]
fn home_win_is_strictly_monotone_in_home_lambda() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..100 {
        let lambda_away = rng.gen_range(0.1..4.0);
        let base = rng.gen_range(0.1..4.0);
        let lo = outcome_probs(base, lambda_away, 10, &LINES).unwrap();
        let hi = outcome_probs(base + 0.25, lambda_away, 10, &LINES).unwrap();
        assert!(
            hi.home_win > lo.home_win,
            "home_win not increasing at ({base}, {lambda_away})"
        );
        assert!(
            hi.away_win <= lo.away_win,
            "away_win increased at ({base}, {lambda_away})"
        );
    }
}

#[test]
fn fair_odds_invert_probabilities() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..200 {
        let prob = rng.gen_range(1e-6..1.0);
        let odds = fair_odds(prob).unwrap();
        assert!((odds * prob - 1.0).abs() < 1e-9);
    }
    assert_eq!(fair_odds(0.0), None);
}

#[test]
fn larger_cutoff_only_adds_tail_mass() {
    // Widening the grid can only move truncated mass into the counted
    // outcomes; nothing already counted changes.
    let narrow = outcome_probs(2.4, 1.9, 10, &LINES).unwrap();
    let wide = outcome_probs(2.4, 1.9, 14, &LINES).unwrap();
    assert!(wide.home_win >= narrow.home_win);
    assert!(wide.draw >= narrow.draw);
    assert!(wide.away_win >= narrow.away_win);
    let narrow_sum = narrow.home_win + narrow.draw + narrow.away_win;
    let wide_sum = wide.home_win + wide.draw + wide.away_win;
    assert!(wide_sum >= narrow_sum);
    assert!((wide_sum - 1.0).abs() < 1e-7);
}
