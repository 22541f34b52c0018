//! Hypergeometric engine for card-draw odds.
//!
//! Exact probability mass over draws without replacement, plus a smoothing
//! transform that approximates the hand-quality bias of keeping the best of
//! several dealt hands. The smoothing constants are empirically tuned; the
//! transform promises self-consistency (non-negative, sums to one), not a
//! first-principles derivation.

use crate::constants::{OPENING_HAND_SIZE, SMOOTHING_WEIGHT_BASE, SMOOTHING_WEIGHT_EXPONENT};
use crate::numbers::u64_to_f64;

/// Binomial coefficient via the multiplicative running product, iterating
/// over the smaller of `r` and `n - r` to bound loop count and float error.
/// Invalid `r` (negative or exceeding `n`) yields 0; the trivial edges
/// yield 1.
#[must_use]
pub fn combinations(n: u64, r: i64) -> f64 {
    if r < 0 {
        return 0.0;
    }
    let r = u64::try_from(r).unwrap_or(0);
    if r > n {
        return 0.0;
    }
    let r = r.min(n - r);
    if r == 0 {
        return 1.0;
    }
    let mut acc = 1.0_f64;
    for i in 0..r {
        acc = acc * u64_to_f64(n - i) / u64_to_f64(i + 1);
    }
    acc
}

/// Exact probability of drawing exactly `k` successes in `draws` cards from
/// a population of `population` containing `successes` successes. Zero
/// outside the valid support.
#[must_use]
pub fn pmf(k: u64, population: u64, successes: u64, draws: u64) -> f64 {
    if successes > population || draws > population {
        return 0.0;
    }
    let total = combinations(population, as_i64(draws));
    if total == 0.0 {
        return 0.0;
    }
    let hits = combinations(successes, as_i64(k));
    let misses = combinations(population - successes, as_i64(draws) - as_i64(k));
    hits * misses / total
}

/// Probability mass over `0..=min(draws, successes)` successes; sums to one
/// within floating-point tolerance.
#[must_use]
pub fn distribution(draws: u64, successes: u64, population: u64) -> Vec<f64> {
    (0..=draws.min(successes))
        .map(|k| pmf(k, population, successes, draws))
        .collect()
}

/// Tail probability of drawing at least `x` successes.
#[must_use]
pub fn at_least(x: u64, draws: u64, successes: u64, population: u64) -> f64 {
    (x..=draws.min(successes))
        .map(|k| pmf(k, population, successes, draws))
        .sum()
}

/// Expected successes in hand; the peak of the smoothing weight.
fn expected_successes(draws: u64, successes: u64, population: u64) -> f64 {
    if population == 0 {
        return 0.0;
    }
    u64_to_f64(draws) * u64_to_f64(successes) / u64_to_f64(population)
}

fn smoothing_weights(len: usize, mean: f64) -> Vec<f64> {
    (0..len)
        .map(|k| {
            let distance = (u64_to_f64(k as u64) - mean).abs();
            1.0 / (SMOOTHING_WEIGHT_BASE + distance.powf(SMOOTHING_WEIGHT_EXPONENT))
        })
        .collect()
}

/// Soft best-of-three redistribution: for every triple of independently
/// dealt hands, the joint probability is split among the three outcomes in
/// proportion to their weights. A soft weighted mixture, not a hard argmax.
fn redistribute_best_of_three(dist: &[f64], weights: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; dist.len()];
    for i in 0..dist.len() {
        if dist[i] == 0.0 {
            continue;
        }
        for j in 0..dist.len() {
            for l in 0..dist.len() {
                let joint = dist[i] * dist[j] * dist[l];
                if joint == 0.0 {
                    continue;
                }
                let total = weights[i] + weights[j] + weights[l];
                out[i] += joint * weights[i] / total;
                out[j] += joint * weights[j] / total;
                out[l] += joint * weights[l] / total;
            }
        }
    }
    out
}

/// Exact distribution reshaped by the best-of-three-hands heuristic.
#[must_use]
pub fn distribution_with_smoothing(draws: u64, successes: u64, population: u64) -> Vec<f64> {
    let dist = distribution(draws, successes, population);
    let weights = smoothing_weights(dist.len(), expected_successes(draws, successes, population));
    redistribute_best_of_three(&dist, &weights)
}

/// Smoothing applied only to the opening hand: the first seven draws get the
/// best-of-three bias, later draws extend each hand with the exact
/// conditional distribution over the remaining population.
#[must_use]
pub fn distribution_with_smoothing7(draws: u64, successes: u64, population: u64) -> Vec<f64> {
    let hand_size = u64::from(OPENING_HAND_SIZE);
    if draws <= hand_size || population <= hand_size {
        return distribution_with_smoothing(draws, successes, population);
    }

    let hand = distribution_with_smoothing(hand_size, successes, population);
    let mut out = vec![0.0; usize::try_from(draws.min(successes)).unwrap_or(0) + 1];
    for (in_hand, hand_p) in hand.iter().enumerate() {
        if *hand_p == 0.0 {
            continue;
        }
        let in_hand = in_hand as u64;
        let rest = distribution(
            draws - hand_size,
            successes - in_hand,
            population - hand_size,
        );
        for (later, rest_p) in rest.iter().enumerate() {
            let k = usize::try_from(in_hand).unwrap_or(0) + later;
            if let Some(slot) = out.get_mut(k) {
                *slot += hand_p * rest_p;
            }
        }
    }
    out
}

fn as_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn assert_sums_to_one(dist: &[f64]) {
        let sum: f64 = dist.iter().sum();
        assert!((sum - 1.0).abs() < TOLERANCE, "sum was {sum}");
        assert!(dist.iter().all(|p| *p >= 0.0));
    }

    #[test]
    fn combinations_handles_edges() {
        assert!((combinations(10, 0) - 1.0).abs() < TOLERANCE);
        assert!((combinations(10, 10) - 1.0).abs() < TOLERANCE);
        assert!(combinations(10, -1).abs() < TOLERANCE);
        assert!(combinations(10, 11).abs() < TOLERANCE);
        assert!((combinations(5, 2) - 10.0).abs() < TOLERANCE);
        assert!((combinations(52, 5) - 2_598_960.0).abs() < 1e-3);
    }

    #[test]
    fn combinations_are_symmetric() {
        for r in 0..=60 {
            let lhs = combinations(60, r);
            let rhs = combinations(60, 60 - r);
            assert!((lhs - rhs).abs() < lhs.abs().max(1.0) * 1e-12);
        }
    }

    #[test]
    fn pmf_is_zero_outside_support() {
        // Can't draw more successes than exist, or than cards drawn.
        assert!(pmf(8, 60, 24, 7).abs() < TOLERANCE);
        assert!(pmf(5, 60, 4, 7).abs() < TOLERANCE);
        assert!(pmf(30, 60, 24, 7).abs() < TOLERANCE);
    }

    #[test]
    fn distribution_sums_to_one() {
        assert_sums_to_one(&distribution(7, 24, 60));
        assert_sums_to_one(&distribution(10, 17, 40));
        assert_sums_to_one(&distribution(7, 3, 60));
    }

    #[test]
    fn at_least_complements_the_lower_tail() {
        let everything = at_least(0, 7, 24, 60);
        assert!((everything - 1.0).abs() < TOLERANCE);
        let none = pmf(0, 60, 24, 7);
        assert!((at_least(1, 7, 24, 60) - (1.0 - none)).abs() < TOLERANCE);
    }

    #[test]
    fn smoothing_is_self_consistent() {
        let smoothed = distribution_with_smoothing(7, 24, 60);
        assert_sums_to_one(&smoothed);
        assert_eq!(smoothed.len(), distribution(7, 24, 60).len());
    }

    #[test]
    fn smoothing_pulls_mass_toward_the_mean() {
        let exact = distribution(7, 24, 60);
        let smoothed = distribution_with_smoothing(7, 24, 60);
        // Mean is 7*24/60 = 2.8; the peak bucket should gain mass.
        assert!(smoothed[3] > exact[3]);
        assert!(smoothed[0] < exact[0]);
    }

    #[test]
    fn smoothing7_extends_past_the_opening_hand() {
        let smoothed = distribution_with_smoothing7(10, 24, 60);
        assert_sums_to_one(&smoothed);
        assert_eq!(smoothed.len(), 11);

        // At or below seven draws the plain transform applies.
        let hand_only = distribution_with_smoothing7(7, 24, 60);
        let plain = distribution_with_smoothing(7, 24, 60);
        assert_eq!(hand_only, plain);
    }
}
