//! Score-gap result cutoff (dynamic-k).
//!
//! Instead of a fixed result count, the cut happens at the first position
//! where the score drop relative to the top score exceeds the configured
//! threshold. Easy queries return a short, confident head; ambiguous ones
//! keep more candidates.

use sift_core::config::DynamicKPolicy;

/// How many of the (descending-sorted) scores to keep.
pub fn cut_length(scores: &[f64], policy: &DynamicKPolicy) -> usize {
    let limit = scores.len().min(policy.max_results);
    if limit <= policy.min_results {
        return limit;
    }

    let top = scores[0];
    if top <= 0.0 {
        return limit;
    }

    for i in policy.min_results..limit {
        let drop = (top - scores[i]) / top;
        if drop > policy.cutoff {
            return i;
        }
    }
    limit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(cutoff: f64, min: usize, max: usize) -> DynamicKPolicy {
        DynamicKPolicy {
            enabled: true,
            cutoff,
            min_results: min,
            max_results: max,
        }
    }

    #[test]
    fn cuts_at_first_cliff() {
        let scores = [1.0, 0.95, 0.9, 0.2, 0.1];
        assert_eq!(cut_length(&scores, &policy(0.5, 1, 10)), 3);
    }

    #[test]
    fn flat_scores_keep_everything_up_to_max() {
        let scores = [1.0, 0.99, 0.98, 0.97];
        assert_eq!(cut_length(&scores, &policy(0.5, 1, 10)), 4);
    }

    #[test]
    fn max_results_caps_the_tail() {
        let scores = [1.0, 0.99, 0.98, 0.97, 0.96];
        assert_eq!(cut_length(&scores, &policy(0.5, 1, 3)), 3);
    }

    #[test]
    fn min_results_survive_even_past_a_cliff() {
        let scores = [1.0, 0.1, 0.05];
        assert_eq!(cut_length(&scores, &policy(0.5, 2, 10)), 2);
    }

    #[test]
    fn fewer_scores_than_min_returns_all() {
        let scores = [1.0];
        assert_eq!(cut_length(&scores, &policy(0.5, 3, 10)), 1);
    }
}
