use super::types::EloRating;

/// Expected score of A against B on the logistic curve
pub fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

/// Pairwise ELO update. `score_a` is 1 for a win by A, 0.5 for a draw and
/// 0 for a loss; both ratings are rounded back to integers.
pub fn update(rating_a: EloRating, rating_b: EloRating, score_a: f64, k_factor: f64) -> (EloRating, EloRating) {
    let expected_a = expected_score(rating_a as f64, rating_b as f64);
    let delta = (k_factor * (score_a - expected_a)).round() as EloRating;

    (rating_a + delta, rating_b - delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const K: f64 = 32.0;

    #[test]
    fn test_win_between_equals_moves_half_k() {
        assert_eq!(update(1500, 1500, 1.0, K), (1516, 1484));
        assert_eq!(update(1500, 1500, 0.0, K), (1484, 1516));
    }

    #[test]
    fn test_draw_between_equals_changes_nothing() {
        assert_eq!(update(1500, 1500, 0.5, K), (1500, 1500));
    }

    #[test]
    fn test_upset_moves_more_than_expected_win() {
        let (underdog, _) = update(1400, 1600, 1.0, K);
        let (favourite, _) = update(1600, 1400, 1.0, K);
        assert!(underdog - 1400 > favourite - 1600);
    }

    proptest! {
        #[test]
        fn equal_ratings_are_zero_sum(rating in 800i32..2400, score in prop::sample::select(vec![0.0, 0.5, 1.0])) {
            let (a, b) = update(rating, rating, score, K);
            prop_assert_eq!(a - rating, rating - b);
        }

        #[test]
        fn any_pairing_is_zero_sum(a in 800i32..2400, b in 800i32..2400, score in prop::sample::select(vec![0.0, 0.5, 1.0])) {
            let (new_a, new_b) = update(a, b, score, K);
            prop_assert_eq!(new_a + new_b, a + b);
        }
    }
}
