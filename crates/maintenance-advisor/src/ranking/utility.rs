use tracing::debug;

/// Utilities closer than this are ranked as ties and keep catalog order.
pub const UTILITY_TIE_TOLERANCE: f64 = 1e-9;

/// Scales significance scores to 0..=100 against the largest one.
///
/// Returns `(Q_max, utilities)`. When `Q_max` is zero every utility is zero.
pub fn scale(q: &[f64]) -> (f64, Vec<f64>) {
    let q_max = q.iter().copied().fold(0.0_f64, f64::max);
    if q_max > 0.0 {
        (q_max, q.iter().map(|value| value / q_max * 100.0).collect())
    } else {
        debug!("all significance scores are zero");
        (q_max, vec![0.0; q.len()])
    }
}

/// Row indices ordered by descending utility.
///
/// Rows within [`UTILITY_TIE_TOLERANCE`] of the highest utility in their run form one tie group
/// and are emitted in input order.
pub fn rank_order(utilities: &[f64]) -> Vec<usize> {
    let mut by_utility: Vec<usize> = (0..utilities.len()).collect();
    by_utility.sort_by(|left, right| utilities[*right].total_cmp(&utilities[*left]));

    let mut order = Vec::with_capacity(utilities.len());
    let mut group: Vec<usize> = Vec::new();
    let mut anchor = 0.0;
    for row in by_utility {
        if group.is_empty() || anchor - utilities[row] > UTILITY_TIE_TOLERANCE {
            group.sort_unstable();
            order.append(&mut group);
            anchor = utilities[row];
        }
        group.push(row);
    }
    group.sort_unstable();
    order.append(&mut group);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_alternative_scores_exactly_one_hundred() {
        let (q_max, utilities) = scale(&[0.75, 0.25]);
        assert_eq!(q_max, 0.75);
        assert_eq!(utilities[0], 100.0);
        assert!((utilities[1] - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_scores_produce_zero_utilities() {
        let (q_max, utilities) = scale(&[0.0, 0.0, 0.0]);
        assert_eq!(q_max, 0.0);
        assert_eq!(utilities, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn ranks_descending() {
        assert_eq!(rank_order(&[20.0, 100.0, 55.5]), vec![1, 2, 0]);
    }

    #[test]
    fn ties_preserve_input_order() {
        assert_eq!(rank_order(&[50.0, 100.0, 50.0, 100.0]), vec![1, 3, 0, 2]);
        assert_eq!(rank_order(&[80.0, 80.0 + 1e-12, 90.0]), vec![2, 0, 1]);
    }

    #[test]
    fn near_equal_utilities_straddling_a_rounding_boundary_tie() {
        assert_eq!(rank_order(&[80.000_000_000_4, 80.000_000_000_6]), vec![0, 1]);
        assert_eq!(
            rank_order(&[10.0, 80.000_000_000_4, 80.000_000_000_6, 95.0]),
            vec![3, 1, 2, 0]
        );
    }

    #[test]
    fn gaps_wider_than_tolerance_still_order_by_utility() {
        assert_eq!(rank_order(&[80.0, 80.000_01]), vec![1, 0]);
    }
}
