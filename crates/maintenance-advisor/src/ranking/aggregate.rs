use super::error::ComputationError;
use super::matrix::DecisionMatrix;
use crate::criteria::{CriteriaSet, Polarity};

/// Per-alternative weighted benefit (`S+`) and cost (`S-`) accumulators, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct PolaritySums {
    pub s_plus: Vec<f64>,
    pub s_minus: Vec<f64>,
}

pub fn weigh(
    normalized: &DecisionMatrix,
    criteria: &CriteriaSet,
) -> Result<DecisionMatrix, ComputationError> {
    normalized.map_columns("weighting", &criteria.weights(), |value, weight| {
        value * weight
    })
}

pub fn split_by_polarity(
    weighted: &DecisionMatrix,
    criteria: &CriteriaSet,
) -> Result<PolaritySums, ComputationError> {
    weighted.ensure_shape("aggregation", weighted.rows(), criteria.len())?;
    let polarities = criteria.polarities();

    let mut s_plus = Vec::with_capacity(weighted.rows());
    let mut s_minus = Vec::with_capacity(weighted.rows());
    for row in 0..weighted.rows() {
        let (mut benefit, mut cost) = (0.0, 0.0);
        for (value, polarity) in weighted.row(row).iter().zip(&polarities) {
            match polarity {
                Polarity::Benefit => benefit += value,
                Polarity::Cost => cost += value,
            }
        }
        s_plus.push(benefit);
        s_minus.push(cost);
    }

    Ok(PolaritySums { s_plus, s_minus })
}
