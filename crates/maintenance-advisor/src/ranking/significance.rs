use super::aggregate::PolaritySums;
use super::error::ComputationError;
use tracing::debug;

/// Relative significance `Q` per alternative plus the scalars that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Significance {
    pub q: Vec<f64>,
    pub inv_s_minus: Vec<f64>,
    pub sum_s_minus: f64,
    pub sum_inv_s_minus: f64,
}

/// Complex proportional assessment of each alternative:
///
/// ```text
/// Q[i] = S+[i] + sum(S-) / (S-[i] * sum(1 / S-))
/// ```
///
/// Reciprocals of a zero cost share are taken as zero, and an alternative whose own cost share
/// is zero receives no redistribution term.
pub fn relative_significance(
    names: &[String],
    sums: &PolaritySums,
) -> Result<Significance, ComputationError> {
    let PolaritySums { s_plus, s_minus } = sums;
    if s_plus.len() != names.len() || s_minus.len() != names.len() {
        return Err(ComputationError::ShapeMismatch {
            stage: "significance",
            expected_rows: names.len(),
            expected_cols: 2,
            rows: s_plus.len().max(s_minus.len()),
            cols: 2,
        });
    }

    if let Some((name, value)) = names
        .iter()
        .zip(s_minus)
        .find(|(_, value)| **value < 0.0)
    {
        return Err(ComputationError::NegativeCost {
            alternative: name.clone(),
            value: *value,
        });
    }

    let sum_s_minus: f64 = s_minus.iter().sum();
    if !sum_s_minus.is_finite() {
        return Err(ComputationError::NonFiniteAggregate {
            quantity: "sum of S-",
        });
    }

    let mut inv_s_minus = Vec::with_capacity(names.len());
    for (name, value) in names.iter().zip(s_minus) {
        let inverse = if *value != 0.0 { 1.0 / value } else { 0.0 };
        if !inverse.is_finite() {
            return Err(ComputationError::NonFinite {
                alternative: name.clone(),
                quantity: "1/S-",
            });
        }
        inv_s_minus.push(inverse);
    }

    let sum_inv_s_minus: f64 = inv_s_minus.iter().sum();
    if !sum_inv_s_minus.is_finite() {
        return Err(ComputationError::NonFiniteAggregate {
            quantity: "sum of 1/S-",
        });
    }

    let mut q = Vec::with_capacity(names.len());
    for ((name, plus), minus) in names.iter().zip(s_plus).zip(s_minus) {
        let redistributed = if sum_inv_s_minus > 0.0 && *minus != 0.0 {
            sum_s_minus / (minus * sum_inv_s_minus)
        } else {
            debug!(alternative = %name, "zero cost share, redistribution term set to 0");
            0.0
        };

        let value = plus + redistributed;
        if !value.is_finite() {
            return Err(ComputationError::NonFinite {
                alternative: name.clone(),
                quantity: "Q",
            });
        }
        q.push(value);
    }

    Ok(Significance {
        q,
        inv_s_minus,
        sum_s_minus,
        sum_inv_s_minus,
    })
}
