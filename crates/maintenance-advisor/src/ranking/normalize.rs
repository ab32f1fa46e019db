use super::error::ComputationError;
use super::matrix::DecisionMatrix;
use tracing::debug;

/// Column-wise proportional normalization.
///
/// Returns the column sums actually used as divisors alongside the normalized matrix. A column
/// summing to zero is divided by one instead, so every entry in it normalizes to zero. A column
/// whose sum overflows is rejected.
pub fn normalize(matrix: &DecisionMatrix) -> Result<(Vec<f64>, DecisionMatrix), ComputationError> {
    let col_sums = matrix
        .column_sums()
        .into_iter()
        .enumerate()
        .map(|(column, sum)| {
            if !sum.is_finite() {
                Err(ComputationError::NonFiniteColumnSum { column })
            } else if sum == 0.0 {
                debug!(column, "zero column sum, substituting divisor 1");
                Ok(1.0)
            } else {
                Ok(sum)
            }
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let normalized = matrix.map_columns("normalization", &col_sums, |value, sum| value / sum)?;
    Ok((col_sums, normalized))
}
