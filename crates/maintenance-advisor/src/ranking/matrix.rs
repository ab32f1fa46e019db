use super::error::{ComputationError, ConfigurationError};
use crate::catalog::Alternative;
use crate::criteria::CriteriaSet;

/// Row-major alternatives x criteria table with a fixed shape.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl DecisionMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>, cols: usize) -> Result<Self, ComputationError> {
        let row_count = rows.len();
        let mut values = Vec::with_capacity(row_count * cols);
        for row in rows {
            if row.len() != cols {
                return Err(ComputationError::ShapeMismatch {
                    stage: "decision matrix",
                    expected_rows: row_count,
                    expected_cols: cols,
                    rows: row_count,
                    cols: row.len(),
                });
            }
            values.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols,
            values,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for row in 0..self.rows {
            for (sum, value) in sums.iter_mut().zip(self.row(row)) {
                *sum += value;
            }
        }
        sums
    }

    /// Applies `f(value, column_factor)` elementwise; `factors` must hold one entry per column.
    pub fn map_columns(
        &self,
        stage: &'static str,
        factors: &[f64],
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self, ComputationError> {
        if factors.len() != self.cols {
            return Err(ComputationError::ShapeMismatch {
                stage,
                expected_rows: self.rows,
                expected_cols: self.cols,
                rows: self.rows,
                cols: factors.len(),
            });
        }

        let values = self
            .values
            .chunks(self.cols.max(1))
            .flat_map(|row| row.iter().zip(factors).map(|(value, factor)| f(*value, *factor)))
            .collect();

        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            values,
        })
    }

    pub fn ensure_shape(
        &self,
        stage: &'static str,
        rows: usize,
        cols: usize,
    ) -> Result<(), ComputationError> {
        if self.rows == rows && self.cols == cols {
            Ok(())
        } else {
            Err(ComputationError::ShapeMismatch {
                stage,
                expected_rows: rows,
                expected_cols: cols,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|row| self.row(row).to_vec()).collect()
    }
}

/// Lays out `alternatives` (rows, catalog order) against `criteria` (columns, declaration order).
pub fn build_decision_matrix(
    criteria: &CriteriaSet,
    alternatives: &[Alternative],
) -> Result<DecisionMatrix, ConfigurationError> {
    if alternatives.is_empty() {
        return Err(ConfigurationError::EmptyAlternatives);
    }

    let mut rows = Vec::with_capacity(alternatives.len());
    for alternative in alternatives {
        alternative.validate_against(criteria)?;
        let row = criteria
            .iter()
            .map(|(_, criterion)| {
                alternative
                    .attributes
                    .get(&criterion.key)
                    .copied()
                    .ok_or_else(|| ConfigurationError::MissingAttribute {
                        alternative: alternative.name.clone(),
                        key: criterion.key.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    Ok(DecisionMatrix {
        rows: alternatives.len(),
        cols: criteria.len(),
        values: rows.into_iter().flatten().collect(),
    })
}
