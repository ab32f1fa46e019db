use super::aggregate::PolaritySums;
use super::matrix::DecisionMatrix;
use super::significance::Significance;
use crate::catalog::Alternative;
use crate::criteria::CriteriaSet;
use serde::{Deserialize, Serialize};

/// Every intermediate of one ranking run, in catalog order, for audit and report rendering.
///
/// Field names are consumed by downstream report templates and must stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub matrix_raw: Vec<Vec<f64>>,
    pub col_sums: Vec<f64>,
    pub matrix_norm: Vec<Vec<f64>>,
    pub matrix_weighted: Vec<Vec<f64>>,
    pub criteria_keys: Vec<String>,
    pub criteria_labels: Vec<String>,
    pub weights: Vec<f64>,
    pub alternatives_names: Vec<String>,
    #[serde(rename = "S_plus")]
    pub s_plus: Vec<f64>,
    #[serde(rename = "S_minus")]
    pub s_minus: Vec<f64>,
    #[serde(rename = "inv_S_minus")]
    pub inv_s_minus: Vec<f64>,
    #[serde(rename = "Q")]
    pub q: Vec<f64>,
    pub utility: Vec<f64>,
    #[serde(rename = "sum_S_minus")]
    pub sum_s_minus: f64,
    #[serde(rename = "sum_inv_S_minus")]
    pub sum_inv_s_minus: f64,
    #[serde(rename = "Q_max")]
    pub q_max: f64,
}

/// Borrowed stage outputs gathered by the engine before they are copied into a trace.
pub(crate) struct TraceInputs<'a> {
    pub criteria: &'a CriteriaSet,
    pub alternatives: &'a [Alternative],
    pub raw: &'a DecisionMatrix,
    pub col_sums: &'a [f64],
    pub normalized: &'a DecisionMatrix,
    pub weighted: &'a DecisionMatrix,
    pub sums: &'a PolaritySums,
    pub significance: &'a Significance,
    pub utilities: &'a [f64],
    pub q_max: f64,
}

impl DecisionTrace {
    /// Owns copies of every input so the trace shares nothing with the next run.
    pub(crate) fn capture(inputs: TraceInputs<'_>) -> Self {
        Self {
            matrix_raw: inputs.raw.to_rows(),
            col_sums: inputs.col_sums.to_vec(),
            matrix_norm: inputs.normalized.to_rows(),
            matrix_weighted: inputs.weighted.to_rows(),
            criteria_keys: inputs.criteria.keys(),
            criteria_labels: inputs.criteria.labels(),
            weights: inputs.criteria.weights(),
            alternatives_names: inputs
                .alternatives
                .iter()
                .map(|alternative| alternative.name.clone())
                .collect(),
            s_plus: inputs.sums.s_plus.clone(),
            s_minus: inputs.sums.s_minus.clone(),
            inv_s_minus: inputs.significance.inv_s_minus.clone(),
            q: inputs.significance.q.clone(),
            utility: inputs.utilities.to_vec(),
            sum_s_minus: inputs.significance.sum_s_minus,
            sum_inv_s_minus: inputs.significance.sum_inv_s_minus,
            q_max: inputs.q_max,
        }
    }
}
