//! Multi-criteria ranking of the alternatives configured for one category.
//!
//! A run flows strictly through the stages below, each consuming the previous stage's output:
//! decision matrix, proportional normalization, weighting and polarity split, relative
//! significance, utility scaling and ordering, trace capture. Nothing is cached between runs.

pub mod aggregate;
mod error;
pub mod matrix;
pub mod normalize;
pub mod significance;
pub mod trace;
pub mod utility;

pub use error::{ComputationError, ConfigurationError, RankingError};
pub use trace::DecisionTrace;

use self::trace::TraceInputs;
use crate::catalog::{Alternative, CategoryCatalog};
use crate::criteria::CriteriaSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// One alternative's scores within a single ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub name: String,
    #[serde(flatten)]
    pub payload: BTreeMap<String, Value>,
    #[serde(rename = "S_plus")]
    pub s_plus: f64,
    #[serde(rename = "S_minus")]
    pub s_minus: f64,
    #[serde(rename = "Q")]
    pub q: f64,
    pub utility: f64,
}

/// Output of [`RankingEngine::rank`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    /// Category whose alternatives were ranked (the fallback when one was applied).
    pub category: String,
    pub fallback_applied: bool,
    pub results: Vec<RankedResult>,
    /// Absent only when the category holds no alternatives.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<DecisionTrace>,
}

impl Ranking {
    pub fn top(&self, k: usize) -> &[RankedResult] {
        &self.results[..k.min(self.results.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Ranks `alternatives` against `criteria`, returning results in rank order and the trace.
pub fn rank_alternatives(
    criteria: &CriteriaSet,
    alternatives: &[Alternative],
) -> Result<(Vec<RankedResult>, DecisionTrace), RankingError> {
    let raw = matrix::build_decision_matrix(criteria, alternatives)?;
    let (rows, cols) = (alternatives.len(), criteria.len());
    raw.ensure_shape("decision matrix", rows, cols)?;

    let (col_sums, normalized) = normalize::normalize(&raw)?;
    normalized.ensure_shape("normalization", rows, cols)?;

    let weighted = aggregate::weigh(&normalized, criteria)?;
    weighted.ensure_shape("weighting", rows, cols)?;
    let sums = aggregate::split_by_polarity(&weighted, criteria)?;

    let names: Vec<String> = alternatives.iter().map(|a| a.name.clone()).collect();
    let significance = significance::relative_significance(&names, &sums)?;
    let (q_max, utilities) = utility::scale(&significance.q);

    let results = utility::rank_order(&utilities)
        .into_iter()
        .enumerate()
        .map(|(position, row)| RankedResult {
            rank: position + 1,
            name: alternatives[row].name.clone(),
            payload: alternatives[row].payload.clone(),
            s_plus: sums.s_plus[row],
            s_minus: sums.s_minus[row],
            q: significance.q[row],
            utility: utilities[row],
        })
        .collect();

    let trace = DecisionTrace::capture(TraceInputs {
        criteria,
        alternatives,
        raw: &raw,
        col_sums: &col_sums,
        normalized: &normalized,
        weighted: &weighted,
        sums: &sums,
        significance: &significance,
        utilities: &utilities,
        q_max,
    });

    Ok((results, trace))
}

/// Ranks catalog categories against a fixed criteria table.
///
/// Holds only shared immutable configuration, so one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    criteria: Arc<CriteriaSet>,
    catalog: Arc<CategoryCatalog>,
}

impl RankingEngine {
    pub fn new(
        criteria: Arc<CriteriaSet>,
        catalog: Arc<CategoryCatalog>,
    ) -> Result<Self, ConfigurationError> {
        catalog.validate_against(&criteria)?;
        Ok(Self { criteria, catalog })
    }

    pub fn standard() -> Self {
        Self {
            criteria: Arc::new(CriteriaSet::standard()),
            catalog: Arc::new(CategoryCatalog::standard()),
        }
    }

    pub fn criteria(&self) -> &CriteriaSet {
        &self.criteria
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn rank(&self, category: &str) -> Result<Ranking, RankingError> {
        let (resolved, alternatives) = self.catalog.lookup(category).map_err(|err| {
            warn!(%category, error = %err, "ranking rejected");
            err
        })?;
        let fallback_applied = resolved != category;
        if fallback_applied {
            debug!(%category, fallback = %resolved, "unknown category, using fallback");
        }

        if alternatives.is_empty() {
            debug!(category = %resolved, "category has no alternatives");
            return Ok(Ranking {
                category: resolved.to_string(),
                fallback_applied,
                results: Vec::new(),
                trace: None,
            });
        }

        let (results, trace) = rank_alternatives(&self.criteria, alternatives).map_err(|err| {
            warn!(category = %resolved, error = %err, "ranking failed");
            err
        })?;
        debug!(
            category = %resolved,
            alternatives = results.len(),
            top = results.first().map(|r| r.name.as_str()).unwrap_or_default(),
            "ranking complete"
        );

        Ok(Ranking {
            category: resolved.to_string(),
            fallback_applied,
            results,
            trace: Some(trace),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::{Criterion, Polarity};

    fn two_criteria() -> CriteriaSet {
        CriteriaSet::new(vec![
            Criterion::new("c1", 0.5, Polarity::Benefit, "C1"),
            Criterion::new("c2", 0.5, Polarity::Cost, "C2"),
        ])
        .expect("criteria")
    }

    #[test]
    fn ranked_results_serialize_with_flattened_payload() {
        let alternatives = vec![
            Alternative::new("A", [("c1", 3.0), ("c2", 1.0)]).with_payload("original_price", 35_000),
            Alternative::new("B", [("c1", 1.0), ("c2", 3.0)]).with_payload("original_price", 65_000),
        ];

        let (results, trace) = rank_alternatives(&two_criteria(), &alternatives).expect("ranked");
        let json = serde_json::to_value(&results[0]).expect("serialize");

        assert_eq!(json["name"], "A");
        assert_eq!(json["original_price"], 35_000);
        assert_eq!(json["rank"], 1);
        assert_eq!(json["utility"], 100.0);
        assert!(json.get("S_plus").is_some() && json.get("Q").is_some());

        let trace_json = serde_json::to_value(&trace).expect("serialize trace");
        for field in [
            "matrix_raw",
            "col_sums",
            "matrix_norm",
            "matrix_weighted",
            "criteria_labels",
            "weights",
            "alternatives_names",
            "sum_S_minus",
            "sum_inv_S_minus",
            "Q_max",
        ] {
            assert!(trace_json.get(field).is_some(), "trace missing {field}");
        }
    }

    #[test]
    fn empty_category_ranks_to_nothing() {
        let catalog = CategoryCatalog::standard().with_category("Inspection", Vec::new());
        let engine = RankingEngine::new(Arc::new(CriteriaSet::standard()), Arc::new(catalog))
            .expect("engine");

        let ranking = engine.rank("Inspection").expect("empty ranking");

        assert!(ranking.is_empty());
        assert!(ranking.trace.is_none());
        assert!(ranking.top(3).is_empty());
    }

    #[test]
    fn unknown_category_without_fallback_fails() {
        let error = RankingEngine::standard()
            .rank("Catastrophic")
            .expect_err("unknown");
        assert!(matches!(
            error,
            RankingError::Configuration(ConfigurationError::UnknownCategory { .. })
        ));
    }

    #[test]
    fn fallback_category_is_reported() {
        let engine = RankingEngine::new(
            Arc::new(CriteriaSet::standard()),
            Arc::new(CategoryCatalog::standard().with_fallback("Light")),
        )
        .expect("engine");

        let ranking = engine.rank("Catastrophic").expect("fallback ranking");

        assert_eq!(ranking.category, "Light");
        assert!(ranking.fallback_applied);
        assert_eq!(ranking.results.len(), 3);
    }

    #[test]
    fn engine_rejects_inconsistent_catalog() {
        let catalog = CategoryCatalog::new()
            .with_category("X", vec![Alternative::new("A", [("c1", 1.0)])]);
        assert!(matches!(
            RankingEngine::new(Arc::new(two_criteria()), Arc::new(catalog)),
            Err(ConfigurationError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn top_is_a_prefix() {
        let ranking = RankingEngine::standard().rank("Heavy").expect("ranking");
        let top = ranking.top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top, &ranking.results[..2]);
        assert_eq!(ranking.top(10).len(), 3);
    }
}
