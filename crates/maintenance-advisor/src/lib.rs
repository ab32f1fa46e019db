//! Service package recommendations for a maintenance-severity category.
//!
//! A category label (produced upstream by a classifier) selects a set of alternatives from the
//! [`catalog::CategoryCatalog`]; the [`ranking::RankingEngine`] scores them against the weighted
//! [`criteria::CriteriaSet`] and returns a total order together with a decision trace.

pub mod catalog;
pub mod config;
pub mod criteria;
pub mod error;
pub mod import;
pub mod ranking;
pub mod telemetry;
