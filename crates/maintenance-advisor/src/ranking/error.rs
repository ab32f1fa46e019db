use thiserror::Error;

/// Malformed or incomplete configuration detected while preparing a ranking run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("criteria set must contain at least one criterion")]
    EmptyCriteria,
    #[error("criterion '{key}' is declared more than once")]
    DuplicateCriterion { key: String },
    #[error("criterion '{key}' has weight {weight}; weights must lie in (0, 1]")]
    InvalidWeight { key: String, weight: f64 },
    #[error("criteria weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f64 },
    #[error("criterion '{key}' has unknown polarity '{value}' (expected benefit or cost)")]
    UnknownPolarity { key: String, value: String },
    #[error("category '{category}' is not configured and no fallback category exists")]
    UnknownCategory { category: String },
    #[error("no alternatives supplied for ranking")]
    EmptyAlternatives,
    #[error("alternative '{alternative}' is missing attribute '{key}'")]
    MissingAttribute { alternative: String, key: String },
    #[error("alternative '{alternative}' declares attribute '{key}' which is not a criterion")]
    UnknownAttribute { alternative: String, key: String },
    #[error("alternative '{alternative}' has invalid value {value} for '{key}'")]
    InvalidAttribute {
        alternative: String,
        key: String,
        value: String,
    },
}

/// Numeric invariant violation detected mid-computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("alternative '{alternative}' accumulated a negative cost share {value}")]
    NegativeCost { alternative: String, value: f64 },
    #[error("non-finite {quantity} for alternative '{alternative}'")]
    NonFinite {
        alternative: String,
        quantity: &'static str,
    },
    #[error("column {column} sums to a non-finite value")]
    NonFiniteColumnSum { column: usize },
    #[error("non-finite {quantity} across alternatives")]
    NonFiniteAggregate { quantity: &'static str },
    #[error("{stage}: expected {expected_rows}x{expected_cols}, found {rows}x{cols}")]
    ShapeMismatch {
        stage: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("computation error: {0}")]
    Computation(#[from] ComputationError),
}
