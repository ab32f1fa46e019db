use crate::ranking::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Tolerance applied when checking that criterion weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Direction in which a criterion rewards an alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Higher scores are better.
    Benefit,
    /// Lower scores are better.
    Cost,
}

impl Polarity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Benefit => "benefit",
            Self::Cost => "cost",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Polarity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "benefit" => Ok(Self::Benefit),
            "cost" => Ok(Self::Cost),
            other => Err(other.to_string()),
        }
    }
}

/// One evaluation dimension of the decision matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub key: String,
    pub weight: f64,
    pub polarity: Polarity,
    pub label: String,
}

impl Criterion {
    pub fn new(
        key: impl Into<String>,
        weight: f64,
        polarity: Polarity,
        label: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            weight,
            polarity,
            label: label.into(),
        }
    }
}

/// Column position of a criterion inside the [`CriteriaSet`] that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CriterionId(usize);

impl CriterionId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Ordered, validated criteria table. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CriteriaSet {
    criteria: Vec<Criterion>,
}

impl CriteriaSet {
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, ConfigurationError> {
        if criteria.is_empty() {
            return Err(ConfigurationError::EmptyCriteria);
        }

        let mut seen = HashSet::new();
        for criterion in &criteria {
            if !seen.insert(criterion.key.as_str()) {
                return Err(ConfigurationError::DuplicateCriterion {
                    key: criterion.key.clone(),
                });
            }
            if !criterion.weight.is_finite() || criterion.weight <= 0.0 || criterion.weight > 1.0
            {
                return Err(ConfigurationError::InvalidWeight {
                    key: criterion.key.clone(),
                    weight: criterion.weight,
                });
            }
        }

        let sum: f64 = criteria.iter().map(|criterion| criterion.weight).sum();
        if (sum - 1.0).abs() >= WEIGHT_SUM_TOLERANCE {
            return Err(ConfigurationError::WeightSum { sum });
        }

        Ok(Self { criteria })
    }

    /// Workshop criteria used when no criteria file is configured.
    pub fn standard() -> Self {
        Self {
            criteria: vec![
                Criterion::new("c1_complaint", 0.40, Polarity::Benefit, "C1. Complaint Type"),
                Criterion::new("c2_price", 0.30, Polarity::Benefit, "C2. Price"),
                Criterion::new("c3_mileage", 0.15, Polarity::Cost, "C3. Mileage"),
                Criterion::new("c4_vehicle_age", 0.15, Polarity::Cost, "C4. Vehicle Age"),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CriterionId, &Criterion)> {
        self.criteria
            .iter()
            .enumerate()
            .map(|(index, criterion)| (CriterionId(index), criterion))
    }

    pub fn id_of(&self, key: &str) -> Option<CriterionId> {
        self.criteria
            .iter()
            .position(|criterion| criterion.key == key)
            .map(CriterionId)
    }

    pub fn criterion(&self, id: CriterionId) -> &Criterion {
        &self.criteria[id.0]
    }

    pub fn keys(&self) -> Vec<String> {
        self.criteria.iter().map(|c| c.key.clone()).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.criteria.iter().map(|c| c.label.clone()).collect()
    }

    pub fn weights(&self) -> Vec<f64> {
        self.criteria.iter().map(|c| c.weight).collect()
    }

    pub fn polarities(&self) -> Vec<Polarity> {
        self.criteria.iter().map(|c| c.polarity).collect()
    }
}
