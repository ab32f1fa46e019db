use crate::criteria::CriteriaSet;
use crate::ranking::ConfigurationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Candidate service package scored against the criteria table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub attributes: BTreeMap<String, f64>,
    /// Display-only fields carried through to the ranked output untouched.
    #[serde(default)]
    pub payload: BTreeMap<String, Value>,
}

impl Alternative {
    pub fn new<K: Into<String>>(
        name: impl Into<String>,
        attributes: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            attributes: attributes
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
            payload: BTreeMap::new(),
        }
    }

    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Rejects attributes outside the criteria key set and non-finite or negative scores.
    pub fn validate_against(&self, criteria: &CriteriaSet) -> Result<(), ConfigurationError> {
        for (key, value) in &self.attributes {
            if criteria.id_of(key).is_none() {
                return Err(ConfigurationError::UnknownAttribute {
                    alternative: self.name.clone(),
                    key: key.clone(),
                });
            }
            if !value.is_finite() || *value < 0.0 {
                return Err(ConfigurationError::InvalidAttribute {
                    alternative: self.name.clone(),
                    key: key.clone(),
                    value: value.to_string(),
                });
            }
        }

        for (_, criterion) in criteria.iter() {
            if !self.attributes.contains_key(&criterion.key) {
                return Err(ConfigurationError::MissingAttribute {
                    alternative: self.name.clone(),
                    key: criterion.key.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Category label to ordered alternatives. Read-only once handed to the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCatalog {
    categories: Vec<(String, Vec<Alternative>)>,
    fallback: Option<String>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a category, replacing any alternatives previously stored under the label.
    pub fn insert(&mut self, category: impl Into<String>, alternatives: Vec<Alternative>) {
        let category = category.into();
        match self.categories.iter_mut().find(|(label, _)| *label == category) {
            Some((_, existing)) => *existing = alternatives,
            None => self.categories.push((category, alternatives)),
        }
    }

    pub fn with_category(
        mut self,
        category: impl Into<String>,
        alternatives: Vec<Alternative>,
    ) -> Self {
        self.insert(category, alternatives);
        self
    }

    pub fn with_fallback(mut self, category: impl Into<String>) -> Self {
        self.fallback = Some(category.into());
        self
    }

    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &[Alternative])> {
        self.categories
            .iter()
            .map(|(label, alternatives)| (label.as_str(), alternatives.as_slice()))
    }

    pub fn get(&self, category: &str) -> Option<&[Alternative]> {
        self.categories
            .iter()
            .find(|(label, _)| label == category)
            .map(|(_, alternatives)| alternatives.as_slice())
    }

    /// Resolves a category to `(resolved_label, alternatives)`, consulting the fallback when the
    /// label is unknown.
    pub fn lookup(&self, category: &str) -> Result<(&str, &[Alternative]), ConfigurationError> {
        if let Some((label, alternatives)) = self
            .categories
            .iter()
            .find(|(label, _)| label == category)
        {
            return Ok((label.as_str(), alternatives.as_slice()));
        }

        self.fallback
            .as_deref()
            .and_then(|fallback| self.get(fallback).map(|alternatives| (fallback, alternatives)))
            .ok_or_else(|| ConfigurationError::UnknownCategory {
                category: category.to_string(),
            })
    }

    pub fn validate_against(&self, criteria: &CriteriaSet) -> Result<(), ConfigurationError> {
        if let Some(fallback) = &self.fallback {
            if self.get(fallback).is_none() {
                return Err(ConfigurationError::UnknownCategory {
                    category: fallback.clone(),
                });
            }
        }

        self.categories
            .iter()
            .flat_map(|(_, alternatives)| alternatives)
            .try_for_each(|alternative| alternative.validate_against(criteria))
    }

    /// Three-tier workshop catalog matching [`CriteriaSet::standard`].
    pub fn standard() -> Self {
        fn package(name: &str, scores: [f64; 4], original_price: u64) -> Alternative {
            let keys = ["c1_complaint", "c2_price", "c3_mileage", "c4_vehicle_age"];
            Alternative::new(name, keys.into_iter().zip(scores))
                .with_payload("original_price", original_price)
        }

        Self::new()
            .with_category(
                "Light",
                vec![
                    package("Quick Check Package", [1.0, 1.0, 1.0, 1.0], 35_000),
                    package("Economy Service Package", [2.0, 1.0, 1.0, 1.0], 65_000),
                    package("Daily Rider Package", [2.0, 1.0, 2.0, 2.0], 85_000),
                ],
            )
            .with_category(
                "Medium",
                vec![
                    package("Standard Package", [4.0, 1.0, 3.0, 3.0], 150_000),
                    package("Monthly Service Package", [3.0, 1.0, 4.0, 4.0], 185_000),
                    package("Complete Service Package", [4.0, 1.0, 3.0, 3.0], 225_000),
                ],
            )
            .with_category(
                "Heavy",
                vec![
                    package("Major Service Package", [5.0, 2.0, 4.0, 4.0], 650_000),
                    package("Total Service Package", [4.0, 3.0, 4.0, 5.0], 950_000),
                    package("Engine Overhaul Package", [5.0, 4.0, 5.0, 5.0], 1_800_000),
                ],
            )
    }
}
