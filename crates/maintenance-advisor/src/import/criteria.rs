use super::{csv_reader, ImportError};
use crate::criteria::{CriteriaSet, Criterion, Polarity};
use crate::ranking::ConfigurationError;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CriterionRow {
    key: String,
    weight: f64,
    polarity: String,
    #[serde(default)]
    label: String,
}

/// Reads `key,weight,polarity,label` rows into a validated [`CriteriaSet`].
pub struct CriteriaImporter;

impl CriteriaImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CriteriaSet, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CriteriaSet, ImportError> {
        let mut criteria = Vec::new();
        for row in csv_reader(reader).deserialize::<CriterionRow>() {
            let row = row?;
            let polarity = row.polarity.parse::<Polarity>().map_err(|value| {
                ConfigurationError::UnknownPolarity {
                    key: row.key.clone(),
                    value,
                }
            })?;
            let label = if row.label.is_empty() {
                row.key.clone()
            } else {
                row.label
            };
            criteria.push(Criterion::new(row.key, row.weight, polarity, label));
        }

        Ok(CriteriaSet::new(criteria)?)
    }
}
