use super::{csv_reader, ImportError};
use crate::catalog::{Alternative, CategoryCatalog};
use crate::criteria::CriteriaSet;
use crate::ranking::ConfigurationError;
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Reads `category,name,<columns>` rows into a [`CategoryCatalog`].
///
/// Columns named after a criterion key are scores; any other column is carried as payload.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        criteria: &CriteriaSet,
    ) -> Result<CategoryCatalog, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, criteria)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        criteria: &CriteriaSet,
    ) -> Result<CategoryCatalog, ImportError> {
        let mut csv_reader = csv_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let column = |name: &'static str| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(name))
                .ok_or(ImportError::MissingColumn(name))
        };
        let category_col = column("category")?;
        let name_col = column("name")?;

        let mut grouped: Vec<(String, Vec<Alternative>)> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let category = record.get(category_col).unwrap_or_default().to_string();
            let name = record.get(name_col).unwrap_or_default().to_string();

            let mut attributes = BTreeMap::new();
            let mut payload = BTreeMap::new();
            for (index, (header, cell)) in headers.iter().zip(record.iter()).enumerate() {
                if index == category_col || index == name_col {
                    continue;
                }
                if criteria.id_of(header).is_some() {
                    attributes.insert(header.to_string(), parse_score(&name, header, cell)?);
                } else if !cell.is_empty() {
                    payload.insert(header.to_string(), payload_value(cell));
                }
            }

            let alternative = Alternative {
                name,
                attributes,
                payload,
            };
            match grouped.iter_mut().find(|(label, _)| *label == category) {
                Some((_, alternatives)) => alternatives.push(alternative),
                None => grouped.push((category, vec![alternative])),
            }
        }

        let catalog = grouped
            .into_iter()
            .fold(CategoryCatalog::new(), |catalog, (category, alternatives)| {
                catalog.with_category(category, alternatives)
            });
        catalog.validate_against(criteria)?;
        Ok(catalog)
    }
}

fn parse_score(alternative: &str, key: &str, cell: &str) -> Result<f64, ConfigurationError> {
    if cell.is_empty() {
        return Err(ConfigurationError::MissingAttribute {
            alternative: alternative.to_string(),
            key: key.to_string(),
        });
    }

    cell.parse::<f64>()
        .map_err(|_| ConfigurationError::InvalidAttribute {
            alternative: alternative.to_string(),
            key: key.to_string(),
            value: cell.to_string(),
        })
}

fn payload_value(cell: &str) -> Value {
    if let Ok(integer) = cell.parse::<i64>() {
        return Value::from(integer);
    }
    cell.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(cell.to_string()))
}
