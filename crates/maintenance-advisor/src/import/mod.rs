//! CSV loaders for the criteria table and the category catalog.

mod catalog;
mod criteria;

pub use catalog::CatalogImporter;
pub use criteria::CriteriaImporter;

use crate::ranking::ConfigurationError;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
    Configuration(ConfigurationError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read ranking data: {}", err),
            ImportError::Csv(err) => write!(f, "invalid ranking CSV data: {}", err),
            ImportError::MissingColumn(column) => {
                write!(f, "ranking CSV is missing the '{}' column", column)
            }
            ImportError::Configuration(err) => {
                write!(f, "ranking data failed validation: {}", err)
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::MissingColumn(_) => None,
            ImportError::Configuration(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<ConfigurationError> for ImportError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

fn csv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}
