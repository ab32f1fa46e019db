use crate::catalog::CategoryCatalog;
use crate::criteria::CriteriaSet;
use crate::import::{CatalogImporter, CriteriaImporter, ImportError};
use crate::ranking::RankingEngine;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub ranking: RankingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let ranking = RankingConfig {
            criteria_csv: non_empty_var("APP_CRITERIA_CSV").map(PathBuf::from),
            catalog_csv: non_empty_var("APP_CATALOG_CSV").map(PathBuf::from),
            fallback_category: non_empty_var("APP_FALLBACK_CATEGORY"),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            ranking,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Sources for the criteria table and the category catalog.
#[derive(Debug, Clone, Default)]
pub struct RankingConfig {
    pub criteria_csv: Option<PathBuf>,
    pub catalog_csv: Option<PathBuf>,
    pub fallback_category: Option<String>,
}

impl RankingConfig {
    /// Loads criteria and catalog once; the returned engine never re-reads them.
    pub fn ranking_engine(&self) -> Result<RankingEngine, ImportError> {
        let criteria = match &self.criteria_csv {
            Some(path) => CriteriaImporter::from_path(path)?,
            None => CriteriaSet::standard(),
        };

        let mut catalog = match &self.catalog_csv {
            Some(path) => CatalogImporter::from_path(path, &criteria)?,
            None => CategoryCatalog::standard(),
        };
        if let Some(fallback) = &self.fallback_category {
            catalog = catalog.with_fallback(fallback.clone());
        }

        info!(
            criteria = criteria.len(),
            categories = catalog.categories().count(),
            fallback = catalog.fallback().unwrap_or("none"),
            "ranking configuration loaded"
        );

        Ok(RankingEngine::new(Arc::new(criteria), Arc::new(catalog))?)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
