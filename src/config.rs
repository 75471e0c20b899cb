use player_registry_http_api::{HttpApiConfig, HttpApiConfigError};
use player_registry_persistence_sea_orm::{DatabaseConfig, DatabaseConfigError};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("database configuration: {0}")]
    Database(#[from] DatabaseConfigError),
    #[error("http api configuration: {0}")]
    HttpApi(#[from] HttpApiConfigError),
    #[error("logger configuration: {0}")]
    Logger(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFileConfig {
    pub path: String,
    pub archive_pattern: String,
}

impl LogFileConfig {
    /// `None` when `LOG_FILE_PATH` is unset; logging then goes to stderr only.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let path = lookup("LOG_FILE_PATH")?;
        let archive_pattern =
            lookup("LOG_ARCHIVE_PATTERN").unwrap_or_else(|| format!("{}.{{}}.gz", path));
        Some(Self {
            path,
            archive_pattern,
        })
    }
}

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub http: HttpApiConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: DatabaseConfig::from_env()?,
            http: HttpApiConfig::from_env()?,
        })
    }
}
