use async_lock::OnceCell;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

pub mod entity;
pub mod players;

static DB_POOL: OnceCell<DatabaseConnection> = OnceCell::new();

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Reads `PLAYER_DB_URL`, falling back to the `MARIADB_*` variables.
    pub fn from_env() -> Result<Self, DatabaseConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, DatabaseConfigError> {
        let require = |name: &'static str| lookup(name).ok_or(DatabaseConfigError::Missing(name));

        let url = match lookup("PLAYER_DB_URL") {
            Some(url) => url,
            None => format!(
                "mysql://{}:{}@{}:{}/{}",
                require("MARIADB_USER")?,
                require("MARIADB_PASSWORD")?,
                require("MARIADB_HOST")?,
                require("MARIADB_PORT")?,
                require("MARIADB_DATABASE")?
            ),
        };

        let max_connections = match lookup("PLAYER_DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse()
                .map_err(|_| DatabaseConfigError::InvalidNumber {
                    name: "PLAYER_DB_MAX_CONNECTIONS",
                    value,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            url,
            max_connections,
        })
    }
}

/// Process-wide pool; later calls return the first connection regardless of `config`.
pub async fn create_db_pool(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    DB_POOL
        .get_or_try_init(|| async move {
            let mut opt = ConnectOptions::new(&config.url);
            opt.max_connections(config.max_connections);
            opt.sqlx_logging(false);

            log::info!(
                "Connecting to database with up to {} connections",
                config.max_connections
            );
            Database::connect(opt).await
        })
        .await
        .cloned()
}
