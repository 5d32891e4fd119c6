//! Persistence layer: connection settings plus the only code path allowed to
//! write domain records.
//!
//! Every create and update builds the full candidate record, runs its
//! validation rules and only then writes the row. Referential rules
//! (cascades, `SET NULL`) are enforced by the schema in `migration`.

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use thiserror::Error;

pub mod accounts;
pub mod contacts;
pub mod locations;
pub mod matters;
pub mod negotiations;
pub mod pretasks;
pub mod seed;
mod write;

/// Shared connection pool.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database url missing")]
    MissingUrl,
    #[error(transparent)]
    Validation(#[from] entity::ValidationError),
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("referenced {entity} does not exist")]
    MissingReference { entity: &'static str },
    #[error("another account already uses this {field}")]
    Duplicate { field: &'static str },
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug, Default)]
pub struct DatabaseSettings {
    url: Option<String>,
    max_connections: Option<u32>,
    log_sql: bool,
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Reads `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and `DATABASE_LOG_SQL`.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").ok();
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|raw| raw.trim().parse().ok());
        let log_sql = std::env::var("DATABASE_LOG_SQL")
            .ok()
            .map(|val| matches!(val.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self {
            url,
            max_connections,
            log_sql,
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    pub fn database_url(&self) -> DbResult<&str> {
        self.url.as_deref().ok_or(DbError::MissingUrl)
    }
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let mut options = ConnectOptions::new(settings.database_url()?.to_owned());
    options.sqlx_logging(settings.log_sql);
    if let Some(max) = settings.max_connections {
        options.max_connections(max);
    }
    let pool = Database::connect(options).await?;
    tracing::debug!(backend = ?pool.get_database_backend(), "database connected");
    Ok(pool)
}
