use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::{DatabaseConfig, StoreBackend};
use crate::database::memory::MemoryDroneStore;
use crate::database::postgres::PgDroneStore;
use crate::database::store::SharedStore;

/// Errors raised by the catalog stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// True when the store could not be reached at all, as opposed to a
    /// statement failing on a live connection.
    pub fn is_connection_failure(&self) -> bool {
        match self {
            DatabaseError::ConfigMissing(_) | DatabaseError::InvalidDatabaseUrl => true,
            DatabaseError::Sqlx(err) => matches!(
                err,
                sqlx::Error::Configuration(_)
                    | sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
            ),
        }
    }
}

/// Builds the configured `DroneStore`.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the store selected by `config.backend`. The Postgres pool connects
    /// lazily, so an unreachable database fails the first request that needs
    /// it rather than startup.
    pub fn open_store(config: &DatabaseConfig) -> Result<SharedStore, DatabaseError> {
        match config.backend {
            StoreBackend::Postgres => {
                let url = config
                    .url
                    .as_deref()
                    .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
                let store = PgDroneStore::connect_lazy(url, config)?;
                info!("Using postgres drone store at {}", Self::redact_url(url)?);
                Ok(Arc::new(store))
            }
            StoreBackend::Memory => {
                info!("Using in-memory drone store");
                Ok(Arc::new(MemoryDroneStore::new()))
            }
        }
    }

    /// Connection URL with the password removed, for logs.
    fn redact_url(raw: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("****"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
