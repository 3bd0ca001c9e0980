//! PostgreSQL implementation of the RecordStore trait.

use async_trait::async_trait;
use sqlx_postgres::PgPool;
use tracing::info;

use platform_storage::{DomainRecord, RecordStore, StorageError};

use crate::config::PostgresConfig;
use crate::migrations;
use crate::pool;
use crate::queries::records;

/// PostgreSQL record store backend.
///
/// Holds one row per domain in the `domains` table. The pool is owned by the
/// store and handed in explicitly; there is no process-wide connection.
#[derive(Debug, Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Creates a new `PostgresRecordStore` with the given configuration.
    ///
    /// This will:
    /// 1. Create a connection pool
    /// 2. Ping the database
    /// 3. Run migrations (if configured)
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool cannot be created,
    /// the database is unreachable or migrations fail.
    pub async fn new(config: PostgresConfig) -> Result<Self, StorageError> {
        let pool = pool::create_pool(&config).await?;
        pool::test_connection(&pool).await?;
        info!("Connected to record store database");

        if config.run_migrations {
            migrations::run(&pool).await?;
        }

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn get(&self, id: &str) -> Result<Option<DomainRecord>, StorageError> {
        records::get(&self.pool, id).await
    }

    async fn create(&self, record: &DomainRecord) -> Result<(), StorageError> {
        records::create(&self.pool, record).await
    }

    async fn update(&self, record: &DomainRecord) -> Result<(), StorageError> {
        records::update(&self.pool, record).await
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        records::delete(&self.pool, id).await
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
