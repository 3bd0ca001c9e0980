//! Queries against the `domains` table.
//!
//! Every function maps one `RecordStore` operation to a single statement.
//! None of them open a transaction; each statement is atomic on its own.

use sqlx_core::query::query;
use sqlx_core::query_as::query_as;
use sqlx_postgres::PgPool;
use tracing::{debug, instrument};

use platform_storage::{DomainRecord, StorageError};

use crate::error::query_error;

const SELECT_SQL: &str = "SELECT domain_id, environments FROM domains WHERE domain_id = $1";
const INSERT_SQL: &str = "INSERT INTO domains (domain_id, environments) VALUES ($1, $2)";
const UPDATE_SQL: &str = "UPDATE domains SET environments = $2 WHERE domain_id = $1";
const DELETE_SQL: &str = "DELETE FROM domains WHERE domain_id = $1";

/// Reads the record for `id`.
///
/// Returns `None` if no row exists.
#[instrument(skip(pool))]
pub async fn get(pool: &PgPool, id: &str) -> Result<Option<DomainRecord>, StorageError> {
    let row: Option<(String, Vec<String>)> = query_as(SELECT_SQL)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| query_error(id, "read", e))?;

    Ok(row.map(|(domain_id, environments)| DomainRecord::new(domain_id, environments)))
}

/// Inserts a new record.
///
/// A duplicate id is reported as `StorageError::AlreadyExists`.
#[instrument(skip(pool, record), fields(id = %record.id))]
pub async fn create(pool: &PgPool, record: &DomainRecord) -> Result<(), StorageError> {
    query(INSERT_SQL)
        .bind(&record.id)
        .bind(&record.environments)
        .execute(pool)
        .await
        .map_err(|e| query_error(&record.id, "create", e))?;

    debug!(environments = ?record.environments, "Inserted domain record");
    Ok(())
}

/// Overwrites the environments of an existing record.
#[instrument(skip(pool, record), fields(id = %record.id))]
pub async fn update(pool: &PgPool, record: &DomainRecord) -> Result<(), StorageError> {
    let result = query(UPDATE_SQL)
        .bind(&record.id)
        .bind(&record.environments)
        .execute(pool)
        .await
        .map_err(|e| query_error(&record.id, "update", e))?;

    if result.rows_affected() == 0 {
        return Err(StorageError::not_found(&record.id));
    }

    debug!(environments = ?record.environments, "Updated domain record");
    Ok(())
}

/// Deletes the record for `id`. A missing row is not an error.
#[instrument(skip(pool))]
pub async fn delete(pool: &PgPool, id: &str) -> Result<(), StorageError> {
    let result = query(DELETE_SQL)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| query_error(id, "delete", e))?;

    debug!(rows = result.rows_affected(), "Deleted domain record");
    Ok(())
}
