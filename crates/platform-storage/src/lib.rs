//! # platform-storage
//!
//! Record store abstraction layer for the domain operator.
//!
//! This crate defines the contract every record store backend implements.
//! It does not contain any implementations - those are provided by
//! `platform-db-postgres` and `platform-db-memory`.
//!
//! ## Overview
//!
//! The main trait is [`RecordStore`], keyed by domain id:
//! - `get` returns `None` for an absent record
//! - `create` inserts, `update` overwrites the environments in place
//! - `delete` succeeds when the record is already gone

mod error;
mod traits;
mod types;

pub use error::{ErrorCategory, StorageError};
pub use traits::RecordStore;
pub use types::DomainRecord;

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shared record store trait object.
pub type DynRecordStore = std::sync::Arc<dyn RecordStore>;
