//! In-memory record store backend for the domain operator.
//!
//! This crate provides an in-memory implementation of the `RecordStore` trait
//! from `platform-storage`, using papaya lock-free HashMap for concurrent access.
//!
//! # Example
//!
//! ```ignore
//! use platform_db_memory::InMemoryRecordStore;
//! use platform_storage::{DomainRecord, RecordStore};
//!
//! let store = InMemoryRecordStore::new();
//! store.create(&DomainRecord::new("teama", vec!["dev".into()])).await?;
//! ```

pub mod storage;

pub use platform_storage::{DomainRecord, RecordStore, StorageError};
pub use storage::InMemoryRecordStore;

