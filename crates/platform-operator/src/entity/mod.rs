//! Access to the `Domain` objects themselves.
//!
//! The reconciler reads the declared state through [`EntityApi`] and writes
//! back only two things: the finalizer list (via [`EntityApi::replace`]) and
//! `status.valid` (via [`EntityApi::update_status`]).

mod cluster;

use async_trait::async_trait;
use platform_core::{Domain, DomainStatus, ObjectKey};

pub use cluster::KubeEntityApi;

/// Errors returned by [`EntityApi`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// Kubernetes API failure.
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// The object carries no name and cannot be addressed.
    #[error("Domain object has no name")]
    MissingName,

    /// Any other backend failure.
    #[error("Entity API error: {message}")]
    Api { message: String },
}

impl EntityError {
    /// Creates a new `Api` error.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }
}

/// Reads and persists `Domain` objects.
///
/// Every write is expected to re-trigger reconciliation of the written
/// object; callers must not rely on being invoked only once per change.
#[async_trait]
pub trait EntityApi: Send + Sync {
    /// Fetches the object for `key`, `None` if it no longer exists.
    async fn get(&self, key: &ObjectKey) -> Result<Option<Domain>, EntityError>;

    /// Persists metadata changes (finalizers) and returns the stored object.
    async fn replace(&self, domain: &Domain) -> Result<Domain, EntityError>;

    /// Writes the status subresource.
    async fn update_status(&self, domain: &Domain, status: DomainStatus)
    -> Result<(), EntityError>;
}
