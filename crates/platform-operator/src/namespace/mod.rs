//! Namespace lifecycle adapter.
//!
//! Each domain owns one cluster namespace named after its id. Namespaces are
//! only ever created or deleted by the operator; an existing namespace is
//! never modified.

mod cluster;

use std::collections::BTreeMap;

use async_trait::async_trait;
use platform_core::{DOMAIN_LABEL, MANAGED_BY_LABEL};

pub use cluster::KubeNamespaceApi;

/// Errors returned by [`NamespaceApi`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum NamespaceError {
    /// Kubernetes API failure.
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    /// Any other backend failure.
    #[error("Namespace API error: {message}")]
    Api { message: String },
}

impl NamespaceError {
    /// Creates a new `Api` error.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }
}

/// The observable part of a cluster namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedNamespace {
    pub name: String,
    pub labels: BTreeMap<String, String>,
}

impl ManagedNamespace {
    /// Returns `true` if the namespace carries the ownership label for `domain_id`.
    pub fn is_owned_by(&self, domain_id: &str) -> bool {
        self.labels.get(DOMAIN_LABEL).map(String::as_str) == Some(domain_id)
    }
}

/// Ownership labels put on every namespace the operator creates.
pub fn ownership_labels(domain_id: &str, operator_name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (DOMAIN_LABEL.to_string(), domain_id.to_string()),
        (MANAGED_BY_LABEL.to_string(), operator_name.to_string()),
    ])
}

/// Get/create/delete of cluster-scoped namespaces.
#[async_trait]
pub trait NamespaceApi: Send + Sync {
    /// Fetches a namespace by name, `None` if absent.
    async fn get(&self, name: &str) -> Result<Option<ManagedNamespace>, NamespaceError>;

    /// Creates a namespace carrying `labels`.
    async fn create(
        &self,
        name: &str,
        labels: BTreeMap<String, String>,
    ) -> Result<(), NamespaceError>;

    /// Deletes a namespace. Deleting an absent namespace succeeds.
    ///
    /// Ownership labels are not checked: a namespace that existed before its
    /// domain, and was adopted by it, is deleted with everything in it.
    async fn delete(&self, name: &str) -> Result<(), NamespaceError>;
}
