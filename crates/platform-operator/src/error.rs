//! Error type returned by the reconcile loop.

use platform_storage::{ErrorCategory, StorageError};

use crate::entity::EntityError;
use crate::namespace::NamespaceError;

/// Failure of a single reconciliation.
///
/// Adapter errors are carried unchanged. There is no "do not retry" class:
/// every variant is retryable and the dispatcher re-invokes the whole
/// reconcile with backoff. Validation failures are not errors; they are
/// recorded in `status.valid` instead.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// Reading or writing the `Domain` object failed.
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// The record store rejected an operation.
    #[error(transparent)]
    Record(#[from] StorageError),

    /// The namespace API rejected an operation.
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

impl ReconcileError {
    /// Every reconcile error is retried by the dispatcher.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        true
    }

    /// Short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Entity(_) => "entity",
            Self::Record(_) => "record",
            Self::Namespace(_) => "namespace",
        }
    }

    /// Storage error category, if the record store failed.
    #[must_use]
    pub fn storage_category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Record(err) => Some(err.category()),
            _ => None,
        }
    }
}
