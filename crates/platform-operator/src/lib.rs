//! # platform-operator
//!
//! Kubernetes operator converging `Domain` resources into a PostgreSQL
//! record and a cluster namespace per domain.
//!
//! - [`reconcile`]: the reconcile loop, finalizer lifecycle and status reporting
//! - [`entity`]: reads and writes of the `Domain` objects
//! - [`namespace`]: namespace lifecycle adapter
//! - [`controller`]: `kube::runtime` dispatch wiring
//! - [`config`]: configuration loading
//! - [`observability`]: tracing setup

pub mod config;
pub mod controller;
pub mod entity;
pub mod error;
pub mod namespace;
pub mod observability;
pub mod reconcile;

pub use entity::{EntityApi, EntityError, KubeEntityApi};
pub use error::ReconcileError;
pub use namespace::{KubeNamespaceApi, ManagedNamespace, NamespaceApi, NamespaceError};
pub use reconcile::{
    DEFAULT_OPERATOR_NAME, FinalizerState, InvalidReason, ReconcileOutcome, Reconciler,
    StatusReporter,
};
