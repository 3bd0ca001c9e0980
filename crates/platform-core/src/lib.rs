//! # platform-core
//!
//! Resource model shared by the domain operator crates.
//!
//! The [`Domain`] custom resource is the declared state the operator converges
//! towards: an identifier and an ordered list of environments. Each `Domain`
//! owns exactly one database record and one cluster namespace, both keyed by
//! `spec.id`.

pub mod domain;
pub mod error;
pub mod id;

pub use domain::{
    DOMAIN_FINALIZER, DOMAIN_LABEL, Domain, DomainSpec, DomainStatus, MANAGED_BY_LABEL,
    ObjectKey,
};
pub use error::{CoreError, Result};
pub use id::{MAX_ID_LEN, validate_id};
