//! Record types persisted by record store backends.

use platform_core::DomainSpec;
use serde::{Deserialize, Serialize};

/// The database copy of a domain: one row per domain id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Domain identifier, the primary key.
    pub id: String,
    /// Environments, stored in declaration order.
    pub environments: Vec<String>,
}

impl DomainRecord {
    pub fn new(id: impl Into<String>, environments: Vec<String>) -> Self {
        Self {
            id: id.into(),
            environments,
        }
    }
}

impl From<&DomainSpec> for DomainRecord {
    fn from(spec: &DomainSpec) -> Self {
        Self {
            id: spec.id.clone(),
            environments: spec.environments.clone(),
        }
    }
}
