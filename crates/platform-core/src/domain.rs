//! The `Domain` custom resource.
//!
//! A `Domain` declares a stable identifier and an ordered list of
//! environments. The operator mirrors `spec` into the `domains` table,
//! ensures a namespace named after the id exists, and reports the outcome in
//! `status.valid`.

use std::fmt;

use kube::{CustomResource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::id::validate_id;

/// Finalizer token owned by the domain controller.
pub const DOMAIN_FINALIZER: &str = "domain.platform.com/controller_finalizer";

/// Label on managed namespaces carrying the owning domain id.
pub const DOMAIN_LABEL: &str = "platform.com/domain";

/// Label on managed namespaces carrying the operator name.
pub const MANAGED_BY_LABEL: &str = "platform.com/managed-by";

/// Declared state of a domain.
#[derive(CustomResource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "domain.platform.com",
    version = "v1alpha1",
    kind = "Domain",
    plural = "domains",
    shortname = "dom",
    namespaced,
    status = "DomainStatus",
    printcolumn = r#"{"name":"Valid","type":"boolean","jsonPath":".status.valid"}"#
)]
pub struct DomainSpec {
    /// Stable identity. Must equal the resource name.
    pub id: String,

    /// Environments provisioned for this domain, in declaration order.
    #[serde(default)]
    pub environments: Vec<String>,
}

/// Observed state written back by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DomainStatus {
    /// Outcome of the last reconciliation.
    #[serde(default)]
    pub valid: bool,
}

impl DomainStatus {
    pub fn new(valid: bool) -> Self {
        Self { valid }
    }
}

impl Domain {
    /// Validates the declared spec.
    ///
    /// The id must be a well-formed label and at least one non-blank
    /// environment must be declared.
    pub fn validate(&self) -> Result<()> {
        validate_id(&self.spec.id)?;

        if self.spec.environments.is_empty() {
            return Err(CoreError::NoEnvironments(self.spec.id.clone()));
        }
        if let Some(index) = self
            .spec
            .environments
            .iter()
            .position(|env| env.trim().is_empty())
        {
            return Err(CoreError::BlankEnvironment {
                id: self.spec.id.clone(),
                index,
            });
        }
        Ok(())
    }

    /// Returns `true` if the controller's finalizer is recorded.
    pub fn has_finalizer(&self) -> bool {
        self.finalizers().iter().any(|f| f == DOMAIN_FINALIZER)
    }

    /// Adds the controller's finalizer. Returns `false` if it was already present.
    pub fn add_finalizer(&mut self) -> bool {
        if self.has_finalizer() {
            return false;
        }
        self.finalizers_mut().push(DOMAIN_FINALIZER.to_string());
        true
    }

    /// Removes the controller's finalizer. Returns `false` if it was absent.
    pub fn remove_finalizer(&mut self) -> bool {
        let finalizers = self.finalizers_mut();
        let before = finalizers.len();
        finalizers.retain(|f| f != DOMAIN_FINALIZER);
        finalizers.len() != before
    }

    /// Returns `true` once a deletion timestamp has been set.
    pub fn is_deleting(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }

    /// Last reported validity, `false` when no status was written yet.
    pub fn is_valid(&self) -> bool {
        self.status.map(|s| s.valid).unwrap_or(false)
    }

    /// Key this object is dispatched under.
    pub fn object_key(&self) -> ObjectKey {
        ObjectKey {
            namespace: self.namespace(),
            name: self.name_any(),
        }
    }
}

/// Dispatch key of a `Domain`: its namespace and resource name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: Option<String>, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
        }
    }

    /// Key for an object in `namespace`.
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Some(namespace.into()), name)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}/{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
