//! The domain reconcile loop.

use std::sync::Arc;

use kube::ResourceExt;
use platform_core::{CoreError, Domain, ObjectKey};
use platform_storage::{DomainRecord, DynRecordStore};
use tracing::{debug, error, info, instrument, warn};

use super::finalizer::FinalizerState;
use super::status::StatusReporter;
use crate::entity::EntityApi;
use crate::error::ReconcileError;
use crate::namespace::{NamespaceApi, ownership_labels};

/// Default value of the `managed-by` label.
pub const DEFAULT_OPERATOR_NAME: &str = "domain-operator";

/// Why a domain was marked invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// The resource name and `spec.id` differ.
    IdMismatch { name: String, id: String },
    /// The declared spec failed validation.
    Validation(CoreError),
}

/// What a successful reconciliation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The object no longer exists.
    Missing,
    /// The finalizer was added; the resulting write triggers the next pass.
    FinalizerAdded,
    /// Cleanup finished and the finalizer was removed.
    Finalized,
    /// Deletion is in progress and our finalizer is already gone.
    Released,
    /// `status.valid` was set to `false`; nothing was synchronized.
    Invalid(InvalidReason),
    /// Record and namespace are in sync and `status.valid` is `true`.
    Synced,
}

/// Converges one `Domain` towards its declared state.
///
/// All collaborators are injected. Every step is idempotent, so a pass that
/// failed half way is simply run again from the top. Reconciles of the same
/// key must be serialized by the caller.
pub struct Reconciler {
    entities: Arc<dyn EntityApi>,
    records: DynRecordStore,
    namespaces: Arc<dyn NamespaceApi>,
    status: StatusReporter,
    operator_name: String,
}

impl Reconciler {
    pub fn new(
        entities: Arc<dyn EntityApi>,
        records: DynRecordStore,
        namespaces: Arc<dyn NamespaceApi>,
    ) -> Self {
        Self {
            status: StatusReporter::new(entities.clone()),
            entities,
            records,
            namespaces,
            operator_name: DEFAULT_OPERATOR_NAME.to_string(),
        }
    }

    /// Sets the value written to the `managed-by` namespace label.
    #[must_use]
    pub fn with_operator_name(mut self, name: impl Into<String>) -> Self {
        self.operator_name = name.into();
        self
    }

    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }

    /// Runs one reconciliation for `key`.
    ///
    /// # Errors
    ///
    /// Any adapter or state-write failure. All errors are retryable.
    #[instrument(skip(self), fields(domain = %key))]
    pub async fn reconcile(&self, key: &ObjectKey) -> Result<ReconcileOutcome, ReconcileError> {
        let Some(mut domain) = self.entities.get(key).await? else {
            debug!("Domain not found, nothing to do");
            return Ok(ReconcileOutcome::Missing);
        };

        info!(
            id = %domain.spec.id,
            environments = ?domain.spec.environments,
            "Processing domain"
        );

        match FinalizerState::of(&domain) {
            FinalizerState::NoFinalizer => {
                info!("Adding finalizer");
                domain.add_finalizer();
                self.entities.replace(&domain).await?;
                Ok(ReconcileOutcome::FinalizerAdded)
            }
            FinalizerState::Removed => {
                debug!("Domain is being deleted and holds no finalizer");
                Ok(ReconcileOutcome::Released)
            }
            FinalizerState::Terminating => {
                // Cleanup is keyed by the resource name: anything ever synced
                // was synced under an id equal to it.
                self.finalize(&domain.name_any()).await?;

                domain.remove_finalizer();
                self.entities.replace(&domain).await?;
                info!("Finalizer removed");
                Ok(ReconcileOutcome::Finalized)
            }
            FinalizerState::Active => self.converge(key, &mut domain).await,
        }
    }

    async fn converge(
        &self,
        key: &ObjectKey,
        domain: &mut Domain,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        if key.name != domain.spec.id {
            info!(expected = %domain.spec.id, found = %key.name, "Resource name mismatch");
            self.status.report(domain, false).await?;
            return Ok(ReconcileOutcome::Invalid(InvalidReason::IdMismatch {
                name: key.name.clone(),
                id: domain.spec.id.clone(),
            }));
        }

        if let Err(err) = domain.validate() {
            info!(error = %err, "Domain validation failed");
            self.status.report(domain, false).await?;
            return Ok(ReconcileOutcome::Invalid(InvalidReason::Validation(err)));
        }

        self.sync_record(domain).await?;
        self.ensure_namespace(&domain.spec.id).await?;

        self.status.report(domain, true).await?;
        Ok(ReconcileOutcome::Synced)
    }

    /// Removes everything owned by the domain `id`.
    ///
    /// The record goes first, then the namespace. Absence counts as success,
    /// so the sequence can be rerun from the start after any failure.
    ///
    /// # Errors
    ///
    /// The first adapter error, unchanged.
    #[instrument(skip(self))]
    pub async fn finalize(&self, id: &str) -> Result<(), ReconcileError> {
        info!("Finalizing domain");

        if let Err(err) = self.records.delete(id).await {
            warn!(error = %err, "Error deleting domain from database");
            return Err(err.into());
        }
        info!("Domain deleted from database");

        if let Err(err) = self.namespaces.delete(id).await {
            warn!(error = %err, namespace = id, "Error deleting namespace for domain");
            return Err(err.into());
        }

        info!("Successfully finalized domain");
        Ok(())
    }

    /// Creates the record if absent, otherwise overwrites its environments.
    ///
    /// # Errors
    ///
    /// Any record store error, unchanged.
    #[instrument(skip(self, domain), fields(id = %domain.spec.id))]
    pub async fn sync_record(&self, domain: &Domain) -> Result<(), ReconcileError> {
        let record = DomainRecord::from(&domain.spec);

        let existing = self.records.get(&record.id).await.inspect_err(|err| {
            warn!(error = %err, "Failed to query domain in database");
        })?;

        let operation = if existing.is_some() { "update" } else { "create" };
        info!(operation, "Syncing domain with database");

        let result = match existing {
            Some(_) => self.records.update(&record).await,
            None => self.records.create(&record).await,
        };
        if let Err(err) = result {
            warn!(operation, error = %err, "Failed to sync domain with database");
            return Err(err.into());
        }

        debug!(operation, "Domain synced with database");
        Ok(())
    }

    /// Creates the namespace for `id` with ownership labels if it is missing.
    /// An existing namespace is left untouched but still adopted: finalizing
    /// the domain deletes it.
    ///
    /// # Errors
    ///
    /// Any namespace API error, unchanged.
    #[instrument(skip(self))]
    pub async fn ensure_namespace(&self, id: &str) -> Result<(), ReconcileError> {
        match self.namespaces.get(id).await? {
            Some(existing) => {
                if !existing.is_owned_by(id) {
                    error!(
                        namespace = id,
                        "Adopting namespace without ownership labels, it will be deleted with the domain"
                    );
                }
                debug!(namespace = id, "Namespace already exists");
            }
            None => {
                info!(namespace = id, "Creating namespace for domain");
                self.namespaces
                    .create(id, ownership_labels(id, &self.operator_name))
                    .await?;
            }
        }
        Ok(())
    }
}
