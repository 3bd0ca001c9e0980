use std::sync::Arc;

use platform_core::{Domain, DomainStatus};
use tracing::info;

use crate::entity::{EntityApi, EntityError};

/// Writes `status.valid` at the end of a reconciliation.
#[derive(Clone)]
pub struct StatusReporter {
    entities: Arc<dyn EntityApi>,
}

impl StatusReporter {
    pub fn new(entities: Arc<dyn EntityApi>) -> Self {
        Self { entities }
    }

    /// Persists `valid` and mirrors it onto `domain`.
    ///
    /// A failed write is an error: the reconcile must be retried so the
    /// observable status matches what was done.
    pub async fn report(&self, domain: &mut Domain, valid: bool) -> Result<(), EntityError> {
        let status = DomainStatus::new(valid);
        self.entities.update_status(domain, status).await?;
        domain.status = Some(status);
        info!(domain = %domain.object_key(), valid, "Domain status updated");
        Ok(())
    }
}
