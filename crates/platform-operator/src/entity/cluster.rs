//! Kubernetes-backed [`EntityApi`].

use async_trait::async_trait;
use kube::api::{Api, Patch, PatchParams, PostParams};
use kube::{Client, ResourceExt};
use platform_core::{Domain, DomainStatus, ObjectKey};
use serde_json::json;
use tracing::{debug, instrument};

use super::{EntityApi, EntityError};

/// [`EntityApi`] talking to the cluster through a `kube::Client`.
#[derive(Clone)]
pub struct KubeEntityApi {
    client: Client,
}

impl KubeEntityApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: Option<&str>) -> Api<Domain> {
        match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::default_namespaced(self.client.clone()),
        }
    }

    fn api_for(&self, domain: &Domain) -> Api<Domain> {
        self.api(domain.metadata.namespace.as_deref())
    }
}

#[async_trait]
impl EntityApi for KubeEntityApi {
    #[instrument(skip(self), fields(domain = %key))]
    async fn get(&self, key: &ObjectKey) -> Result<Option<Domain>, EntityError> {
        let domain = self
            .api(key.namespace.as_deref())
            .get_opt(&key.name)
            .await?;
        Ok(domain)
    }

    #[instrument(skip(self, domain), fields(domain = %domain.object_key()))]
    async fn replace(&self, domain: &Domain) -> Result<Domain, EntityError> {
        let name = domain.metadata.name.as_deref().ok_or(EntityError::MissingName)?;
        let stored = self
            .api_for(domain)
            .replace(name, &PostParams::default(), domain)
            .await?;
        debug!(finalizers = ?stored.finalizers(), "Domain replaced");
        Ok(stored)
    }

    #[instrument(skip(self, domain), fields(domain = %domain.object_key()))]
    async fn update_status(
        &self,
        domain: &Domain,
        status: DomainStatus,
    ) -> Result<(), EntityError> {
        let name = domain.metadata.name.as_deref().ok_or(EntityError::MissingName)?;
        let patch = json!({ "status": status });
        self.api_for(domain)
            .patch_status(name, &PatchParams::default(), &Patch::Merge(&patch))
            .await?;
        Ok(())
    }
}
