//! Kubernetes-backed [`NamespaceApi`].

use std::collections::BTreeMap;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{Api, DeleteParams, PostParams};
use kube::{Client, ResourceExt};
use tracing::{debug, info, instrument};

use super::{ManagedNamespace, NamespaceApi, NamespaceError};

/// HTTP status the API server uses for a missing object.
const NOT_FOUND: u16 = 404;

/// [`NamespaceApi`] talking to the cluster through a `kube::Client`.
#[derive(Clone)]
pub struct KubeNamespaceApi {
    api: Api<Namespace>,
}

impl KubeNamespaceApi {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }
}

fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(response) if response.code == NOT_FOUND)
}

#[async_trait]
impl NamespaceApi for KubeNamespaceApi {
    #[instrument(skip(self))]
    async fn get(&self, name: &str) -> Result<Option<ManagedNamespace>, NamespaceError> {
        let namespace = self.api.get_opt(name).await?;
        Ok(namespace.map(|ns| ManagedNamespace {
            name: ns.name_any(),
            labels: ns.labels().clone(),
        }))
    }

    #[instrument(skip(self, labels))]
    async fn create(
        &self,
        name: &str,
        labels: BTreeMap<String, String>,
    ) -> Result<(), NamespaceError> {
        let namespace = Namespace {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                labels: Some(labels),
                ..ObjectMeta::default()
            },
            ..Namespace::default()
        };
        self.api.create(&PostParams::default(), &namespace).await?;
        info!(namespace = name, "Namespace created");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, name: &str) -> Result<(), NamespaceError> {
        match self.api.delete(name, &DeleteParams::default()).await {
            Ok(_) => {
                info!(namespace = name, "Namespace deleted");
                Ok(())
            }
            Err(err) if is_not_found(&err) => {
                debug!(namespace = name, "Namespace does not exist");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
