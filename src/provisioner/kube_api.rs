//! # Kubernetes Cluster API
//!
//! [`ClusterApi`] backed by a `kube::Client`.

use crate::error::ClusterError;
use crate::provisioner::ClusterApi;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Pod, Secret};
use kube::api::PostParams;
use kube::{Api, Client};
use tracing::debug;

/// Cluster access through the Kubernetes API server
#[derive(Clone)]
pub struct KubeClusterApi {
    client: Client,
}

impl std::fmt::Debug for KubeClusterApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeClusterApi").finish_non_exhaustive()
    }
}

impl KubeClusterApi {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterApi for KubeClusterApi {
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod, ClusterError> {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        debug!("Fetching pod {}/{}", namespace, name);

        match pods.get(name).await {
            Ok(pod) => Ok(pod),
            Err(kube::Error::Api(api_err)) if api_err.code == 404 => Err(ClusterError::NotFound {
                kind: "Pod",
                name: name.to_string(),
            }),
            Err(e) => Err(ClusterError::Api(e)),
        }
    }

    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret, ClusterError> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let name = secret.metadata.name.clone().unwrap_or_default();
        debug!("Creating secret {}/{}", namespace, name);

        match secrets.create(&PostParams::default(), secret).await {
            Ok(created) => Ok(created),
            Err(kube::Error::Api(api_err)) if api_err.code == 409 => {
                Err(ClusterError::AlreadyExists {
                    kind: "Secret",
                    name,
                })
            }
            Err(e) => Err(ClusterError::Api(e)),
        }
    }
}
