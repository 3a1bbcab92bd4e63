//! # Secret Provisioner
//!
//! Creates the temporary secret in the invoking pod's namespace, owned by
//! that pod.
//!
//! Provisioning is a short chain of fallible steps:
//!
//! 1. **Fetch owner** - read the pod to learn its UID
//! 2. **Build** - assemble the secret with an owner reference to the pod
//! 3. **Create** - submit it; any API error (including already-exists) is returned
//!
//! Nothing is retried, updated or deleted. Cleanup is left to the garbage
//! collector via the owner reference.

pub mod kube_api;
pub mod secret;

use crate::constants::{OWNER_API_VERSION, OWNER_KIND};
use crate::docker_config::Credentials;
use crate::error::{ClusterError, ExtractError};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Pod, Secret};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use std::sync::Arc;
use tracing::{debug, info};

pub use kube_api::KubeClusterApi;
pub use secret::build_secret;

/// Cluster operations the provisioner depends on
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Get a pod by namespace and name
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod, ClusterError>;

    /// Create a secret in `namespace`
    async fn create_secret(&self, namespace: &str, secret: &Secret)
        -> Result<Secret, ClusterError>;
}

#[async_trait]
impl<T: ClusterApi + ?Sized> ClusterApi for Arc<T> {
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod, ClusterError> {
        (**self).get_pod(namespace, name).await
    }

    async fn create_secret(
        &self,
        namespace: &str,
        secret: &Secret,
    ) -> Result<Secret, ClusterError> {
        (**self).create_secret(namespace, secret).await
    }
}

/// The pod on whose behalf credentials are extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadRef {
    pub namespace: String,
    pub pod_name: String,
}

impl WorkloadRef {
    pub fn new(namespace: impl Into<String>, pod_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            pod_name: pod_name.into(),
        }
    }
}

impl std::fmt::Display for WorkloadRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.namespace, self.pod_name)
    }
}

/// Look up the invoking pod and build an owner reference to it
///
/// # Errors
///
/// Returns [`ExtractError::OwnerLookup`] if the pod cannot be read or has no UID.
pub async fn fetch_owner<C: ClusterApi + ?Sized>(
    cluster: &C,
    workload: &WorkloadRef,
) -> Result<OwnerReference, ExtractError> {
    let lookup_error = |source: ClusterError| ExtractError::OwnerLookup {
        namespace: workload.namespace.clone(),
        name: workload.pod_name.clone(),
        source,
    };

    let pod = cluster
        .get_pod(&workload.namespace, &workload.pod_name)
        .await
        .map_err(lookup_error)?;

    let uid = pod
        .metadata
        .uid
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| {
            lookup_error(ClusterError::MissingUid {
                kind: OWNER_KIND,
                name: workload.pod_name.clone(),
            })
        })?;

    debug!("Resolved owner pod {} (uid={})", workload, uid);

    Ok(OwnerReference {
        api_version: OWNER_API_VERSION.to_string(),
        kind: OWNER_KIND.to_string(),
        name: workload.pod_name.clone(),
        uid,
        ..Default::default()
    })
}

/// Create the temporary secret owned by `workload`
///
/// # Errors
///
/// Returns [`ExtractError::OwnerLookup`] if the owner pod cannot be read (no
/// create is attempted then) and [`ExtractError::SecretCreate`] if the API
/// rejects the secret.
pub async fn provision<C: ClusterApi + ?Sized>(
    cluster: &C,
    workload: &WorkloadRef,
    secret_name: &str,
    credentials: &Credentials,
) -> Result<Secret, ExtractError> {
    let owner = fetch_owner(cluster, workload).await?;
    create_owned_secret(cluster, workload, secret_name, owner, credentials).await
}

/// Create the temporary secret with an already resolved owner reference
///
/// # Errors
///
/// Returns [`ExtractError::SecretCreate`] if the API rejects the secret.
pub async fn create_owned_secret<C: ClusterApi + ?Sized>(
    cluster: &C,
    workload: &WorkloadRef,
    secret_name: &str,
    owner: OwnerReference,
    credentials: &Credentials,
) -> Result<Secret, ExtractError> {
    let secret = build_secret(secret_name, &workload.namespace, owner, credentials);

    let created = cluster
        .create_secret(&workload.namespace, &secret)
        .await
        .map_err(|source| ExtractError::SecretCreate {
            namespace: workload.namespace.clone(),
            name: secret_name.to_string(),
            source,
        })?;

    info!(
        "Created temporary secret {}/{} owned by pod {}",
        workload.namespace, secret_name, workload.pod_name
    );

    Ok(created)
}
