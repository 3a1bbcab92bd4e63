//! Shared fixtures for integration tests.

#![allow(dead_code, reason = "Not every test binary uses every fixture")]

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Pod, Secret};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use pull_secret_extractor::constants::DOCKER_CONFIG_FILE_NAME;
use pull_secret_extractor::error::ClusterError;
use pull_secret_extractor::provisioner::ClusterApi;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

pub const NAMESPACE: &str = "test-namespace";
pub const POD_NAME: &str = "test-pod";
pub const POD_UID: &str = "test-uid-123";

/// In-memory cluster holding pods and the secrets created against it
#[derive(Default)]
pub struct FakeCluster {
    pods: Mutex<HashMap<(String, String), Pod>>,
    secrets: Mutex<HashMap<(String, String), Secret>>,
    pod_lookups: Mutex<usize>,
    create_calls: Mutex<usize>,
}

impl FakeCluster {
    /// Cluster containing the default test pod
    pub fn with_test_pod() -> Self {
        let cluster = Self::default();
        cluster.add_pod(NAMESPACE, POD_NAME, POD_UID);
        cluster
    }

    pub fn add_pod(&self, namespace: &str, name: &str, uid: &str) {
        let pod = Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                uid: Some(uid.to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        self.pods
            .lock()
            .unwrap()
            .insert((namespace.to_string(), name.to_string()), pod);
    }

    pub fn secret(&self, namespace: &str, name: &str) -> Option<Secret> {
        self.secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn secret_count(&self) -> usize {
        self.secrets.lock().unwrap().len()
    }

    pub fn pod_lookups(&self) -> usize {
        *self.pod_lookups.lock().unwrap()
    }

    pub fn create_calls(&self) -> usize {
        *self.create_calls.lock().unwrap()
    }
}

#[async_trait]
impl ClusterApi for FakeCluster {
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<Pod, ClusterError> {
        *self.pod_lookups.lock().unwrap() += 1;
        self.pods
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| ClusterError::NotFound {
                kind: "Pod",
                name: name.to_string(),
            })
    }

    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret, ClusterError> {
        *self.create_calls.lock().unwrap() += 1;
        let name = secret.metadata.name.clone().unwrap_or_default();
        let mut secrets = self.secrets.lock().unwrap();
        let key = (namespace.to_string(), name.clone());
        if secrets.contains_key(&key) {
            return Err(ClusterError::AlreadyExists {
                kind: "Secret",
                name,
            });
        }
        secrets.insert(key, secret.clone());
        Ok(secret.clone())
    }
}

/// Write a `.dockerconfigjson` file into `dir`, creating it if needed
pub fn write_docker_config(dir: &Path, content: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(DOCKER_CONFIG_FILE_NAME), content).unwrap();
}

/// Secret data value as a UTF-8 string
pub fn secret_value(secret: &Secret, key: &str) -> String {
    let data = secret.data.as_ref().expect("secret has no data");
    String::from_utf8(data[key].0.clone()).unwrap()
}
