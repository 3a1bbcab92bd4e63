//! # Secret Construction
//!
//! Builds the pod-owned temporary secret.

use crate::constants::{
    MANAGED_BY_LABEL, MANAGED_BY_VALUE, SECRET_PASSWORD_KEY, SECRET_TYPE_OPAQUE,
    SECRET_USERNAME_KEY,
};
use crate::docker_config::Credentials;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, OwnerReference};
use k8s_openapi::ByteString;
use std::collections::BTreeMap;

/// Build the temporary secret
///
/// The secret carries exactly one owner reference, so the garbage collector
/// removes it together with the owning pod.
#[must_use]
pub fn build_secret(
    secret_name: &str,
    namespace: &str,
    owner: OwnerReference,
    credentials: &Credentials,
) -> Secret {
    let mut labels = BTreeMap::new();
    labels.insert(MANAGED_BY_LABEL.to_string(), MANAGED_BY_VALUE.to_string());

    let mut data = BTreeMap::new();
    data.insert(
        SECRET_USERNAME_KEY.to_string(),
        ByteString(credentials.username.as_bytes().to_vec()),
    );
    data.insert(
        SECRET_PASSWORD_KEY.to_string(),
        ByteString(credentials.password.as_bytes().to_vec()),
    );

    Secret {
        metadata: ObjectMeta {
            name: Some(secret_name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(labels),
            owner_references: Some(vec![owner]),
            ..Default::default()
        },
        data: Some(data),
        type_: Some(SECRET_TYPE_OPAQUE.to_string()),
        ..Default::default()
    }
}
