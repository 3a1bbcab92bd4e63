//! # Pipeline
//!
//! Ties the stages together: image reference → registry domain → credential
//! files → credentials → pod-owned secret.
//!
//! Every stage runs to completion before the next one starts and the first
//! failure aborts the run. The only write is the final create call, so an
//! aborted or cancelled run leaves nothing behind.
//!
//! [`SecretExtractor::run_with_timeout`] bounds the whole run. The deadline is
//! checked again before every cluster call, so a run that is already late
//! never creates the secret.

use crate::docker_config::{resolve_credentials, DockerConfigSource};
use crate::error::{ExtractError, Stage};
use crate::image::domain_from_image;
use crate::provisioner::{create_owned_secret, fetch_owner, ClusterApi, WorkloadRef};
use crate::validation::{validate_domain, validate_secret_name};
use k8s_openapi::api::core::v1::Secret;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, info_span, warn, Instrument};

/// Extracts registry credentials into a temporary secret for one pod
#[derive(Debug)]
pub struct SecretExtractor<S, C> {
    source: S,
    cluster: C,
    workload: WorkloadRef,
}

impl<S, C> SecretExtractor<S, C>
where
    S: DockerConfigSource,
    C: ClusterApi,
{
    pub fn new(source: S, cluster: C, workload: WorkloadRef) -> Self {
        Self {
            source,
            cluster,
            workload,
        }
    }

    #[must_use]
    pub fn workload(&self) -> &WorkloadRef {
        &self.workload
    }

    /// Create the temporary secret for the registry serving `image_reference`
    ///
    /// # Errors
    ///
    /// See [`SecretExtractor::create_temporary_secret`].
    pub async fn run(&self, image_reference: &str, secret_name: &str) -> Result<Secret, ExtractError> {
        self.run_until(image_reference, secret_name, None).await
    }

    /// Like [`SecretExtractor::run`], but gives up once `timeout` has elapsed
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::TimedOut`] carrying the stage that was in
    /// progress. No secret is created after the deadline.
    pub async fn run_with_timeout(
        &self,
        image_reference: &str,
        secret_name: &str,
        timeout: Duration,
    ) -> Result<Secret, ExtractError> {
        self.run_until(image_reference, secret_name, Some(Deadline::after(timeout)))
            .await
    }

    /// Create the temporary secret holding the credentials for `domain`
    ///
    /// `domain` must already be normalized (see [`domain_from_image`]); it is
    /// matched exactly against the keys of the credential files.
    ///
    /// # Errors
    ///
    /// Fails without any I/O on an invalid secret name or empty domain.
    /// Otherwise returns the error of the first failing stage.
    pub async fn create_temporary_secret(
        &self,
        secret_name: &str,
        domain: &str,
    ) -> Result<Secret, ExtractError> {
        self.extract(secret_name, domain, None).await
    }

    async fn run_until(
        &self,
        image_reference: &str,
        secret_name: &str,
        deadline: Option<Deadline>,
    ) -> Result<Secret, ExtractError> {
        let domain = domain_from_image(image_reference);
        let secret = self.extract(secret_name, &domain, deadline).await?;

        info!(
            "Successfully created temporary secret '{}' for domain '{}'",
            secret_name, domain
        );
        Ok(secret)
    }

    async fn extract(
        &self,
        secret_name: &str,
        domain: &str,
        deadline: Option<Deadline>,
    ) -> Result<Secret, ExtractError> {
        validate_secret_name(secret_name)?;
        validate_domain(domain)?;

        let span = info_span!(
            "extract",
            secret.name = secret_name,
            registry.domain = domain,
            pod = %self.workload
        );

        async move {
            let docker_configs =
                bounded(deadline, Stage::Aggregation, self.source.read_configs()).await?;
            if !docker_configs.warnings.is_empty() {
                warn!(
                    "Skipped {} unreadable credential file(s), using {} readable",
                    docker_configs.warnings.len(),
                    docker_configs.configs.len()
                );
            }

            let credentials = resolve_credentials(domain, &docker_configs.configs)?;

            let owner = bounded(
                deadline,
                Stage::Provisioning,
                fetch_owner(&self.cluster, &self.workload),
            )
            .await?;
            bounded(
                deadline,
                Stage::Provisioning,
                create_owned_secret(
                    &self.cluster,
                    &self.workload,
                    secret_name,
                    owner,
                    &credentials,
                ),
            )
            .await
        }
        .instrument(span)
        .await
    }
}

/// Point in time a bounded run must finish by
#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    budget: Duration,
}

impl Deadline {
    fn after(budget: Duration) -> Self {
        Self {
            at: Instant::now() + budget,
            budget,
        }
    }

    fn exceeded(self, stage: Stage) -> ExtractError {
        ExtractError::TimedOut {
            stage,
            timeout: self.budget,
        }
    }
}

/// Await `step` unless `deadline` passes first
///
/// A deadline that has already passed fails before `step` is polled.
async fn bounded<T, F>(deadline: Option<Deadline>, stage: Stage, step: F) -> Result<T, ExtractError>
where
    F: Future<Output = Result<T, ExtractError>>,
{
    let Some(deadline) = deadline else {
        return step.await;
    };

    if Instant::now() >= deadline.at {
        return Err(deadline.exceeded(stage));
    }

    tokio::time::timeout_at(deadline.at, step)
        .await
        .unwrap_or_else(|_elapsed| Err(deadline.exceeded(stage)))
}
