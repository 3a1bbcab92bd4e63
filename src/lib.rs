//! Pull Secret Extractor Library
//!
//! Resolves the registry credentials for a container image from mounted
//! `.dockerconfigjson` files and stores them in a short-lived Kubernetes
//! Secret owned by the invoking pod, so a dependent workload (for example an
//! image scanning job) can pull from a private registry without receiving the
//! original pull secret.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pull_secret_extractor::prelude::*;
//!
//! # async fn example(client: kube::Client) -> Result<(), ExtractError> {
//! let extractor = SecretExtractor::new(
//!     FsDockerConfigSource::new("/secrets"),
//!     KubeClusterApi::new(client),
//!     WorkloadRef::new("scans", "scan-pod-1"),
//! );
//! extractor.run("registry.example.com/app:latest", "temp-secret").await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod docker_config;
pub mod error;
pub mod image;
pub mod observability;
pub mod pipeline;
pub mod prelude;
pub mod provisioner;
pub mod validation;
