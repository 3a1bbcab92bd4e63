//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ```rust
//! use pull_secret_extractor::prelude::*;
//! ```

// Pipeline - the main entry point
pub use crate::pipeline::SecretExtractor;

// Capability traits and their production implementations
pub use crate::docker_config::{DockerConfigSource, FsDockerConfigSource};
pub use crate::provisioner::{ClusterApi, KubeClusterApi, WorkloadRef};

// Data types
pub use crate::docker_config::{AuthEntry, ConfigWarning, Credentials, DockerConfigJson, DockerConfigs};

// Config types
pub use crate::config::{ConfigError, ExtractorConfig};

// Common error types
pub use crate::error::{ClusterError, CredentialError, ExtractError, Stage};

pub use crate::image::domain_from_image;
