//! # Docker Config
//!
//! Reads mounted image pull secrets and resolves registry credentials.
//!
//! ## Supported Formats
//!
//! Each `.dockerconfigjson` file has the shape
//! `{"auths": {"<domain>": {...}}}` where an entry is either
//! `{"auth": "<base64 user:pass>"}` or `{"username": "...", "password": "..."}`.
//! Credential helpers and legacy `.dockercfg` files are not supported.

pub mod credentials;
pub mod file_finder;
pub mod types;

use crate::error::ExtractError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

// Re-export public API
pub use credentials::{extract_credentials, find_auth_for_domain, resolve_credentials};
pub use file_finder::read_docker_configs;
pub use types::{AuthEntry, ConfigWarning, Credentials, DockerConfigJson, DockerConfigs};

/// Source of parsed credential files
///
/// The pipeline only depends on this trait so tests can supply configs
/// without touching the filesystem. Implementations must not block the
/// calling task, otherwise a deadline on the pipeline cannot fire.
#[async_trait]
pub trait DockerConfigSource: Send + Sync {
    /// Read and parse all credential files
    ///
    /// # Errors
    ///
    /// Returns an error only if the source as a whole is unavailable;
    /// individual bad files are reported as warnings.
    async fn read_configs(&self) -> Result<DockerConfigs, ExtractError>;
}

/// Reads `.dockerconfigjson` files from a directory tree
#[derive(Debug, Clone)]
pub struct FsDockerConfigSource {
    base_path: PathBuf,
}

impl FsDockerConfigSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

/// The walk runs on the blocking pool; dropping the returned future detaches
/// it, so a hung mount does not hold up the caller.
#[async_trait]
impl DockerConfigSource for FsDockerConfigSource {
    async fn read_configs(&self) -> Result<DockerConfigs, ExtractError> {
        let base_path = self.base_path.clone();
        tokio::task::spawn_blocking(move || read_docker_configs(&base_path))
            .await
            .map_err(|source| ExtractError::AggregationTask {
                path: self.base_path.clone(),
                source,
            })?
    }
}

/// In-memory configs, already parsed
#[async_trait]
impl DockerConfigSource for DockerConfigs {
    async fn read_configs(&self) -> Result<DockerConfigs, ExtractError> {
        Ok(self.clone())
    }
}
