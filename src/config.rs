//! # Configuration
//!
//! Settings loaded from environment variables.
//!
//! `NAMESPACE` and `POD_NAME` identify the invoking pod and are normally
//! injected through the downward API. Everything else has a default.

use crate::constants::{
    DEFAULT_SECRETS_PATH, DEFAULT_TIMEOUT_SECS, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_NAMESPACE,
    ENV_POD_NAME, ENV_SECRETS_PATH, ENV_TIMEOUT_SECS,
};
use crate::provisioner::WorkloadRef;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),
}

/// Extractor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Namespace of the invoking pod (and of the created secret)
    pub namespace: String,
    /// Name of the invoking pod, owner of the created secret
    pub pod_name: String,
    /// Directory scanned for `.dockerconfigjson` files
    pub secrets_path: PathBuf,
    /// Upper bound for the whole run (seconds)
    pub timeout_secs: u64,
    /// Log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
}

impl ExtractorConfig {
    /// Load configuration from environment variables with defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when `NAMESPACE` or `POD_NAME` is
    /// unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment
    ///
    /// # Errors
    ///
    /// See [`ExtractorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            namespace: required(&lookup, ENV_NAMESPACE)?,
            pod_name: required(&lookup, ENV_POD_NAME)?,
            secrets_path: PathBuf::from(var_or_default_str(
                &lookup,
                ENV_SECRETS_PATH,
                DEFAULT_SECRETS_PATH,
            )),
            timeout_secs: var_or_default(&lookup, ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS),
            log_level: var_or_default_str(&lookup, ENV_LOG_LEVEL, "INFO"),
            log_format: var_or_default_str(&lookup, ENV_LOG_FORMAT, "text"),
        })
    }

    /// The invoking pod
    #[must_use]
    pub fn workload(&self) -> WorkloadRef {
        WorkloadRef::new(self.namespace.clone(), self.pod_name.clone())
    }

    /// Get run timeout duration
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingEnv(key))
}

/// Read variable or return default value
fn var_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read variable as string or return default
fn var_or_default_str<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
