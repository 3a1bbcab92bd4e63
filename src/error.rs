//! # Errors
//!
//! Error types for every stage of the extraction pipeline.
//!
//! Each fatal failure maps to one [`ExtractError`] variant carrying the
//! identifier it concerns (secret name, domain, pod), so callers can tell
//! "no credentials configured" from "cluster unreachable" by matching on the
//! variant instead of the message.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Input checks performed before any I/O
    Validation,
    /// Reading `.dockerconfigjson` files
    Aggregation,
    /// Looking up and decoding the credential entry
    Resolution,
    /// Talking to the Kubernetes API
    Provisioning,
}

impl Stage {
    /// Get human-readable string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Validation => "validation",
            Stage::Aggregation => "aggregation",
            Stage::Resolution => "resolution",
            Stage::Provisioning => "provisioning",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by the extraction pipeline
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid temporary secret name '{name}': {reason}")]
    InvalidSecretName { name: String, reason: String },

    #[error("domain cannot be empty")]
    EmptyDomain,

    #[error("failed to read Docker configs under {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("credential file reader for {} did not complete: {source}", path.display())]
    AggregationTask {
        path: PathBuf,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("no authentication found for domain: {domain}")]
    NotFound { domain: String },

    #[error("failed to extract credentials for domain {domain}: {source}")]
    MalformedCredential {
        domain: String,
        #[source]
        source: CredentialError,
    },

    #[error("failed to get pod {namespace}/{name}: {source}")]
    OwnerLookup {
        namespace: String,
        name: String,
        #[source]
        source: ClusterError,
    },

    #[error("failed to create temporary secret {namespace}/{name}: {source}")]
    SecretCreate {
        namespace: String,
        name: String,
        #[source]
        source: ClusterError,
    },

    #[error("timed out after {}s during {stage}", timeout.as_secs_f64())]
    TimedOut { stage: Stage, timeout: Duration },
}

impl ExtractError {
    /// Stage of the pipeline that failed
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            ExtractError::InvalidSecretName { .. } | ExtractError::EmptyDomain => {
                Stage::Validation
            }
            ExtractError::Traversal { .. } | ExtractError::AggregationTask { .. } => {
                Stage::Aggregation
            }
            ExtractError::NotFound { .. } | ExtractError::MalformedCredential { .. } => {
                Stage::Resolution
            }
            ExtractError::OwnerLookup { .. } | ExtractError::SecretCreate { .. } => {
                Stage::Provisioning
            }
            ExtractError::TimedOut { stage, .. } => *stage,
        }
    }

    /// Whether the run was cut off by its deadline
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExtractError::TimedOut { .. })
    }

    /// Whether the error was caused by caller input rather than the environment
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.stage() == Stage::Validation
    }
}

/// Why a credential entry could not be decoded
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to decode auth field: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("invalid auth format, expected username:password")]
    MissingSeparator,

    #[error("auth entry does not contain valid credentials")]
    MissingCredentials,
}

/// Failure reported by the cluster API
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} '{name}' already exists")]
    AlreadyExists { kind: &'static str, name: String },

    #[error("{kind} '{name}' has no uid")]
    MissingUid { kind: &'static str, name: String },

    #[error("Kubernetes API error: {0}")]
    Api(#[from] kube::Error),
}
