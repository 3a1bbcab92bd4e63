//! # Types
//!
//! Data structures for `.dockerconfigjson` documents.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Parsed `.dockerconfigjson` document
///
/// Keys of `auths` are kept exactly as written by the tool that produced the
/// file; only the lookup key is normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DockerConfigJson {
    #[serde(default)]
    pub auths: HashMap<String, AuthEntry>,
}

/// Credential record for one registry domain
///
/// Either `auth` (base64 of `username:password`) or the explicit
/// `username`/`password` pair is expected. Empty strings count as absent.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl AuthEntry {
    /// Entry using the combined `auth` field
    #[must_use]
    pub fn from_auth(auth: impl Into<String>) -> Self {
        Self {
            auth: Some(auth.into()),
            ..Self::default()
        }
    }

    /// Entry using explicit `username` and `password` fields
    #[must_use]
    pub fn from_username_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            auth: None,
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

impl fmt::Debug for AuthEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthEntry")
            .field("auth", &self.auth.as_ref().map(|_| "***"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Credentials in the form stored in the temporary secret
///
/// Values are base64 when derived from an `auth` field, and verbatim when the
/// source entry used explicit `username`/`password` fields.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A credential file that was skipped while aggregating
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Result of scanning a directory tree for credential files
///
/// `configs` keeps discovery order, which decides which file wins when two
/// files carry the same domain.
#[derive(Debug, Clone, Default)]
pub struct DockerConfigs {
    pub configs: Vec<DockerConfigJson>,
    pub warnings: Vec<ConfigWarning>,
}

impl DockerConfigs {
    /// Check if any credential file was parsed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
