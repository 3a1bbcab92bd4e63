//! # Constants
//!
//! Shared constants used throughout the extractor.
//!
//! These values represent reasonable defaults and can be overridden via
//! environment variables where applicable (see [`crate::config`]).

/// File name Kubernetes uses for `kubernetes.io/dockerconfigjson` secret payloads
pub const DOCKER_CONFIG_FILE_NAME: &str = ".dockerconfigjson";

/// Directory where image pull secrets are mounted into the pod
pub const DEFAULT_SECRETS_PATH: &str = "/secrets";

/// Registry domain used when an image reference does not name one
pub const DEFAULT_DOMAIN: &str = "docker.io";

/// Historical alias of [`DEFAULT_DOMAIN`] still written by older tooling
pub const LEGACY_DEFAULT_DOMAIN: &str = "index.docker.io";

/// Host name accepted as an explicit registry domain without a dot or port
pub const LOCALHOST: &str = "localhost";

/// Default upper bound for one pipeline run, including both API calls (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Environment variable names
pub const ENV_NAMESPACE: &str = "NAMESPACE";
pub const ENV_POD_NAME: &str = "POD_NAME";
pub const ENV_SECRETS_PATH: &str = "SECRETS_PATH";
pub const ENV_TIMEOUT_SECS: &str = "TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";

/// Secret data key holding the (base64) username
pub const SECRET_USERNAME_KEY: &str = "username";

/// Secret data key holding the (base64) password
pub const SECRET_PASSWORD_KEY: &str = "password";

/// Secret type of the temporary secret
pub const SECRET_TYPE_OPAQUE: &str = "Opaque";

/// Owner reference API version for core/v1 pods
pub const OWNER_API_VERSION: &str = "v1";

/// Owner reference kind for the invoking pod
pub const OWNER_KIND: &str = "Pod";

/// Label key marking objects created by this tool
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Value of [`MANAGED_BY_LABEL`]
pub const MANAGED_BY_VALUE: &str = "pull-secret-extractor";

/// Maximum length of a Kubernetes object name (RFC 1123 subdomain)
pub const MAX_KUBERNETES_NAME_LEN: usize = 253;
