//! # Validation
//!
//! Input checks run before the pipeline touches the filesystem or the cluster.

use crate::constants::MAX_KUBERNETES_NAME_LEN;
use crate::error::ExtractError;
use regex::Regex;
use std::sync::LazyLock;

// RFC 1123 subdomain: lowercase alphanumeric, hyphens, dots; cannot start/end with hyphen or dot
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .unwrap_or_else(|e| panic!("invalid Kubernetes name regex: {e}"))
});

/// Validate the name of the secret to create (RFC 1123 subdomain, 1-253 characters)
///
/// # Errors
///
/// Returns [`ExtractError::InvalidSecretName`] when the name is empty, too
/// long, or not a valid Kubernetes object name.
pub fn validate_secret_name(name: &str) -> Result<(), ExtractError> {
    let invalid = |reason: String| ExtractError::InvalidSecretName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("temporary secret name cannot be empty".to_string()));
    }

    if name.len() > MAX_KUBERNETES_NAME_LEN {
        return Err(invalid(format!(
            "exceeds maximum length of {MAX_KUBERNETES_NAME_LEN} characters (got {})",
            name.len()
        )));
    }

    if !NAME_REGEX.is_match(name) {
        return Err(invalid(
            "must be a valid Kubernetes name (lowercase alphanumeric, hyphens, dots; cannot start/end with hyphen or dot)"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate the registry domain used as lookup key
///
/// # Errors
///
/// Returns [`ExtractError::EmptyDomain`] for an empty domain.
pub fn validate_domain(domain: &str) -> Result<(), ExtractError> {
    if domain.is_empty() {
        return Err(ExtractError::EmptyDomain);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_secret_name_valid() {
        let max_name = "a".repeat(253);
        let valid_names = vec![
            "temp-secret",
            "temp-secret-123",
            "scan.pull.secret",
            "a",
            max_name.as_str(),
        ];

        for name in valid_names {
            assert!(
                validate_secret_name(name).is_ok(),
                "Name '{name}' should be valid"
            );
        }
    }

    #[test]
    fn test_validate_secret_name_invalid() {
        let too_long = "a".repeat(254);
        let invalid_names = vec![
            "",
            "-invalid",
            "invalid-",
            ".invalid",
            "INVALID",
            "invalid_name",
            "invalid name",
            " temp-secret",
            too_long.as_str(),
            "invalid/name",
        ];

        for name in invalid_names {
            let err = validate_secret_name(name).unwrap_err();
            assert!(
                matches!(err, ExtractError::InvalidSecretName { .. }),
                "Name '{name}' should be invalid"
            );
        }
    }

    #[test]
    fn test_validate_secret_name_empty_message() {
        let err = validate_secret_name("").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain("docker.io").is_ok());
        assert!(matches!(
            validate_domain(""),
            Err(ExtractError::EmptyDomain)
        ));
    }
}
