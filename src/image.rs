//! # Image References
//!
//! Derives the registry domain from a container image reference.
//!
//! Image references routinely omit the registry when pointing at Docker Hub,
//! so `user/repo` and `myregistry.com/repo` have to be told apart without
//! asking any registry. The rules match containerd's reference normalization.

use crate::constants::{DEFAULT_DOMAIN, LEGACY_DEFAULT_DOMAIN, LOCALHOST};

/// Extract the registry domain from an image reference.
///
/// - `ubuntu` → `docker.io`
/// - `foo/bar` → `docker.io`
/// - `registry.example.com/app:latest` → `registry.example.com`
/// - `localhost:5000/app` → `localhost:5000`
/// - `index.docker.io/foo` → `docker.io`
#[must_use]
pub fn domain_from_image(reference: &str) -> String {
    let domain = match reference.split_once('/') {
        Some((candidate, _)) if is_explicit_domain(candidate) => candidate,
        _ => DEFAULT_DOMAIN,
    };

    if domain == LEGACY_DEFAULT_DOMAIN {
        DEFAULT_DOMAIN.to_string()
    } else {
        domain.to_string()
    }
}

/// A leading path segment names a registry when it carries a dot, a port,
/// is `localhost`, or contains uppercase (repository paths are lowercase).
fn is_explicit_domain(segment: &str) -> bool {
    segment.contains('.')
        || segment.contains(':')
        || segment == LOCALHOST
        || segment.chars().any(char::is_uppercase)
}
