//! # Credentials
//!
//! Finds the credential entry for a registry domain and decodes it.

use crate::docker_config::types::{AuthEntry, Credentials, DockerConfigJson};
use crate::error::{CredentialError, ExtractError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Return the entry for `domain` from the first config that has it
///
/// Keys are compared exactly; `domain` is expected to be normalized already.
#[must_use]
pub fn find_auth_for_domain<'a>(
    domain: &str,
    configs: &'a [DockerConfigJson],
) -> Option<&'a AuthEntry> {
    configs.iter().find_map(|config| config.auths.get(domain))
}

/// Decode an auth entry into the form stored in the temporary secret
///
/// A combined `auth` value is decoded, split on the first `:`, and each half
/// is base64-encoded again. Explicit `username`/`password` fields are taken
/// verbatim.
///
/// # Errors
///
/// Returns a [`CredentialError`] when `auth` is not valid base64, has no `:`,
/// or when neither representation is populated.
pub fn extract_credentials(entry: &AuthEntry) -> Result<Credentials, CredentialError> {
    if let Some(auth) = non_empty(entry.auth.as_deref()) {
        let decoded = STANDARD.decode(auth)?;
        let separator = decoded
            .iter()
            .position(|&b| b == b':')
            .ok_or(CredentialError::MissingSeparator)?;
        let (username, password) = (&decoded[..separator], &decoded[separator + 1..]);

        return Ok(Credentials {
            username: STANDARD.encode(username),
            password: STANDARD.encode(password),
        });
    }

    match (
        non_empty(entry.username.as_deref()),
        non_empty(entry.password.as_deref()),
    ) {
        (Some(username), Some(password)) => Ok(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }),
        _ => Err(CredentialError::MissingCredentials),
    }
}

/// Look up and decode the credentials for `domain`
///
/// # Errors
///
/// Returns [`ExtractError::NotFound`] if no config has an entry for
/// `domain`, and [`ExtractError::MalformedCredential`] if the entry cannot be
/// decoded.
pub fn resolve_credentials(
    domain: &str,
    configs: &[DockerConfigJson],
) -> Result<Credentials, ExtractError> {
    let entry = find_auth_for_domain(domain, configs).ok_or_else(|| ExtractError::NotFound {
        domain: domain.to_string(),
    })?;

    extract_credentials(entry).map_err(|source| ExtractError::MalformedCredential {
        domain: domain.to_string(),
        source,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(entries: &[(&str, AuthEntry)]) -> DockerConfigJson {
        DockerConfigJson {
            auths: entries
                .iter()
                .map(|(domain, entry)| ((*domain).to_string(), entry.clone()))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn b64(value: &str) -> String {
        STANDARD.encode(value)
    }

    mod extract_credentials_tests {
        use super::*;

        #[test]
        fn test_auth_field_is_split_and_reencoded() {
            let entry = AuthEntry::from_auth(b64("user:pass"));

            let creds = extract_credentials(&entry).unwrap();

            assert_eq!(creds.username, b64("user"));
            assert_eq!(creds.password, b64("pass"));
        }

        #[test]
        fn test_auth_field_splits_on_first_colon() {
            let entry = AuthEntry::from_auth(b64("user:pa:ss"));

            let creds = extract_credentials(&entry).unwrap();

            assert_eq!(creds.username, b64("user"));
            assert_eq!(creds.password, b64("pa:ss"));
        }

        #[test]
        fn test_auth_field_allows_empty_password() {
            let entry = AuthEntry::from_auth(b64("token:"));

            let creds = extract_credentials(&entry).unwrap();

            assert_eq!(creds.username, b64("token"));
            assert_eq!(creds.password, "");
        }

        #[test]
        fn test_auth_field_without_colon() {
            let entry = AuthEntry::from_auth(b64("userpass"));

            let err = extract_credentials(&entry).unwrap_err();

            assert!(matches!(err, CredentialError::MissingSeparator));
        }

        #[test]
        fn test_auth_field_not_base64() {
            let entry = AuthEntry::from_auth("%%%not-base64%%%");

            let err = extract_credentials(&entry).unwrap_err();

            assert!(matches!(err, CredentialError::InvalidEncoding(_)));
        }

        #[test]
        fn test_auth_field_wins_over_username_password() {
            let entry = AuthEntry {
                auth: Some(b64("a:b")),
                username: Some("other".to_string()),
                password: Some("other".to_string()),
            };

            let creds = extract_credentials(&entry).unwrap();

            assert_eq!(creds.username, b64("a"));
            assert_eq!(creds.password, b64("b"));
        }

        #[test]
        fn test_username_password_used_verbatim() {
            let entry = AuthEntry::from_username_password("user", "pass");

            let creds = extract_credentials(&entry).unwrap();

            assert_eq!(creds.username, "user");
            assert_eq!(creds.password, "pass");
        }

        #[test]
        fn test_empty_auth_falls_back_to_username_password() {
            let entry = AuthEntry {
                auth: Some(String::new()),
                username: Some("user".to_string()),
                password: Some("pass".to_string()),
            };

            let creds = extract_credentials(&entry).unwrap();

            assert_eq!(creds.username, "user");
        }

        #[test]
        fn test_empty_entry() {
            let err = extract_credentials(&AuthEntry::default()).unwrap_err();

            assert!(matches!(err, CredentialError::MissingCredentials));
        }

        #[test]
        fn test_username_without_password() {
            let entry = AuthEntry {
                username: Some("user".to_string()),
                password: Some(String::new()),
                ..AuthEntry::default()
            };

            let err = extract_credentials(&entry).unwrap_err();

            assert!(matches!(err, CredentialError::MissingCredentials));
        }
    }

    mod resolve_credentials_tests {
        use super::*;

        #[test]
        fn test_first_matching_config_wins() {
            let configs = vec![
                config(&[("other.io", AuthEntry::from_username_password("x", "x"))]),
                config(&[("example.com", AuthEntry::from_username_password("first", "1"))]),
                config(&[("example.com", AuthEntry::from_username_password("second", "2"))]),
            ];

            let creds = resolve_credentials("example.com", &configs).unwrap();

            assert_eq!(creds.username, "first");
        }

        #[test]
        fn test_lookup_is_exact() {
            let configs = vec![config(&[(
                "https://index.docker.io/v1/",
                AuthEntry::from_username_password("user", "pass"),
            )])];

            let err = resolve_credentials("docker.io", &configs).unwrap_err();

            assert!(matches!(err, ExtractError::NotFound { .. }));
        }

        #[test]
        fn test_not_found_names_domain() {
            let err = resolve_credentials("missing.example.com", &[]).unwrap_err();

            assert!(err.to_string().contains("missing.example.com"));
        }

        #[test]
        fn test_malformed_entry() {
            let configs = vec![config(&[("example.com", AuthEntry::default())])];

            let err = resolve_credentials("example.com", &configs).unwrap_err();

            match err {
                ExtractError::MalformedCredential { domain, source } => {
                    assert_eq!(domain, "example.com");
                    assert!(matches!(source, CredentialError::MissingCredentials));
                }
                other => panic!("expected MalformedCredential, got {other:?}"),
            }
        }

        #[test]
        fn test_malformed_entry_does_not_fall_through() {
            // The first match decides, even if a later config would decode.
            let configs = vec![
                config(&[("example.com", AuthEntry::default())]),
                config(&[("example.com", AuthEntry::from_username_password("u", "p"))]),
            ];

            let err = resolve_credentials("example.com", &configs).unwrap_err();

            assert!(matches!(err, ExtractError::MalformedCredential { .. }));
        }
    }
}
