//! # CLI
//!
//! Command-line arguments of the `pull-secret-extractor` binary.
//!
//! ## Usage
//!
//! ```bash
//! # Positional form
//! pull-secret-extractor registry.example.com/app:latest temp-secret
//!
//! # Flag form
//! pull-secret-extractor --image-id registry.example.com/app:latest --secret temp-secret
//! ```

use clap::Parser;
use thiserror::Error;

/// Copy the registry credentials for an image into a temporary, pod-owned secret
#[derive(Debug, Parser)]
#[command(name = "pull-secret-extractor", version)]
#[command(
    about = "Copy the registry credentials for an image into a temporary, pod-owned secret",
    long_about = None,
    after_help = "\
Environment:
  NAMESPACE      namespace of the invoking pod (required)
  POD_NAME       name of the invoking pod (required)
  SECRETS_PATH   directory scanned for .dockerconfigjson files (default: /secrets)
  TIMEOUT_SECS   timeout for the whole run (default: 30)
  LOG_LEVEL      ERROR, WARN, INFO, DEBUG or TRACE (default: INFO)
  LOG_FORMAT     text or json (default: text)
"
)]
pub struct Cli {
    /// Container image reference to extract the registry domain from
    #[arg(long = "image-id", value_name = "IMAGE")]
    pub image_id: Option<String>,

    /// Name for the temporary secret
    #[arg(long = "secret", value_name = "NAME")]
    pub secret: Option<String>,

    /// Image reference (positional form)
    #[arg(value_name = "IMAGE")]
    pub image_arg: Option<String>,

    /// Temporary secret name (positional form)
    #[arg(value_name = "SECRET_NAME")]
    pub secret_arg: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("usage: pull-secret-extractor <IMAGE> <SECRET_NAME> OR use --image-id and --secret flags")]
    Usage,
    #[error("image ID is required (use --image-id flag or provide as first argument)")]
    MissingImage,
    #[error("temporary secret name is required (use --secret flag or provide as second argument)")]
    MissingSecretName,
}

/// What to extract and where to put it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub image_id: String,
    pub secret_name: String,
}

impl Cli {
    /// Resolve flags and positional arguments into an [`Invocation`]
    ///
    /// Positional arguments are only used when neither flag is given.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] naming the missing argument.
    pub fn into_invocation(self) -> Result<Invocation, CliError> {
        let image_flag = self.image_id.filter(|v| !v.is_empty());
        let secret_flag = self.secret.filter(|v| !v.is_empty());

        if image_flag.is_none() && secret_flag.is_none() {
            return match (self.image_arg, self.secret_arg) {
                (Some(image_id), Some(secret_name)) => Ok(Invocation {
                    image_id,
                    secret_name,
                }),
                _ => Err(CliError::Usage),
            };
        }

        Ok(Invocation {
            image_id: image_flag.ok_or(CliError::MissingImage)?,
            secret_name: secret_flag.ok_or(CliError::MissingSecretName)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Invocation, CliError> {
        let mut argv = vec!["pull-secret-extractor"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().into_invocation()
    }

    #[test]
    fn test_positional_arguments() {
        let invocation = parse(&["registry.example.com/app:latest", "temp-secret"]).unwrap();

        assert_eq!(invocation.image_id, "registry.example.com/app:latest");
        assert_eq!(invocation.secret_name, "temp-secret");
    }

    #[test]
    fn test_flags() {
        let invocation = parse(&["--image-id", "ubuntu", "--secret", "temp-secret"]).unwrap();

        assert_eq!(invocation.image_id, "ubuntu");
        assert_eq!(invocation.secret_name, "temp-secret");
    }

    #[test]
    fn test_no_arguments() {
        assert_eq!(parse(&[]), Err(CliError::Usage));
    }

    #[test]
    fn test_single_positional_argument() {
        assert_eq!(parse(&["ubuntu"]), Err(CliError::Usage));
    }

    #[test]
    fn test_missing_secret_flag() {
        assert_eq!(
            parse(&["--image-id", "ubuntu"]),
            Err(CliError::MissingSecretName)
        );
    }

    #[test]
    fn test_missing_image_flag() {
        assert_eq!(
            parse(&["--secret", "temp-secret"]),
            Err(CliError::MissingImage)
        );
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
