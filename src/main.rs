//! # Pull Secret Extractor
//!
//! Creates a temporary Kubernetes Secret with the registry credentials for a
//! container image, owned by the pod running this binary.
//!
//! ## Overview
//!
//! 1. **Resolve the registry** - derives the registry domain from the image reference
//! 2. **Read pull secrets** - scans `SECRETS_PATH` for mounted `.dockerconfigjson` files
//! 3. **Pick credentials** - takes the first entry matching the domain
//! 4. **Create the secret** - owned by this pod, so it is garbage collected with it
//!
//! See [`pull_secret_extractor::cli::Cli`] for arguments and environment variables.

use anyhow::{bail, Context, Result};
use clap::Parser;
use kube::Client;
use pull_secret_extractor::cli::Cli;
use pull_secret_extractor::observability::{init_tracing, LogFormat};
use pull_secret_extractor::prelude::*;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let invocation = Cli::parse().into_invocation()?;
    let config = ExtractorConfig::from_env().context("Invalid configuration")?;

    init_tracing(&config.log_level, LogFormat::parse(&config.log_format))?;

    info!("Starting pull-secret-extractor v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Build info: timestamp={}, datetime={}, git_hash={}",
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );

    // Required for rustls 0.23+ when no default provider is set via features
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider was already installed");
    }

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;

    let extractor = SecretExtractor::new(
        FsDockerConfigSource::new(&config.secrets_path),
        KubeClusterApi::new(client),
        config.workload(),
    );

    let run = extractor.run_with_timeout(
        &invocation.image_id,
        &invocation.secret_name,
        config.timeout(),
    );

    tokio::select! {
        result = run => match result {
            Ok(_) => Ok(()),
            Err(e) => {
                error!(stage = %e.stage(), "Application failed: {}", e);
                Err(e.into())
            }
        },
        () = shutdown_signal() => {
            bail!("interrupted before the temporary secret was created")
        }
    }
}

/// Wait for a shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT (Ctrl+C), aborting");
        },
        () = terminate => {
            info!("Received SIGTERM, aborting");
        },
    }
}
