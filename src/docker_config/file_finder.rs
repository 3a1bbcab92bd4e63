//! # File Finder
//!
//! Discovers and parses `.dockerconfigjson` files below a base directory.
//!
//! Several image pull secrets may be mounted into the same tree. A broken or
//! unreadable file from one of them is reported as a warning and skipped so
//! the remaining secrets stay usable.

use crate::constants::DOCKER_CONFIG_FILE_NAME;
use crate::docker_config::types::{ConfigWarning, DockerConfigJson, DockerConfigs};
use crate::error::ExtractError;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Why a single credential file was skipped
#[derive(Debug, Error)]
pub(crate) enum ReadConfigError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read every `.dockerconfigjson` file below `base_path`
///
/// Files are visited in lexical order per directory. Entries that cannot be
/// accessed, read or parsed end up in [`DockerConfigs::warnings`].
///
/// # Errors
///
/// Returns [`ExtractError::Traversal`] when `base_path` itself cannot be
/// accessed (for example because it does not exist).
pub fn read_docker_configs(base_path: &Path) -> Result<DockerConfigs, ExtractError> {
    let mut result = DockerConfigs::default();

    for entry in WalkDir::new(base_path).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(ExtractError::Traversal {
                    path: base_path.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                let path = e
                    .path()
                    .map_or_else(|| base_path.to_path_buf(), Path::to_path_buf);
                warn!("Error accessing path {}: {}", path.display(), e);
                result.warnings.push(ConfigWarning {
                    path,
                    message: format!("error accessing path: {e}"),
                });
                continue;
            }
        };

        if !is_docker_config_file(&entry) {
            continue;
        }

        match read_single_config(entry.path()) {
            Ok(config) => {
                debug!(
                    "Loaded Docker config from {} ({} registries)",
                    entry.path().display(),
                    config.auths.len()
                );
                result.configs.push(config);
            }
            Err(e) => {
                warn!(
                    "Failed to read config from {}: {}",
                    entry.path().display(),
                    e
                );
                result.warnings.push(ConfigWarning {
                    path: entry.path().to_path_buf(),
                    message: e.to_string(),
                });
            }
        }
    }

    Ok(result)
}

/// Match on the file name only; secret volumes project files as symlinks, so
/// anything that is not a directory (or a symlink to one) qualifies.
fn is_docker_config_file(entry: &DirEntry) -> bool {
    if entry.file_name() != DOCKER_CONFIG_FILE_NAME {
        return false;
    }
    if entry.file_type().is_dir() {
        return false;
    }
    !(entry.path_is_symlink() && entry.path().is_dir())
}

fn read_single_config(path: &Path) -> Result<DockerConfigJson, ReadConfigError> {
    let data = std::fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}
