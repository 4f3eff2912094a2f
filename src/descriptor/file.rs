//! Descriptor source backed by a TOML endpoint manifest.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::loader::{load_config, ConfigError};
use crate::descriptor::{DescriptorSource, EndpointDescriptor};
use crate::routing::SourceError;

/// Re-reads the manifest on every call, so a rebuild observes file edits.
#[derive(Debug, Clone)]
pub struct FileDescriptorSource {
    path: PathBuf,
}

impl FileDescriptorSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl From<ConfigError> for SourceError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => SourceError::Io(e),
            ConfigError::Parse(e) => SourceError::Parse(e),
            ConfigError::Validation(errors) => {
                SourceError::Validation(errors.iter().map(ToString::to_string).collect())
            }
        }
    }
}

#[async_trait]
impl DescriptorSource for FileDescriptorSource {
    async fn descriptors(&self) -> Result<Vec<EndpointDescriptor>, SourceError> {
        let path = self.path.clone();
        let config = tokio::task::spawn_blocking(move || load_config(&path))
            .await
            .map_err(|e| SourceError::Other(format!("manifest loader task failed: {}", e)))??;

        tracing::debug!(
            path = ?self.path,
            endpoints = config.endpoints.len(),
            "Endpoint manifest loaded"
        );
        Ok(config.endpoints)
    }
}
