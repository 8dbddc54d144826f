//! Storage backends the bridge fetches files from.
//!
//! A backend writes the whole file into the sink it is given, or reports that the
//! path does not exist, or reports any other failure.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncWrite;

use crate::config::{BackendKind, Config, ConfigError};
use crate::error::FetchError;

pub mod local;
pub mod s3;

pub use local::LocalFetcher;
pub use s3::S3Fetcher;

/// Writable byte sink handed to a backend.
pub type Sink<'a> = dyn AsyncWrite + Send + Unpin + 'a;

/// A storage backend capable of streaming a file into a sink.
#[async_trait]
pub trait FileFetcher: Send + Sync {
    /// Short backend name used in logs and readiness output.
    fn name(&self) -> &'static str;

    /// Write the complete content at `path` into `sink`.
    ///
    /// `path` always starts with `/` and is not normalized.
    async fn fetch(&self, path: &str, sink: &mut Sink<'_>) -> Result<(), FetchError>;

    /// Verify the backend is reachable.
    async fn check(&self) -> Result<(), FetchError> {
        Ok(())
    }
}

/// Build the backend selected by the configuration.
pub fn from_config(config: &Config) -> Result<Arc<dyn FileFetcher>, ConfigError> {
    match config.backend {
        BackendKind::Local => {
            let root = config
                .local_root
                .clone()
                .ok_or(ConfigError::MissingEnvVar("BRIDGE_LOCAL_ROOT"))?;
            Ok(Arc::new(LocalFetcher::new(root)))
        }
        BackendKind::S3 => Ok(Arc::new(S3Fetcher::new(&config.storage))),
    }
}
