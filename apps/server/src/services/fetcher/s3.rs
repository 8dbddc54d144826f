//! S3 storage backend.
//!
//! Streams objects from AWS S3 or MinIO straight into the bridge sink.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use secrecy::ExposeSecret;
use tracing::{debug, info};

use super::{FileFetcher, Sink};
use crate::config::StorageSettings;
use crate::error::FetchError;

/// S3 storage client wrapper.
#[derive(Clone)]
pub struct S3Fetcher {
    client: Client,
    bucket: String,
}

impl S3Fetcher {
    /// Create a new S3 client from configuration.
    pub fn new(config: &StorageSettings) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            config.secret_key.expose_secret(),
            None,
            None,
            "file-bridge",
        );

        let region = Region::new(config.region.clone());

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(region)
            .credentials_provider(credentials)
            .force_path_style(true); // Required for MinIO

        // Use custom endpoint for MinIO in development
        if let Some(ref endpoint) = config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config_builder.build());

        info!("S3 backend configured: bucket={}", config.bucket);

        Self {
            client,
            bucket: config.bucket.clone(),
        }
    }

    /// Object key for a backend path.
    pub fn object_key(path: &str) -> &str {
        path.trim_start_matches('/')
    }
}

#[async_trait]
impl FileFetcher for S3Fetcher {
    fn name(&self) -> &'static str {
        "s3"
    }

    async fn fetch(&self, path: &str, sink: &mut Sink<'_>) -> Result<(), FetchError> {
        let key = Self::object_key(path);
        debug!("Serving file from S3: {}", key);

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    FetchError::NotFound(format!("File not found: {}", path))
                } else {
                    FetchError::Failed(format!("Failed to get file from S3: {}", service_error))
                }
            })?;

        let mut body = Box::pin(response.body.into_async_read());
        tokio::io::copy(&mut body, sink)
            .await
            .map_err(|e| FetchError::Failed(format!("Failed to stream S3 object {}: {}", key, e)))?;

        Ok(())
    }

    async fn check(&self) -> Result<(), FetchError> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                FetchError::Failed(format!(
                    "Failed to access bucket '{}': {}",
                    self.bucket,
                    e.into_service_error()
                ))
            })?;
        Ok(())
    }
}
