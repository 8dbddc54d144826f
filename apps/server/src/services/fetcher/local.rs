//! Backend serving files from a directory on disk.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tracing::debug;

use super::{FileFetcher, Sink};
use crate::error::FetchError;

/// Serves files below a root directory.
#[derive(Debug, Clone)]
pub struct LocalFetcher {
    root: PathBuf,
}

impl LocalFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map a backend path onto the root directory.
    fn resolve(&self, path: &str) -> Result<PathBuf, FetchError> {
        let mut resolved = self.root.clone();
        for component in Path::new(path.trim_start_matches('/')).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(FetchError::Failed(format!(
                        "Path escapes backend root: {}",
                        path
                    )));
                }
            }
        }
        Ok(resolved)
    }
}

#[async_trait]
impl FileFetcher for LocalFetcher {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn fetch(&self, path: &str, sink: &mut Sink<'_>) -> Result<(), FetchError> {
        let full_path = self.resolve(path)?;
        debug!("Serving file from disk: {}", full_path.display());

        let not_found = || FetchError::NotFound(format!("File not found: {}", path));

        let mut file = match File::open(&full_path).await {
            Ok(file) => file,
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
                ) =>
            {
                return Err(not_found());
            }
            Err(e) => {
                return Err(FetchError::Failed(format!(
                    "Failed to open {}: {}",
                    path, e
                )));
            }
        };

        if file.metadata().await?.is_dir() {
            return Err(not_found());
        }

        tokio::io::copy(&mut file, sink)
            .await
            .map_err(|e| FetchError::Failed(format!("Failed to read {}: {}", path, e)))?;

        Ok(())
    }

    async fn check(&self) -> Result<(), FetchError> {
        let metadata = tokio::fs::metadata(&self.root).await.map_err(|e| {
            FetchError::Failed(format!(
                "Backend root {} is not accessible: {}",
                self.root.display(),
                e
            ))
        })?;
        if !metadata.is_dir() {
            return Err(FetchError::Failed(format!(
                "Backend root {} is not a directory",
                self.root.display()
            )));
        }
        Ok(())
    }
}
