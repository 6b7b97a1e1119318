//! Directory-backed storage for emitted artifacts.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from artifact storage.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The name could escape the storage root or is empty.
    #[error("invalid artifact name '{0}'")]
    InvalidName(String),

    #[error("artifact '{0}' not found")]
    NotFound(String),

    #[error("failed to write artifact '{name}': {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read artifact '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Flat directory of artifacts addressed by file name.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `contents` under `name`, replacing any previous artifact.
    pub async fn write(&self, name: &str, contents: &[u8]) -> Result<PathBuf, ArtifactError> {
        let path = self.path_for(name)?;
        let io_err = |source| ArtifactError::Write {
            name: name.to_string(),
            source,
        };

        tokio::fs::create_dir_all(&self.root).await.map_err(io_err)?;
        tokio::fs::write(&path, contents).await.map_err(io_err)?;
        Ok(path)
    }

    /// Read the artifact stored under `name`.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>, ArtifactError> {
        let path = self
            .path_for(name)
            .map_err(|_| ArtifactError::NotFound(name.to_string()))?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ArtifactError::NotFound(name.to_string())),
            // A directory at that name is not an artifact.
            Err(_) if path.is_dir() => Err(ArtifactError::NotFound(name.to_string())),
            Err(source) => Err(ArtifactError::Read {
                name: name.to_string(),
                source,
            }),
        }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        if !is_plain_file_name(name) {
            return Err(ArtifactError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

/// A single path component with no separators or parent references.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}
