//! Error taxonomy for /proc reads.
//!
//! Readers return `Result<T, ProbeError>`. Display-facing queries degrade these
//! errors to default values, so nothing here is ever fatal for a sample.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Key '{key}' not found in {}", path.display())]
    MissingKey { path: PathBuf, key: String },
}

impl ProbeError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ProbeError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        ProbeError::Malformed {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn missing_key(path: &Path, key: &str) -> Self {
        ProbeError::MissingKey {
            path: path.to_path_buf(),
            key: key.to_string(),
        }
    }

    /// True when the underlying file does not exist, e.g. the pid exited.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProbeError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
