//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error("failed to encode progress: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RemoteDetectorService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteDetectorError {
    #[error("invalid detector base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("detector returned a body that is not a JSON verdict")]
    InvalidBody,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl RemoteDetectorError {
    /// Text shown in place of a verdict when the request fails.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        "Error contacting server"
    }
}

/// Errors emitted by `CertificateService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CertificateError {
    #[error("certificate is locked until all modules are complete and the quiz is passed")]
    Locked,
    #[error("failed to write certificate: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    RemoteDetector(#[from] RemoteDetectorError),
}
