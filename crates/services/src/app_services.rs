use std::sync::Arc;

use cybersafe_core::Clock;
use storage::repository::Storage;
use tracing::info;

use crate::analyzer_service::{AnalyzerConfig, AnalyzerService};
use crate::certificate_service::CertificateService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::remote_detector::{RemoteDetectorConfig, RemoteDetectorService};

/// Runtime knobs gathered by the binary.
#[derive(Clone, Debug, Default)]
pub struct ServicesConfig {
    pub clock: Clock,
    pub analyzer: AnalyzerConfig,
    pub detector: RemoteDetectorConfig,
}

impl ServicesConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            clock: Clock::system(),
            analyzer: AnalyzerConfig::from_env(),
            detector: RemoteDetectorConfig::from_env(),
        }
    }
}

/// Assembles app-facing services over a storage backend.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressService>,
    analyzer: Arc<AnalyzerService>,
    remote_detector: Arc<RemoteDetectorService>,
    certificates: Arc<CertificateService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// detector URL is invalid.
    pub async fn new_sqlite(db_url: &str, config: ServicesConfig) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, config)
    }

    /// Build services over an existing storage handle. Analysis uses random
    /// increments.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::RemoteDetector` if the detector URL is invalid.
    pub fn from_storage(storage: &Storage, config: ServicesConfig) -> Result<Self, AppServicesError> {
        let analyzer = Arc::new(AnalyzerService::randomized(config.analyzer));
        Self::with_analyzer(storage, config.clock, &config.detector, analyzer)
    }

    /// Build services with a caller-supplied analyzer.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::RemoteDetector` if the detector URL is invalid.
    pub fn with_analyzer(
        storage: &Storage,
        clock: Clock,
        detector: &RemoteDetectorConfig,
        analyzer: Arc<AnalyzerService>,
    ) -> Result<Self, AppServicesError> {
        let progress = Arc::new(ProgressService::cybersafe(Arc::clone(&storage.kv)));
        let remote_detector = Arc::new(RemoteDetectorService::new(detector)?);
        let certificates = Arc::new(CertificateService::new(clock, Arc::clone(&progress)));
        info!(endpoint = %remote_detector.endpoint(), "Services ready.");

        Ok(Self {
            progress,
            analyzer,
            remote_detector,
            certificates,
        })
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn analyzer(&self) -> Arc<AnalyzerService> {
        Arc::clone(&self.analyzer)
    }

    #[must_use]
    pub fn remote_detector(&self) -> Arc<RemoteDetectorService> {
        Arc::clone(&self.remote_detector)
    }

    #[must_use]
    pub fn certificates(&self) -> Arc<CertificateService> {
        Arc::clone(&self.certificates)
    }
}
