use std::path::{Path, PathBuf};
use std::sync::Arc;

use services::{AnalyzerService, CertificateService, ProgressService, RemoteDetectorService};

pub trait UiApp: Send + Sync {
    fn progress(&self) -> Arc<ProgressService>;
    fn analyzer(&self) -> Arc<AnalyzerService>;
    fn remote_detector(&self) -> Arc<RemoteDetectorService>;
    fn certificates(&self) -> Arc<CertificateService>;

    /// Directory that exported certificates are written to.
    fn export_dir(&self) -> PathBuf;
}

#[derive(Clone)]
pub struct AppContext {
    progress: Arc<ProgressService>,
    analyzer: Arc<AnalyzerService>,
    remote_detector: Arc<RemoteDetectorService>,
    certificates: Arc<CertificateService>,
    export_dir: Arc<PathBuf>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            progress: app.progress(),
            analyzer: app.analyzer(),
            remote_detector: app.remote_detector(),
            certificates: app.certificates(),
            export_dir: Arc::new(app.export_dir()),
        }
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

    #[must_use]
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
