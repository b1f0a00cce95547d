#![forbid(unsafe_code)]

pub mod analyzer_service;
pub mod app_services;
pub mod certificate_service;
pub mod error;
pub mod progress_service;
pub mod remote_detector;

pub use cybersafe_core::Clock;

pub use analyzer_service::{AnalysisReport, AnalyzerConfig, AnalyzerService, RandomIncrements};
pub use app_services::{AppServices, ServicesConfig};
pub use certificate_service::{Certificate, CertificateService, DEFAULT_RECIPIENT};
pub use error::{AppServicesError, CertificateError, ProgressServiceError, RemoteDetectorError};
pub use progress_service::{ProgressService, ProgressSnapshot, QuizSubmission, TRAINING_KEY};
pub use remote_detector::{RemoteDetectorConfig, RemoteDetectorService, RemoteVerdict};
