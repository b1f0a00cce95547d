use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use cybersafe_core::Clock;
use tracing::info;

use crate::error::CertificateError;
use crate::progress_service::ProgressService;

/// Name printed when the learner leaves the field blank.
pub const DEFAULT_RECIPIENT: &str = "CyberSafe Trainee";

/// File name used by `CertificateService::export`.
pub const CERTIFICATE_FILE_NAME: &str = "cybersafe-certificate.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    recipient: String,
    issued_on: NaiveDate,
}

impl Certificate {
    /// Trims `recipient`; a blank name becomes `DEFAULT_RECIPIENT`.
    #[must_use]
    pub fn new(recipient: &str, issued_on: NaiveDate) -> Self {
        let trimmed = recipient.trim();
        let recipient = if trimmed.is_empty() {
            DEFAULT_RECIPIENT.to_string()
        } else {
            trimmed.to_string()
        };
        Self {
            recipient,
            issued_on,
        }
    }

    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    #[must_use]
    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    #[must_use]
    pub fn date_label(&self) -> String {
        self.issued_on.format("%B %-d, %Y").to_string()
    }

    /// Standalone printable HTML page. The recipient name is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let name = ammonia::clean_text(&self.recipient);
        let date = self.date_label();
        format!(
            r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Certificate of Completion</title>
    <style>
        body {{ display: flex; align-items: center; justify-content: center; height: 100vh; background: #f3f4f6; margin: 0; }}
        .card {{ width: 800px; max-width: 92%; background: #fff; padding: 40px; border: 6px solid #2563eb; border-radius: 12px; box-shadow: 0 10px 30px rgba(0,0,0,.1); text-align: center; font-family: Segoe UI, Tahoma, Geneva, Verdana, sans-serif; }}
        .h {{ color: #2563eb; margin: 0 0 6px; font-size: 36px; }}
        .sub {{ color: #374151; margin: 0 0 30px; font-weight: 600; }}
        .name {{ font-size: 28px; font-weight: 800; margin: 16px 0; }}
        .meta {{ color: #6b7280; margin-top: 24px; }}
        .btn {{ display: inline-block; margin-top: 20px; padding: 10px 18px; background: #2563eb; color: #fff; border-radius: 6px; text-decoration: none; }}
        @media print {{ .btn {{ display: none; }} }}
    </style>
</head>
<body>
    <div class="card">
        <div class="h">Certificate of Completion</div>
        <div class="sub">Awarded by CyberSafe</div>
        <div>This certifies that</div>
        <div class="name">{name}</div>
        <div>has successfully completed the CyberSafe Security Training program.</div>
        <div class="meta">Date: {date}</div>
        <a href="#" class="btn" onclick="window.print();return false;">Print / Save PDF</a>
    </div>
</body>
</html>
"##
        )
    }
}

/// Issues certificates once the training gate is open.
#[derive(Clone)]
pub struct CertificateService {
    clock: Clock,
    progress: Arc<ProgressService>,
}

impl CertificateService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<ProgressService>) -> Self {
        Self { clock, progress }
    }

    /// Issue a certificate for `name`, falling back to the stored name and
    /// then to `DEFAULT_RECIPIENT`.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::Locked` unless every module is complete and
    /// the quiz is passed.
    pub async fn issue(&self, name: &str) -> Result<Certificate, CertificateError> {
        let snapshot = self.progress.snapshot().await;
        if !snapshot.certificate_unlocked {
            return Err(CertificateError::Locked);
        }
        let name = if name.trim().is_empty() {
            snapshot.record.name()
        } else {
            name
        };
        let certificate = Certificate::new(name, self.clock.today());
        info!(date = %certificate.issued_on(), "Certificate issued.");
        Ok(certificate)
    }

    /// Write the certificate page into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `CertificateError::Io` if the directory or file cannot be written.
    pub fn export(&self, certificate: &Certificate, dir: &Path) -> Result<PathBuf, CertificateError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(CERTIFICATE_FILE_NAME);
        std::fs::write(&path, certificate.to_html())?;
        info!(path = %path.display(), "Certificate exported.");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cybersafe_core::model::{ModuleId, ProgressRecord};
    use cybersafe_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 14).unwrap()
    }

    async fn unlocked_service(name: &str) -> CertificateService {
        let progress = Arc::new(ProgressService::cybersafe(Arc::new(InMemoryRepository::new())));
        let all: Vec<ModuleId> = progress
            .catalog()
            .modules()
            .iter()
            .map(|m| m.id().clone())
            .collect();
        progress
            .set_progress(&ProgressRecord::new(all, true, name))
            .await
            .unwrap();
        CertificateService::new(fixed_clock(), progress)
    }

    #[test]
    fn blank_name_uses_default_recipient() {
        let cert = Certificate::new("   ", date());
        assert_eq!(cert.recipient(), DEFAULT_RECIPIENT);
        assert_eq!(Certificate::new("  Ada ", date()).recipient(), "Ada");
    }

    #[test]
    fn html_escapes_recipient() {
        let html = Certificate::new("<script>x</script>", date()).to_html();
        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Date: November 14, 2023"));
    }

    #[tokio::test]
    async fn locked_progress_refuses_to_issue() {
        let progress = Arc::new(ProgressService::cybersafe(Arc::new(InMemoryRepository::new())));
        let service = CertificateService::new(fixed_clock(), progress);
        assert!(matches!(
            service.issue("Ada").await,
            Err(CertificateError::Locked)
        ));
    }

    #[tokio::test]
    async fn issue_prefers_typed_name_then_stored_name() {
        let service = unlocked_service("Stored Name").await;
        let typed = service.issue("Typed Name").await.unwrap();
        assert_eq!(typed.recipient(), "Typed Name");
        assert_eq!(typed.issued_on(), date());

        let stored = service.issue("  ").await.unwrap();
        assert_eq!(stored.recipient(), "Stored Name");
    }

    #[tokio::test]
    async fn issue_falls_back_to_default_recipient() {
        let service = unlocked_service("").await;
        let cert = service.issue("").await.unwrap();
        assert_eq!(cert.recipient(), DEFAULT_RECIPIENT);
    }

    #[tokio::test]
    async fn export_writes_html_file() {
        let service = unlocked_service("Ada").await;
        let cert = service.issue("").await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = service.export(&cert, &dir.path().join("certs")).unwrap();
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("Ada"));
    }
}
