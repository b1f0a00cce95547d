use std::sync::Arc;

use cybersafe_core::model::{
    Completion, ModuleCatalog, ModuleId, ProgressRecord, Quiz, QuizAnswers, QuizGrade,
    certificate_eligible,
};
use storage::repository::KeyValueStore;
use tracing::{debug, info, warn};

use crate::error::ProgressServiceError;

/// Storage key of the serialized `ProgressRecord`.
pub const TRAINING_KEY: &str = "cybersafe_training_progress_v1";

/// Everything the training page renders after a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub record: ProgressRecord,
    pub completion: Completion,
    pub certificate_unlocked: bool,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn from_record(record: ProgressRecord, catalog: &ModuleCatalog) -> Self {
        let completion = Completion::compute(&record, catalog);
        let certificate_unlocked = certificate_eligible(&completion, record.quiz_passed());
        Self {
            record,
            completion,
            certificate_unlocked,
        }
    }
}

/// Result of submitting the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSubmission {
    pub grade: QuizGrade,
    pub snapshot: ProgressSnapshot,
}

/// Tracks module completion and the quiz gate in a key-value store.
///
/// Every mutation is a single read-modify-write of the stored record.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn KeyValueStore>,
    catalog: ModuleCatalog,
    quiz: Quiz,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, catalog: ModuleCatalog, quiz: Quiz) -> Self {
        Self {
            store,
            catalog,
            quiz,
        }
    }

    /// Service over the CyberSafe catalog and quiz.
    #[must_use]
    pub fn cybersafe(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, ModuleCatalog::cybersafe(), Quiz::cybersafe())
    }

    #[must_use]
    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Load the stored record.
    ///
    /// Missing, unreadable, or corrupt data yields the default record; the
    /// failure is logged and never returned.
    pub async fn get_progress(&self) -> ProgressRecord {
        match self.store.get(TRAINING_KEY).await {
            Ok(Some(raw)) => ProgressRecord::from_json(&raw).unwrap_or_else(|| {
                warn!(key = TRAINING_KEY, "Stored progress is corrupt; using defaults.");
                ProgressRecord::default()
            }),
            Ok(None) => {
                debug!(key = TRAINING_KEY, "No stored progress; using defaults.");
                ProgressRecord::default()
            }
            Err(err) => {
                warn!(key = TRAINING_KEY, error = %err, "Failed to read progress; using defaults.");
                ProgressRecord::default()
            }
        }
    }

    /// Overwrite the stored record. No validation is performed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if encoding or the store write fails.
    pub async fn set_progress(&self, record: &ProgressRecord) -> Result<(), ProgressServiceError> {
        let raw = record.to_json()?;
        self.store.set(TRAINING_KEY, &raw).await?;
        Ok(())
    }

    /// Remove stored progress so the next read starts from defaults.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the store cannot be written.
    pub async fn reset_progress(&self) -> Result<ProgressSnapshot, ProgressServiceError> {
        self.store.remove(TRAINING_KEY).await?;
        info!("Training progress reset.");
        Ok(ProgressSnapshot::from_record(
            ProgressRecord::default(),
            &self.catalog,
        ))
    }

    /// Current record with derived completion and certificate state.
    pub async fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::from_record(self.get_progress().await, &self.catalog)
    }

    pub async fn compute_completion(&self) -> Completion {
        Completion::compute(&self.get_progress().await, &self.catalog)
    }

    pub async fn certificate_unlocked(&self) -> bool {
        self.snapshot().await.certificate_unlocked
    }

    /// Mark `id` complete if it is not, or incomplete if it is.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the updated record cannot be stored.
    pub async fn toggle_module(
        &self,
        id: &ModuleId,
    ) -> Result<ProgressSnapshot, ProgressServiceError> {
        let mut record = self.get_progress().await;
        let completed = record.toggle_module(id);
        self.set_progress(&record).await?;
        info!(module = %id, completed, "Module toggled.");
        Ok(ProgressSnapshot::from_record(record, &self.catalog))
    }

    /// Grade `answers` against the quiz and persist whether it passed.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the updated record cannot be stored.
    pub async fn grade_quiz(
        &self,
        answers: &QuizAnswers,
    ) -> Result<QuizSubmission, ProgressServiceError> {
        let grade = self.quiz.grade(answers);
        let mut record = self.get_progress().await;
        record.set_quiz_passed(grade.passed);
        self.set_progress(&record).await?;
        info!(score = grade.score, total = grade.total, passed = grade.passed, "Quiz graded.");
        Ok(QuizSubmission {
            grade,
            snapshot: ProgressSnapshot::from_record(record, &self.catalog),
        })
    }
}
