use serde::{Deserialize, Deserializer, Serialize};

use crate::model::catalog::ModuleCatalog;
use crate::model::ids::ModuleId;

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// Persisted training progress for the local learner.
///
/// Serialized as `{"completedModules": [...], "quizPassed": bool, "name": "..."}`.
/// Missing fields fall back to their defaults when decoding. Stored ids are
/// trimmed and blank ones are dropped instead of rejecting the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    #[serde(deserialize_with = "lenient_module_ids")]
    completed_modules: Vec<ModuleId>,
    quiz_passed: bool,
    name: String,
}

impl ProgressRecord {
    #[must_use]
    pub fn new(completed_modules: Vec<ModuleId>, quiz_passed: bool, name: impl Into<String>) -> Self {
        let mut record = Self {
            completed_modules,
            quiz_passed,
            name: name.into(),
        };
        record.dedup_modules();
        record
    }

    /// Decodes a stored record.
    ///
    /// Returns `None` for anything that is not a JSON object of the expected
    /// shape, including `null`.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        let mut record: Self = serde_json::from_str(raw).ok()?;
        record.dedup_modules();
        Some(record)
    }

    /// Encodes the record for storage.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[must_use]
    pub fn completed_modules(&self) -> &[ModuleId] {
        &self.completed_modules
    }

    #[must_use]
    pub fn is_completed(&self, id: &ModuleId) -> bool {
        self.completed_modules.contains(id)
    }

    #[must_use]
    pub fn quiz_passed(&self) -> bool {
        self.quiz_passed
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flips membership of `id`. Returns `true` if the module is now completed.
    pub fn toggle_module(&mut self, id: &ModuleId) -> bool {
        if let Some(idx) = self.completed_modules.iter().position(|m| m == id) {
            self.completed_modules.remove(idx);
            false
        } else {
            self.completed_modules.push(id.clone());
            true
        }
    }

    pub fn set_quiz_passed(&mut self, passed: bool) {
        self.quiz_passed = passed;
    }

    fn dedup_modules(&mut self) {
        let mut seen: Vec<ModuleId> = Vec::with_capacity(self.completed_modules.len());
        self.completed_modules.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(id.clone());
                true
            }
        });
    }
}

fn lenient_module_ids<'de, D>(deserializer: D) -> Result<Vec<ModuleId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|id| ModuleId::new(id).ok())
        .collect())
}

//
// ─── COMPLETION ────────────────────────────────────────────────────────────────
//

/// Completion counts shown in the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

impl Completion {
    /// Builds completion stats; `percent` is rounded half-up and is 0 when
    /// `total` is 0.
    #[must_use]
    pub fn from_counts(completed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0
        } else {
            let scaled = (completed * 200 + total) / (total * 2);
            u32::try_from(scaled).unwrap_or(u32::MAX)
        };
        Self {
            completed,
            total,
            percent,
        }
    }

    /// Every stored id counts, including ids the catalog no longer offers, so
    /// `percent` can exceed 100 and a stale id keeps `all_completed` false.
    #[must_use]
    pub fn compute(record: &ProgressRecord, catalog: &ModuleCatalog) -> Self {
        Self::from_counts(record.completed_modules().len(), catalog.len())
    }

    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.completed == self.total
    }
}

/// Certificate gate: every module done and the quiz passed.
#[must_use]
pub fn certificate_eligible(completion: &Completion, quiz_passed: bool) -> bool {
    completion.all_completed() && quiz_passed
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
