use crate::model::ids::ModuleId;

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// A discrete training unit that learners mark complete or incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingModule {
    id: ModuleId,
    title: String,
    summary: String,
}

impl TrainingModule {
    #[must_use]
    pub fn new(id: ModuleId, title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            summary: summary.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Ordered list of the modules currently offered.
///
/// The catalog defines `total` for completion math; ids recorded in progress
/// but missing here are stale and still counted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModuleCatalog {
    modules: Vec<TrainingModule>,
}

impl ModuleCatalog {
    /// Builds a catalog, dropping later modules that reuse an earlier id.
    #[must_use]
    pub fn new(modules: Vec<TrainingModule>) -> Self {
        let mut unique: Vec<TrainingModule> = Vec::with_capacity(modules.len());
        for module in modules {
            if !unique.iter().any(|existing| existing.id == module.id) {
                unique.push(module);
            }
        }
        Self { modules: unique }
    }

    /// The CyberSafe security training curriculum.
    #[must_use]
    pub fn cybersafe() -> Self {
        let entries = [
            (
                "phishing-awareness",
                "Phishing Awareness",
                "Spot spoofed senders, lookalike links and urgent requests before you click.",
            ),
            (
                "password-security",
                "Password Security",
                "Build long unique passphrases, use a password manager and enable MFA.",
            ),
            (
                "safe-browsing",
                "Safe Browsing",
                "Recognise unsafe downloads, fake updates and insecure sites.",
            ),
            (
                "social-engineering",
                "Social Engineering",
                "Resist pressure tactics, pretexting and requests for money or gift cards.",
            ),
            (
                "mobile-security",
                "Mobile & SMS Security",
                "Handle smishing texts, app permissions and lost devices safely.",
            ),
        ];

        let modules = entries
            .into_iter()
            .filter_map(|(id, title, summary)| {
                ModuleId::new(id)
                    .ok()
                    .map(|id| TrainingModule::new(id, title, summary))
            })
            .collect();
        Self::new(modules)
    }

    #[must_use]
    pub fn modules(&self) -> &[TrainingModule] {
        &self.modules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
