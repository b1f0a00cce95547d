use cybersafe_core::model::{ModuleCatalog, ModuleId, Quiz};
use services::ProgressSnapshot;

pub const CERTIFICATE_UNLOCKED_MESSAGE: &str =
    "All requirements met. You can download your certificate.";
pub const CERTIFICATE_LOCKED_MESSAGE: &str =
    "Complete all modules and pass the quiz to unlock the certificate.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleCardVm {
    pub id: ModuleId,
    pub title: String,
    pub summary: String,
    pub completed: bool,
}

impl ModuleCardVm {
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.completed {
            "Mark Incomplete"
        } else {
            "Mark Complete"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainingVm {
    pub modules: Vec<ModuleCardVm>,
    pub percent: u32,
    pub progress_label: String,
    pub certificate_unlocked: bool,
    pub stored_name: String,
}

impl TrainingVm {
    #[must_use]
    pub fn gate_message(&self) -> &'static str {
        if self.certificate_unlocked {
            CERTIFICATE_UNLOCKED_MESSAGE
        } else {
            CERTIFICATE_LOCKED_MESSAGE
        }
    }

    #[must_use]
    pub fn progress_width(&self) -> String {
        format!("width: {}%;", self.percent)
    }
}

#[must_use]
pub fn map_training(snapshot: &ProgressSnapshot, catalog: &ModuleCatalog) -> TrainingVm {
    let modules = catalog
        .modules()
        .iter()
        .map(|module| ModuleCardVm {
            id: module.id().clone(),
            title: module.title().to_string(),
            summary: module.summary().to_string(),
            completed: snapshot.record.is_completed(module.id()),
        })
        .collect();
    let completion = snapshot.completion;

    TrainingVm {
        modules,
        percent: completion.percent,
        progress_label: format!(
            "Modules completed: {} / {} ({}%)",
            completion.completed, completion.total, completion.percent
        ),
        certificate_unlocked: snapshot.certificate_unlocked,
        stored_name: snapshot.record.name().to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizChoiceVm {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizQuestionVm {
    pub id: String,
    pub number: usize,
    pub prompt: String,
    pub choices: Vec<QuizChoiceVm>,
}

#[must_use]
pub fn map_quiz(quiz: &Quiz) -> Vec<QuizQuestionVm> {
    quiz.questions()
        .iter()
        .enumerate()
        .map(|(idx, question)| QuizQuestionVm {
            id: question.id().to_string(),
            number: idx + 1,
            prompt: question.prompt().to_string(),
            choices: question
                .choices()
                .iter()
                .map(|choice| QuizChoiceVm {
                    value: choice.value.clone(),
                    label: choice.label.clone(),
                })
                .collect(),
        })
        .collect()
}
