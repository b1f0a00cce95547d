mod catalog;
mod ids;
mod progress;
mod quiz;
mod threat;

pub use ids::{ModuleId, ModuleIdError};

pub use catalog::{ModuleCatalog, TrainingModule};
pub use progress::{Completion, ProgressRecord, certificate_eligible};
pub use quiz::{Quiz, QuizAnswers, QuizChoice, QuizError, QuizGrade, QuizQuestion};
pub use threat::{
    CategoryFilter, ParseCategoryError, ThreatCard, ThreatCategory, filter_threats, threat_library,
};
