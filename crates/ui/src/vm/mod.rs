mod detector_vm;
mod faq;
mod progress_vm;

pub use detector_vm::{
    ANALYZING_MESSAGE, AnalysisVm, CHECKING_MESSAGE, ChatMessage, ChatSender, DetectorPhase,
    MAX_ECHO_CHARS, ScoreVm, echo_text,
};
pub use faq::{FAQ_ITEMS, FaqItem, toggle_marker};
pub use progress_vm::{
    CERTIFICATE_LOCKED_MESSAGE, CERTIFICATE_UNLOCKED_MESSAGE, ModuleCardVm, QuizChoiceVm,
    QuizQuestionVm, TrainingVm, map_quiz, map_training,
};
