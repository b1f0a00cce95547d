use cybersafe_core::model::ThreatCategory;
use services::AnalysisReport;

/// Longest user message echoed into the chat before truncation.
pub const MAX_ECHO_CHARS: usize = 100;

pub const ANALYZING_MESSAGE: &str = "Analyzing message for threats...";
pub const CHECKING_MESSAGE: &str = "Checking…";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatSender {
    User,
    Assistant,
}

impl ChatSender {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ChatSender::User => "message user",
            ChatSender::Assistant => "message ai",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub sender: ChatSender,
    pub text: String,
}

impl ChatMessage {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: ChatSender::User,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: ChatSender::Assistant,
            text: text.into(),
        }
    }
}

/// Chat echo of a submitted message, cut to `MAX_ECHO_CHARS` characters.
#[must_use]
pub fn echo_text(input: &str) -> String {
    if input.chars().count() > MAX_ECHO_CHARS {
        let head: String = input.chars().take(MAX_ECHO_CHARS).collect();
        format!("{head}...")
    } else {
        input.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreVm {
    pub label: &'static str,
    pub percent_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisVm {
    pub scores: Vec<ScoreVm>,
    pub meter_class: String,
    pub meter_style: String,
    pub recommendations: Vec<&'static str>,
}

impl From<&AnalysisReport> for AnalysisVm {
    fn from(report: &AnalysisReport) -> Self {
        let scores = ThreatCategory::ALL
            .into_iter()
            .map(|category| ScoreVm {
                label: category.label(),
                percent_label: percent_label(report.result.score(category)),
            })
            .collect();
        Self {
            scores,
            meter_class: format!("threat-level {}", report.band.css_class()),
            meter_style: format!("width: {}%;", report.band.meter_width()),
            recommendations: report.recommendations.clone(),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent_label(score: f64) -> String {
    let rounded = score.clamp(0.0, 100.0).round() as u32;
    format!("{rounded}%")
}

/// Where the detector page is in its idle → checking → result cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DetectorPhase {
    #[default]
    Idle,
    Checking,
    Done,
}
