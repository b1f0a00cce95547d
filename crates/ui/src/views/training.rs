use cybersafe_core::model::{ModuleId, QuizAnswers};
use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    ModuleCardVm, QuizChoiceVm, QuizQuestionVm, TrainingVm, map_quiz, map_training,
};

#[component]
pub fn TrainingView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let certificates = ctx.certificates();
    let export_dir = ctx.export_dir().to_path_buf();

    let questions = use_hook({
        let progress = progress.clone();
        move || map_quiz(progress.quiz())
    });

    let mut resource = use_resource({
        let progress = progress.clone();
        move || {
            let progress = progress.clone();
            async move {
                let snapshot = progress.snapshot().await;
                Ok::<_, ViewError>(map_training(&snapshot, progress.catalog()))
            }
        }
    });

    let mut answers = use_signal(QuizAnswers::new);
    let mut quiz_result = use_signal(|| None::<String>);
    let mut action_error = use_signal(|| None::<ViewError>);
    let mut name_input = use_signal(|| None::<String>);
    let mut export_status = use_signal(|| None::<String>);

    let toggle_progress = progress.clone();
    let on_toggle = use_callback(move |id: ModuleId| {
        let progress = toggle_progress.clone();
        spawn(async move {
            match progress.toggle_module(&id).await {
                Ok(_) => {
                    action_error.set(None);
                    resource.restart();
                }
                Err(_) => action_error.set(Some(ViewError::Unknown)),
            }
        });
    });

    let on_select = use_callback(move |(question, choice): (String, String)| {
        answers.write().select(question, choice);
    });

    let quiz_progress = progress.clone();
    let submit_quiz = move |_| {
        let progress = quiz_progress.clone();
        let submitted = answers.read().clone();
        spawn(async move {
            match progress.grade_quiz(&submitted).await {
                Ok(submission) => {
                    quiz_result.set(Some(submission.grade.summary()));
                    action_error.set(None);
                    resource.restart();
                }
                Err(_) => action_error.set(Some(ViewError::Unknown)),
            }
        });
    };

    let reset_progress = progress.clone();
    let on_reset = move |_| {
        let progress = reset_progress.clone();
        spawn(async move {
            match progress.reset_progress().await {
                Ok(_) => {
                    answers.set(QuizAnswers::new());
                    quiz_result.set(None);
                    name_input.set(None);
                    export_status.set(None);
                    action_error.set(None);
                    resource.restart();
                }
                Err(_) => action_error.set(Some(ViewError::Unknown)),
            }
        });
    };

    let on_issue = move |_| {
        let certificates = certificates.clone();
        let dir = export_dir.clone();
        let name = name_input().unwrap_or_default();
        spawn(async move {
            let exported = match certificates.issue(&name).await {
                Ok(certificate) => certificates
                    .export(&certificate, &dir)
                    .map_err(|_| ViewError::Unknown),
                Err(services::CertificateError::Locked) => Err(ViewError::Locked),
                Err(_) => Err(ViewError::Unknown),
            };
            match exported {
                Ok(path) => {
                    export_status.set(Some(format!("Certificate saved to {}", path.display())));
                    action_error.set(None);
                }
                Err(err) => action_error.set(Some(err)),
            }
        });
    };

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page page--training",
            h2 { "Security training" }

            if let Some(err) = action_error() {
                p { class: "error", "{err.message()}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(data) => rsx! {
                    ProgressSummary { data: data.clone() }

                    div { class: "module-grid",
                        for card in data.modules.clone() {
                            ModuleCard { key: "{card.id}", card: card.clone(), on_toggle }
                        }
                    }

                    section { class: "quiz",
                        h3 { "Knowledge check" }
                        for question in questions.clone() {
                            QuizQuestionBlock {
                                key: "{question.id}",
                                selected: answers.read().get(&question.id).map(str::to_owned),
                                question: question.clone(),
                                on_select,
                            }
                        }
                        button { class: "btn", onclick: submit_quiz.clone(), "Submit quiz" }
                        if let Some(summary) = quiz_result() {
                            p { class: "quiz-result", "{summary}" }
                        }
                    }

                    section { class: "certificate",
                        h3 { "Certificate" }
                        p { class: "certificate-status", "{data.gate_message()}" }
                        input {
                            r#type: "text",
                            placeholder: "Your name",
                            value: name_input().unwrap_or_else(|| data.stored_name.clone()),
                            oninput: move |evt| name_input.set(Some(evt.value())),
                        }
                        button {
                            class: "btn",
                            disabled: !data.certificate_unlocked,
                            onclick: on_issue.clone(),
                            "Download certificate"
                        }
                        if let Some(status) = export_status() {
                            p { class: "certificate-saved", "{status}" }
                        }
                    }

                    button { class: "btn btn--ghost", onclick: on_reset.clone(), "Reset progress" }
                },
            }
        }
    }
}

#[component]
fn ProgressSummary(data: TrainingVm) -> Element {
    rsx! {
        div { class: "progress",
            p { class: "progress-text", "{data.progress_label}" }
            div { class: "progress-track",
                div { class: "progress-bar", style: "{data.progress_width()}" }
            }
        }
    }
}

#[component]
fn ModuleCard(card: ModuleCardVm, on_toggle: EventHandler<ModuleId>) -> Element {
    let class = if card.completed {
        "module-card completed"
    } else {
        "module-card"
    };
    let label = card.toggle_label();
    let id = card.id.clone();

    rsx! {
        div { class: "{class}",
            h3 { "{card.title}" }
            p { "{card.summary}" }
            button {
                class: "btn module-toggle",
                onclick: move |_| on_toggle.call(id.clone()),
                "{label}"
            }
        }
    }
}

#[component]
fn QuizQuestionBlock(
    question: QuizQuestionVm,
    selected: Option<String>,
    on_select: EventHandler<(String, String)>,
) -> Element {
    rsx! {
        fieldset { class: "quiz-question",
            legend { "{question.number}. {question.prompt}" }
            for choice in question.choices.clone() {
                QuizChoiceInput {
                    key: "{choice.value}",
                    checked: selected.as_deref() == Some(choice.value.as_str()),
                    question_id: question.id.clone(),
                    choice: choice.clone(),
                    on_select,
                }
            }
        }
    }
}

#[component]
fn QuizChoiceInput(
    question_id: String,
    choice: QuizChoiceVm,
    checked: bool,
    on_select: EventHandler<(String, String)>,
) -> Element {
    let name = question_id.clone();
    let value = choice.value.clone();

    rsx! {
        label { class: "quiz-choice",
            input {
                r#type: "radio",
                name: "{name}",
                value: "{choice.value}",
                checked,
                onchange: move |_| on_select.call((question_id.clone(), value.clone())),
            }
            " {choice.label}"
        }
    }
}
