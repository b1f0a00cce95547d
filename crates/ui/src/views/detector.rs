#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{
    ANALYZING_MESSAGE, AnalysisVm, CHECKING_MESSAGE, ChatMessage, DetectorPhase, echo_text,
};

#[derive(Clone, Debug, PartialEq)]
struct LocalOutcome {
    advisory: &'static str,
    analysis: AnalysisVm,
}

#[component]
pub fn DetectorView() -> Element {
    let ctx = use_context::<AppContext>();
    let analyzer = ctx.analyzer();
    let remote = ctx.remote_detector();

    let mut input = use_signal(String::new);
    let mut messages = use_signal(Vec::<ChatMessage>::new);
    let mut phase = use_signal(DetectorPhase::default);
    let mut outcome = use_signal(|| None::<LocalOutcome>);
    let mut remote_result = use_signal(|| None::<String>);

    let analyze_local = use_callback(move |()| {
        if phase() == DetectorPhase::Checking {
            return;
        }
        let text = input();
        if text.trim().is_empty() {
            return;
        }

        messages.write().push(ChatMessage::user(echo_text(&text)));
        input.set(String::new());
        messages.write().push(ChatMessage::assistant(ANALYZING_MESSAGE));
        phase.set(DetectorPhase::Checking);

        let analyzer = analyzer.clone();
        spawn(async move {
            tokio::time::sleep(analyzer.thinking_delay()).await;
            if let Some(report) = analyzer.analyze(&text) {
                messages.write().push(ChatMessage::assistant(report.advisory()));
                outcome.set(Some(LocalOutcome {
                    advisory: report.advisory(),
                    analysis: AnalysisVm::from(&report),
                }));
            }
            phase.set(DetectorPhase::Done);
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<DetectorTestHandles>() {
                handles.register(analyze_local, input);
            }
        }
    }

    let analyze_remote = move |_| {
        let text = input().trim().to_string();
        if text.is_empty() {
            return;
        }
        messages.write().push(ChatMessage::user(text.clone()));
        remote_result.set(Some(CHECKING_MESSAGE.to_string()));

        let remote = remote.clone();
        spawn(async move {
            let shown = match remote.analyze_remote(&text).await {
                Ok(Some(verdict)) => Some(verdict.display_text()),
                Ok(None) => None,
                Err(err) => Some(err.user_message().to_string()),
            };
            remote_result.set(shown);
        });
    };

    let busy = phase() == DetectorPhase::Checking;

    rsx! {
        div { class: "page page--detector",
            h2 { "AI threat detector" }
            p { "Paste a suspicious email, text or message to check it for warning signs." }

            div { class: "chat-container",
                for (idx, message) in messages().into_iter().enumerate() {
                    div { key: "{idx}", class: message.sender.css_class(), "{message.text}" }
                }
            }

            textarea {
                class: "chat-input",
                placeholder: "Paste a message here (Ctrl+Enter to analyze)",
                value: "{input}",
                oninput: move |evt| input.set(evt.value()),
                onkeydown: move |evt| {
                    let ctrl = evt.data.modifiers().contains(Modifiers::CONTROL);
                    if ctrl && evt.data.key() == Key::Enter {
                        evt.prevent_default();
                        analyze_local.call(());
                    }
                },
            }

            div { class: "detector-actions",
                button {
                    class: "btn",
                    disabled: busy,
                    onclick: move |_| analyze_local.call(()),
                    "Analyze"
                }
                button { class: "btn btn--ghost", onclick: analyze_remote, "Check with server" }
            }

            if let Some(result) = outcome() {
                AnalysisPanel { advisory: result.advisory, analysis: result.analysis }
            }

            if let Some(text) = remote_result() {
                div { class: "analysis-result remote-result", "{text}" }
            }
        }
    }
}

#[component]
fn AnalysisPanel(advisory: &'static str, analysis: AnalysisVm) -> Element {
    rsx! {
        section { class: "analysis-result",
            h3 { "Threat analysis" }
            div { class: "threat-meter",
                div { class: "{analysis.meter_class}", style: "{analysis.meter_style}" }
            }
            p { class: "advisory", "{advisory}" }
            ul { class: "scores",
                for score in analysis.scores.iter() {
                    li { key: "{score.label}",
                        span { "{score.label}: " }
                        strong { "{score.percent_label}" }
                    }
                }
            }
            if !analysis.recommendations.is_empty() {
                h4 { "Recommendations" }
                ul { class: "recommendations",
                    for tip in analysis.recommendations.iter() {
                        li { "{tip}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct DetectorTestHandles {
    analyze: Rc<RefCell<Option<Callback<()>>>>,
    input: Rc<RefCell<Option<Signal<String>>>>,
}

#[cfg(test)]
impl DetectorTestHandles {
    pub(crate) fn register(&self, analyze: Callback<()>, input: Signal<String>) {
        *self.analyze.borrow_mut() = Some(analyze);
        *self.input.borrow_mut() = Some(input);
    }

    pub(crate) fn analyze(&self) -> Callback<()> {
        (*self.analyze.borrow()).expect("detector analyze registered")
    }

    pub(crate) fn input(&self) -> Signal<String> {
        (*self.input.borrow()).expect("detector input registered")
    }
}
