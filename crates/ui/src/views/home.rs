use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;
use crate::vm::{FAQ_ITEMS, FaqItem, toggle_marker};

#[component]
pub fn HomeView() -> Element {
    rsx! {
        div { class: "page page--home",
            section { class: "hero",
                h2 { "Stay safe online" }
                p { "Learn to spot phishing, malware, social engineering and fraud before they cost you." }
                div { class: "hero-actions",
                    Link { class: "btn", to: Route::Training {}, "Start training" }
                    Link { class: "btn btn--ghost", to: Route::Detector {}, "Check a message" }
                }
            }

            section { class: "faq",
                h3 { "Frequently asked questions" }
                for (idx, item) in FAQ_ITEMS.iter().enumerate() {
                    FaqEntry { key: "{idx}", item: *item }
                }
            }
        }
    }
}

#[component]
fn FaqEntry(item: FaqItem) -> Element {
    let mut open = use_signal(|| false);
    let class = if open() { "faq-item active" } else { "faq-item" };

    rsx! {
        div { class: "{class}",
            button {
                class: "faq-question",
                onclick: move |_| open.toggle(),
                span { "{item.question}" }
                span { class: "faq-toggle", "{toggle_marker(open())}" }
            }
            if open() {
                p { class: "faq-answer", "{item.answer}" }
            }
        }
    }
}
