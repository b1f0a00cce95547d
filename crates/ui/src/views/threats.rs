use cybersafe_core::model::{
    CategoryFilter, ThreatCard, ThreatCategory, filter_threats, threat_library,
};
use dioxus::prelude::*;

#[component]
pub fn ThreatsView() -> Element {
    let mut filter = use_signal(|| CategoryFilter::All);
    let library = threat_library();
    let current = filter();
    let visible: Vec<ThreatCard> = filter_threats(library, current)
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        div { class: "page page--threats",
            h2 { "Threat library" }

            div { class: "category-tabs",
                button {
                    class: tab_class(current == CategoryFilter::All),
                    onclick: move |_| filter.set(CategoryFilter::All),
                    "All"
                }
                for category in ThreatCategory::ALL {
                    button {
                        key: "{category.slug()}",
                        class: tab_class(current == CategoryFilter::Only(category)),
                        onclick: move |_| filter.set(CategoryFilter::Only(category)),
                        "{category.label()}"
                    }
                }
            }

            div { class: "threat-grid",
                for card in visible {
                    div { key: "{card.title}", class: "threat-card", "data-category": card.category.slug(),
                        span { class: "threat-tag", "{card.category.label()}" }
                        h3 { "{card.title}" }
                        p { "{card.summary}" }
                    }
                }
            }
        }
    }
}

fn tab_class(active: bool) -> &'static str {
    if active { "category-tab active" } else { "category-tab" }
}
