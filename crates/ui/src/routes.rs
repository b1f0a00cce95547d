use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{DetectorView, HomeView, ThreatsView, TrainingView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/threats", ThreatsView)] Threats {},
        #[route("/training", TrainingView)] Training {},
        #[route("/detector", DetectorView)] Detector {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "CyberSafe" }
            ul { class: "nav-links",
                li { Link { to: Route::Home {}, active_class: "active", "Home" } }
                li { Link { to: Route::Threats {}, active_class: "active", "Threats" } }
                li { Link { to: Route::Training {}, active_class: "active", "Training" } }
                li { Link { to: Route::Detector {}, active_class: "active", "AI Detector" } }
            }
        }
    }
}
