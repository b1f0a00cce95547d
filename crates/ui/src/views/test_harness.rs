use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cybersafe_core::analyzer::FixedIncrement;
use cybersafe_core::time::fixed_clock;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AnalyzerConfig, AnalyzerService, CertificateService, ProgressService, RemoteDetectorConfig,
    RemoteDetectorService,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{DetectorTestHandles, DetectorView, HomeView, ThreatsView, TrainingView};

#[derive(Clone)]
struct TestApp {
    progress: Arc<ProgressService>,
    analyzer: Arc<AnalyzerService>,
    remote_detector: Arc<RemoteDetectorService>,
    certificates: Arc<CertificateService>,
}

impl UiApp for TestApp {
    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn analyzer(&self) -> Arc<AnalyzerService> {
        Arc::clone(&self.analyzer)
    }

    fn remote_detector(&self) -> Arc<RemoteDetectorService> {
        Arc::clone(&self.remote_detector)
    }

    fn certificates(&self) -> Arc<CertificateService> {
        Arc::clone(&self.certificates)
    }

    fn export_dir(&self) -> PathBuf {
        std::env::temp_dir().join("cybersafe-ui-tests")
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Threats,
    Training,
    Detector,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    detector_handles: Option<DetectorTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.detector_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Threats => rsx! { ThreatsView {} },
        ViewKind::Training => rsx! { TrainingView {} },
        ViewKind::Detector => rsx! { DetectorView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub progress: Arc<ProgressService>,
    pub detector_handles: Option<DetectorTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over in-memory storage, a fixed clock, and an analyzer that adds
/// the maximum increment per hit with no thinking delay.
pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    let progress = Arc::new(ProgressService::cybersafe(Arc::clone(&storage.kv)));
    let analyzer = Arc::new(AnalyzerService::new(
        FixedIncrement(10.0),
        AnalyzerConfig {
            thinking_delay: Duration::ZERO,
        },
    ));
    let remote_detector = Arc::new(
        RemoteDetectorService::new(&RemoteDetectorConfig {
            base_url: "http://127.0.0.1:9".into(),
        })
        .expect("remote detector"),
    );
    let certificates = Arc::new(CertificateService::new(fixed_clock(), Arc::clone(&progress)));

    let app = Arc::new(TestApp {
        progress: Arc::clone(&progress),
        analyzer,
        remote_detector,
        certificates,
    });

    let detector_handles = match view {
        ViewKind::Detector => Some(DetectorTestHandles::default()),
        _ => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            detector_handles: detector_handles.clone(),
        },
    );
    ViewHarness {
        dom,
        progress,
        detector_handles,
    }
}
