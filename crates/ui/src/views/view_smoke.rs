use cybersafe_core::analyzer::{FixedIncrement, analyze};
use cybersafe_core::model::{ModuleId, ProgressRecord};
use dioxus::prelude::WritableExt;

use super::test_harness::{ViewKind, drive_dom, setup_view_harness};
use crate::vm::{ANALYZING_MESSAGE, CERTIFICATE_LOCKED_MESSAGE, CERTIFICATE_UNLOCKED_MESSAGE};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_collapsed_faq() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("What is phishing?"), "missing faq in {html}");
    assert!(html.contains("faq-toggle"), "missing toggle in {html}");
    assert!(!html.contains("faq-answer"), "answer should be collapsed in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn threats_view_smoke_renders_every_card() {
    let mut harness = setup_view_harness(ViewKind::Threats);
    harness.rebuild();
    let html = harness.render();
    for title in ["Email Phishing", "Ransomware", "Pretexting", "Gift Card Scams"] {
        assert!(html.contains(title), "missing {title} in {html}");
    }
    assert!(html.contains("category-tab active"), "missing active tab in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn training_view_smoke_renders_fresh_progress() {
    let mut harness = setup_view_harness(ViewKind::Training);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Modules completed: 0 / 5 (0%)"),
        "missing progress label in {html}"
    );
    assert!(html.contains("Mark Complete"), "missing toggle label in {html}");
    assert!(html.contains(CERTIFICATE_LOCKED_MESSAGE), "missing gate in {html}");
    assert!(html.contains("Which password is the strongest?"), "missing quiz in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn training_view_smoke_renders_unlocked_certificate() {
    let mut harness = setup_view_harness(ViewKind::Training);
    let ids: Vec<ModuleId> = harness
        .progress
        .catalog()
        .modules()
        .iter()
        .map(|module| module.id().clone())
        .collect();
    harness
        .progress
        .set_progress(&ProgressRecord::new(ids, true, "Ada"))
        .await
        .expect("seed progress");

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(
        html.contains("Modules completed: 5 / 5 (100%)"),
        "missing progress label in {html}"
    );
    assert!(html.contains("Mark Incomplete"), "missing toggle label in {html}");
    assert!(html.contains(CERTIFICATE_UNLOCKED_MESSAGE), "missing gate in {html}");
    assert!(html.contains("width: 100%;"), "missing full bar in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn detector_view_smoke_starts_idle() {
    let mut harness = setup_view_harness(ViewKind::Detector);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Ctrl+Enter"), "missing input hint in {html}");
    assert!(html.contains("Analyze"), "missing button in {html}");
    assert!(!html.contains("Threat analysis"), "no result expected in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn detector_view_smoke_runs_local_analysis() {
    const MESSAGE: &str =
        "URGENT: verify your account now. Download the attachment and claim your prize";

    let mut harness = setup_view_harness(ViewKind::Detector);
    harness.rebuild();
    let handles = harness.detector_handles.clone().expect("detector handles");
    let analyze_local = handles.analyze();
    let mut input = handles.input();

    harness.dom.in_runtime(|| {
        input.set(MESSAGE.to_string());
        analyze_local.call(());
    });
    drive_dom(&mut harness.dom);
    let html = harness.render();
    assert!(html.contains(MESSAGE), "missing echo in {html}");
    assert!(html.contains(ANALYZING_MESSAGE), "missing analyzing note in {html}");

    for _ in 0..4 {
        harness.drive_async().await;
    }
    let html = harness.render();
    let band = analyze(MESSAGE, &mut FixedIncrement(10.0)).risk_band();
    assert!(html.contains("Threat analysis"), "missing result panel in {html}");
    assert!(html.contains(band.advisory()), "missing advisory in {html}");
    assert!(
        html.contains(&format!("threat-level {}", band.css_class())),
        "missing meter class in {html}"
    );
    assert!(html.contains("Phishing"), "missing score labels in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn detector_view_ignores_blank_input() {
    let mut harness = setup_view_harness(ViewKind::Detector);
    harness.rebuild();
    let handles = harness.detector_handles.clone().expect("detector handles");
    let analyze_local = handles.analyze();
    let mut input = handles.input();

    harness.dom.in_runtime(|| {
        input.set("   ".to_string());
        analyze_local.call(());
    });
    drive_dom(&mut harness.dom);
    harness.drive_async().await;
    let html = harness.render();
    assert!(!html.contains(ANALYZING_MESSAGE), "blank input was analyzed in {html}");
    assert!(!html.contains("Threat analysis"), "no result expected in {html}");
}
