use playground_core::session::{parse_script, run_session};
use playground_test_utils::{Capability, FakeDashboard, Fixture};

const SCRIPT: &str = r#"[
    { "action": "set_query", "query": { "measures": ["Orders.count"] } },
    { "action": "set_code", "code": "renderChart()" },
    { "action": "toggle", "mode": "query" },
    { "action": "copy" },
    { "action": "framework", "id": "svelte" },
    { "action": "add_to_dashboard" },
    { "action": "accept_navigation" }
]"#;

#[tokio::test]
async fn replay_records_every_step() {
    let mut f = Fixture::builder()
        .dashboard(FakeDashboard::new(Capability::Error("boom".into())))
        .build();
    let steps = parse_script(SCRIPT).unwrap();

    let transcript = run_session(&mut f.container, &steps).await;

    let oks: Vec<bool> = transcript.entries.iter().map(|e| e.ok).collect();
    assert_eq!(oks, vec![true, true, true, true, false, false, true]);
    assert!(transcript.has_errors());
    assert!(transcript.entries[5].outcome.contains("boom"));
    assert_eq!(f.navigator.routes(), vec!["/dashboard"]);
    assert_eq!(
        f.clipboard.as_ref().unwrap().writes(),
        vec!["{\n  \"measures\": [\n    \"Orders.count\"\n  ]\n}".to_string()]
    );
}

#[tokio::test]
async fn accepting_without_offer_fails() {
    let mut f = Fixture::builder().build();
    let steps = parse_script(r#"[{ "action": "accept_navigation" }]"#).unwrap();

    let transcript = run_session(&mut f.container, &steps).await;

    assert!(transcript.has_errors());
    assert!(f.navigator.routes().is_empty());
}
