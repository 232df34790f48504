use playground_core::collaborators::{GeneratedSql, LoadOptions, NotificationKind, QueryOutcome};
use playground_core::{
    ChartLibraryCatalog, ClipboardError, CodeArtifact, DashboardAttachResult, Framework,
    PanelContent, PlaygroundConfig, SelectionError, ViewMode,
};
use playground_core::types::ChartLibrary;
use playground_test_utils::{
    sample_query, Capability, FakeClipboard, FakeDashboard, FakeRenderer, Fixture,
};
use pretty_assertions::assert_eq;

fn sql_outcome() -> QueryOutcome {
    QueryOutcome {
        sql: Some(GeneratedSql {
            sql: "SELECT count(*) FROM orders".into(),
            pre_aggregations: vec![serde_json::json!({ "preAggregationId": "Orders.main" })],
            refresh_keys: vec![serde_json::json!(["SELECT max(updated_at) FROM orders", []])],
            ..GeneratedSql::default()
        }),
        ..QueryOutcome::default()
    }
}

#[tokio::test]
async fn each_panel_uses_the_right_load_mode() {
    let mut f = Fixture::builder()
        .renderer(FakeRenderer::returning(sql_outcome()))
        .build();
    f.container.set_query(sample_query());

    f.container.toggle_mode(ViewMode::Sql);
    assert!(matches!(f.container.render_panel().await, PanelContent::Sql(_)));

    f.container.toggle_mode(ViewMode::Cache);
    match f.container.render_panel().await {
        PanelContent::Cache { sql, .. } => {
            assert_eq!(sql.pre_aggregations.len(), 1);
            assert_eq!(sql.refresh_keys.len(), 1);
        }
        other => panic!("unexpected panel: {other:?}"),
    }

    f.container.toggle_mode(ViewMode::Cache);
    assert_eq!(f.container.state().view_mode(), ViewMode::None);
    let _ = f.container.render_panel().await;

    assert_eq!(
        f.renderer.options(),
        vec![
            LoadOptions::sql_only(),
            LoadOptions::execute().with_sql().with_renew_query(),
            LoadOptions::execute(),
        ]
    );
    let calls = f.renderer.calls.lock();
    assert!(calls.iter().all(|(query, _)| *query == sample_query()));
}

#[tokio::test]
async fn query_panel_does_not_hit_the_renderer() {
    let mut f = Fixture::builder().build();
    f.container.set_query(sample_query());
    f.container.toggle_mode(ViewMode::Query);

    assert_eq!(
        f.container.render_panel().await,
        PanelContent::Query(sample_query().to_pretty_json())
    );
    assert!(f.renderer.options().is_empty());
}

#[tokio::test]
async fn chart_panel_passes_result_set_through() {
    let rows = serde_json::json!([{ "Orders.count": "42" }]);
    let mut f = Fixture::builder()
        .renderer(FakeRenderer::returning(QueryOutcome {
            result_set: Some(rows.clone()),
            ..QueryOutcome::default()
        }))
        .build();
    f.container.set_query(sample_query());

    assert_eq!(f.container.render_panel().await, PanelContent::Chart(rows));
}

#[tokio::test]
async fn missing_sql_is_an_error_panel() {
    let mut f = Fixture::builder().build();
    f.container.set_query(sample_query());
    f.container.toggle_mode(ViewMode::Sql);
    assert!(matches!(f.container.render_panel().await, PanelContent::Error(_)));
}

#[tokio::test]
async fn copy_follows_the_open_panel() {
    let mut f = Fixture::builder().build();
    f.container.set_query(sample_query());
    f.container.set_code(CodeArtifact::new("renderChart()"));

    f.container.toggle_mode(ViewMode::Query);
    f.container.copy_to_clipboard().await.unwrap();
    f.container.toggle_mode(ViewMode::Code);
    f.container.copy_to_clipboard().await.unwrap();

    let clipboard = f.clipboard.as_ref().unwrap();
    assert_eq!(
        clipboard.writes(),
        vec![sample_query().to_pretty_json(), "renderChart()".to_string()]
    );
    assert!(f
        .notifier
        .all()
        .iter()
        .all(|n| n.kind == NotificationKind::Success));
}

#[tokio::test]
async fn copy_without_clipboard_is_unavailable() {
    let f = Fixture::builder().clipboard(None).build();

    let err = f.container.copy_to_clipboard().await.unwrap_err();

    assert_eq!(err, ClipboardError::ClipboardUnavailable);
    assert_eq!(f.notifier.last().unwrap().kind, NotificationKind::Error);
}

#[tokio::test]
async fn refused_write_surfaces_detail() {
    let f = Fixture::builder()
        .clipboard(Some(FakeClipboard::refusing("document is not focused")))
        .build();

    let err = f.container.copy_to_clipboard().await.unwrap_err();

    assert_eq!(
        err,
        ClipboardError::ClipboardWriteFailed("document is not focused".into())
    );
}

#[test]
fn selections_stay_independent() {
    let mut f = Fixture::builder().build();
    f.container.toggle_mode(ViewMode::Code);
    f.container.select_chart_library("recharts").unwrap();

    assert_eq!(f.container.select_framework("vue").unwrap(), Framework::Vue);
    let controls = f.container.controls();
    assert!(!controls.chart_library);
    assert!(!controls.add_to_dashboard);
    assert!(!controls.is_mode_enabled(ViewMode::Query));
    assert_eq!(f.container.state().view_mode(), ViewMode::Code);
    assert_eq!(f.container.state().chart_library().id, "recharts");

    assert_eq!(f.container.select_framework("react").unwrap(), Framework::React);
    assert!(f.container.controls().chart_library);
}

#[test]
fn unknown_ids_are_rejected() {
    let mut f = Fixture::builder().build();

    assert_eq!(
        f.container.select_framework("svelte").unwrap_err(),
        SelectionError::UnknownFramework("svelte".into())
    );
    assert_eq!(
        f.container.select_chart_library("plotly").unwrap_err(),
        SelectionError::UnknownChartLibrary("plotly".into())
    );
    assert_eq!(f.container.state().framework(), Framework::React);
    assert_eq!(f.container.state().chart_library().id, "bizcharts");
}

#[test]
fn custom_catalog_from_config() {
    let config = PlaygroundConfig::new()
        .with_catalog(ChartLibraryCatalog::new(vec![
            ChartLibrary::new("plotly", "Plotly"),
            ChartLibrary::new("vega", "Vega"),
        ]))
        .with_chart_library("vega");
    let mut f = Fixture::builder().config(config).build();

    assert_eq!(f.container.state().chart_library().title, "Vega");
    assert!(f.container.select_chart_library("bizcharts").is_err());
    assert_eq!(f.container.select_chart_library("plotly").unwrap().id, "plotly");
}

#[tokio::test]
async fn actions_are_tracked_by_name() {
    let mut f = Fixture::builder().build();

    f.container.toggle_mode(ViewMode::Sql);
    f.container.toggle_mode(ViewMode::Sql);
    f.container.select_framework("angular").unwrap();
    f.container.select_chart_library("d3").unwrap();
    f.container.select_chart_type("bar").unwrap();
    f.container.toggle_mode(ViewMode::Query);
    f.container.copy_to_clipboard().await.unwrap();
    f.container.add_to_dashboard().await;

    assert_eq!(
        f.events.names(),
        vec![
            "Show SQL",
            "Hide Panel",
            "Set Framework",
            "Set Chart Library",
            "Set Chart Type",
            "Show Query",
            "Copy Query to Clipboard",
            "Add to Dashboard",
        ]
    );
}

#[tokio::test]
async fn add_to_dashboard_sends_current_code() {
    let mut f = Fixture::builder()
        .config(PlaygroundConfig::new().with_dashboard_route("/boards"))
        .build();
    f.container.set_code(CodeArtifact::new("renderChart()"));

    assert_eq!(
        f.container.add_to_dashboard().await,
        Some(DashboardAttachResult::Success)
    );
    assert_eq!(
        *f.dashboard.added.lock(),
        vec![CodeArtifact::new("renderChart()")]
    );
    assert_eq!(f.navigator.routes(), vec!["/boards"]);
}

#[tokio::test]
async fn concurrent_clicks_through_the_container() {
    let f = Fixture::builder()
        .dashboard(FakeDashboard::gated(Capability::Supported))
        .build();

    let (a, b, ()) = tokio::join!(
        f.container.add_to_dashboard(),
        f.container.add_to_dashboard(),
        async {
            tokio::task::yield_now().await;
            f.dashboard.release();
        }
    );

    assert_eq!([a.is_some(), b.is_some()], [true, false]);
    assert_eq!(f.dashboard.add_count(), 1);
    assert!(!f.container.attach_controller().is_busy());
}

#[tokio::test]
async fn refused_and_ignored_attaches_are_not_tracked() {
    let f = Fixture::builder()
        .dashboard(FakeDashboard::gated(Capability::Unsupported))
        .build();

    let (a, b, ()) = tokio::join!(
        f.container.add_to_dashboard(),
        f.container.add_to_dashboard(),
        async {
            tokio::task::yield_now().await;
            f.dashboard.release();
        }
    );

    assert!(matches!(a, Some(DashboardAttachResult::Unsupported(_))));
    assert_eq!(b, None);
    assert!(f.events.names().is_empty());
}

#[tokio::test]
async fn unsupported_framework_hides_the_chart_too() {
    let mut f = Fixture::builder()
        .renderer(FakeRenderer::returning(QueryOutcome {
            result_set: Some(serde_json::json!([1])),
            ..QueryOutcome::default()
        }))
        .build();
    f.container.set_query(sample_query());
    f.container.select_framework("angular").unwrap();

    assert_eq!(f.container.state().view_mode(), ViewMode::None);
    assert!(matches!(
        f.container.render_panel().await,
        PanelContent::UnsupportedFramework { .. }
    ));
    assert!(f.renderer.options().is_empty());
}

#[tokio::test]
async fn cache_panel_keeps_the_renewed_result_set() {
    let mut outcome = sql_outcome();
    outcome.result_set = Some(serde_json::json!({
        "loadResponse": { "lastRefreshTime": "2026-10-16T08:00:00.000Z" }
    }));
    let mut f = Fixture::builder()
        .renderer(FakeRenderer::returning(outcome))
        .build();
    f.container.set_query(sample_query());
    f.container.toggle_mode(ViewMode::Cache);

    match f.container.render_panel().await {
        PanelContent::Cache { result_set, .. } => assert_eq!(
            result_set["loadResponse"]["lastRefreshTime"],
            "2026-10-16T08:00:00.000Z"
        ),
        other => panic!("unexpected panel: {other:?}"),
    }
}
