//! End-to-end tests: selection in, render model out.

use ctc_core::{
    config::DashboardConfig,
    dashboard::Dashboard,
    dataset::Datasets,
    render::{RenderModel, INCOMPLETE_DATA_MESSAGE, NO_DATA_MESSAGE, NO_DIFFERENCE, TABLE_HEADERS},
    scenario::{CustomReform, PhaseoutStart, PolicyScenario, Refundability},
    selection::{Selection, SelectionQuery},
    view::{ViewMode, SUMMARY_FOOTNOTE},
};
use std::sync::Arc;

fn build_dashboard(config: &DashboardConfig) -> Dashboard {
    let _ = env_logger::builder().is_test(true).try_init();
    let datasets = Datasets::load(config).expect("datasets load");
    Dashboard::new(Arc::new(datasets))
}

fn fixture_dashboard() -> Dashboard {
    build_dashboard(&DashboardConfig::default_test())
}

fn query(pairs: &[(&str, &str)]) -> SelectionQuery {
    let mut q = SelectionQuery::default();
    for (k, v) in pairs {
        let v = Some(v.to_string());
        match *k {
            "baseline" => q.baseline = v,
            "reform" => q.reform = v,
            "refund" => q.refund = v,
            "ctc_c" => q.ctc_c = v,
            "ctc_u6" => q.ctc_u6 = v,
            "ps" => q.ps = v,
            "view" => q.view = v,
            other => panic!("unknown query key {other}"),
        }
    }
    q
}

/// Current law vs TCJA extension, summary view: the full table with footnote.
#[test]
fn current_law_vs_tcja_summary_table() {
    let dashboard = fixture_dashboard();
    let model = dashboard.render(&Selection::default());

    let table = model.as_table().expect("summary should render a table");
    assert_eq!(table.view, ViewMode::Summary);
    assert_eq!(table.headers, TABLE_HEADERS.to_vec());
    assert_eq!(table.rows.len(), 7);
    assert_eq!(table.footnote.as_deref(), Some(SUMMARY_FOOTNOTE));

    let mean = &table.rows[2];
    assert_eq!(mean.label, "Average Total Benefit ($)");
    assert_eq!(mean.baseline, "120.4");
    assert_eq!(mean.reform, "95.1");
    assert_eq!(mean.difference, "-25.3");

    let ctc = &table.rows[1];
    assert_eq!(ctc.baseline, "56.3");
    assert_eq!(ctc.reform, "110.8");
    assert_eq!(ctc.difference, "54.5");
}

/// Rendering the same selection twice gives the same model.
#[test]
fn render_is_idempotent() {
    let dashboard = fixture_dashboard();
    let selection = Selection::default();
    assert_eq!(dashboard.render(&selection), dashboard.render(&selection));
}

/// Parameter view: eight rows, no footnote, the ages row has no difference.
#[test]
fn parameter_view_lists_eight_parameters() {
    let dashboard = fixture_dashboard();
    let model = dashboard.render_query(&query(&[("reform", "house25"), ("view", "parameters")]));

    let table = model.as_table().expect("parameter table");
    assert_eq!(table.rows.len(), 8);
    assert!(table.footnote.is_none());
    assert_eq!(table.rows[0].baseline, "1000");
    assert_eq!(table.rows[0].reform, "2500");
    assert_eq!(table.rows[0].difference, "1500.0");
    assert_eq!(table.rows[3].difference, NO_DIFFERENCE);
}

/// A custom reform present in the files renders like a named one.
#[test]
fn custom_reform_renders_when_combination_exists() {
    let dashboard = fixture_dashboard();
    let model = dashboard.render_query(&query(&[
        ("baseline", "tcja"),
        ("reform", "custom"),
        ("refund", "refundable"),
        ("ctc_c", "3000"),
        ("ctc_u6", "1000"),
        ("ps", "current"),
        ("view", "parameters"),
    ]));

    let table = model.as_table().expect("custom parameter table");
    assert_eq!(table.rows[1].reform, "1000");
    assert_eq!(table.rows[3].reform, "0-17");
}

/// A custom combination absent from the parameter file shows the
/// no-data warning instead of a table.
#[test]
fn absent_custom_combination_shows_no_data() {
    let dashboard = fixture_dashboard();
    let selection = Selection {
        baseline: PolicyScenario::CurrentLaw,
        reform: CustomReform {
            refundability: Refundability::Refundable,
            max_credit: 3600,
            under6_bonus: 500,
            phaseout_start: PhaseoutStart::Eliminated,
        }
        .into(),
        view: ViewMode::Parameters,
    };

    assert_eq!(dashboard.render(&selection), RenderModel::warning(NO_DATA_MESSAGE));
}

/// A minimal fixture missing a summary metric renders the incomplete-data
/// warning rather than failing.
#[test]
fn missing_metric_renders_incomplete_warning() {
    let config = DashboardConfig::default_test();
    let minimal = format!("{}/minimal", config.data_dir);
    let dashboard = build_dashboard(&config.with_data_dir(minimal));

    let model = dashboard.render(&Selection::default());
    assert_eq!(model, RenderModel::warning(INCOMPLETE_DATA_MESSAGE));

    // The same minimal data is complete enough for the parameter view.
    let params = dashboard.render_query(&query(&[("view", "parameters")]));
    assert!(params.as_table().is_some());
}

/// Selector values outside their enumerations are treated as no data.
#[test]
fn unknown_selectors_show_no_data() {
    let dashboard = fixture_dashboard();
    for q in [
        query(&[("baseline", "obama")]),
        query(&[("baseline", "house25")]),
        query(&[("reform", "house24")]),
        query(&[("view", "chart")]),
        query(&[("reform", "custom"), ("ctc_c", "2100")]),
        query(&[("reform", "custom"), ("ps", "later")]),
    ] {
        assert_eq!(
            dashboard.render_query(&q),
            RenderModel::warning(NO_DATA_MESSAGE),
            "query {q:?}"
        );
    }
}

/// The interaction reports the selection it rendered: the parsed one, or
/// the defaults when the query does not parse.
#[test]
fn interaction_reports_rendered_selection() {
    let dashboard = fixture_dashboard();

    let (selection, model) = dashboard.render_interaction(&query(&[("reform", "custom "), ("ctc_c", "3000")]));
    assert_eq!(
        selection.reform,
        CustomReform {
            max_credit: 3000,
            ..CustomReform::default()
        }
        .into()
    );
    assert_eq!(model, dashboard.render(&selection));

    let (selection, model) = dashboard.render_interaction(&query(&[("baseline", "senate25")]));
    assert_eq!(selection, Selection::default());
    assert_eq!(model, RenderModel::warning(NO_DATA_MESSAGE));
}

/// Distribution view: one row per decile plus ALL, where both sides have them.
#[test]
fn distribution_view_compares_every_decile() {
    let dashboard = fixture_dashboard();
    let model = dashboard.render_query(&query(&[("view", "distribution")]));

    let table = model.as_table().expect("distribution table");
    assert_eq!(table.rows.len(), 11);
    assert_eq!(table.rows[0].baseline, "10.5");
    assert_eq!(table.rows[0].reform, "12");
    assert_eq!(table.rows[0].difference, "1.5");
    assert_eq!(table.rows[10].difference, "-25.3");

    // House only has an ALL row in the fixture.
    let house = dashboard.render_query(&query(&[("reform", "house25"), ("view", "distribution")]));
    assert_eq!(house, RenderModel::warning(NO_DATA_MESSAGE));
}

/// The render model serializes for the JSON API.
#[test]
fn render_model_serializes_with_kind_tag() {
    let dashboard = fixture_dashboard();
    let json = serde_json::to_value(dashboard.render(&Selection::default())).unwrap();
    assert_eq!(json["kind"], "table");
    assert_eq!(json["view"], "summary");
    assert_eq!(json["rows"].as_array().map(Vec::len), Some(7));

    let warning = serde_json::to_value(RenderModel::warning(NO_DATA_MESSAGE)).unwrap();
    assert_eq!(warning["kind"], "warning");
    assert_eq!(warning["message"], NO_DATA_MESSAGE);
}
