//! Selection parsing and selector catalogue tests.

use ctc_core::{
    error::DashError,
    scenario::{CustomReform, PhaseoutStart, PolicyScenario, Refundability, ScenarioKey},
    selection::{Selection, SelectionQuery, SelectorCatalogue},
    view::ViewMode,
};

/// An empty query selects current law vs TCJA extension, summary view.
#[test]
fn empty_query_uses_defaults() {
    let selection = Selection::parse(&SelectionQuery::default()).unwrap();
    assert_eq!(selection, Selection::default());
    assert_eq!(selection.baseline, PolicyScenario::CurrentLaw);
    assert_eq!(selection.reform, ScenarioKey::from(PolicyScenario::TcjaExtension));
    assert_eq!(selection.view, ViewMode::Summary);
}

/// A full custom query parses into the four-field key.
#[test]
fn custom_query_parses_all_four_fields() {
    let query = SelectionQuery {
        baseline: Some("tcja".into()),
        reform: Some("custom".into()),
        refund: Some("refundable".into()),
        ctc_c: Some("3600".into()),
        ctc_u6: Some("1000".into()),
        ps: Some("none".into()),
        view: Some("parameters".into()),
    };

    let selection = Selection::parse(&query).unwrap();
    assert_eq!(selection.baseline, PolicyScenario::TcjaExtension);
    assert_eq!(
        selection.reform,
        ScenarioKey::from(CustomReform {
            refundability: Refundability::Refundable,
            max_credit: 3600,
            under6_bonus: 1000,
            phaseout_start: PhaseoutStart::Eliminated,
        })
    );
    assert_eq!(selection.view, ViewMode::Parameters);
}

/// Custom fields left out of the query take the first option of each list.
#[test]
fn custom_query_fills_missing_fields_with_defaults() {
    let query = SelectionQuery {
        reform: Some("custom".into()),
        ctc_c: Some("2500".into()),
        ..SelectionQuery::default()
    };

    let selection = Selection::parse(&query).unwrap();
    assert_eq!(
        selection.reform,
        ScenarioKey::from(CustomReform {
            max_credit: 2500,
            ..CustomReform::default()
        })
    );
}

/// Custom fields are ignored for named reforms.
#[test]
fn custom_fields_ignored_for_named_reform() {
    let query = SelectionQuery {
        reform: Some("senate25".into()),
        ctc_c: Some("not-a-number".into()),
        ..SelectionQuery::default()
    };
    let selection = Selection::parse(&query).unwrap();
    assert_eq!(selection.reform, ScenarioKey::from(PolicyScenario::Senate));
}

/// Only current law and the TCJA extension may stand as the baseline.
#[test]
fn reform_only_scenarios_are_rejected_as_baseline() {
    for raw in ["house25", "senate25", "custom"] {
        let query = SelectionQuery {
            baseline: Some(raw.into()),
            ..SelectionQuery::default()
        };
        let err = Selection::parse(&query).unwrap_err();
        assert!(
            matches!(err, DashError::UnknownScenario { selector: "baseline", .. }),
            "baseline {raw}: {err:?}"
        );
    }
}

/// Out-of-set amounts are unknown values, even if numeric.
#[test]
fn amounts_outside_option_sets_are_rejected() {
    let err = CustomReform::parse("refundable", "2100", "0", "current").unwrap_err();
    assert!(matches!(err, DashError::UnknownScenario { selector: "ctc_c", .. }));

    let err = CustomReform::parse("refundable", "2000", "250", "current").unwrap_err();
    assert!(matches!(err, DashError::UnknownScenario { selector: "ctc_u6", .. }));

    let err = CustomReform::parse("partly", "2000", "0", "current").unwrap_err();
    assert!(matches!(err, DashError::UnknownScenario { selector: "refund", .. }));
}

/// The catalogue offers the documented option lists.
#[test]
fn catalogue_lists_selector_options() {
    let catalogue = SelectorCatalogue::standard();

    let values = |opts: &[ctc_core::selection::SelectorOption]| {
        opts.iter().map(|o| o.value.clone()).collect::<Vec<_>>()
    };
    assert_eq!(values(&catalogue.baseline), ["cl", "tcja"]);
    assert_eq!(values(&catalogue.reform), ["tcja", "house25", "senate25", "custom"]);
    assert_eq!(values(&catalogue.refund), ["nonrefundable", "refundable"]);
    assert_eq!(values(&catalogue.ctc_c), ["2000", "2200", "2500", "3000", "3600"]);
    assert_eq!(values(&catalogue.ctc_u6), ["0", "500", "1000"]);
    assert_eq!(values(&catalogue.ps), ["pre_tcja", "current", "none"]);
    assert_eq!(values(&catalogue.view), ["summary", "parameters", "distribution"]);
    assert_eq!(catalogue.ctc_c[3].label, "$3,000");
}
