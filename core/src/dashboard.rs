//! The dashboard — selection in, render model out.
//!
//! RULES:
//!   - Datasets are loaded once, before the dashboard is built, and never change.
//!   - `render` is a pure function of the selection. No caching, no hidden state.
//!   - Every per-interaction error stops here and becomes a warning.

use crate::{
    compare::{self, ComparisonRow},
    dataset::Datasets,
    error::{DashError, DashResult},
    render::{RenderModel, TableModel, INCOMPLETE_DATA_MESSAGE, NO_DATA_MESSAGE},
    resolver::ScenarioResolver,
    selection::{Selection, SelectionQuery},
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Dashboard {
    datasets: Arc<Datasets>,
}

impl Dashboard {
    pub fn new(datasets: Arc<Datasets>) -> Self {
        Self { datasets }
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    /// Resolve both sides of `selection` and build the comparison rows.
    pub fn compare(&self, selection: &Selection) -> DashResult<Vec<ComparisonRow>> {
        let resolver = ScenarioResolver::new(&self.datasets);
        let view = selection.view;
        let baseline = view.collect_values(&resolver, &selection.baseline_key())?;
        let reform = view.collect_values(&resolver, &selection.reform)?;
        compare::build(&baseline, &reform, view.fields())
    }

    /// Render `selection`. Errors become warnings; nothing propagates.
    pub fn render(&self, selection: &Selection) -> RenderModel {
        log::debug!(
            "Render {:?}: baseline {} vs reform {}",
            selection.view,
            selection.baseline.type_code(),
            selection.reform
        );
        match self.compare(selection) {
            Ok(rows) => RenderModel::Table(TableModel::from_rows(selection.view, &rows)),
            Err(err) => warning_for(&err),
        }
    }

    /// Parse raw selector values, then render.
    pub fn render_query(&self, query: &SelectionQuery) -> RenderModel {
        self.render_interaction(query).1
    }

    /// Like `render_query`, but also returns the selection the model was
    /// computed for, so the page can show exactly that. A query that does
    /// not parse is shown as the default selection.
    pub fn render_interaction(&self, query: &SelectionQuery) -> (Selection, RenderModel) {
        match Selection::parse(query) {
            Ok(selection) => (selection, self.render(&selection)),
            Err(err) => (Selection::default(), warning_for(&err)),
        }
    }

    /// The warning for a query string that could not be decoded at all.
    pub fn reject_query(reason: &str) -> (Selection, RenderModel) {
        log::warn!("Rejected query string: {reason}");
        (Selection::default(), RenderModel::warning(NO_DATA_MESSAGE))
    }
}

fn warning_for(err: &DashError) -> RenderModel {
    if err.is_no_data() {
        log::warn!("{err}");
        RenderModel::warning(NO_DATA_MESSAGE)
    } else {
        // MissingField (or anything else) means the loaded data is malformed.
        log::error!("Malformed dataset: {err}");
        RenderModel::warning(INCOMPLETE_DATA_MESSAGE)
    }
}
