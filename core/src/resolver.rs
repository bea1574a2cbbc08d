//! Scenario resolver: exact-match lookup of a scenario's row(s).
//!
//! A lookup is a pure conjunctive filter on the typed key (plus the decile
//! for the distribution table). No partial matches, no fallbacks.

use crate::{
    dataset::{BudgetRow, Dataset, Datasets, DistRow, ParamRow, PovertyRow, ScenarioRow},
    error::{DashError, DashResult},
    scenario::ScenarioKey,
    types::Decile,
};

/// Find the single row filed under `key` (and `decile`, for tables that
/// have one). Zero matches is `NoMatchingData`.
pub fn resolve<'d, R: ScenarioRow>(
    dataset: &'d Dataset<R>,
    key: &ScenarioKey,
    decile: Option<Decile>,
) -> DashResult<&'d R> {
    // Dataset::new has already rejected duplicates, so the first match is the only one.
    dataset
        .rows()
        .iter()
        .find(|row| row.key() == key && row.decile() == decile)
        .ok_or_else(|| {
            let scenario = match decile {
                Some(d) => format!("{key}, decile {d}"),
                None => key.to_string(),
            };
            log::warn!("No data in {} for {scenario}", dataset.kind().name());
            DashError::NoMatchingData {
                dataset: dataset.kind().name(),
                scenario,
            }
        })
}

/// Per-table lookups over a loaded `Datasets` handle.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioResolver<'a> {
    datasets: &'a Datasets,
}

impl<'a> ScenarioResolver<'a> {
    pub fn new(datasets: &'a Datasets) -> Self {
        Self { datasets }
    }

    pub fn budget(&self, key: &ScenarioKey) -> DashResult<&'a BudgetRow> {
        resolve(&self.datasets.budget, key, None)
    }

    pub fn poverty(&self, key: &ScenarioKey) -> DashResult<&'a PovertyRow> {
        resolve(&self.datasets.poverty, key, None)
    }

    /// The aggregate (`ALL`) distribution row.
    pub fn distribution(&self, key: &ScenarioKey) -> DashResult<&'a DistRow> {
        self.decile(key, Decile::All)
    }

    pub fn decile(&self, key: &ScenarioKey, decile: Decile) -> DashResult<&'a DistRow> {
        resolve(&self.datasets.distribution, key, Some(decile))
    }

    pub fn parameters(&self, key: &ScenarioKey) -> DashResult<&'a ParamRow> {
        resolve(&self.datasets.parameters, key, None)
    }
}
