//! View definitions: which fields each comparison table shows, in order,
//! and how a scenario's value mapping is assembled for it.

use crate::{
    compare::{CellValue, FieldSpec, FieldValues},
    dataset::ScenarioRow,
    error::DashResult,
    resolver::ScenarioResolver,
    scenario::ScenarioKey,
    types::Decile,
};
use serde::{Deserialize, Serialize};

pub const SUMMARY_FOOTNOTE: &str = "*For this version of the calculator, it assumes that the TCJA \
expired and was never extended as the current law.*";

pub const SUMMARY_FIELDS: [FieldSpec; 7] = [
    FieldSpec::numeric("value_total", "Annual Value of Total Benefits (2025 $Billions)"),
    FieldSpec::numeric("value_ctc", "Annual Value of Child Tax Credit (2025 $Billions)"),
    FieldSpec::numeric("mean", "Average Total Benefit ($)"),
    FieldSpec::numeric("pc_aftertaxinc", "Percent Change in After-Tax Income (%)"),
    FieldSpec::numeric("metr_reform", "EMTR on Labor (%)"),
    FieldSpec::numeric("spm_all", "SPM Poverty Rate - Total U.S. (%)"),
    FieldSpec::numeric("spm_u18", "SPM Poverty Rate - Under 18 (%)"),
];

pub const PARAMETER_FIELDS: [FieldSpec; 8] = [
    FieldSpec::numeric("max_credit", "Maximum Credit ($)"),
    FieldSpec::numeric("u6_bonus", "Bonus for Children Under 6 ($)"),
    FieldSpec::numeric("max_refundable", "Maximum Refundable Amount ($)"),
    FieldSpec::text("qualifying_ages", "Qualifying Child Ages"),
    FieldSpec::numeric("refund_threshold", "Refundability Earnings Threshold ($)"),
    FieldSpec::numeric("phasein_rate", "Phase-in Rate (%)"),
    FieldSpec::numeric("phaseout_start", "Phaseout Start ($)"),
    FieldSpec::numeric("phaseout_rate", "Phaseout Rate (%)"),
];

/// Mean benefit per decile, 1..=10 then ALL. Keys line up with
/// `Decile::display_order()`.
pub const DISTRIBUTION_FIELDS: [FieldSpec; 11] = [
    FieldSpec::numeric("mean_d1", "Average Benefit - Decile 1 ($)"),
    FieldSpec::numeric("mean_d2", "Average Benefit - Decile 2 ($)"),
    FieldSpec::numeric("mean_d3", "Average Benefit - Decile 3 ($)"),
    FieldSpec::numeric("mean_d4", "Average Benefit - Decile 4 ($)"),
    FieldSpec::numeric("mean_d5", "Average Benefit - Decile 5 ($)"),
    FieldSpec::numeric("mean_d6", "Average Benefit - Decile 6 ($)"),
    FieldSpec::numeric("mean_d7", "Average Benefit - Decile 7 ($)"),
    FieldSpec::numeric("mean_d8", "Average Benefit - Decile 8 ($)"),
    FieldSpec::numeric("mean_d9", "Average Benefit - Decile 9 ($)"),
    FieldSpec::numeric("mean_d10", "Average Benefit - Decile 10 ($)"),
    FieldSpec::numeric("mean_all", "Average Benefit - All ($)"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Summary,
    Parameters,
    Distribution,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Summary, ViewMode::Parameters, ViewMode::Distribution];

    pub fn selector(self) -> &'static str {
        match self {
            ViewMode::Summary => "summary",
            ViewMode::Parameters => "parameters",
            ViewMode::Distribution => "distribution",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Summary => "Summary",
            ViewMode::Parameters => "Policy Parameters",
            ViewMode::Distribution => "Distribution by Decile",
        }
    }

    pub fn from_selector(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.selector() == raw.trim())
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            ViewMode::Summary => &SUMMARY_FIELDS,
            ViewMode::Parameters => &PARAMETER_FIELDS,
            ViewMode::Distribution => &DISTRIBUTION_FIELDS,
        }
    }

    pub fn footnote(self) -> Option<&'static str> {
        match self {
            ViewMode::Summary => Some(SUMMARY_FOOTNOTE),
            ViewMode::Parameters | ViewMode::Distribution => None,
        }
    }

    /// Resolve `key` in every table this view reads and merge the rows
    /// into one value mapping.
    pub fn collect_values(
        self,
        resolver: &ScenarioResolver<'_>,
        key: &ScenarioKey,
    ) -> DashResult<FieldValues> {
        match self {
            ViewMode::Summary => {
                let mut values = resolver.budget(key)?.values();
                values.extend(resolver.distribution(key)?.values());
                values.extend(resolver.poverty(key)?.values());
                Ok(values)
            }
            ViewMode::Parameters => Ok(resolver.parameters(key)?.values()),
            ViewMode::Distribution => {
                let mut values = FieldValues::new();
                for (decile, field) in Decile::display_order().into_iter().zip(&DISTRIBUTION_FIELDS) {
                    if let Some(mean) = resolver.decile(key, decile)?.mean {
                        values.insert(field.key, CellValue::Number(mean));
                    }
                }
                Ok(values)
            }
        }
    }
}
