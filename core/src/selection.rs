//! Selection state as it arrives from the UI, and its typed form.

use crate::{
    error::{DashError, DashResult},
    scenario::{
        CustomReform, PhaseoutStart, PolicyScenario, Refundability, ScenarioKey,
        MAX_CREDIT_OPTIONS, UNDER6_BONUS_OPTIONS,
    },
    view::ViewMode,
};
use serde::{Deserialize, Serialize};

/// Reform selector value that switches to the custom parameters.
pub const CUSTOM_SELECTOR: &str = "custom";

/// Raw selector values. Every field is optional; absent ones take the
/// dashboard defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionQuery {
    pub baseline: Option<String>,
    pub reform: Option<String>,
    pub refund: Option<String>,
    pub ctc_c: Option<String>,
    pub ctc_u6: Option<String>,
    pub ps: Option<String>,
    pub view: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub baseline: PolicyScenario,
    pub reform: ScenarioKey,
    pub view: ViewMode,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            baseline: PolicyScenario::CurrentLaw,
            reform: PolicyScenario::TcjaExtension.into(),
            view: ViewMode::Summary,
        }
    }
}

impl Selection {
    /// Parse raw selector values. Any value outside its enumeration is
    /// `UnknownScenario`; the baseline must be one of
    /// `PolicyScenario::BASELINES`. Custom parameters are read only when the
    /// reform selector is `custom`.
    pub fn parse(query: &SelectionQuery) -> DashResult<Self> {
        let defaults = Selection::default();

        let baseline = match non_empty(&query.baseline) {
            Some(raw) => PolicyScenario::from_selector(raw)
                .filter(|p| PolicyScenario::BASELINES.contains(p))
                .ok_or_else(|| unknown("baseline", raw))?,
            None => defaults.baseline,
        };

        let reform = match non_empty(&query.reform) {
            Some(CUSTOM_SELECTOR) => {
                let custom = CustomReform::default();
                let max_credit = custom.max_credit.to_string();
                let under6_bonus = custom.under6_bonus.to_string();
                CustomReform::parse(
                    non_empty(&query.refund).unwrap_or(custom.refundability.code()),
                    non_empty(&query.ctc_c).unwrap_or(&max_credit),
                    non_empty(&query.ctc_u6).unwrap_or(&under6_bonus),
                    non_empty(&query.ps).unwrap_or(custom.phaseout_start.code()),
                )?
                .into()
            }
            Some(raw) => PolicyScenario::from_selector(raw)
                .ok_or_else(|| unknown("reform", raw))?
                .into(),
            None => defaults.reform,
        };

        let view = match non_empty(&query.view) {
            Some(raw) => ViewMode::from_selector(raw).ok_or_else(|| unknown("view", raw))?,
            None => defaults.view,
        };

        Ok(Self {
            baseline,
            reform,
            view,
        })
    }

    pub fn baseline_key(&self) -> ScenarioKey {
        self.baseline.into()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn unknown(selector: &'static str, value: &str) -> DashError {
    DashError::UnknownScenario {
        selector,
        value: value.to_string(),
    }
}

// ── Selector catalogue ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorOption {
    pub label: String,
    pub value: String,
}

impl SelectorOption {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Option lists for every dropdown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorCatalogue {
    pub baseline: Vec<SelectorOption>,
    pub reform: Vec<SelectorOption>,
    pub refund: Vec<SelectorOption>,
    pub ctc_c: Vec<SelectorOption>,
    pub ctc_u6: Vec<SelectorOption>,
    pub ps: Vec<SelectorOption>,
    pub view: Vec<SelectorOption>,
}

impl SelectorCatalogue {
    pub fn standard() -> Self {
        let policy = |p: PolicyScenario| SelectorOption::new(p.label(), p.selector());
        let dollars = |v: &u32| SelectorOption::new(format_dollars(*v), v.to_string());

        Self {
            baseline: PolicyScenario::BASELINES.into_iter().map(policy).collect(),
            reform: [
                PolicyScenario::TcjaExtension,
                PolicyScenario::House,
                PolicyScenario::Senate,
            ]
            .into_iter()
            .map(policy)
            .chain([SelectorOption::new("Custom Reform", CUSTOM_SELECTOR)])
            .collect(),
            refund: Refundability::ALL
                .into_iter()
                .map(|r| SelectorOption::new(r.label(), r.code()))
                .collect(),
            ctc_c: MAX_CREDIT_OPTIONS.iter().map(dollars).collect(),
            ctc_u6: UNDER6_BONUS_OPTIONS.iter().map(dollars).collect(),
            ps: PhaseoutStart::ALL
                .into_iter()
                .map(|p| SelectorOption::new(p.label(), p.code()))
                .collect(),
            view: ViewMode::ALL
                .into_iter()
                .map(|v| SelectorOption::new(v.label(), v.selector()))
                .collect(),
        }
    }
}

/// `2500` → `$2,500`.
fn format_dollars(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${out}")
}
