//! Scenario keys: the closed set of named policies and the custom reform tuple.
//!
//! Every dataset row carries one of these keys. Resolution is plain
//! equality on the typed key, so a custom reform only matches when all
//! four of its fields agree.

use crate::error::{DashError, DashResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Max-credit amounts offered for a custom reform, whole dollars.
pub const MAX_CREDIT_OPTIONS: [u32; 5] = [2000, 2200, 2500, 3000, 3600];

/// Under-6 bonus amounts offered for a custom reform, whole dollars.
pub const UNDER6_BONUS_OPTIONS: [u32; 3] = [0, 500, 1000];

/// A named policy scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyScenario {
    /// Current law: TCJA expires.
    CurrentLaw,
    TcjaExtension,
    House,
    Senate,
}

impl PolicyScenario {
    pub const ALL: [PolicyScenario; 4] = [
        PolicyScenario::CurrentLaw,
        PolicyScenario::TcjaExtension,
        PolicyScenario::House,
        PolicyScenario::Senate,
    ];

    /// Scenarios that may stand as the baseline of a comparison.
    pub const BASELINES: [PolicyScenario; 2] =
        [PolicyScenario::CurrentLaw, PolicyScenario::TcjaExtension];

    /// Value of the `type` column for this scenario.
    pub fn type_code(self) -> &'static str {
        match self {
            PolicyScenario::CurrentLaw => "CL",
            PolicyScenario::TcjaExtension => "TCJA",
            PolicyScenario::House => "House25",
            PolicyScenario::Senate => "Senate25",
        }
    }

    /// Value sent by the selection UI.
    pub fn selector(self) -> &'static str {
        match self {
            PolicyScenario::CurrentLaw => "cl",
            PolicyScenario::TcjaExtension => "tcja",
            PolicyScenario::House => "house25",
            PolicyScenario::Senate => "senate25",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PolicyScenario::CurrentLaw => "Current Policy (TCJA Expires)",
            PolicyScenario::TcjaExtension => "TCJA Extension",
            PolicyScenario::House => "House Reform",
            PolicyScenario::Senate => "Senate Reform",
        }
    }

    pub fn from_selector(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.selector() == raw.trim())
    }

    pub fn from_type_code(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.type_code() == raw.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Refundability {
    NonRefundable,
    Refundable,
}

impl Refundability {
    pub const ALL: [Refundability; 2] = [Refundability::NonRefundable, Refundability::Refundable];

    pub fn code(self) -> &'static str {
        match self {
            Refundability::NonRefundable => "nonrefundable",
            Refundability::Refundable => "refundable",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Refundability::NonRefundable => "Non-refundable",
            Refundability::Refundable => "Refundable",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.code() == raw.trim())
    }
}

/// Income level at which the credit starts to phase out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseoutStart {
    PreTcja,
    Current,
    Eliminated,
}

impl PhaseoutStart {
    pub const ALL: [PhaseoutStart; 3] = [
        PhaseoutStart::PreTcja,
        PhaseoutStart::Current,
        PhaseoutStart::Eliminated,
    ];

    /// Value of the `ps` column.
    pub fn code(self) -> &'static str {
        match self {
            PhaseoutStart::PreTcja => "pre_tcja",
            PhaseoutStart::Current => "current",
            PhaseoutStart::Eliminated => "none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhaseoutStart::PreTcja => "Pre-TCJA",
            PhaseoutStart::Current => "Current Policy",
            PhaseoutStart::Eliminated => "Eliminated",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == raw.trim())
    }
}

/// A custom reform. All four fields take part in every lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomReform {
    pub refundability: Refundability,
    pub max_credit: u32,
    pub under6_bonus: u32,
    pub phaseout_start: PhaseoutStart,
}

impl CustomReform {
    /// Parse the four selector values, rejecting amounts outside the
    /// offered option sets.
    pub fn parse(refund: &str, max_credit: &str, under6_bonus: &str, ps: &str) -> DashResult<Self> {
        let refundability = Refundability::from_code(refund).ok_or_else(|| unknown("refund", refund))?;
        let max_credit = parse_option(max_credit, &MAX_CREDIT_OPTIONS)
            .ok_or_else(|| unknown("ctc_c", max_credit))?;
        let under6_bonus = parse_option(under6_bonus, &UNDER6_BONUS_OPTIONS)
            .ok_or_else(|| unknown("ctc_u6", under6_bonus))?;
        let phaseout_start = PhaseoutStart::from_code(ps).ok_or_else(|| unknown("ps", ps))?;
        Ok(Self {
            refundability,
            max_credit,
            under6_bonus,
            phaseout_start,
        })
    }
}

impl Default for CustomReform {
    fn default() -> Self {
        Self {
            refundability: Refundability::NonRefundable,
            max_credit: MAX_CREDIT_OPTIONS[0],
            under6_bonus: UNDER6_BONUS_OPTIONS[0],
            phaseout_start: PhaseoutStart::PreTcja,
        }
    }
}

fn parse_option(raw: &str, options: &[u32]) -> Option<u32> {
    let value: u32 = raw.trim().parse().ok()?;
    options.contains(&value).then_some(value)
}

fn unknown(selector: &'static str, value: &str) -> DashError {
    DashError::UnknownScenario {
        selector,
        value: value.to_string(),
    }
}

/// The key a dataset row is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioKey {
    Named { policy: PolicyScenario },
    Custom { reform: CustomReform },
}

impl From<PolicyScenario> for ScenarioKey {
    fn from(policy: PolicyScenario) -> Self {
        ScenarioKey::Named { policy }
    }
}

impl From<CustomReform> for ScenarioKey {
    fn from(reform: CustomReform) -> Self {
        ScenarioKey::Custom { reform }
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKey::Named { policy } => f.write_str(policy.type_code()),
            ScenarioKey::Custom { reform } => write!(
                f,
                "custom({}, ${}, ${} under 6, phaseout {})",
                reform.refundability.code(),
                reform.max_credit,
                reform.under6_bonus,
                reform.phaseout_start.code()
            ),
        }
    }
}
