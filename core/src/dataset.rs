//! CSV-backed datasets.
//!
//! RULE: Only dataset.rs reads files.
//! Everything downstream works on the typed, validated rows held here.
//!
//! Each file is read once at startup, its key columns are turned into a
//! `ScenarioKey`, and the whole table is checked for duplicate keys. After
//! that a `Datasets` value is never mutated.

use crate::{
    compare::{CellValue, FieldValues},
    config::DashboardConfig,
    error::{DashError, DashResult},
    scenario::{CustomReform, PhaseoutStart, PolicyScenario, Refundability, ScenarioKey},
    types::Decile,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Budget,
    Poverty,
    Distribution,
    Parameters,
}

impl DatasetKind {
    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::Budget => "budget estimates",
            DatasetKind::Poverty => "poverty estimates",
            DatasetKind::Distribution => "distribution estimates",
            DatasetKind::Parameters => "parameter table",
        }
    }
}

/// A row filed under a scenario key.
pub trait ScenarioRow {
    fn key(&self) -> &ScenarioKey;

    /// Secondary grouping dimension. Only the distribution table has one.
    fn decile(&self) -> Option<Decile> {
        None
    }

    /// The row's metric values. Blank cells are left out.
    fn values(&self) -> FieldValues;
}

// ── Row types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRow {
    pub key: ScenarioKey,
    /// Total benefit value, 2025 $ billions.
    pub value_total: Option<f64>,
    /// Credit-only value, 2025 $ billions.
    pub value_ctc: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PovertyRow {
    pub key: ScenarioKey,
    pub spm_all: Option<f64>,
    pub spm_u18: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistRow {
    pub key: ScenarioKey,
    pub decile: Decile,
    pub mean: Option<f64>,
    pub pc_aftertaxinc: Option<f64>,
    pub metr_reform: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamRow {
    pub key: ScenarioKey,
    pub max_credit: Option<f64>,
    pub u6_bonus: Option<f64>,
    pub max_refundable: Option<f64>,
    pub qualifying_ages: Option<String>,
    pub refund_threshold: Option<f64>,
    pub phasein_rate: Option<f64>,
    pub phaseout_start: Option<f64>,
    pub phaseout_rate: Option<f64>,
}

fn put_number(values: &mut FieldValues, field: &'static str, value: Option<f64>) {
    if let Some(v) = value {
        values.insert(field, CellValue::Number(v));
    }
}

impl ScenarioRow for BudgetRow {
    fn key(&self) -> &ScenarioKey {
        &self.key
    }

    fn values(&self) -> FieldValues {
        let mut values = FieldValues::new();
        put_number(&mut values, "value_total", self.value_total);
        put_number(&mut values, "value_ctc", self.value_ctc);
        values
    }
}

impl ScenarioRow for PovertyRow {
    fn key(&self) -> &ScenarioKey {
        &self.key
    }

    fn values(&self) -> FieldValues {
        let mut values = FieldValues::new();
        put_number(&mut values, "spm_all", self.spm_all);
        put_number(&mut values, "spm_u18", self.spm_u18);
        values
    }
}

impl ScenarioRow for DistRow {
    fn key(&self) -> &ScenarioKey {
        &self.key
    }

    fn decile(&self) -> Option<Decile> {
        Some(self.decile)
    }

    fn values(&self) -> FieldValues {
        let mut values = FieldValues::new();
        put_number(&mut values, "mean", self.mean);
        put_number(&mut values, "pc_aftertaxinc", self.pc_aftertaxinc);
        put_number(&mut values, "metr_reform", self.metr_reform);
        values
    }
}

impl ScenarioRow for ParamRow {
    fn key(&self) -> &ScenarioKey {
        &self.key
    }

    fn values(&self) -> FieldValues {
        let mut values = FieldValues::new();
        put_number(&mut values, "max_credit", self.max_credit);
        put_number(&mut values, "u6_bonus", self.u6_bonus);
        put_number(&mut values, "max_refundable", self.max_refundable);
        if let Some(ages) = &self.qualifying_ages {
            values.insert("qualifying_ages", CellValue::Text(ages.clone()));
        }
        put_number(&mut values, "refund_threshold", self.refund_threshold);
        put_number(&mut values, "phasein_rate", self.phasein_rate);
        put_number(&mut values, "phaseout_start", self.phaseout_start);
        put_number(&mut values, "phaseout_rate", self.phaseout_rate);
        values
    }
}

// ── Dataset ───────────────────────────────────────────────────────

/// One immutable table. At most one row per (key, decile).
#[derive(Debug, Clone)]
pub struct Dataset<R> {
    kind: DatasetKind,
    rows: Vec<R>,
}

impl<R: ScenarioRow> Dataset<R> {
    /// Wrap rows, rejecting duplicate (key, decile) pairs.
    pub fn new(kind: DatasetKind, rows: Vec<R>) -> DashResult<Self> {
        let mut seen = HashSet::new();
        for row in &rows {
            if !seen.insert((*row.key(), row.decile())) {
                let decile = row
                    .decile()
                    .map(|d| format!(", decile {d}"))
                    .unwrap_or_default();
                return Err(DashError::DataLoad {
                    path: kind.name().to_string(),
                    reason: format!("duplicate rows for scenario {}{decile}", row.key()),
                });
            }
        }
        Ok(Self { kind, rows })
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The four tables, loaded once.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub budget: Dataset<BudgetRow>,
    pub poverty: Dataset<PovertyRow>,
    pub distribution: Dataset<DistRow>,
    pub parameters: Dataset<ParamRow>,
}

impl Datasets {
    /// Load all four CSV files named by `config`.
    /// Any missing, unparsable, or inconsistent file fails the whole load.
    pub fn load(config: &DashboardConfig) -> DashResult<Self> {
        let dir = Path::new(&config.data_dir);
        let budget = load_table(&dir.join(&config.budget_file), DatasetKind::Budget, budget_row)?;
        let poverty = load_table(&dir.join(&config.poverty_file), DatasetKind::Poverty, poverty_row)?;
        let distribution = load_table(
            &dir.join(&config.dist_file),
            DatasetKind::Distribution,
            dist_row,
        )?;
        let parameters = load_table(
            &dir.join(&config.params_file),
            DatasetKind::Parameters,
            param_row,
        )?;

        log::info!(
            "Loaded datasets from {}: {} budget, {} poverty, {} distribution, {} parameter rows",
            dir.display(),
            budget.len(),
            poverty.len(),
            distribution.len(),
            parameters.len()
        );

        Ok(Self {
            budget,
            poverty,
            distribution,
            parameters,
        })
    }

    /// Build from in-memory rows (used in tests).
    pub fn from_rows(
        budget: Vec<BudgetRow>,
        poverty: Vec<PovertyRow>,
        distribution: Vec<DistRow>,
        parameters: Vec<ParamRow>,
    ) -> DashResult<Self> {
        Ok(Self {
            budget: Dataset::new(DatasetKind::Budget, budget)?,
            poverty: Dataset::new(DatasetKind::Poverty, poverty)?,
            distribution: Dataset::new(DatasetKind::Distribution, distribution)?,
            parameters: Dataset::new(DatasetKind::Parameters, parameters)?,
        })
    }
}

// ── CSV ingestion ─────────────────────────────────────────────────

/// The four key columns every file shares.
#[derive(Debug)]
struct KeyColumns {
    kind: String,
    ctc_c: Option<f64>,
    ctc_u6: Option<f64>,
    ps: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBudgetRow {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    ctc_c: Option<f64>,
    #[serde(default)]
    ctc_u6: Option<f64>,
    #[serde(default)]
    ps: Option<String>,
    #[serde(default)]
    value_total: Option<f64>,
    #[serde(default)]
    value_ctc: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawPovertyRow {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    ctc_c: Option<f64>,
    #[serde(default)]
    ctc_u6: Option<f64>,
    #[serde(default)]
    ps: Option<String>,
    #[serde(default)]
    spm_all: Option<f64>,
    #[serde(default)]
    spm_u18: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDistRow {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    ctc_c: Option<f64>,
    #[serde(default)]
    ctc_u6: Option<f64>,
    #[serde(default)]
    ps: Option<String>,
    decile: String,
    #[serde(default)]
    mean: Option<f64>,
    #[serde(default)]
    pc_aftertaxinc: Option<f64>,
    #[serde(default)]
    metr_reform: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawParamRow {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    ctc_c: Option<f64>,
    #[serde(default)]
    ctc_u6: Option<f64>,
    #[serde(default)]
    ps: Option<String>,
    #[serde(default)]
    max_credit: Option<f64>,
    #[serde(default)]
    u6_bonus: Option<f64>,
    #[serde(default)]
    max_refundable: Option<f64>,
    #[serde(default)]
    qualifying_ages: Option<String>,
    #[serde(default)]
    refund_threshold: Option<f64>,
    #[serde(default)]
    phasein_rate: Option<f64>,
    #[serde(default)]
    phaseout_start: Option<f64>,
    #[serde(default)]
    phaseout_rate: Option<f64>,
}

fn budget_row(raw: RawBudgetRow) -> Result<BudgetRow, String> {
    Ok(BudgetRow {
        key: KeyColumns {
            kind: raw.kind,
            ctc_c: raw.ctc_c,
            ctc_u6: raw.ctc_u6,
            ps: raw.ps,
        }
        .into_key()?,
        value_total: raw.value_total,
        value_ctc: raw.value_ctc,
    })
}

fn poverty_row(raw: RawPovertyRow) -> Result<PovertyRow, String> {
    Ok(PovertyRow {
        key: KeyColumns {
            kind: raw.kind,
            ctc_c: raw.ctc_c,
            ctc_u6: raw.ctc_u6,
            ps: raw.ps,
        }
        .into_key()?,
        spm_all: raw.spm_all,
        spm_u18: raw.spm_u18,
    })
}

fn dist_row(raw: RawDistRow) -> Result<DistRow, String> {
    let decile =
        Decile::parse(&raw.decile).ok_or_else(|| format!("invalid decile '{}'", raw.decile))?;
    Ok(DistRow {
        key: KeyColumns {
            kind: raw.kind,
            ctc_c: raw.ctc_c,
            ctc_u6: raw.ctc_u6,
            ps: raw.ps,
        }
        .into_key()?,
        decile,
        mean: raw.mean,
        pc_aftertaxinc: raw.pc_aftertaxinc,
        metr_reform: raw.metr_reform,
    })
}

fn param_row(raw: RawParamRow) -> Result<ParamRow, String> {
    Ok(ParamRow {
        key: KeyColumns {
            kind: raw.kind,
            ctc_c: raw.ctc_c,
            ctc_u6: raw.ctc_u6,
            ps: raw.ps,
        }
        .into_key()?,
        max_credit: raw.max_credit,
        u6_bonus: raw.u6_bonus,
        max_refundable: raw.max_refundable,
        qualifying_ages: raw.qualifying_ages.filter(|s| !s.trim().is_empty()),
        refund_threshold: raw.refund_threshold,
        phasein_rate: raw.phasein_rate,
        phaseout_start: raw.phaseout_start,
        phaseout_rate: raw.phaseout_rate,
    })
}

impl KeyColumns {
    /// Named rows are identified by `type` alone. Custom rows carry their
    /// refundability in `type` and need all three remaining key columns.
    fn into_key(self) -> Result<ScenarioKey, String> {
        if let Some(policy) = PolicyScenario::from_type_code(&self.kind) {
            return Ok(policy.into());
        }
        let refundability = Refundability::from_code(&self.kind)
            .ok_or_else(|| format!("unrecognised scenario type '{}'", self.kind))?;
        let max_credit = whole_dollars("ctc_c", self.ctc_c)?;
        let under6_bonus = whole_dollars("ctc_u6", self.ctc_u6)?;
        let ps = self
            .ps
            .ok_or_else(|| "custom row without a ps value".to_string())?;
        let phaseout_start =
            PhaseoutStart::from_code(&ps).ok_or_else(|| format!("unrecognised ps '{ps}'"))?;
        Ok(CustomReform {
            refundability,
            max_credit,
            under6_bonus,
            phaseout_start,
        }
        .into())
    }
}

fn whole_dollars(column: &str, value: Option<f64>) -> Result<u32, String> {
    let v = value.ok_or_else(|| format!("custom row without a {column} value"))?;
    if v.is_finite() && v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v) {
        Ok(v as u32)
    } else {
        Err(format!("{column} must be a whole dollar amount, got {v}"))
    }
}

fn load_table<Raw, R>(
    path: &Path,
    kind: DatasetKind,
    convert: fn(Raw) -> Result<R, String>,
) -> DashResult<Dataset<R>>
where
    Raw: DeserializeOwned,
    R: ScenarioRow,
{
    let load_err = |reason: String| DashError::DataLoad {
        path: path.display().to_string(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| load_err(e.to_string()))?;

    let mut rows = Vec::new();
    for (i, record) in reader.deserialize::<Raw>().enumerate() {
        // +2: one for the header, one for 1-based line numbers.
        let line = i + 2;
        let raw = record.map_err(|e| load_err(format!("line {line}: {e}")))?;
        rows.push(convert(raw).map_err(|reason| load_err(format!("line {line}: {reason}")))?);
    }
    log::debug!("Read {} rows from {}", rows.len(), path.display());

    Dataset::new(kind, rows).map_err(|e| match e {
        DashError::DataLoad { reason, .. } => load_err(reason),
        other => other,
    })
}
