//! Comparison builder: pairs baseline and reform values field by field.
//!
//! Output order is exactly the order of the field spec. Nothing is
//! reordered, filtered, or defaulted.

use crate::{
    error::{DashError, DashResult},
    types::Side,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

/// Flat field-key → value mapping for one side of a comparison.
pub type FieldValues = BTreeMap<&'static str, CellValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    /// Display-only; no difference is computed.
    Text,
}

/// One row of a view: which field to read and how to label it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn numeric(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Numeric,
        }
    }

    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub baseline: CellValue,
    pub reform: CellValue,
    /// `None` for text fields.
    pub difference: Option<f64>,
}

/// Round to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    // Snap the scaled value first so a difference like 0.35 - 0.1
    // (0.2499999...) still counts as a half.
    let scaled = (value * 10.0 * 1e9).round() / 1e9;
    let rounded = scaled.round() / 10.0;
    // Keep -0.0 out of the difference column.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Build the comparison rows for `spec` from the two value mappings.
///
/// Fails with `MissingField` on the first field that either side lacks,
/// or holds as the wrong kind of value.
pub fn build(
    baseline: &FieldValues,
    reform: &FieldValues,
    spec: &[FieldSpec],
) -> DashResult<Vec<ComparisonRow>> {
    spec.iter()
        .map(|field| {
            let base = lookup(baseline, field, Side::Baseline)?;
            let ref_val = lookup(reform, field, Side::Reform)?;
            let difference = match (field.kind, base, ref_val) {
                (FieldKind::Numeric, CellValue::Number(b), CellValue::Number(r)) => {
                    Some(round1(r - b))
                }
                _ => None,
            };
            Ok(ComparisonRow {
                label: field.label,
                baseline: base.clone(),
                reform: ref_val.clone(),
                difference,
            })
        })
        .collect()
}

fn lookup<'v>(values: &'v FieldValues, field: &FieldSpec, side: Side) -> DashResult<&'v CellValue> {
    let missing = || DashError::MissingField {
        field: field.key,
        side,
    };
    let value = values.get(field.key).ok_or_else(missing)?;
    match (field.kind, value) {
        (FieldKind::Numeric, CellValue::Number(v)) if v.is_finite() => Ok(value),
        (FieldKind::Text, CellValue::Text(_)) => Ok(value),
        _ => Err(missing()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_is_half_away_from_zero() {
        assert_eq!(round1(0.25), 0.3);
        assert_eq!(round1(-0.25), -0.3);
        assert_eq!(round1(95.1 - 120.4), -25.3);
    }

    #[test]
    fn round1_treats_float_noise_at_a_half_as_a_half() {
        assert_eq!(round1(0.35 - 0.1), 0.3);
        assert_eq!(round1(0.1 - 0.35), -0.3);
        assert_eq!(round1(0.24), 0.2);
    }

    #[test]
    fn round1_never_yields_negative_zero() {
        let r = round1(-0.04);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }
}
