//! UI-agnostic render model: a table with formatted cells, or a warning.

use crate::{
    compare::{CellValue, ComparisonRow},
    view::ViewMode,
};
use serde::Serialize;

pub const TABLE_HEADERS: [&str; 4] = ["", "Baseline Policy", "Reform Policy", "Difference"];

pub const NO_DATA_MESSAGE: &str = "⚠️ No data available for selected policies.";
pub const INCOMPLETE_DATA_MESSAGE: &str = "⚠️ Data for the selected policies is incomplete.";

/// Shown in the difference column of text rows.
pub const NO_DIFFERENCE: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderModel {
    Table(TableModel),
    Warning { message: String },
}

impl RenderModel {
    pub fn warning(message: &str) -> Self {
        RenderModel::Warning {
            message: message.to_string(),
        }
    }

    pub fn as_table(&self) -> Option<&TableModel> {
        match self {
            RenderModel::Table(table) => Some(table),
            RenderModel::Warning { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableModel {
    pub view: ViewMode,
    pub headers: Vec<String>,
    pub rows: Vec<RenderedRow>,
    pub footnote: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub label: String,
    pub baseline: String,
    pub reform: String,
    pub difference: String,
}

impl TableModel {
    pub fn from_rows(view: ViewMode, rows: &[ComparisonRow]) -> Self {
        Self {
            view,
            headers: TABLE_HEADERS.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| RenderedRow {
                    label: row.label.to_string(),
                    baseline: format_cell(&row.baseline),
                    reform: format_cell(&row.reform),
                    difference: row
                        .difference
                        .map(|d| format!("{d:.1}"))
                        .unwrap_or_else(|| NO_DIFFERENCE.to_string()),
                })
                .collect(),
            footnote: view.footnote().map(str::to_string),
        }
    }
}

/// Numbers print with at most two decimals and no trailing zeros.
pub fn format_cell(value: &CellValue) -> String {
    match value {
        CellValue::Number(v) => {
            let rounded = (v * 100.0).round() / 100.0;
            if rounded == 0.0 {
                "0".to_string()
            } else {
                format!("{rounded}")
            }
        }
        CellValue::Text(s) => s.clone(),
    }
}
