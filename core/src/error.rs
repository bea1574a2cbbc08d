use crate::types::Side;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("No data in {dataset} for scenario {scenario}")]
    NoMatchingData {
        dataset: &'static str,
        scenario: String,
    },

    #[error("Unknown {selector} value '{value}'")]
    UnknownScenario {
        selector: &'static str,
        value: String,
    },

    #[error("Field '{field}' missing from {side} values")]
    MissingField { field: &'static str, side: Side },

    #[error("Cannot load {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl DashError {
    /// True for errors that mean "this selection has nothing to show",
    /// as opposed to malformed data.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            DashError::NoMatchingData { .. } | DashError::UnknownScenario { .. }
        )
    }
}

pub type DashResult<T> = Result<T, DashError>;
