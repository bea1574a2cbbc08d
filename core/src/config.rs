use crate::error::DashResult;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

/// Where the datasets live and where the server listens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: String,
    pub budget_file: String,
    pub poverty_file: String,
    pub dist_file: String,
    pub params_file: String,
    pub host: String,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.into(),
            budget_file: "budget_estimates.csv".into(),
            poverty_file: "poverty_estimates.csv".into(),
            dist_file: "dist_estimates.csv".into(),
            params_file: "params_data.csv".into(),
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file. Keys left out keep their defaults.
    pub fn load(path: &str) -> DashResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: DashboardConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Config pointing at the fixture CSVs under `core/tests/fixtures`.
    /// In production, use `DashboardConfig::load()` or `default()`.
    pub fn default_test() -> Self {
        Self {
            data_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures").into(),
            ..Self::default()
        }
    }

    /// Same file names, different directory.
    pub fn with_data_dir(self, data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..self
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
