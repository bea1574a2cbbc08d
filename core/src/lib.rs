//! Child Tax Credit reform dashboard: scenario lookup and baseline/reform
//! comparison over pre-computed estimate tables.

pub mod compare;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod html;
pub mod render;
pub mod resolver;
pub mod scenario;
pub mod selection;
pub mod types;
pub mod view;
