pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{CsvMovementSource, LocalStorage, RebootClient};
pub use crate::config::AnalysisConfig;
pub use crate::core::{engine::AnalysisEngine, pipeline::AnalysisPipeline};
pub use crate::utils::error::{RebootError, Result};
