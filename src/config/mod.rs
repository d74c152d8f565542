#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{ApiArgs, Cli, Command, SubmitArgs};
pub use toml_config::AnalysisConfig;
