use crate::config::toml_config::AnalysisConfig;
use crate::domain::model::DominantHand;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "reboot-analysis")]
#[command(about = "Submit requested analyses (custom reports) to the Reboot Motion API")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build primary and comparison segments from a CSV and request an analysis
    Submit(SubmitArgs),
    /// List movement type ids accepted by the API
    MovementTypes(ApiArgs),
    /// List mocap type ids accepted by the API
    MocapTypes(ApiArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ApiArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Reboot Motion API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub api: ApiArgs,

    /// CSV with play id and pitch type columns
    #[arg(long)]
    pub csv: Option<String>,

    /// Name shown for the requested analysis in the dashboard
    #[arg(long)]
    pub name: Option<String>,

    /// Pitch type forming the primary segment
    #[arg(long)]
    pub primary: Option<String>,

    /// Pitch type forming the comparison segment
    #[arg(long)]
    pub comparison: Option<String>,

    #[arg(long)]
    pub movement_type_id: Option<u32>,

    #[arg(long)]
    pub mocap_type_id: Option<u32>,

    /// RHA or LHA
    #[arg(long)]
    pub dom_hand: Option<DominantHand>,

    /// Directory to write requested_analysis.json into
    #[arg(long)]
    pub output_path: Option<String>,

    /// Show the requests that would be sent without sending them
    #[arg(long)]
    pub dry_run: bool,
}

impl ApiArgs {
    /// Loads the config file (or defaults) and applies flag overrides.
    pub fn resolve(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                AnalysisConfig::from_file(path)?
            }
            None => AnalysisConfig::default(),
        };

        if let Some(api_key) = &self.api_key {
            config.api.api_key = Some(api_key.clone());
        }
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        Ok(config)
    }
}

impl SubmitArgs {
    pub fn resolve(&self) -> Result<AnalysisConfig> {
        let mut config = self.api.resolve()?;

        if let Some(csv) = &self.csv {
            config.input.csv_path = Some(csv.clone());
        }
        if let Some(name) = &self.name {
            config.analysis.name = Some(name.clone());
        }
        if let Some(primary) = &self.primary {
            config.analysis.primary_pitch_type = primary.clone();
        }
        if let Some(comparison) = &self.comparison {
            config.analysis.comparison_pitch_type = comparison.clone();
        }
        if let Some(id) = self.movement_type_id {
            config.segment.movement_type_id = id;
        }
        if let Some(id) = self.mocap_type_id {
            config.segment.mocap_type_id = id;
        }
        if let Some(hand) = self.dom_hand {
            config.segment.dom_hand = hand;
        }
        if let Some(path) = &self.output_path {
            config.output.path = Some(path.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_submit_flags_parse() {
        let cli = Cli::parse_from([
            "reboot-analysis",
            "submit",
            "--csv",
            "pitches.csv",
            "--name",
            "Fastballs vs Sliders",
            "--comparison",
            "Slider",
            "--dom-hand",
            "lha",
            "--api-key",
            "k",
            "--dry-run",
        ]);

        let Command::Submit(args) = cli.command else {
            panic!("expected submit subcommand");
        };
        assert!(args.dry_run);

        let config = args.resolve().unwrap();
        assert_eq!(config.csv_path(), Some("pitches.csv"));
        assert_eq!(config.analysis_name(), "Fastballs vs Sliders");
        assert_eq!(config.primary_pitch_type(), "Fastball");
        assert_eq!(config.comparison_pitch_type(), "Slider");
        assert_eq!(config.segment_scope().dom_hand, DominantHand::Left);
        assert_eq!(config.api.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[api]
base_url = "https://file.example.com"

[segment]
mocap_type_id = 2

[analysis]
name = "from file"
"#,
            )
            .unwrap();

        let path = temp_file.path().to_str().unwrap().to_string();
        let cli = Cli::parse_from([
            "reboot-analysis",
            "submit",
            "--config",
            &path,
            "--base-url",
            "https://flag.example.com",
            "--name",
            "from flag",
        ]);

        let Command::Submit(args) = cli.command else {
            panic!("expected submit subcommand");
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.api.base_url, "https://flag.example.com");
        assert_eq!(config.analysis_name(), "from flag");
        assert_eq!(config.segment_scope().mocap_type_id, 2);
    }

    #[test]
    fn test_invalid_dom_hand_rejected() {
        let result = Cli::try_parse_from(["reboot-analysis", "submit", "--dom-hand", "XYZ"]);
        assert!(result.is_err());
    }
}
