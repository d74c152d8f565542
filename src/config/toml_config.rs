use crate::core::ConfigProvider;
use crate::domain::model::{
    DominantHand, SegmentScope, BASEBALL_PITCHING_MOVEMENT_TYPE_ID, HAWKEYE_HFR_MOCAP_TYPE_ID,
};
use crate::utils::error::{RebootError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.rebootmotion.com";
pub const DEFAULT_PLAY_ID_COLUMN: &str = "MLBPlayId";
pub const DEFAULT_PITCH_TYPE_COLUMN: &str = "PitchType";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub segment: SegmentConfig,
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

// Keeps the key out of logs.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry_attempts", &self.retry_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub csv_path: Option<String>,
    #[serde(default = "default_play_id_column")]
    pub play_id_column: String,
    #[serde(default = "default_pitch_type_column")]
    pub pitch_type_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            csv_path: None,
            play_id_column: default_play_id_column(),
            pitch_type_column: default_pitch_type_column(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentConfig {
    #[serde(default = "default_movement_type_id")]
    pub movement_type_id: u32,
    #[serde(default = "default_mocap_type_id")]
    pub mocap_type_id: u32,
    #[serde(default)]
    pub dom_hand: DominantHand,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            movement_type_id: default_movement_type_id(),
            mocap_type_id: default_mocap_type_id(),
            dom_hand: DominantHand::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub name: Option<String>,
    #[serde(default = "default_primary_pitch_type")]
    pub primary_pitch_type: String,
    #[serde(default = "default_comparison_pitch_type")]
    pub comparison_pitch_type: String,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            name: None,
            primary_pitch_type: default_primary_pitch_type(),
            comparison_pitch_type: default_comparison_pitch_type(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_play_id_column() -> String {
    DEFAULT_PLAY_ID_COLUMN.to_string()
}

fn default_pitch_type_column() -> String {
    DEFAULT_PITCH_TYPE_COLUMN.to_string()
}

fn default_movement_type_id() -> u32 {
    BASEBALL_PITCHING_MOVEMENT_TYPE_ID
}

fn default_mocap_type_id() -> u32 {
    HAWKEYE_HFR_MOCAP_TYPE_ID
}

fn default_primary_pitch_type() -> String {
    "Fastball".to_string()
}

fn default_comparison_pitch_type() -> String {
    "Curveball".to_string()
}

impl AnalysisConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string, substituting `${VAR}` references
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RebootError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    // Unset variables are left as-is so validation can name them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RebootError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Checks needed before any API call.
    pub fn validate_api(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;

        let api_key = validation::validate_required_field("api.api_key", &self.api.api_key)?;
        validation::validate_non_empty_string("api.api_key", api_key)?;
        validation::validate_resolved("api.api_key", api_key)?;

        validation::validate_positive_number("api.timeout_seconds", self.api.timeout_seconds, 1)?;
        validation::validate_range("api.retry_attempts", self.api.retry_attempts, 0, 10)?;
        Ok(())
    }

    /// Checks needed to plan a submission, without touching the API.
    pub fn validate_plan(&self) -> Result<()> {
        let csv_path = validation::validate_required_field("input.csv_path", &self.input.csv_path)?;
        validation::validate_input_file("input.csv_path", csv_path)?;
        validation::validate_non_empty_string("input.play_id_column", &self.input.play_id_column)?;
        validation::validate_non_empty_string(
            "input.pitch_type_column",
            &self.input.pitch_type_column,
        )?;

        let name = validation::validate_required_field("analysis.name", &self.analysis.name)?;
        validation::validate_non_empty_string("analysis.name", name)?;
        validation::validate_non_empty_string(
            "analysis.primary_pitch_type",
            &self.analysis.primary_pitch_type,
        )?;
        validation::validate_non_empty_string(
            "analysis.comparison_pitch_type",
            &self.analysis.comparison_pitch_type,
        )?;
        validation::validate_distinct_pitch_types(
            "analysis.comparison_pitch_type",
            &self.analysis.primary_pitch_type,
            &self.analysis.comparison_pitch_type,
        )?;

        if let Some(path) = &self.output.path {
            validation::validate_output_dir("output.path", path)?;
        }
        Ok(())
    }

    pub fn csv_path(&self) -> Option<&str> {
        self.input.csv_path.as_deref()
    }
}

impl ConfigProvider for AnalysisConfig {
    fn analysis_name(&self) -> &str {
        self.analysis.name.as_deref().unwrap_or_default()
    }

    fn primary_pitch_type(&self) -> &str {
        &self.analysis.primary_pitch_type
    }

    fn comparison_pitch_type(&self) -> &str {
        &self.analysis.comparison_pitch_type
    }

    fn segment_scope(&self) -> SegmentScope {
        SegmentScope {
            movement_type_id: self.segment.movement_type_id,
            mocap_type_id: self.segment.mocap_type_id,
            dom_hand: self.segment.dom_hand,
        }
    }

    fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Result<()> {
        self.validate_api()?;
        self.validate_plan()
    }
}
