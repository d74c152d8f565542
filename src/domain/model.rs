use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single movement listed in the input CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRow {
    /// Third-party id of the movement (an MLB Play ID in the pitching workflow).
    pub external_context_id: String,
    pub pitch_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum DominantHand {
    #[default]
    #[serde(rename = "RHA")]
    Right,
    #[serde(rename = "LHA")]
    Left,
}

impl DominantHand {
    pub fn as_str(&self) -> &'static str {
        match self {
            DominantHand::Right => "RHA",
            DominantHand::Left => "LHA",
        }
    }
}

impl TryFrom<String> for DominantHand {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DominantHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DominantHand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RHA" => Ok(DominantHand::Right),
            "LHA" => Ok(DominantHand::Left),
            other => Err(format!("unknown dominant hand '{}', expected RHA or LHA", other)),
        }
    }
}

pub const BASEBALL_PITCHING_MOVEMENT_TYPE_ID: u32 = 2;
pub const HAWKEYE_HFR_MOCAP_TYPE_ID: u32 = 104;

/// Movement type, mocap type and handedness. Both segments of an analysis
/// are built from the same scope since the API cannot compare across types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentScope {
    pub movement_type_id: u32,
    pub mocap_type_id: u32,
    pub dom_hand: DominantHand,
}

impl Default for SegmentScope {
    fn default() -> Self {
        Self {
            movement_type_id: BASEBALL_PITCHING_MOVEMENT_TYPE_ID,
            mocap_type_id: HAWKEYE_HFR_MOCAP_TYPE_ID,
            dom_hand: DominantHand::Right,
        }
    }
}

impl SegmentScope {
    pub fn criteria(&self, external_context_ids: Vec<String>) -> PlayerGroupSegmentCriteria {
        PlayerGroupSegmentCriteria {
            external_context_ids,
            movement_type_id: self.movement_type_id,
            mocap_type_id: self.mocap_type_id,
            dom_hand: self.dom_hand,
        }
    }
}

/// Body of `POST /player_group_segments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGroupSegmentCriteria {
    pub external_context_ids: Vec<String>,
    pub movement_type_id: u32,
    pub mocap_type_id: u32,
    pub dom_hand: DominantHand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSegment {
    #[serde(deserialize_with = "lenient_id")]
    pub analysis_segment_id: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    #[default]
    Requested,
}

/// Body of `POST /requested_analyses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestedAnalysisRequest {
    pub name: String,
    pub primary_analysis_segment_id: i64,
    pub comparison_analysis_segment_id: i64,
    pub status: AnalysisStatus,
}

impl RequestedAnalysisRequest {
    pub fn new(name: impl Into<String>, primary: i64, comparison: i64) -> Self {
        Self {
            name: name.into(),
            primary_analysis_segment_id: primary,
            comparison_analysis_segment_id: comparison,
            status: AnalysisStatus::Requested,
        }
    }
}

/// Criteria for both segments plus the analysis name, ready to submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisPlan {
    pub name: String,
    pub primary: PlayerGroupSegmentCriteria,
    pub comparison: PlayerGroupSegmentCriteria,
}

/// Everything the API handed back for one submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub name: String,
    pub primary_analysis_segment_id: i64,
    pub comparison_analysis_segment_id: i64,
    pub requested_analysis: serde_json::Value,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl SubmissionOutcome {
    pub fn requested_analysis_id(&self) -> Option<&serde_json::Value> {
        self.requested_analysis.get("id")
    }
}

/// An entry from `/movement_types` or `/mocap_types`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeEntry {
    #[serde(default, deserialize_with = "lenient_optional_id")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TypeEntry {
    pub fn label(&self) -> &str {
        self.slug
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("<unnamed>")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i64),
    Text(String),
}

impl IdRepr {
    fn into_i64<E: serde::de::Error>(self) -> std::result::Result<i64, E> {
        match self {
            IdRepr::Number(n) => Ok(n),
            IdRepr::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("id '{}' is not an integer", s))),
        }
    }
}

// The API may render ids as numbers or numeric strings.
fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    IdRepr::deserialize(deserializer)?.into_i64()
}

fn lenient_optional_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IdRepr>::deserialize(deserializer)?
        .map(IdRepr::into_i64)
        .transpose()
}
