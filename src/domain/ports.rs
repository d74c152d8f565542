use crate::domain::model::{
    AnalysisPlan, AnalysisSegment, MovementRow, PlayerGroupSegmentCriteria,
    RequestedAnalysisRequest, SegmentScope, SubmissionOutcome, TypeEntry,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn analysis_name(&self) -> &str;
    fn primary_pitch_type(&self) -> &str;
    fn comparison_pitch_type(&self) -> &str;
    fn segment_scope(&self) -> SegmentScope;
    fn output_path(&self) -> Option<&str>;
}

/// Where the movements to analyse come from.
pub trait MovementSource: Send + Sync {
    fn read_movements(&self) -> Result<Vec<MovementRow>>;
}

/// The subset of the Reboot Motion API this tool talks to.
#[async_trait]
pub trait MotionApi: Send + Sync {
    async fn create_player_group_segment(
        &self,
        criteria: &PlayerGroupSegmentCriteria,
    ) -> Result<AnalysisSegment>;

    async fn create_requested_analysis(
        &self,
        request: &RequestedAnalysisRequest,
    ) -> Result<serde_json::Value>;

    async fn list_movement_types(&self) -> Result<Vec<TypeEntry>>;

    async fn list_mocap_types(&self) -> Result<Vec<TypeEntry>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<MovementRow>>;
    async fn transform(&self, rows: Vec<MovementRow>) -> Result<AnalysisPlan>;
    async fn load(&self, plan: AnalysisPlan) -> Result<SubmissionOutcome>;
}
