use crate::adapters::csv_source::partition;
use crate::core::{ConfigProvider, MotionApi, MovementSource, Pipeline};
use crate::domain::model::{AnalysisPlan, MovementRow, RequestedAnalysisRequest, SubmissionOutcome};
use crate::utils::error::{RebootError, Result};

/// Splits movements into the two segments and names the analysis. Needs no API access,
/// so a dry run can call it directly.
pub fn build_plan<C: ConfigProvider>(config: &C, rows: &[MovementRow]) -> Result<AnalysisPlan> {
    let primary_type = config.primary_pitch_type();
    let comparison_type = config.comparison_pitch_type();
    let (primary_ids, comparison_ids) = partition(rows, primary_type, comparison_type);

    tracing::debug!(
        "{} '{}' movements, {} '{}' movements, {} ignored",
        primary_ids.len(),
        primary_type,
        comparison_ids.len(),
        comparison_type,
        rows.len() - primary_ids.len() - comparison_ids.len()
    );

    for (label, pitch_type, ids) in [
        ("primary", primary_type, &primary_ids),
        ("comparison", comparison_type, &comparison_ids),
    ] {
        if ids.is_empty() {
            return Err(RebootError::ValidationError {
                message: format!(
                    "{} segment is empty: no rows with pitch type '{}'",
                    label, pitch_type
                ),
            });
        }
    }

    let scope = config.segment_scope();
    Ok(AnalysisPlan {
        name: config.analysis_name().to_string(),
        primary: scope.criteria(primary_ids),
        comparison: scope.criteria(comparison_ids),
    })
}

/// Reads movements, splits them into two segments and requests a comparison report.
pub struct AnalysisPipeline<M: MovementSource, A: MotionApi, C: ConfigProvider> {
    source: M,
    api: A,
    config: C,
}

impl<M: MovementSource, A: MotionApi, C: ConfigProvider> AnalysisPipeline<M, A, C> {
    pub fn new(source: M, api: A, config: C) -> Self {
        Self {
            source,
            api,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<M: MovementSource, A: MotionApi, C: ConfigProvider> Pipeline for AnalysisPipeline<M, A, C> {
    async fn extract(&self) -> Result<Vec<MovementRow>> {
        self.source.read_movements()
    }

    async fn transform(&self, rows: Vec<MovementRow>) -> Result<AnalysisPlan> {
        build_plan(&self.config, &rows)
    }

    async fn load(&self, plan: AnalysisPlan) -> Result<SubmissionOutcome> {
        let primary = self.api.create_player_group_segment(&plan.primary).await?;
        tracing::info!(
            "🧩 Created primary segment {} ({} movements)",
            primary.analysis_segment_id,
            plan.primary.external_context_ids.len()
        );

        let comparison = self.api.create_player_group_segment(&plan.comparison).await?;
        tracing::info!(
            "🧩 Created comparison segment {} ({} movements)",
            comparison.analysis_segment_id,
            plan.comparison.external_context_ids.len()
        );

        let request = RequestedAnalysisRequest::new(
            plan.name.clone(),
            primary.analysis_segment_id,
            comparison.analysis_segment_id,
        );
        let requested_analysis = self.api.create_requested_analysis(&request).await?;

        Ok(SubmissionOutcome {
            name: plan.name,
            primary_analysis_segment_id: primary.analysis_segment_id,
            comparison_analysis_segment_id: comparison.analysis_segment_id,
            requested_analysis,
            submitted_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::domain::model::{AnalysisSegment, PlayerGroupSegmentCriteria, TypeEntry};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct StaticSource(Vec<MovementRow>);

    impl MovementSource for StaticSource {
        fn read_movements(&self) -> Result<Vec<MovementRow>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingApi {
        segments: Mutex<Vec<PlayerGroupSegmentCriteria>>,
        analyses: Mutex<Vec<RequestedAnalysisRequest>>,
    }

    #[async_trait]
    impl MotionApi for RecordingApi {
        async fn create_player_group_segment(
            &self,
            criteria: &PlayerGroupSegmentCriteria,
        ) -> Result<AnalysisSegment> {
            let mut segments = self.segments.lock().unwrap();
            segments.push(criteria.clone());
            Ok(AnalysisSegment {
                analysis_segment_id: 100 + segments.len() as i64,
                extra: Default::default(),
            })
        }

        async fn create_requested_analysis(
            &self,
            request: &RequestedAnalysisRequest,
        ) -> Result<serde_json::Value> {
            self.analyses.lock().unwrap().push(request.clone());
            Ok(json!({"id": 7, "status": "requested"}))
        }

        async fn list_movement_types(&self) -> Result<Vec<TypeEntry>> {
            Ok(vec![])
        }

        async fn list_mocap_types(&self) -> Result<Vec<TypeEntry>> {
            Ok(vec![])
        }
    }

    fn row(id: &str, pitch: &str) -> MovementRow {
        MovementRow {
            external_context_id: id.to_string(),
            pitch_type: pitch.to_string(),
        }
    }

    fn config() -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        config.analysis.name = Some("Fastballs vs Curveballs".to_string());
        config
    }

    #[tokio::test]
    async fn test_transform_builds_both_segments_with_shared_scope() {
        let source = StaticSource(vec![
            row("a", "Fastball"),
            row("b", "Curveball"),
            row("c", "Changeup"),
            row("d", "Fastball"),
        ]);
        let pipeline = AnalysisPipeline::new(source, RecordingApi::default(), config());

        let rows = pipeline.extract().await.unwrap();
        let plan = pipeline.transform(rows).await.unwrap();

        assert_eq!(plan.primary.external_context_ids, vec!["a", "d"]);
        assert_eq!(plan.comparison.external_context_ids, vec!["b"]);
        assert_eq!(plan.primary.movement_type_id, plan.comparison.movement_type_id);
        assert_eq!(plan.primary.mocap_type_id, plan.comparison.mocap_type_id);
        assert_eq!(plan.primary.dom_hand, plan.comparison.dom_hand);
    }

    #[test]
    fn test_build_plan_without_api() {
        let mut config = config();
        config.segment.dom_hand = crate::domain::model::DominantHand::Left;
        let rows = vec![row("a", "Fastball"), row("b", "Curveball")];

        let plan = build_plan(&config, &rows).unwrap();

        assert_eq!(plan.name, "Fastballs vs Curveballs");
        assert_eq!(plan.primary.dom_hand, crate::domain::model::DominantHand::Left);
        assert_eq!(plan.comparison.external_context_ids, vec!["b"]);
    }

    #[tokio::test]
    async fn test_empty_comparison_segment_is_rejected() {
        let source = StaticSource(vec![row("a", "Fastball")]);
        let api = RecordingApi::default();
        let pipeline = AnalysisPipeline::new(source, api, config());

        let rows = pipeline.extract().await.unwrap();
        let err = pipeline.transform(rows).await.unwrap_err();

        assert!(matches!(err, RebootError::ValidationError { .. }));
        assert!(err.to_string().contains("Curveball"));
    }

    #[tokio::test]
    async fn test_load_chains_segment_ids_into_analysis() {
        let source = StaticSource(vec![row("a", "Fastball"), row("b", "Curveball")]);
        let pipeline = AnalysisPipeline::new(source, RecordingApi::default(), config());

        let rows = pipeline.extract().await.unwrap();
        let plan = pipeline.transform(rows).await.unwrap();
        let outcome = pipeline.load(plan).await.unwrap();

        assert_eq!(outcome.primary_analysis_segment_id, 101);
        assert_eq!(outcome.comparison_analysis_segment_id, 102);
        assert_eq!(outcome.requested_analysis_id(), Some(&json!(7)));

        let analyses = pipeline.api.analyses.lock().unwrap();
        assert_eq!(
            analyses[0],
            RequestedAnalysisRequest::new("Fastballs vs Curveballs", 101, 102)
        );
        let segments = pipeline.api.segments.lock().unwrap();
        assert_eq!(segments[0].external_context_ids, vec!["a"]);
        assert_eq!(segments[1].external_context_ids, vec!["b"]);
    }
}
