use crate::core::{Pipeline, Storage};
use crate::domain::model::{AnalysisPlan, SubmissionOutcome};
use crate::utils::error::Result;

pub const OUTCOME_FILENAME: &str = "requested_analysis.json";

pub struct AnalysisEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> AnalysisEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract and transform only; nothing is sent to the API.
    pub async fn plan(&self) -> Result<AnalysisPlan> {
        tracing::info!("📥 Reading movements...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Read {} movements", rows.len());

        tracing::info!("🔧 Building segment criteria...");
        let plan = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Primary segment: {} movements, comparison segment: {} movements",
            plan.primary.external_context_ids.len(),
            plan.comparison.external_context_ids.len()
        );
        Ok(plan)
    }

    pub async fn run(&self) -> Result<SubmissionOutcome> {
        let plan = self.plan().await?;

        tracing::info!("📤 Submitting requested analysis '{}'...", plan.name);
        let outcome = self.pipeline.load(plan).await?;
        match outcome.requested_analysis_id() {
            Some(id) => tracing::info!("✅ Requested analysis created with id {}", id),
            None => tracing::info!("✅ Requested analysis submitted"),
        }
        Ok(outcome)
    }
}

/// Writes the outcome as pretty JSON and returns the file name it was stored under.
pub async fn save_outcome<S: Storage>(storage: &S, outcome: &SubmissionOutcome) -> Result<String> {
    let json = serde_json::to_string_pretty(outcome)?;
    tracing::debug!("Writing outcome ({} bytes) to storage", json.len());
    storage.write_file(OUTCOME_FILENAME, json.as_bytes()).await?;
    Ok(OUTCOME_FILENAME.to_string())
}
