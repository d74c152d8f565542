pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{AnalysisPlan, MovementRow, SubmissionOutcome};
pub use crate::domain::ports::{ConfigProvider, MotionApi, MovementSource, Pipeline, Storage};
pub use crate::utils::error::Result;
