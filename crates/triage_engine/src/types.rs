use triage_core::SubmitError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    AnalyzeCompleted(Result<serde_json::Value, SubmitError>),
    HealthChecked(Result<(), SubmitError>),
}
