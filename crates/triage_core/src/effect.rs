use crate::SubmissionRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the payload to the classifier; answer with `Msg::AnalyzeFinished`.
    Analyze(SubmissionRequest),
    /// Write `text` to the clipboard; answer with `Msg::CopyFinished`.
    CopyToClipboard { text: String, clear_inputs: bool },
    /// Probe the server; answer with `Msg::HealthChecked`.
    CheckHealth,
}
