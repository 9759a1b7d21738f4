use crate::{DropZoneState, ResultView};

pub const DEFAULT_SUBMIT_LABEL: &str = "Analyze";
pub const PROCESSING_LABEL: &str = "Processing…";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControlView {
    pub enabled: bool,
    pub label: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub text: String,
    pub file_name: Option<String>,
    pub drop_zone: DropZoneState,
    pub submit: SubmitControlView,
    pub busy: bool,
    pub notification: Option<String>,
    /// `None` until the first successful analysis.
    pub result: Option<ResultView>,
    /// Current contents of the editable reply field.
    pub reply: String,
    pub raw_visible: bool,
    pub dirty: bool,
}
