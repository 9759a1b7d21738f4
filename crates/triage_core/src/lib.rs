//! Triage core: pure client state machine and view-model helpers.
mod drop_target;
mod effect;
mod error;
mod input;
mod msg;
mod notification;
mod render;
mod result;
mod shortcut;
mod state;
mod submission;
mod update;
mod view_model;

pub use drop_target::{DropTarget, DropZoneState};
pub use effect::Effect;
pub use error::{
    SubmitError, ValidationError, GENERIC_REQUEST_FAILURE, GENERIC_TRANSPORT_FAILURE,
    PROTOCOL_FAILURE,
};
pub use input::{validate_candidate, FileHandle, FileKind, InputSource, MAX_FILE_BYTES};
pub use msg::Msg;
pub use notification::{Notification, NotificationSlot, NOTIFICATION_TTL};
pub use render::{
    confidence_percent, override_label, render_result, BadgeStyle, BadgeView, ConfidenceView,
    ResultView, DEFAULT_PRODUCTIVE_LABEL, PLACEHOLDER,
};
pub use result::{AnalysisMeta, AnalysisResult};
pub use shortcut::{Key, KeyChord, Platform};
pub use state::{AppState, UiSettings};
pub use submission::{SubmissionRequest, ANALYZE_PATH, FIELD_EMAIL_FILE, FIELD_EMAIL_TEXT};
pub use update::update;
pub use view_model::{AppViewModel, SubmitControlView, DEFAULT_SUBMIT_LABEL, PROCESSING_LABEL};
