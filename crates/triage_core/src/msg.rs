use std::time::Duration;

use crate::{FileHandle, KeyChord, SubmitError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the email text box.
    TextChanged(String),
    /// User chose a file with the file picker.
    FilePicked(FileHandle),
    /// A file could not be read from its source.
    FileLoadFailed(String),
    /// A drag entered or moved over the drop zone.
    DragEntered,
    /// A drag left the drop zone without dropping.
    DragLeft,
    /// Files were dropped on the drop zone. Only the first is used.
    FilesDropped(Vec<FileHandle>),
    /// User clicked the drop zone's remove control.
    RemoveFileClicked,
    /// User clicked the analyze control.
    SubmitClicked,
    /// Key press inside the text box.
    KeyPressed(KeyChord),
    /// The remote analyze call finished.
    AnalyzeFinished(Result<serde_json::Value, SubmitError>),
    /// User edited the generated reply.
    ReplyEdited(String),
    /// User clicked "copy reply".
    CopyReplyClicked,
    /// User clicked "copy reply and clear".
    CopyAndClearClicked,
    /// Clipboard write finished.
    CopyFinished { succeeded: bool, clear_inputs: bool },
    /// User toggled the raw response panel.
    ToggleRawClicked,
    /// User asked whether the server is reachable.
    HealthCheckClicked,
    /// Health probe finished.
    HealthChecked(Result<(), SubmitError>),
    /// Clock update, as elapsed time since session start.
    Tick { now: Duration },
}
