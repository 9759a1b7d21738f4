use triage_logging::triage_debug;

use crate::{
    render_result, AnalysisResult, AppState, Effect, FileHandle, Msg, SubmissionRequest,
    SubmitError,
};

/// Where a file candidate came from; only changes the confirmation text.
#[derive(Debug, Clone, Copy)]
enum FileOrigin {
    Picker,
    Drop,
}

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextChanged(text) => {
            state.set_text(text);
            Vec::new()
        }
        Msg::FilePicked(candidate) => {
            select_file(&mut state, candidate, FileOrigin::Picker);
            Vec::new()
        }
        Msg::FileLoadFailed(reason) => {
            state.notify(format!("Could not read file: {reason}"));
            Vec::new()
        }
        Msg::DragEntered => {
            state.drag_entered();
            Vec::new()
        }
        Msg::DragLeft => {
            state.drag_ended();
            Vec::new()
        }
        Msg::FilesDropped(files) => {
            state.drag_ended();
            if let Some(first) = files.into_iter().next() {
                select_file(&mut state, first, FileOrigin::Drop);
            }
            Vec::new()
        }
        Msg::RemoveFileClicked => {
            state.clear_input();
            Vec::new()
        }
        Msg::SubmitClicked => begin_submission(&mut state),
        Msg::KeyPressed(chord) => {
            if state.settings().platform.is_submit_chord(&chord) {
                begin_submission(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::AnalyzeFinished(outcome) => {
            finish_submission(&mut state, outcome);
            Vec::new()
        }
        Msg::ReplyEdited(reply) => {
            state.set_reply(reply);
            Vec::new()
        }
        Msg::CopyReplyClicked => vec![Effect::CopyToClipboard {
            text: state.reply().to_string(),
            clear_inputs: false,
        }],
        Msg::CopyAndClearClicked => vec![Effect::CopyToClipboard {
            text: state.reply().to_string(),
            clear_inputs: true,
        }],
        Msg::CopyFinished {
            succeeded,
            clear_inputs,
        } => {
            if succeeded {
                state.notify("Reply copied!");
                if clear_inputs {
                    state.clear_input();
                }
            } else {
                state.notify("Could not copy the reply.");
            }
            Vec::new()
        }
        Msg::ToggleRawClicked => {
            state.toggle_raw();
            Vec::new()
        }
        Msg::HealthCheckClicked => vec![Effect::CheckHealth],
        Msg::HealthChecked(outcome) => {
            match outcome {
                Ok(()) => state.notify("Server is reachable."),
                Err(err) => state.notify(format!("Server unreachable: {err}")),
            }
            Vec::new()
        }
        Msg::Tick { now } => {
            state.advance_clock(now);
            Vec::new()
        }
    };

    (state, effects)
}

fn select_file(state: &mut AppState, candidate: FileHandle, origin: FileOrigin) {
    match state.select_file(candidate) {
        Ok(name) => {
            let message = match origin {
                FileOrigin::Picker => format!("File selected: {name}"),
                FileOrigin::Drop => format!("File dropped: {name}"),
            };
            state.notify(message);
        }
        Err(err) => {
            triage_debug!("File candidate rejected ({origin:?}): {err:?}");
            state.notify(err.to_string());
        }
    }
}

fn begin_submission(state: &mut AppState) -> Vec<Effect> {
    // The control is disabled while a request is in flight.
    if state.is_busy() {
        return Vec::new();
    }
    match SubmissionRequest::from_input(state.input()) {
        Ok(request) => {
            triage_debug!("Submitting analysis fields={:?}", request.field_names());
            state.set_busy(true);
            vec![Effect::Analyze(request)]
        }
        Err(err) => {
            state.notify(err.to_string());
            Vec::new()
        }
    }
}

fn finish_submission(state: &mut AppState, outcome: Result<serde_json::Value, SubmitError>) {
    if !state.is_busy() {
        triage_debug!("Ignoring analysis result with no submission in flight");
        return;
    }
    match outcome {
        Ok(body) => {
            let result = AnalysisResult::from_value(body);
            let view = render_result(&result, &state.settings().productive_label);
            state.show_result(view);
            state.clear_input();
        }
        Err(err) => {
            state.notify(err.to_string());
        }
    }
    state.set_busy(false);
}
