use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use triage_core::{SubmissionRequest, SubmitError};
use triage_logging::triage_error;

use crate::{Classifier, EngineEvent};

enum EngineCommand {
    Analyze(SubmissionRequest),
    CheckHealth,
}

/// Runs classifier calls on a background tokio runtime.
///
/// Every command yields exactly one event, including when the task panics.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let classifier = classifier.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(classifier, command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn analyze(&self, request: SubmissionRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze(request));
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(classifier: Arc<dyn Classifier>, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Analyze(request) => {
            let task = tokio::spawn(async move { classifier.analyze(&request).await });
            EngineEvent::AnalyzeCompleted(task.await.unwrap_or_else(|err| {
                triage_error!("Analyze task aborted: {err}");
                Err(SubmitError::transport(""))
            }))
        }
        EngineCommand::CheckHealth => {
            let task = tokio::spawn(async move { classifier.health().await });
            EngineEvent::HealthChecked(task.await.unwrap_or_else(|err| {
                triage_error!("Health task aborted: {err}");
                Err(SubmitError::transport(""))
            }))
        }
    }
}
