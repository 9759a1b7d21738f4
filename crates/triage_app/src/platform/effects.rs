use std::sync::Arc;

use triage_core::{Effect, Msg};
use triage_engine::{ClientSettings, EngineEvent, EngineHandle, ReqwestClassifier};
use triage_logging::{triage_info, triage_warn};

pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Option<arboard::Clipboard>,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings) -> Self {
        let classifier = Arc::new(ReqwestClassifier::new(settings));
        Self {
            engine: EngineHandle::new(classifier),
            clipboard: None,
        }
    }

    /// Starts each effect. Effects that finish synchronously answer with
    /// messages right away; network results arrive through [`Self::poll`].
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut immediate = Vec::new();
        for effect in effects {
            match effect {
                Effect::Analyze(request) => {
                    triage_info!(
                        "Analyze fields={:?} file_bytes={:?} text_len={:?}",
                        request.field_names(),
                        request.email_file().map(|file| file.size()),
                        request.email_text().map(str::len)
                    );
                    self.engine.analyze(request);
                }
                Effect::CheckHealth => self.engine.check_health(),
                Effect::CopyToClipboard { text, clear_inputs } => {
                    let succeeded = self.copy(text);
                    immediate.push(Msg::CopyFinished {
                        succeeded,
                        clear_inputs,
                    });
                }
            }
        }
        immediate
    }

    /// Drains finished engine work as messages.
    pub fn poll(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(match event {
                EngineEvent::AnalyzeCompleted(result) => Msg::AnalyzeFinished(result),
                EngineEvent::HealthChecked(result) => Msg::HealthChecked(result),
            });
        }
        msgs
    }

    fn copy(&mut self, text: String) -> bool {
        // Kept alive: on X11 the contents vanish when the clipboard is dropped.
        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(err) => {
                    triage_warn!("Clipboard unavailable: {err}");
                    return false;
                }
            }
        }
        let Some(clipboard) = self.clipboard.as_mut() else {
            return false;
        };
        match clipboard.set_text(text) {
            Ok(()) => true,
            Err(err) => {
                triage_warn!("Clipboard write failed: {err}");
                false
            }
        }
    }
}
