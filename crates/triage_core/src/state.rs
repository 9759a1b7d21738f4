use std::time::Duration;

use crate::view_model::{AppViewModel, SubmitControlView, DEFAULT_SUBMIT_LABEL, PROCESSING_LABEL};
use crate::{
    DropTarget, FileHandle, InputSource, NotificationSlot, Platform, ResultView, ValidationError,
    DEFAULT_PRODUCTIVE_LABEL,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiSettings {
    /// Category rendered with the positive badge style.
    pub productive_label: String,
    pub platform: Platform,
    pub submit_label: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            productive_label: DEFAULT_PRODUCTIVE_LABEL.to_string(),
            platform: Platform::current(),
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
        }
    }
}

/// Everything one page session knows. Owned by the caller of `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    settings: UiSettings,
    input: InputSource,
    drop_target: DropTarget,
    busy: bool,
    notifications: NotificationSlot,
    now: Duration,
    result: Option<ResultView>,
    reply: String,
    raw_visible: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(UiSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: UiSettings) -> Self {
        Self {
            settings,
            input: InputSource::new(),
            drop_target: DropTarget::default(),
            busy: false,
            notifications: NotificationSlot::default(),
            now: Duration::ZERO,
            result: None,
            reply: String::new(),
            raw_visible: false,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let submit_label = if self.busy {
            PROCESSING_LABEL.to_string()
        } else {
            self.settings.submit_label.clone()
        };
        AppViewModel {
            text: self.input.text().to_string(),
            file_name: self.input.file().map(|file| file.name().to_string()),
            drop_zone: self.drop_target.state(&self.input),
            submit: SubmitControlView {
                enabled: !self.busy,
                label: submit_label,
                tooltip: self.settings.platform.shortcut_hint().to_string(),
            },
            busy: self.busy,
            notification: self.notifications.visible(self.now).map(ToOwned::to_owned),
            result: self.result.clone(),
            reply: self.reply.clone(),
            raw_visible: self.raw_visible,
            dirty: self.dirty,
        }
    }

    pub fn input(&self) -> &InputSource {
        &self.input
    }

    pub fn settings(&self) -> &UiSettings {
        &self.settings
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    pub fn notifications(&self) -> &NotificationSlot {
        &self.notifications
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>) {
        self.notifications.notify(message, self.now);
        self.mark_dirty();
    }

    pub(crate) fn set_text(&mut self, text: String) {
        if self.input.text() != text {
            self.input.set_text(text);
            self.mark_dirty();
        }
    }

    pub(crate) fn select_file(&mut self, candidate: FileHandle) -> Result<String, ValidationError> {
        let name = self.input.set_file(candidate)?.name().to_string();
        self.mark_dirty();
        Ok(name)
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
        self.drop_target.drag_ended();
        self.mark_dirty();
    }

    pub(crate) fn drag_entered(&mut self) {
        if !self.drop_target.is_hovering() {
            self.drop_target.drag_entered();
            self.mark_dirty();
        }
    }

    pub(crate) fn drag_ended(&mut self) {
        if self.drop_target.is_hovering() {
            self.drop_target.drag_ended();
            self.mark_dirty();
        }
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.mark_dirty();
    }

    pub(crate) fn show_result(&mut self, view: ResultView) {
        self.reply = view.reply.clone();
        self.result = Some(view);
        self.mark_dirty();
    }

    pub(crate) fn set_reply(&mut self, reply: String) {
        if self.reply != reply {
            self.reply = reply;
            self.mark_dirty();
        }
    }

    pub(crate) fn toggle_raw(&mut self) {
        self.raw_visible = !self.raw_visible;
        self.mark_dirty();
    }

    pub(crate) fn advance_clock(&mut self, now: Duration) {
        self.now = self.now.max(now);
        if self.notifications.expire(self.now) {
            self.mark_dirty();
        }
    }
}
