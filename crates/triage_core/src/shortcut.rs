/// Platform family, for the submit shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    /// Tooltip text for the submit control.
    pub fn shortcut_hint(self) -> &'static str {
        match self {
            Platform::Mac => "Shortcut: ⌘ + Enter",
            Platform::Other => "Shortcut: Ctrl + Enter",
        }
    }

    /// Cmd+Enter on Mac, Ctrl+Enter elsewhere.
    pub fn is_submit_chord(self, chord: &KeyChord) -> bool {
        if chord.key != Key::Enter {
            return false;
        }
        match self {
            Platform::Mac => chord.meta,
            Platform::Other => chord.ctrl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn meta(key: Key) -> Self {
        Self {
            meta: true,
            ..Self::plain(key)
        }
    }
}
