//! Editor-local keyboard surface: a platform-neutral key event and its
//! mapping onto editor shortcuts. All shortcuts are suppressed while a
//! text input owns focus, since typing must never trigger editor actions.

/// The keys the editor reacts to. Everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
    Escape,
}

/// A platform-neutral key event as delivered by the host UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Control held (Windows/Linux primary modifier).
    pub ctrl: bool,
    /// Command held (macOS primary modifier).
    pub meta: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    /// Ctrl on Windows/Linux, Cmd on macOS.
    fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Editor actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Save,
    Undo,
    Redo,
    DeleteSelection,
    ClosePanel,
    ToggleHelp,
}

/// Maps a key event to an editor shortcut.
///
/// Redo answers to both Ctrl/Cmd+Shift+Z and Ctrl/Cmd+Y. Returns `None`
/// for unrecognized chords and whenever a text input has focus.
pub fn shortcut_for(event: &KeyEvent, text_input_focused: bool) -> Option<Shortcut> {
    if text_input_focused {
        return None;
    }
    match event.key {
        Key::Char('s' | 'S') if event.primary() => Some(Shortcut::Save),
        Key::Char('z' | 'Z') if event.primary() && event.shift => Some(Shortcut::Redo),
        Key::Char('z' | 'Z') if event.primary() => Some(Shortcut::Undo),
        Key::Char('y' | 'Y') if event.primary() => Some(Shortcut::Redo),
        Key::Delete | Key::Backspace if !event.primary() => Some(Shortcut::DeleteSelection),
        Key::Escape => Some(Shortcut::ClosePanel),
        Key::Char('?') if !event.primary() => Some(Shortcut::ToggleHelp),
        _ => None,
    }
}
