use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::form::TextEdit;

use super::keymap::KeymapStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Submit,
    Quit,
    ResetStatus,
    TogglePin,
    Activate,
    ClearField,
    FocusStep(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CommandDispatch {
    Action(KeyAction),
    Edit(TextEdit),
    None,
}

/// Turns raw key events into keymap actions or text edits.
pub(crate) struct InputRouter {
    store: Arc<KeymapStore>,
}

impl InputRouter {
    pub(crate) fn new(store: Arc<KeymapStore>) -> Self {
        Self { store }
    }

    pub(crate) fn dispatch(&self, key: &KeyEvent) -> CommandDispatch {
        if let Some(action) = self.store.classify(key) {
            return CommandDispatch::Action(action);
        }
        match key.code {
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                CommandDispatch::Edit(TextEdit::Insert(ch))
            }
            KeyCode::Backspace => CommandDispatch::Edit(TextEdit::Backspace),
            _ => CommandDispatch::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::keymap::default_store;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn characters_become_inserts() {
        let router = InputRouter::new(default_store());
        assert_eq!(
            router.dispatch(&key(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            CommandDispatch::Edit(TextEdit::Insert('J'))
        );
        assert_eq!(
            router.dispatch(&key(KeyCode::Backspace, KeyModifiers::NONE)),
            CommandDispatch::Edit(TextEdit::Backspace)
        );
    }

    #[test]
    fn delete_is_ignored_and_ctrl_u_clears() {
        let router = InputRouter::new(default_store());
        assert_eq!(
            router.dispatch(&key(KeyCode::Delete, KeyModifiers::NONE)),
            CommandDispatch::None
        );
        assert_eq!(
            router.dispatch(&key(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            CommandDispatch::Action(KeyAction::ClearField)
        );
    }

    #[test]
    fn unbound_control_chords_are_ignored() {
        let router = InputRouter::new(default_store());
        assert_eq!(
            router.dispatch(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            CommandDispatch::None
        );
        assert_eq!(
            router.dispatch(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            CommandDispatch::Action(KeyAction::Submit)
        );
    }
}
