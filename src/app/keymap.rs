use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use super::input::KeyAction;

macro_rules! keymap_source {
    () => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/keymap/default.keymap.json"
        ))
    };
}

/// What currently has focus, as far as help text is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeymapContext {
    Field,
    Pin,
    Button,
}

impl KeymapContext {
    fn from_str(raw: &str) -> Option<Self> {
        match raw {
            "field" => Some(KeymapContext::Field),
            "pin" => Some(KeymapContext::Pin),
            "button" => Some(KeymapContext::Button),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    id: String,
    description: String,
    contexts: Vec<String>,
    action: RawAction,
    combos: Vec<String>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum RawAction {
    Submit,
    Quit,
    ResetStatus,
    TogglePin,
    Activate,
    ClearField,
    FocusStep { delta: i32 },
}

impl RawAction {
    fn into_action(self) -> KeyAction {
        match self {
            RawAction::Submit => KeyAction::Submit,
            RawAction::Quit => KeyAction::Quit,
            RawAction::ResetStatus => KeyAction::ResetStatus,
            RawAction::TogglePin => KeyAction::TogglePin,
            RawAction::Activate => KeyAction::Activate,
            RawAction::ClearField => KeyAction::ClearField,
            RawAction::FocusStep { delta } => KeyAction::FocusStep(delta),
        }
    }
}

struct KeyBinding {
    action: KeyAction,
    contexts: Vec<KeymapContext>,
    combos: Vec<KeyPattern>,
    snippet: String,
}

impl KeyBinding {
    fn from_raw(raw: RawEntry) -> Result<Self> {
        let contexts = raw
            .contexts
            .iter()
            .filter_map(|ctx| KeymapContext::from_str(ctx))
            .collect::<Vec<_>>();
        if contexts.is_empty() {
            bail!("keymap entry {} must declare at least one context", raw.id);
        }
        let combos = raw
            .combos
            .iter()
            .map(|combo| {
                KeyPattern::parse(combo)
                    .map_err(|err| anyhow::anyhow!("combo '{combo}' for {}: {err}", raw.id))
            })
            .collect::<Result<Vec<_>>>()?;
        if combos.is_empty() {
            bail!("keymap entry {} must declare combos", raw.id);
        }
        let combos_display = combos
            .iter()
            .map(|pattern| pattern.display.as_str())
            .collect::<Vec<_>>()
            .join("/");
        Ok(Self {
            action: raw.action.into_action(),
            contexts,
            combos,
            snippet: format!("{combos_display} {}", raw.description),
        })
    }

    fn matches(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.combos
            .iter()
            .any(|pattern| pattern.matches(key))
            .then_some(self.action)
    }
}

struct KeyPattern {
    matcher: CodeMatcher,
    required: KeyModifiers,
    allow_shift: bool,
    display: String,
}

impl KeyPattern {
    fn parse(spec: &str) -> Result<Self, String> {
        let display = spec.trim().to_string();
        let mut tokens = display
            .split('+')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        let Some(key_token) = tokens.pop() else {
            return Err("combo must contain a key".into());
        };
        let matcher = CodeMatcher::from_token(key_token)?;
        let mut required = KeyModifiers::empty();
        for token in tokens {
            match token.to_lowercase().as_str() {
                "ctrl" | "control" => required |= KeyModifiers::CONTROL,
                "shift" => required |= KeyModifiers::SHIFT,
                "alt" => required |= KeyModifiers::ALT,
                other => return Err(format!("unsupported modifier '{other}'")),
            }
        }
        let allow_shift = matcher.allows_extra_shift() && !required.contains(KeyModifiers::SHIFT);
        Ok(Self {
            matcher,
            required,
            allow_shift,
            display,
        })
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        if !self.matcher.matches(&key.code) || !key.modifiers.contains(self.required) {
            return false;
        }
        let extra = key.modifiers.difference(self.required);
        if self.allow_shift {
            extra.difference(KeyModifiers::SHIFT).is_empty()
        } else {
            extra.is_empty()
        }
    }
}

enum CodeMatcher {
    Literal(KeyCode),
    Alpha(char),
}

impl CodeMatcher {
    fn from_token(token: &str) -> Result<Self, String> {
        let normalized = token.to_lowercase();
        let matcher = match normalized.as_str() {
            "tab" => CodeMatcher::Literal(KeyCode::Tab),
            "backtab" => CodeMatcher::Literal(KeyCode::BackTab),
            "enter" => CodeMatcher::Literal(KeyCode::Enter),
            "esc" | "escape" => CodeMatcher::Literal(KeyCode::Esc),
            "up" => CodeMatcher::Literal(KeyCode::Up),
            "down" => CodeMatcher::Literal(KeyCode::Down),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => CodeMatcher::Alpha(ch),
                    _ => return Err(format!("unsupported key '{token}'")),
                }
            }
        };
        Ok(matcher)
    }

    fn matches(&self, code: &KeyCode) -> bool {
        match (self, code) {
            (CodeMatcher::Literal(expected), actual) => actual == expected,
            (CodeMatcher::Alpha(expected), KeyCode::Char(actual)) => {
                actual.to_ascii_lowercase() == *expected
            }
            _ => false,
        }
    }

    fn allows_extra_shift(&self) -> bool {
        matches!(
            self,
            CodeMatcher::Alpha(_) | CodeMatcher::Literal(KeyCode::BackTab)
        )
    }
}

/// Parsed key bindings plus the help snippets derived from them.
pub struct KeymapStore {
    bindings: Vec<KeyBinding>,
}

impl KeymapStore {
    /// Parses a keymap document in the same shape as the bundled default.
    pub fn from_json(source: &str) -> Result<Self> {
        let raw_entries: Vec<RawEntry> =
            serde_json::from_str(source).context("failed to parse keymap JSON")?;
        let bindings = raw_entries
            .into_iter()
            .map(KeyBinding::from_raw)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bindings })
    }

    pub fn classify(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings
            .iter()
            .find_map(|binding| binding.matches(key))
    }

    pub fn help_text(&self, context: KeymapContext) -> Option<String> {
        let snippets = self
            .bindings
            .iter()
            .filter(|binding| binding.contexts.contains(&context))
            .map(|binding| binding.snippet.as_str())
            .collect::<Vec<_>>();
        if snippets.is_empty() {
            None
        } else {
            Some(snippets.join(" • "))
        }
    }
}

impl std::fmt::Debug for KeymapStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeymapStore")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

static DEFAULT_STORE: LazyLock<Arc<KeymapStore>> = LazyLock::new(|| {
    Arc::new(
        KeymapStore::from_json(keymap_source!()).expect("invalid keymap/default.keymap.json"),
    )
});

pub fn default_store() -> Arc<KeymapStore> {
    Arc::clone(&DEFAULT_STORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn default_keymap_resolves_core_actions() {
        let store = default_store();
        let ctrl = KeyModifiers::CONTROL;
        assert_eq!(
            store.classify(&key(KeyCode::Char('s'), ctrl)),
            Some(KeyAction::Submit)
        );
        assert_eq!(
            store.classify(&key(KeyCode::Char('t'), ctrl)),
            Some(KeyAction::TogglePin)
        );
        assert_eq!(
            store.classify(&key(KeyCode::Char('c'), ctrl)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            store.classify(&key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(KeyAction::FocusStep(-1))
        );
        assert_eq!(
            store.classify(&key(KeyCode::Down, KeyModifiers::NONE)),
            Some(KeyAction::FocusStep(1))
        );
    }

    #[test]
    fn plain_letters_are_left_for_text_input() {
        let store = default_store();
        assert_eq!(
            store.classify(&key(KeyCode::Char('s'), KeyModifiers::NONE)),
            None
        );
        assert_eq!(
            store.classify(&key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            None
        );
    }

    #[test]
    fn help_text_depends_on_context() {
        let store = default_store();
        let pin_help = store.help_text(KeymapContext::Pin).unwrap();
        assert!(pin_help.contains("Ctrl+T Show/Hide PIN"));
        let field_help = store.help_text(KeymapContext::Field).unwrap();
        assert!(field_help.contains("Ctrl+S Submit"));
        assert!(field_help.contains("Ctrl+T Show/Hide PIN"));
        assert!(field_help.contains("Enter Next/Press"));
        assert!(field_help.contains("Ctrl+U Clear field"));
        let button_help = store.help_text(KeymapContext::Button).unwrap();
        assert!(!button_help.contains("Ctrl+U"));
    }

    #[test]
    fn ctrl_u_clears_the_field() {
        let store = default_store();
        assert_eq!(
            store.classify(&key(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(KeyAction::ClearField)
        );
    }

    #[test]
    fn custom_keymap_errors_are_reported() {
        let err = KeymapStore::from_json(
            r#"[{"id":"x","description":"x","contexts":["field"],"action":{"kind":"submit"},"combos":["Hyper+S"]}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported modifier"));
        assert!(KeymapStore::from_json("not json").is_err());
    }
}
