use std::{sync::Arc, time::Duration};

use super::keymap::{self, KeymapStore};

pub const DEFAULT_TITLE: &str = "Air Fryer Interest Form";

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub title: String,
    pub tick_rate: Duration,
    pub confirm_exit: bool,
    pub show_help: bool,
    /// Start with the PIN drawn in plain text.
    pub show_pin: bool,
    pub(crate) keymap_store: Arc<KeymapStore>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            tick_rate: Duration::from_millis(250),
            confirm_exit: true,
            show_help: true,
            show_pin: false,
            keymap_store: keymap::default_store(),
        }
    }
}

impl UiOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_show_pin(mut self, show: bool) -> Self {
        self.show_pin = show;
        self
    }

    pub fn with_keymap(mut self, store: KeymapStore) -> Self {
        self.keymap_store = Arc::new(store);
        self
    }
}
