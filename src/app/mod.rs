mod focus;
pub(crate) mod input;
pub(crate) mod keymap;
mod interest_form;
mod options;
mod runtime;
mod status;
mod terminal;

pub use focus::Focus;
pub use input::KeyAction;
pub use interest_form::InterestForm;
pub use keymap::{KeymapContext, KeymapStore};
pub use options::{DEFAULT_TITLE, UiOptions};
