use super::field::FieldId;

/// A keystroke-level change to a text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Paste(String),
    Backspace,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    /// Replace a field with the raw value an input reported.
    SetField { field: FieldId, raw: String },
    /// Apply an edit to the value currently displayed for a field.
    Edit { field: FieldId, edit: TextEdit },
    TogglePinVisibility,
}
