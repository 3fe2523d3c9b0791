use super::{
    actions::{FormCommand, TextEdit},
    field::FieldId,
    state::FormState,
};

/// Computes the next state for `command` without touching `state`.
pub fn reduce(state: &FormState, command: FormCommand) -> FormState {
    let mut next = state.clone();
    apply_command(&mut next, command);
    next
}

pub fn apply_command(state: &mut FormState, command: FormCommand) {
    match command {
        FormCommand::SetField { field, raw } => state.set_field(field, &raw),
        FormCommand::Edit { field, edit } => {
            let raw = edited_raw(&state.display_value(field), &edit);
            state.set_field(field, &raw);
        }
        FormCommand::TogglePinVisibility => state.toggle_pin_visible(),
    }
}

/// Builds the raw string an input element would report after `edit`.
///
/// Edits operate on the displayed text, so a PIN edit sees the dashed value;
/// the field update handler strips the dashes again.
fn edited_raw(displayed: &str, edit: &TextEdit) -> String {
    let mut raw = displayed.to_string();
    match edit {
        TextEdit::Insert(ch) => raw.push(*ch),
        TextEdit::Paste(text) => raw.push_str(text),
        TextEdit::Backspace => {
            raw.pop();
        }
        TextEdit::Clear => raw.clear(),
    }
    raw
}

/// Seeds a fresh state from `(field, raw)` pairs, in order.
pub fn seeded<'a>(values: impl IntoIterator<Item = (FieldId, &'a str)>) -> FormState {
    values
        .into_iter()
        .fold(FormState::new(), |state, (field, raw)| {
            state.with_field(field, raw)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(state: FormState, field: FieldId, text: &str) -> FormState {
        text.chars().fold(state, |state, ch| {
            reduce(
                &state,
                FormCommand::Edit {
                    field,
                    edit: TextEdit::Insert(ch),
                },
            )
        })
    }

    #[test]
    fn typing_into_pin_matches_pasting() {
        let typed = type_into(FormState::new(), FieldId::Pin, "abc1234567890123456");
        assert_eq!(typed.pin(), "1234567890123456");
        assert_eq!(typed.pin_display(), "1234-5678-9012-3456");
        assert!(typed.is_submittable());

        let pasted = reduce(
            &FormState::new(),
            FormCommand::Edit {
                field: FieldId::Pin,
                edit: TextEdit::Paste("abc1234567890123456".into()),
            },
        );
        assert_eq!(pasted, typed);
    }

    #[test]
    fn typing_past_sixteen_digits_is_ignored() {
        let state = type_into(FormState::new(), FieldId::Pin, "1234567890123456");
        let state = type_into(state, FieldId::Pin, "789");
        assert_eq!(state.pin(), "1234567890123456");
    }

    #[test]
    fn backspace_removes_a_digit_not_just_the_dash() {
        let state = type_into(FormState::new(), FieldId::Pin, "12345");
        assert_eq!(state.pin_display(), "1234-5");
        let state = reduce(
            &state,
            FormCommand::Edit {
                field: FieldId::Pin,
                edit: TextEdit::Backspace,
            },
        );
        assert_eq!(state.pin(), "1234");
        assert_eq!(state.pin_display(), "1234");
    }

    #[test]
    fn reduce_leaves_previous_state_untouched() {
        let before = FormState::new().with_field(FieldId::Email, "josh@example.com");
        let after = reduce(
            &before,
            FormCommand::SetField {
                field: FieldId::FirstName,
                raw: "Josh".into(),
            },
        );
        assert_eq!(before.value(FieldId::FirstName), "");
        assert_eq!(after.value(FieldId::FirstName), "Josh");
        assert_eq!(after.value(FieldId::Email), "josh@example.com");
    }

    #[test]
    fn clear_and_toggle() {
        let state = seeded([(FieldId::LastName, "Kim"), (FieldId::Pin, "12")]);
        let state = reduce(
            &state,
            FormCommand::Edit {
                field: FieldId::LastName,
                edit: TextEdit::Clear,
            },
        );
        assert_eq!(state.value(FieldId::LastName), "");
        let state = reduce(&state, FormCommand::TogglePinVisibility);
        assert!(state.pin_visible());
        assert_eq!(state.pin(), "12");
    }
}
