use interest_form::form::{FormCommand, TextEdit, pin, reduce};
use interest_form::{FieldId, FormState, MemorySink, SubmitOutcome, submit};
use pretty_assertions::assert_eq;

fn type_into(mut state: FormState, field: FieldId, text: &str) -> FormState {
    for ch in text.chars() {
        state = reduce(
            &state,
            FormCommand::Edit {
                field,
                edit: TextEdit::Insert(ch),
            },
        );
    }
    state
}

#[test]
fn junk_around_sixteen_digits_opens_the_gate() {
    let state = type_into(FormState::new(), FieldId::Pin, "abc1234567890123456");
    assert_eq!(state.pin(), "1234567890123456");
    assert_eq!(state.pin_display(), "1234-5678-9012-3456");
    assert!(state.is_submittable());
}

#[test]
fn dashed_short_pin_stays_gated() {
    let state = FormState::new().with_field(FieldId::Pin, "12-34");
    assert_eq!(state.pin(), "1234");
    assert_eq!(state.pin_display(), "1234");
    assert!(!state.is_submittable());
    assert_eq!(state.pin_advisory(), Some(pin::PIN_ADVISORY));
}

#[test]
fn first_name_is_stored_verbatim() {
    let state = FormState::new().with_field(FieldId::FirstName, "Josh");
    let expected: serde_json::Value = serde_json::json!({
        "firstName": "Josh",
        "lastName": "",
        "phone": "",
        "email": "",
        "costGuess": "",
        "spidrPin": ""
    });
    assert_eq!(serde_json::to_value(&state).unwrap(), expected);
}

#[test]
fn ten_digit_pin_cannot_be_delivered() {
    let state = FormState::new().with_field(FieldId::Pin, "1234567890");
    let mut sink = MemorySink::new();
    assert_eq!(
        submit(&state, &mut sink),
        SubmitOutcome::Blocked { digits: 10 }
    );
    assert!(sink.delivered().is_empty());
}

#[test]
fn every_sanitized_prefix_round_trips_through_display() {
    let source = "x9 8-7.6/5a4b3c2d1e0f9g8h7i6j5k4l3";
    for end in 0..=source.len() {
        let state = FormState::new().with_field(FieldId::Pin, &source[..end]);
        let canonical = state.pin();
        assert!(canonical.len() <= pin::PIN_DIGITS);
        assert!(canonical.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(state.pin_display().replace('-', ""), canonical);
        assert_eq!(pin::sanitize_pin(canonical), canonical);
        assert_eq!(
            state.is_submittable(),
            canonical.len() == pin::PIN_DIGITS,
            "gate mismatch at {end}"
        );
    }
}
