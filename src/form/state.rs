use serde::{Deserialize, Serialize};
use tracing::debug;

use super::field::FieldId;
use super::pin;

/// Everything the interest form holds.
///
/// Field values are plain text. The PIN is kept canonical (digits only, at
/// most sixteen) by [`FormState::set_field`]; its dashed form is derived on
/// demand through [`FormState::pin_display`]. `pin_visible` is view state and
/// never leaves the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawFormState")]
pub struct FormState {
    first_name: String,
    last_name: String,
    phone: String,
    email: String,
    cost_guess: String,
    spidr_pin: String,
    #[serde(skip)]
    pin_visible: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::FirstName => &self.first_name,
            FieldId::LastName => &self.last_name,
            FieldId::Phone => &self.phone,
            FieldId::Email => &self.email,
            FieldId::CostGuess => &self.cost_guess,
            FieldId::Pin => &self.spidr_pin,
        }
    }

    /// Replaces one field with `raw`, leaving every other field untouched.
    ///
    /// PIN input is sanitized; all other input is stored verbatim.
    pub fn set_field(&mut self, field: FieldId, raw: &str) {
        let slot = match field {
            FieldId::FirstName => &mut self.first_name,
            FieldId::LastName => &mut self.last_name,
            FieldId::Phone => &mut self.phone,
            FieldId::Email => &mut self.email,
            FieldId::CostGuess => &mut self.cost_guess,
            FieldId::Pin => {
                self.spidr_pin = pin::sanitize_pin(raw);
                debug!(field = %field, digits = self.spidr_pin.len(), "pin updated");
                return;
            }
        };
        *slot = raw.to_string();
        debug!(field = %field, len = slot.chars().count(), "field updated");
    }

    /// Consuming form of [`FormState::set_field`].
    pub fn with_field(mut self, field: FieldId, raw: &str) -> Self {
        self.set_field(field, raw);
        self
    }

    pub fn pin(&self) -> &str {
        &self.spidr_pin
    }

    pub fn pin_display(&self) -> String {
        pin::format_pin(&self.spidr_pin)
    }

    /// The PIN as it should be drawn: dashed, and masked unless visible.
    pub fn pin_rendered(&self) -> String {
        let display = self.pin_display();
        if self.pin_visible {
            display
        } else {
            pin::mask_pin(&display)
        }
    }

    /// Text an input widget shows for `field`; the PIN is shown dashed.
    pub fn display_value(&self, field: FieldId) -> String {
        if field.is_pin() {
            self.pin_display()
        } else {
            self.value(field).to_string()
        }
    }

    pub fn pin_visible(&self) -> bool {
        self.pin_visible
    }

    pub fn set_pin_visible(&mut self, visible: bool) {
        self.pin_visible = visible;
    }

    pub fn toggle_pin_visible(&mut self) {
        self.pin_visible = !self.pin_visible;
    }

    pub fn is_submittable(&self) -> bool {
        pin::is_complete(&self.spidr_pin)
    }

    pub fn pin_advisory(&self) -> Option<&'static str> {
        (self.spidr_pin.len() < pin::PIN_DIGITS).then_some(pin::PIN_ADVISORY)
    }

    pub fn is_empty(&self) -> bool {
        FieldId::ALL.iter().all(|field| self.value(*field).is_empty())
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawFormState {
    first_name: String,
    last_name: String,
    phone: String,
    email: String,
    cost_guess: String,
    spidr_pin: String,
}

impl From<RawFormState> for FormState {
    fn from(raw: RawFormState) -> Self {
        FormState::new()
            .with_field(FieldId::FirstName, &raw.first_name)
            .with_field(FieldId::LastName, &raw.last_name)
            .with_field(FieldId::Phone, &raw.phone)
            .with_field(FieldId::Email, &raw.email)
            .with_field(FieldId::CostGuess, &raw.cost_guess)
            .with_field(FieldId::Pin, &raw.spidr_pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn starts_empty_and_gated() {
        let state = FormState::new();
        assert!(state.is_empty());
        assert!(!state.is_submittable());
        assert!(!state.pin_visible());
        assert_eq!(state.pin_advisory(), Some(pin::PIN_ADVISORY));
    }

    #[test]
    fn pin_input_is_canonicalized() {
        let state = FormState::new().with_field(FieldId::Pin, "abc1234567890123456");
        assert_eq!(state.pin(), "1234567890123456");
        assert_eq!(state.pin_display(), "1234-5678-9012-3456");
        assert!(state.is_submittable());
        assert_eq!(state.pin_advisory(), None);
    }

    #[test]
    fn dashed_pin_input_drops_separators() {
        let state = FormState::new().with_field(FieldId::Pin, "12-34");
        assert_eq!(state.pin(), "1234");
        assert_eq!(state.pin_display(), "1234");
        assert!(!state.is_submittable());
    }

    #[test]
    fn other_fields_store_raw_text_without_touching_neighbours() {
        let state = FormState::new().with_field(FieldId::FirstName, "Josh");
        assert_eq!(state.value(FieldId::FirstName), "Josh");
        for field in FieldId::ALL.into_iter().filter(|f| *f != FieldId::FirstName) {
            assert_eq!(state.value(field), "", "{field} should stay empty");
        }

        let state = state
            .with_field(FieldId::Phone, "  (555) 123 ")
            .with_field(FieldId::CostGuess, "$1e9");
        assert_eq!(state.value(FieldId::FirstName), "Josh");
        assert_eq!(state.value(FieldId::Phone), "  (555) 123 ");
        assert_eq!(state.value(FieldId::CostGuess), "$1e9");
    }

    #[test]
    fn pin_rendering_follows_visibility() {
        let mut state = FormState::new().with_field(FieldId::Pin, "123456");
        assert_eq!(state.pin_rendered(), "••••-••");
        state.toggle_pin_visible();
        assert_eq!(state.pin_rendered(), "1234-56");
        assert_eq!(state.display_value(FieldId::Pin), "1234-56");
    }

    #[test]
    fn serializes_form_data_without_view_state() {
        let mut state = FormState::new()
            .with_field(FieldId::FirstName, "Josh")
            .with_field(FieldId::Pin, "1234-5678-9012-3456");
        state.set_pin_visible(true);
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            json!({
                "firstName": "Josh",
                "lastName": "",
                "phone": "",
                "email": "",
                "costGuess": "",
                "spidrPin": "1234567890123456"
            })
        );
    }

    #[test]
    fn deserializing_enforces_pin_invariant() {
        let state: FormState =
            serde_json::from_value(json!({"lastName": "Kim", "spidrPin": "99-99-x9"})).unwrap();
        assert_eq!(state.value(FieldId::LastName), "Kim");
        assert_eq!(state.pin(), "99999");
    }
}
